//! Module catalog - the closed set of modules the app ships with.

use serde::{Deserialize, Serialize};
use crate::id::ModuleId;

/// Quiz length used by every built-in module.
const DEFAULT_QUIZ_LENGTH: u32 = 3;

/// Difficulty level of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// Entry level
    Beginner,
    /// Requires the beginner modules
    Intermediate,
    /// Deep dives
    Advanced,
}

impl Level {
    /// Human readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

/// Metadata for one catalog module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Module id
    pub id: ModuleId,

    /// Display title
    pub title: String,

    /// Difficulty level
    pub level: Level,

    /// Number of lessons in the module
    pub lessons: u32,

    /// Number of questions in the module quiz
    pub quiz_length: u32,
}

impl CatalogEntry {
    /// Create an entry with the default quiz length.
    pub fn new(id: impl Into<ModuleId>, title: impl Into<String>, level: Level, lessons: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level,
            lessons,
            quiz_length: DEFAULT_QUIZ_LENGTH,
        }
    }

    /// Override the quiz length.
    pub fn with_quiz_length(mut self, quiz_length: u32) -> Self {
        self.quiz_length = quiz_length;
        self
    }
}

/// Ordered list of known modules.
///
/// Order is display order. Ids are unique; [`Catalog::new`] keeps the first
/// entry for a duplicated id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from entries.
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut unique: Vec<CatalogEntry> = Vec::new();
        for entry in entries {
            if !unique.iter().any(|e| e.id == entry.id) {
                unique.push(entry);
            }
        }
        Self { entries: unique }
    }

    /// The modules bundled with the app.
    pub fn builtin() -> Self {
        Self::new([
            CatalogEntry::new("react-basics", "React Basics", Level::Beginner, 5),
            CatalogEntry::new("react-native-intro", "React Native Introduction", Level::Beginner, 4),
            CatalogEntry::new("styling", "Styling in React Native", Level::Beginner, 6),
            CatalogEntry::new("navigation", "Navigation", Level::Intermediate, 4),
        ])
    }

    /// Look up a module.
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id.as_str() == id)
    }

    /// Whether the id names a catalog module.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Quiz length for a module, if known.
    pub fn quiz_length(&self, id: &str) -> Option<u32> {
        self.get(id).map(|e| e.quiz_length)
    }

    /// Iterate entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no modules.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 4);
        assert!(catalog.contains("react-basics"));
        assert!(!catalog.contains("rust-basics"));
        assert_eq!(catalog.quiz_length("navigation"), Some(3));
        assert_eq!(catalog.get("navigation").unwrap().level, Level::Intermediate);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let catalog = Catalog::new([
            CatalogEntry::new("a", "First", Level::Beginner, 1),
            CatalogEntry::new("a", "Second", Level::Advanced, 2).with_quiz_length(10),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a").unwrap().title, "First");
        assert_eq!(catalog.quiz_length("a"), Some(3));
    }
}
