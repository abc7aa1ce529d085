//! Course vocabulary: difficulty levels and sortable fields.

use serde::{Deserialize, Serialize};

use crate::pagination::Sort;

/// Course difficulty level.
///
/// Wire format matches the variant name exactly ("Beginner", "Intermediate",
/// "Advanced"); the database stores the same strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Convert from the wire/storage string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Beginner" => Some(Self::Beginner),
            "Intermediate" => Some(Self::Intermediate),
            "Advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    /// Convert to the wire/storage string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

/// Fields the course listing can sort on.
///
/// Parsed from the `sortBy` query parameter (camelCase values).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CourseSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Code,
    Difficulty,
}

impl CourseSortField {
    /// Convert from a `sortBy` query value. Returns `None` for unknown fields.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            "title" => Some(Self::Title),
            "code" => Some(Self::Code),
            "difficulty" => Some(Self::Difficulty),
            _ => None,
        }
    }
}

/// Sort specification for course listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseSort {
    pub field: CourseSortField,
    pub order: Sort,
}

impl Default for CourseSort {
    fn default() -> Self {
        Self {
            field: CourseSortField::CreatedAt,
            order: Sort::Desc,
        }
    }
}
