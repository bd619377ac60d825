//! Fixed catalog enumerations.
//!
//! The shop sells math materials for a closed set of grade levels and exam
//! tracks, in a closed set of formats. Both sets are enums rather than free
//! strings so a typo in a collaborator payload is a decode error, not a
//! product that never matches any filter.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a category string is not one of the known values.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

/// Grade level or exam track a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    // rename_all would give "grade5"; the wire format hyphenates the digit.
    #[serde(rename = "grade-5")]
    Grade5,
    #[serde(rename = "grade-6")]
    Grade6,
    #[serde(rename = "grade-7")]
    Grade7,
    #[serde(rename = "grade-8")]
    Grade8,
    #[serde(rename = "grade-9")]
    Grade9,
    #[serde(rename = "grade-10")]
    Grade10,
    #[serde(rename = "grade-11")]
    Grade11,
    /// OGE - state exam after grade 9.
    OgeExam,
    /// EGE - state exam after grade 11.
    EgeExam,
}

impl Category {
    /// All categories, in catalog display order.
    pub const ALL: [Self; 9] = [
        Self::Grade5,
        Self::Grade6,
        Self::Grade7,
        Self::Grade8,
        Self::Grade9,
        Self::Grade10,
        Self::Grade11,
        Self::OgeExam,
        Self::EgeExam,
    ];

    /// Stable string form, matching the wire format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Grade5 => "grade-5",
            Self::Grade6 => "grade-6",
            Self::Grade7 => "grade-7",
            Self::Grade8 => "grade-8",
            Self::Grade9 => "grade-9",
            Self::Grade10 => "grade-10",
            Self::Grade11 => "grade-11",
            Self::OgeExam => "oge-exam",
            Self::EgeExam => "ege-exam",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CategoryParseError(s.to_owned()))
    }
}

/// Format of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductKind {
    /// Full methodical guide with theory and worked solutions.
    StudyGuide,
    /// Drill set of exercises.
    Trainer,
    /// Single-topic printable worksheet.
    Worksheet,
}

impl ProductKind {
    /// Stable string form, matching the wire format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StudyGuide => "study-guide",
            Self::Trainer => "trainer",
            Self::Worksheet => "worksheet",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_format() {
        let json = serde_json::to_string(&Category::Grade5).unwrap();
        assert_eq!(json, "\"grade-5\"");
        let back: Category = serde_json::from_str("\"ege-exam\"").unwrap();
        assert_eq!(back, Category::EgeExam);
    }

    #[test]
    fn test_category_from_str_matches_serde() {
        for category in Category::ALL {
            let parsed: Category = category.as_str().parse().unwrap();
            assert_eq!(parsed, category);

            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{category}\""));
        }
    }

    #[test]
    fn test_category_unknown() {
        assert!("grade-12".parse::<Category>().is_err());
    }

    #[test]
    fn test_product_kind_wire_format() {
        let json = serde_json::to_string(&ProductKind::StudyGuide).unwrap();
        assert_eq!(json, "\"study-guide\"");
    }
}
