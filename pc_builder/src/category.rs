//! The closed set of component kinds a build is composed from.
//!
//! Typical usage:
//! ```
//! use pc_builder::category::Category;
//!
//! let c: Category = " gpu ".parse().unwrap();
//! assert_eq!(c, Category::Gpu);
//! assert_eq!(c.to_string(), "GPU");
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Component category. Declaration order is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Processor
    #[serde(rename = "CPU")]
    Cpu,
    /// Mainboard
    Motherboard,
    /// Graphics card
    #[serde(rename = "GPU")]
    Gpu,
    /// Memory modules
    #[serde(rename = "RAM")]
    Ram,
    /// Drives
    Storage,
    /// Power supply
    #[serde(rename = "PSU")]
    Psu,
    /// Chassis
    Case,
    /// CPU cooler
    Cooler,
}

/// Raised when a string names none of the known categories.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown category: '{0}'")]
pub struct UnknownCategory(pub String);

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 8] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Gpu,
        Category::Ram,
        Category::Storage,
        Category::Psu,
        Category::Case,
        Category::Cooler,
    ];

    /// Fallback used by the importer when a row names no known category.
    pub const DEFAULT: Category = Category::Cpu;

    /// Canonical label (also the serialized form).
    pub const fn label(self) -> &'static str {
        match self {
            Category::Cpu => "CPU",
            Category::Motherboard => "Motherboard",
            Category::Gpu => "GPU",
            Category::Ram => "RAM",
            Category::Storage => "Storage",
            Category::Psu => "PSU",
            Category::Case => "Case",
            Category::Cooler => "Cooler",
        }
    }

    /// Position in [`Category::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("motherboard".parse::<Category>().unwrap(), Category::Motherboard);
        assert_eq!("PSU".parse::<Category>().unwrap(), Category::Psu);
        assert_eq!("cooler ".parse::<Category>().unwrap(), Category::Cooler);
        assert!("videocard".parse::<Category>().is_err());
    }

    #[test]
    fn index_matches_all_order() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn serde_uses_labels() {
        let s = serde_json::to_string(&Category::Ram).unwrap();
        assert_eq!(s, "\"RAM\"");
        let c: Category = serde_json::from_str("\"Case\"").unwrap();
        assert_eq!(c, Category::Case);
    }
}
