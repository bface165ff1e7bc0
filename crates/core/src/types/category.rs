//! Jewelry category taxonomy and SKU formatting.
//!
//! The taxonomy is fixed: each category carries a SKU prefix and a closed
//! set of subcategories. The backend allocates a per-(user, category)
//! sequence number; the human-readable SKU is composed client-side.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of the zero-padded sequence component of a SKU.
const SKU_SEQUENCE_DIGITS: usize = 5;

/// Errors for category parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    /// Category name is not part of the taxonomy.
    #[error("Unknown category: {0}")]
    Unknown(String),
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Rings,
    Chains,
    Bracelets,
    Earrings,
    Necklaces,
    Watches,
    Pendants,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 7] = [
        Self::Rings,
        Self::Chains,
        Self::Bracelets,
        Self::Earrings,
        Self::Necklaces,
        Self::Watches,
        Self::Pendants,
    ];

    /// Category name as it appears on the wire and in the UI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rings => "Rings",
            Self::Chains => "Chains",
            Self::Bracelets => "Bracelets",
            Self::Earrings => "Earrings",
            Self::Necklaces => "Necklaces",
            Self::Watches => "Watches",
            Self::Pendants => "Pendants",
        }
    }

    /// SKU prefix for this category, including the trailing dash.
    #[must_use]
    pub const fn sku_prefix(self) -> &'static str {
        match self {
            Self::Rings => "RI-",
            Self::Chains => "CH-",
            Self::Bracelets => "BR-",
            Self::Earrings => "EA-",
            Self::Necklaces => "NE-",
            Self::Watches => "WA-",
            Self::Pendants => "PE-",
        }
    }

    /// The fixed subcategory set for this category.
    #[must_use]
    pub const fn subcategories(self) -> &'static [&'static str] {
        match self {
            Self::Rings | Self::Earrings | Self::Necklaces => &["Normal", "Diamond"],
            Self::Chains => &[
                "Monaco",
                "Semi Solid",
                "Solid",
                "Rope",
                "Franco",
                "Curb",
                "Princesa",
                "Diamond",
            ],
            Self::Bracelets => &[
                "Monaco",
                "Semi Solid",
                "Solid",
                "Rope",
                "Franco",
                "Curb",
                "Princesa",
            ],
            Self::Watches => &["Bulova"],
            Self::Pendants => &["Diamond", "Normal"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| CategoryError::Unknown(s.to_string()))
    }
}

/// Compose a human-readable SKU from a category and an allocated sequence
/// number, e.g. `Chains` + `7` -> `"CH-00007"`.
#[must_use]
pub fn format_sku(category: Category, sequence: u64) -> String {
    format!(
        "{}{sequence:0width$}",
        category.sku_prefix(),
        width = SKU_SEQUENCE_DIGITS
    )
}

/// Every `"{subcategory} {category}"` label in the taxonomy, the value set
/// for the category-label filter.
#[must_use]
pub fn category_filter_options() -> Vec<String> {
    Category::ALL
        .into_iter()
        .flat_map(|category| {
            category
                .subcategories()
                .iter()
                .map(move |sub| format!("{sub} {category}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sku_prefixes() {
        assert_eq!(Category::Rings.sku_prefix(), "RI-");
        assert_eq!(Category::Chains.sku_prefix(), "CH-");
        assert_eq!(Category::Bracelets.sku_prefix(), "BR-");
        assert_eq!(Category::Earrings.sku_prefix(), "EA-");
        assert_eq!(Category::Necklaces.sku_prefix(), "NE-");
        assert_eq!(Category::Watches.sku_prefix(), "WA-");
        assert_eq!(Category::Pendants.sku_prefix(), "PE-");
    }

    #[test]
    fn test_format_sku_zero_pads_to_five_digits() {
        assert_eq!(format_sku(Category::Chains, 7), "CH-00007");
        assert_eq!(format_sku(Category::Rings, 12345), "RI-12345");
        assert_eq!(format_sku(Category::Watches, 123_456), "WA-123456");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Pendants".parse::<Category>(), Ok(Category::Pendants));
        assert_eq!(
            "Cufflinks".parse::<Category>(),
            Err(CategoryError::Unknown("Cufflinks".to_string()))
        );
    }

    #[test]
    fn test_filter_options_cover_taxonomy() {
        let options = category_filter_options();
        assert!(options.contains(&"Diamond Rings".to_string()));
        assert!(options.contains(&"Princesa Bracelets".to_string()));
        assert!(options.contains(&"Bulova Watches".to_string()));
        // 2 + 8 + 7 + 2 + 2 + 1 + 2 labels
        assert_eq!(options.len(), 24);
    }
}
