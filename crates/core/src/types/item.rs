//! Inventory item model and its display projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::ItemId;
use super::money::{format_minor, format_minor_opt};

/// Placeholder shown when a category or subcategory is absent.
pub const PLACEHOLDER_LABEL: &str = "N/A";

/// A server-owned inventory item, already flattened from the wire shape.
///
/// All fields are read-only from the client's perspective; amounts are in
/// integer minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque server identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Stock-keeping unit code, absent for legacy items.
    pub sku: Option<String>,
    /// Primary category name, absent when the item was never categorized.
    pub category: Option<String>,
    /// Subcategory name within the category taxonomy.
    pub subcategory: Option<String>,
    /// Unit price in minor units.
    pub price: i64,
    /// Unit cost in minor units, absent when never recorded.
    pub cost: Option<i64>,
    /// Units on hand; servers omit the field for untracked items.
    pub stock_count: i64,
    /// Last modification instant.
    pub modified_time: DateTime<Utc>,
}

/// Display/filter projection of an [`Item`].
///
/// Produced by [`ItemRow::project`]; the source item is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub id: ItemId,
    pub name: String,
    pub sku: Option<String>,
    /// Combined `"{subcategory} {category}"` label, or the category alone,
    /// or [`PLACEHOLDER_LABEL`].
    pub category_label: String,
    /// Unit price in minor units.
    pub price: i64,
    /// Unit cost in minor units.
    pub cost: Option<i64>,
    pub stock_count: i64,
    pub modified_time: DateTime<Utc>,
}

impl ItemRow {
    /// Project an item into its display row.
    ///
    /// Pure: reads the item, produces a new row, touches nothing else.
    #[must_use]
    pub fn project(item: &Item) -> Self {
        let category = item
            .category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != PLACEHOLDER_LABEL);
        let subcategory = item
            .subcategory
            .as_deref()
            .filter(|s| !s.is_empty() && *s != PLACEHOLDER_LABEL);

        let category_label = match (category, subcategory) {
            (Some(cat), Some(sub)) => format!("{sub} {cat}"),
            (Some(cat), None) => cat.to_string(),
            (None, _) => PLACEHOLDER_LABEL.to_string(),
        };

        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            sku: item.sku.clone(),
            category_label,
            price: item.price,
            cost: item.cost,
            stock_count: item.stock_count,
            modified_time: item.modified_time,
        }
    }

    /// Price formatted for display, e.g. `"$19.99"`.
    #[must_use]
    pub fn display_price(&self) -> String {
        format_minor(self.price)
    }

    /// Cost formatted for display; unrecorded cost shows as `"$0.00"`.
    #[must_use]
    pub fn display_cost(&self) -> String {
        format_minor_opt(self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(category: Option<&str>, subcategory: Option<&str>) -> Item {
        Item {
            id: ItemId::new("I1"),
            name: "Test".to_string(),
            sku: Some("RI-00001".to_string()),
            category: category.map(String::from),
            subcategory: subcategory.map(String::from),
            price: 1999,
            cost: None,
            stock_count: 3,
            modified_time: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_label_combines_subcategory_and_category() {
        let row = ItemRow::project(&item(Some("Rings"), Some("Diamond")));
        assert_eq!(row.category_label, "Diamond Rings");
    }

    #[test]
    fn test_label_falls_back_to_category_alone() {
        let row = ItemRow::project(&item(Some("Rings"), None));
        assert_eq!(row.category_label, "Rings");

        // A literal placeholder subcategory is treated as absent.
        let row = ItemRow::project(&item(Some("Rings"), Some("N/A")));
        assert_eq!(row.category_label, "Rings");
    }

    #[test]
    fn test_label_placeholder_when_category_absent() {
        let row = ItemRow::project(&item(None, Some("Diamond")));
        assert_eq!(row.category_label, "N/A");
    }

    #[test]
    fn test_projection_does_not_touch_source() {
        let source = item(Some("Chains"), Some("Rope"));
        let before = source.clone();
        let _row = ItemRow::project(&source);
        assert_eq!(source, before);
    }

    #[test]
    fn test_display_amounts() {
        let row = ItemRow::project(&item(Some("Rings"), None));
        assert_eq!(row.display_price(), "$19.99");
        assert_eq!(row.display_cost(), "$0.00");
    }
}
