use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::quantity::{Quantity, Unit};

const CATALOG: [(&str, f64); 10] = [
    ("Wheat Bagel", 240000.0),
    ("Bran with Raisins", 190000.0),
    ("Regular Instant Coffee", 1000.0),
    ("Banana", 439320.0),
    ("Cranberry Bagel", 416000.0),
    ("Oatmeal", 150000.0),
    ("Fruits Salad", 60000.0),
    ("Fried Sea Bass", 200000.0),
    ("Chips", 190000.0),
    ("Chicken Taco", 170000.0),
];

/// A logged food and the energy it provides. Food items are immutable;
/// two items are equal when both name and energy match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FoodItem {
    name: String,
    joules: f64,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, joules: f64) -> Self {
        Self {
            name: name.into(),
            joules,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn joules(&self) -> f64 {
        self.joules
    }

    pub fn energy(&self) -> Quantity {
        Quantity::new(self.joules, Unit::Joule)
    }

    /// Foods offered when logging a meal.
    pub fn catalog() -> Vec<FoodItem> {
        CATALOG
            .iter()
            .map(|(name, joules)| FoodItem::new(*name, *joules))
            .collect()
    }

    pub fn find_in_catalog(name: &str) -> Option<FoodItem> {
        CATALOG
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name.trim()))
            .map(|(name, joules)| FoodItem::new(*name, *joules))
    }
}

impl fmt::Display for FoodItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{name: {:?}, joules: {}}}", self.name, self.joules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_structural() {
        assert_eq!(FoodItem::new("Banana", 439320.0), FoodItem::new("Banana", 439320.0));
        assert_ne!(FoodItem::new("Banana", 439320.0), FoodItem::new("Banana", 1.0));
        assert_ne!(FoodItem::new("Banana", 439320.0), FoodItem::new("Oatmeal", 439320.0));
    }

    #[test]
    fn catalog_has_every_picker_entry() {
        let catalog = FoodItem::catalog();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog[0], FoodItem::new("Wheat Bagel", 240000.0));
        assert_eq!(catalog[9], FoodItem::new("Chicken Taco", 170000.0));
    }

    #[test]
    fn finds_catalog_entries_ignoring_case() {
        assert_eq!(
            FoodItem::find_in_catalog("fried sea bass"),
            Some(FoodItem::new("Fried Sea Bass", 200000.0))
        );
        assert_eq!(FoodItem::find_in_catalog("Pizza"), None);
    }

    #[test]
    fn description_lists_both_fields() {
        assert_eq!(
            FoodItem::new("Chips", 190000.0).to_string(),
            "{name: \"Chips\", joules: 190000}"
        );
    }
}
