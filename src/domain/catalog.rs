//! Default Catalog
//!
//! Built-in seed items per category. A checklist that has never been
//! persisted starts as exactly this list, all unchecked.

use super::category::Category;
use super::checklist_item::{ChecklistCollection, ChecklistItem};

const FIRE_ITEMS: &[(&str, &str)] = &[
    ("fire-1", "Fire Extinguisher"),
    ("fire-2", "Smoke Detectors (tested)"),
    ("fire-3", "Escape Plan"),
    ("fire-4", "Emergency Contact List"),
    ("fire-5", "Flashlight"),
    ("fire-6", "Fire Blanket"),
    ("fire-7", "Escape Ladder (upper floors)"),
    ("fire-8", "Carbon Monoxide Detector"),
    ("fire-9", "Go-Bag by the Door"),
    ("fire-10", "Copies of Important Documents"),
];

const EARTHQUAKE_ITEMS: &[(&str, &str)] = &[
    ("earthquake-1", "3-day Water Supply"),
    ("earthquake-2", "3-day Food Supply"),
    ("earthquake-3", "First Aid Kit"),
    ("earthquake-4", "Flashlight & Extra Batteries"),
    ("earthquake-5", "Battery-powered Radio"),
    ("earthquake-6", "Emergency Whistle"),
    ("earthquake-7", "Dust Masks"),
    ("earthquake-8", "Plastic Sheeting & Duct Tape"),
    ("earthquake-9", "Wrench or Pliers"),
    ("earthquake-10", "Manual Can Opener"),
    ("earthquake-11", "Local Maps"),
    ("earthquake-12", "Cell Phone with Chargers"),
];

const FLOOD_ITEMS: &[(&str, &str)] = &[
    ("flood-1", "Sandbags"),
    ("flood-2", "Waterproof Containers"),
    ("flood-3", "Evacuation Route Map"),
    ("flood-4", "Important Documents (waterproofed)"),
    ("flood-5", "Life Jackets"),
];

const HURRICANE_ITEMS: &[(&str, &str)] = &[
    ("hurricane-1", "Plywood for Windows"),
    ("hurricane-2", "7-Day Food Supply"),
    ("hurricane-3", "Generator"),
    ("hurricane-4", "Fuel for Generator"),
    ("hurricane-5", "Battery-Powered Lights"),
];

const POWER_OUTAGE_ITEMS: &[(&str, &str)] = &[
    ("power-1", "Flashlights"),
    ("power-2", "Extra Batteries"),
    ("power-3", "Battery-powered Radio"),
    ("power-4", "Candles & Matches"),
    ("power-5", "Portable Phone Chargers"),
    ("power-6", "Non-perishable Food"),
    ("power-7", "Manual Can Opener"),
    ("power-8", "Bottled Water"),
    ("power-9", "First Aid Kit"),
    ("power-10", "Blankets"),
    ("power-11", "Generator (if available)"),
    ("power-12", "Fuel for Generator"),
    ("power-13", "Ice Packs for Cooler"),
];

fn entries(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Fire => FIRE_ITEMS,
        Category::Earthquake => EARTHQUAKE_ITEMS,
        Category::Flood => FLOOD_ITEMS,
        Category::Hurricane => HURRICANE_ITEMS,
        Category::PowerOutage => POWER_OUTAGE_ITEMS,
    }
}

/// Fresh copy of the seed list; callers may mutate it freely
pub fn default_items(category: Category) -> ChecklistCollection {
    let items = entries(category)
        .iter()
        .map(|(id, label)| ChecklistItem::new(*id, *label))
        .collect();
    // Catalog entries are unique and non-blank (see tests), so this never falls back.
    ChecklistCollection::from_items(items).unwrap_or_default()
}

/// Lookup by name; unknown names give an empty list
pub fn default_items_for(name: &str) -> ChecklistCollection {
    Category::parse(name)
        .map(default_items)
        .unwrap_or_default()
}

pub fn is_default_id(category: Category, id: &str) -> bool {
    entries(category).iter().any(|(default_id, _)| *default_id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::first_duplicate_id;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(default_items(Category::Fire).len(), 10);
        assert_eq!(default_items(Category::Earthquake).len(), 12);
        assert_eq!(default_items(Category::Flood).len(), 5);
        assert_eq!(default_items(Category::Hurricane).len(), 5);
        assert_eq!(default_items(Category::PowerOutage).len(), 13);
    }

    #[test]
    fn test_entries_are_valid_seeds() {
        for category in Category::ALL {
            let raw: Vec<ChecklistItem> = entries(category)
                .iter()
                .map(|(id, label)| ChecklistItem::new(*id, *label))
                .collect();
            assert!(first_duplicate_id(&raw).is_none(), "{category} has duplicate ids");

            for item in &raw {
                assert!(item.id.starts_with(&format!("{}-", category.id_prefix())));
                assert!(!item.label.trim().is_empty());
                assert!(!item.checked);
                assert!(!item.is_custom);
            }
        }
    }

    #[test]
    fn test_copies_are_independent() {
        let mut first = default_items(Category::Flood);
        first.toggle("flood-1");
        first.remove("flood-2");

        let second = default_items(Category::Flood);
        assert_eq!(second.len(), 5);
        assert_eq!(second.completed(), 0);
    }

    #[test]
    fn test_unknown_name_is_empty() {
        assert!(default_items_for("tornado").is_empty());
        assert_eq!(default_items_for("hurricane").len(), 5);
    }

    #[test]
    fn test_is_default_id() {
        assert!(is_default_id(Category::PowerOutage, "power-13"));
        assert!(!is_default_id(Category::PowerOutage, "power-custom-1"));
        assert!(!is_default_id(Category::Fire, "flood-1"));
    }
}
