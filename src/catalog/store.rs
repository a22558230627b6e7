use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{PlannerError, Result};
use crate::models::{MealItem, MealSlot};

/// Read access to the eligible items of each slot.
///
/// The sampler and the evolution engine only ever see a catalog through
/// this trait.
pub trait CatalogProvider {
    /// Items of `slot`, in catalog order.
    fn items(&self, slot: MealSlot) -> &[Arc<MealItem>];
}

/// Meal items grouped by slot.
///
/// Deduplicated on `(slot, lowercase name)`: a later item replaces an
/// earlier one in place, so catalog order is otherwise preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealCatalog {
    breakfast: Vec<Arc<MealItem>>,
    lunch: Vec<Arc<MealItem>>,
    dinner: Vec<Arc<MealItem>>,
}

impl MealCatalog {
    pub fn from_items(items: impl IntoIterator<Item = MealItem>) -> Self {
        Self::from_shared(items.into_iter().map(Arc::new))
    }

    fn from_shared(items: impl IntoIterator<Item = Arc<MealItem>>) -> Self {
        let mut catalog = Self::default();
        let mut positions: HashMap<(MealSlot, String), usize> = HashMap::new();

        for item in items {
            let key = (item.slot, item.key());
            let list = catalog.slot_mut(item.slot);
            match positions.get(&key).copied() {
                Some(index) => list[index] = item,
                None => {
                    positions.insert(key, list.len());
                    list.push(item);
                }
            }
        }

        catalog
    }

    fn slot_mut(&mut self, slot: MealSlot) -> &mut Vec<Arc<MealItem>> {
        match slot {
            MealSlot::Breakfast => &mut self.breakfast,
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    pub fn len(&self) -> usize {
        self.breakfast.len() + self.lunch.len() + self.dinner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every item, breakfast first.
    pub fn all_items(&self) -> impl Iterator<Item = &Arc<MealItem>> {
        self.breakfast
            .iter()
            .chain(self.lunch.iter())
            .chain(self.dinner.iter())
    }

    /// Distinct categories, sorted case-insensitively.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: HashMap<String, String> = HashMap::new();
        for item in self.all_items() {
            if !item.category.is_empty() {
                seen.entry(item.category.to_lowercase())
                    .or_insert_with(|| item.category.clone());
            }
        }

        let mut categories: Vec<(String, String)> = seen.into_iter().collect();
        categories.sort();
        categories.into_iter().map(|(_, name)| name).collect()
    }

    /// A copy without any item whose category is in `excluded` (case-insensitive).
    pub fn without_categories<S: AsRef<str>>(&self, excluded: &[S]) -> Self {
        if excluded.is_empty() {
            return self.clone();
        }

        Self::from_shared(
            self.all_items()
                .filter(|item| !excluded.iter().any(|c| item.in_category(c.as_ref())))
                .cloned(),
        )
    }

    /// Fail with the first slot that has no items.
    pub fn check_non_empty(&self) -> Result<()> {
        match MealSlot::ALL.into_iter().find(|&s| self.items(s).is_empty()) {
            Some(slot) => Err(PlannerError::EmptyCatalog(slot)),
            None => Ok(()),
        }
    }

    /// `(min, max)` of price and calories for a slot.
    pub fn slot_ranges(&self, slot: MealSlot) -> Option<((f64, f64), (f64, f64))> {
        let items = self.items(slot);
        if items.is_empty() {
            return None;
        }
        let bounds = |f: fn(&MealItem) -> f64| {
            items.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), m| {
                (lo.min(f(m)), hi.max(f(m)))
            })
        };
        Some((bounds(|m| m.price), bounds(|m| m.calories)))
    }
}

impl CatalogProvider for MealCatalog {
    fn items(&self, slot: MealSlot) -> &[Arc<MealItem>] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str, slot: MealSlot, price: f64) -> MealItem {
        MealItem::new(name, category, 300.0, price, slot).unwrap()
    }

    fn sample() -> MealCatalog {
        MealCatalog::from_items([
            item("Omelette", "Eggs", MealSlot::Breakfast, 20.0),
            item("Yogurt", "Dairy", MealSlot::Breakfast, 15.0),
            item("Burger", "Meat", MealSlot::Lunch, 45.0),
            item("Salad", "Vegetarian", MealSlot::Lunch, 30.0),
            item("Steak", "Meat", MealSlot::Dinner, 60.0),
            item("Soup", "vegetarian", MealSlot::Dinner, 25.0),
        ])
    }

    #[test]
    fn test_groups_by_slot_in_order() {
        let catalog = sample();
        let lunch: Vec<&str> = catalog
            .items(MealSlot::Lunch)
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(lunch, vec!["Burger", "Salad"]);
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let catalog = MealCatalog::from_items([
            item("Burger", "Meat", MealSlot::Lunch, 45.0),
            item("Salad", "Vegetarian", MealSlot::Lunch, 30.0),
            item("burger", "Meat", MealSlot::Lunch, 50.0),
        ]);
        let lunch = catalog.items(MealSlot::Lunch);
        assert_eq!(lunch.len(), 2);
        assert_eq!(lunch[0].name, "burger");
        assert_eq!(lunch[0].price, 50.0);
    }

    #[test]
    fn test_same_name_in_two_slots_is_kept() {
        let catalog = MealCatalog::from_items([
            item("Toast", "Bread", MealSlot::Breakfast, 10.0),
            item("Toast", "Bread", MealSlot::Dinner, 10.0),
        ]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_categories_are_distinct_and_sorted() {
        assert_eq!(
            sample().categories(),
            vec!["Dairy", "Eggs", "Meat", "Vegetarian"]
        );
    }

    #[test]
    fn test_without_categories_is_case_insensitive() {
        let catalog = sample().without_categories(&["VEGETARIAN"]);
        assert_eq!(catalog.len(), 4);
        assert!(catalog.all_items().all(|m| !m.in_category("vegetarian")));
    }

    #[test]
    fn test_check_non_empty_names_the_slot() {
        let catalog = sample().without_categories(&["Meat", "Vegetarian"]);
        assert!(matches!(
            catalog.check_non_empty(),
            Err(PlannerError::EmptyCatalog(MealSlot::Lunch))
        ));
        assert!(sample().check_non_empty().is_ok());
    }

    #[test]
    fn test_slot_ranges() {
        let ((min_price, max_price), _) = sample().slot_ranges(MealSlot::Dinner).unwrap();
        assert_eq!((min_price, max_price), (25.0, 60.0));
        assert!(MealCatalog::default().slot_ranges(MealSlot::Lunch).is_none());
    }
}
