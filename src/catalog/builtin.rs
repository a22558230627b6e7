use crate::catalog::persistence::parse_csv;
use crate::catalog::store::MealCatalog;
use crate::error::Result;

/// Catalog shipped with the binary, in the CSV layout `init` writes out.
pub const BUILTIN_CATALOG_CSV: &str = include_str!("../../data/meal_catalog.csv");

pub fn builtin_catalog() -> Result<MealCatalog> {
    parse_csv(BUILTIN_CATALOG_CSV.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogProvider;
    use crate::models::MealSlot;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.items(MealSlot::Breakfast).len(), 26);
        assert_eq!(catalog.items(MealSlot::Lunch).len(), 33);
        assert_eq!(catalog.items(MealSlot::Dinner).len(), 19);
        assert!(catalog.categories().iter().any(|c| c == "Vegetarian"));
    }
}
