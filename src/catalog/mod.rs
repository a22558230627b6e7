pub mod builtin;
pub mod persistence;
pub mod store;

pub use builtin::{BUILTIN_CATALOG_CSV, builtin_catalog};
pub use persistence::{
    CatalogFormat, load_catalog, load_or_builtin, parse_csv, parse_json, save_catalog,
};
pub use store::{CatalogProvider, MealCatalog};
