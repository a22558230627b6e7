use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::catalog::builtin::builtin_catalog;
use crate::catalog::store::MealCatalog;
use crate::error::{PlannerError, Result};
use crate::models::{MealItem, MealRecord};

/// On-disk catalog encodings, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Csv,
    Json,
}

impl CatalogFormat {
    /// `.json` is JSON; anything else is read as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => CatalogFormat::Json,
            _ => CatalogFormat::Csv,
        }
    }
}

fn into_items(records: Vec<MealRecord>) -> Result<Vec<MealItem>> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            MealItem::try_from(record).map_err(|e| match e {
                PlannerError::InvalidItem(msg) => {
                    PlannerError::InvalidItem(format!("record {}: {}", i + 1, msg))
                }
                other => other,
            })
        })
        .collect()
}

/// Parse CSV with a `Name,Type,Category,Cal,Price` header.
pub fn parse_csv<R: Read>(reader: R) -> Result<MealCatalog> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let records = rdr
        .deserialize::<MealRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(MealCatalog::from_items(into_items(records)?))
}

/// Parse a JSON array of records using the same field names as the CSV header.
pub fn parse_json(content: &str) -> Result<MealCatalog> {
    let records: Vec<MealRecord> = serde_json::from_str(content)?;
    Ok(MealCatalog::from_items(into_items(records)?))
}

/// Load a catalog file. Duplicates collapse with the last occurrence winning.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<MealCatalog> {
    let path = path.as_ref();
    let catalog = match CatalogFormat::from_path(path) {
        CatalogFormat::Json => parse_json(&fs::read_to_string(path)?)?,
        CatalogFormat::Csv => parse_csv(fs::File::open(path)?)?,
    };
    debug!(path = %path.display(), items = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Load `path`, or the built-in catalog when the file does not exist.
pub fn load_or_builtin<P: AsRef<Path>>(path: P) -> Result<MealCatalog> {
    let path = path.as_ref();
    if path.exists() {
        return load_catalog(path);
    }
    warn!(path = %path.display(), "catalog file not found, using built-in catalog");
    builtin_catalog()
}

/// Write a catalog in the format implied by the extension.
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &MealCatalog) -> Result<()> {
    let path = path.as_ref();
    let records: Vec<MealRecord> = catalog.all_items().map(|m| MealRecord::from(&**m)).collect();

    match CatalogFormat::from_path(path) {
        CatalogFormat::Json => {
            let json = serde_json::to_string_pretty(&records)?;
            fs::write(path, json)?;
        }
        CatalogFormat::Csv => {
            let mut wtr = csv::Writer::from_path(path)?;
            for record in &records {
                wtr.serialize(record)?;
            }
            wtr.flush()?;
        }
    }

    debug!(path = %path.display(), items = records.len(), "catalog saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogProvider;
    use crate::models::MealSlot;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    const CSV: &str = "Name,Type,Category,Cal,Price\n\
        Omelette,Breakfast,Eggs,300,20\n\
        \"Rice, Beans\",Lunch,Vegetarian,600,30\n\
        Steak,Dinner,Meat,700,60\n\
        omelette,Breakfast,Eggs,320,22\n";

    #[test]
    fn test_parse_csv_with_quotes_and_duplicates() {
        let catalog = parse_csv(CSV.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);

        let breakfast = catalog.items(MealSlot::Breakfast);
        assert_eq!(breakfast.len(), 1);
        assert_eq!(breakfast[0].calories, 320.0);
        assert_eq!(catalog.items(MealSlot::Lunch)[0].name, "Rice, Beans");
    }

    #[test]
    fn test_parse_csv_reports_bad_record() {
        let csv = "Name,Type,Category,Cal,Price\nToast,Brunch,Bread,200,5\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidItem(ref m) if m.starts_with("record 1")));
    }

    #[test]
    fn test_parse_json_without_category() {
        let json = r#"[{"Name": "Toast", "Type": "breakfast", "Cal": 200, "Price": 5}]"#;
        let catalog = parse_json(json).unwrap();
        let toast = &catalog.items(MealSlot::Breakfast)[0];
        assert_eq!(toast.category, "");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(CatalogFormat::from_path(Path::new("a.JSON")), CatalogFormat::Json);
        assert_eq!(CatalogFormat::from_path(Path::new("a.csv")), CatalogFormat::Csv);
        assert_eq!(CatalogFormat::from_path(Path::new("catalog")), CatalogFormat::Csv);
    }

    #[test]
    fn test_csv_save_and_reload() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let catalog = load_catalog(file.path()).unwrap();

        let out = Builder::new().suffix(".csv").tempfile().unwrap();
        save_catalog(out.path(), &catalog).unwrap();
        assert_eq!(load_catalog(out.path()).unwrap(), catalog);
    }

    #[test]
    fn test_json_save_and_reload() {
        let catalog = parse_csv(CSV.as_bytes()).unwrap();
        let out = Builder::new().suffix(".json").tempfile().unwrap();
        save_catalog(out.path(), &catalog).unwrap();
        assert_eq!(load_catalog(out.path()).unwrap(), catalog);
    }

    #[test]
    fn test_missing_file_falls_back_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = load_or_builtin(dir.path().join("missing.csv")).unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.check_non_empty().is_ok());
    }
}
