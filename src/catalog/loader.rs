//! Catalog file loading
//!
//! A deployment can replace the built-in catalog with its own reference data.
//! The format is picked by file extension: JSON and YAML files carry the full
//! catalog structure (including the optional department-to-locations
//! assignment), CSV files carry flat `kind,id,name` rows for the four tables.

use std::path::Path;

use crate::error::{CascadeError, CascadeResult};

use super::{Catalog, CatalogEntry};

impl Catalog {
    /// Load a catalog from a file, dispatching on the extension
    pub fn load(path: &Path) -> CascadeResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let contents = std::fs::read_to_string(path).map_err(|e| {
            CascadeError::Import(format!("Failed to read catalog file {}: {}", path.display(), e))
        })?;

        let catalog = match extension.as_str() {
            "json" => serde_json::from_str::<Catalog>(&contents)
                .map_err(|e| CascadeError::Import(format!("Failed to parse catalog JSON: {}", e)))?,
            "yaml" | "yml" => serde_yaml::from_str::<Catalog>(&contents)
                .map_err(|e| CascadeError::Import(format!("Failed to parse catalog YAML: {}", e)))?,
            "csv" => Self::from_csv(&contents)?,
            other => {
                return Err(CascadeError::Import(format!(
                    "Unsupported catalog format '{}' (expected json, yaml, or csv)",
                    other
                )))
            }
        };

        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse flat CSV reference data: `kind,id,name` rows where kind is one
    /// of `subsidiary`, `department`, `location`, `gl_account`.
    fn from_csv(contents: &str) -> CascadeResult<Self> {
        let mut subsidiaries = Vec::new();
        let mut departments = Vec::new();
        let mut locations = Vec::new();
        let mut gl_accounts = Vec::new();

        let mut reader = csv::Reader::from_reader(contents.as_bytes());
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                CascadeError::Import(format!("Failed to read catalog CSV row {}: {}", row + 2, e))
            })?;
            if record.len() < 3 {
                return Err(CascadeError::Import(format!(
                    "Catalog CSV row {} has {} columns, expected kind,id,name",
                    row + 2,
                    record.len()
                )));
            }

            let entry = CatalogEntry::new(record[1].trim(), record[2].trim());
            match record[0].trim() {
                "subsidiary" => subsidiaries.push(entry),
                "department" => departments.push(entry),
                "location" => locations.push(entry),
                "gl_account" => gl_accounts.push(entry),
                other => {
                    return Err(CascadeError::Import(format!(
                        "Catalog CSV row {} has unknown kind '{}'",
                        row + 2,
                        other
                    )))
                }
            }
        }

        Ok(Self {
            subsidiaries,
            departments,
            locations,
            gl_accounts,
            department_locations: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let json = serde_json::to_string(&Catalog::builtin()).unwrap();
        let path = write_file(&dir, "catalog.json", &json);

        let loaded = Catalog::load(&path).unwrap();
        assert_eq!(loaded, Catalog::builtin());
    }

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let yaml = serde_yaml::to_string(&Catalog::builtin()).unwrap();
        let path = write_file(&dir, "catalog.yaml", &yaml);

        let loaded = Catalog::load(&path).unwrap();
        assert_eq!(loaded, Catalog::builtin());
    }

    #[test]
    fn test_load_csv() {
        let dir = TempDir::new().unwrap();
        let csv = "\
kind,id,name
subsidiary,1,Global Operations Inc.
department,d1,Sales & Marketing
department,d2,Engineering
location,l1,San Francisco HQ
gl_account,a1,4000 Sales Revenue
";
        let path = write_file(&dir, "catalog.csv", csv);

        let loaded = Catalog::load(&path).unwrap();
        assert_eq!(loaded.subsidiaries().len(), 1);
        assert_eq!(loaded.departments().len(), 2);
        assert_eq!(loaded.locations().len(), 1);
        assert_eq!(loaded.gl_accounts().len(), 1);
        assert_eq!(loaded.departments()[1].name, "Engineering");
    }

    #[test]
    fn test_load_csv_rejects_unknown_kind() {
        let dir = TempDir::new().unwrap();
        let csv = "kind,id,name\nwarehouse,w1,Warehouse One\n";
        let path = write_file(&dir, "catalog.csv", csv);

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CascadeError::Import(_)));
    }

    #[test]
    fn test_load_rejects_invalid_catalog() {
        let dir = TempDir::new().unwrap();
        // Missing tables: validation fails even though the CSV parses
        let csv = "kind,id,name\nsubsidiary,1,Global Operations Inc.\n";
        let path = write_file(&dir, "catalog.csv", csv);

        let err = Catalog::load(&path).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "catalog.toml", "whatever");

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CascadeError::Import(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Catalog::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CascadeError::Import(_)));
    }
}
