use super::atomic_write;
use crate::{
    config::PlaintsConfig,
    error::{PlaintsError, Result},
    model::{OptionKind, TaxonomyOption},
    taxonomy::{BuiltinOptions, OptionSource, builtin, filter_options},
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const OPTIONS_FILE: &str = "options.yml";

/// Taxonomy options stored as a YAML sequence in `options.yml`.
///
/// A missing file means the store was never initialised; reads fail rather
/// than returning an empty taxonomy.
#[derive(Debug, Clone)]
pub struct OptionRepository {
    data_path: PathBuf,
    options_path: PathBuf,
}

impl OptionRepository {
    pub fn new(config: &PlaintsConfig, project_root: &Path) -> Self {
        Self::at(&config.data_path(project_root))
    }

    pub fn at(data_path: &Path) -> Self {
        Self {
            data_path: data_path.to_path_buf(),
            options_path: data_path.join(OPTIONS_FILE),
        }
    }

    pub fn options_path(&self) -> &Path {
        &self.options_path
    }

    pub fn is_initialized(&self) -> bool {
        self.options_path.exists()
    }

    /// Reads every stored option in file order.
    pub fn load(&self) -> Result<Vec<TaxonomyOption>> {
        if !self.options_path.exists() {
            return Err(PlaintsError::StoreUnavailable(format!(
                "{} does not exist",
                self.options_path.display()
            )));
        }
        let content = std::fs::read_to_string(&self.options_path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Replaces the stored options. Later duplicates of an existing
    /// (type, value, parentCategory) key are dropped.
    pub fn save(&self, options: &[TaxonomyOption]) -> Result<()> {
        let mut seen = HashSet::new();
        let unique: Vec<&TaxonomyOption> = options
            .iter()
            .filter(|opt| seen.insert(opt.key()))
            .collect();

        std::fs::create_dir_all(&self.data_path)?;
        let content = serde_yaml::to_string(&unique)?;
        atomic_write(&self.options_path, content.as_bytes())
    }

    /// Writes the built-in taxonomy when the store holds no options.
    /// Returns whether anything was written.
    pub fn seed(&self) -> Result<bool> {
        if self.is_initialized() && !self.load()?.is_empty() {
            tracing::debug!("Option store already has data, skipping seed");
            return Ok(false);
        }

        let options = BuiltinOptions::all();
        self.save(&options)?;
        tracing::info!(count = options.len(), "Seeded taxonomy options");
        Ok(true)
    }

    /// Sets the code of every known department whose stored code differs.
    /// Departments without a known code are left alone. Returns how many
    /// records changed.
    pub fn ensure_department_codes(&self) -> Result<usize> {
        let mut options = self.load()?;
        let mut changed = 0;

        for opt in options
            .iter_mut()
            .filter(|o| o.kind == OptionKind::Department)
        {
            let Some(code) = builtin::department_code(&opt.value) else {
                continue;
            };
            if opt.code.as_deref() != Some(code) {
                tracing::debug!(department = %opt.value, code, "Updating department code");
                opt.code = Some(code.to_string());
                changed += 1;
            }
        }

        if changed > 0 {
            self.save(&options)?;
            tracing::info!(changed, "Department codes ensured");
        }
        Ok(changed)
    }
}

impl OptionSource for OptionRepository {
    fn list(&self, kind: OptionKind, parent: Option<&str>) -> Result<Vec<TaxonomyOption>> {
        Ok(filter_options(self.load()?, kind, parent))
    }

    fn list_all(&self) -> Result<Vec<TaxonomyOption>> {
        self.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (OptionRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = OptionRepository::at(&temp_dir.path().join(".plaints"));
        (repo, temp_dir)
    }

    #[test]
    fn test_unseeded_store_fails_reads() {
        let (repo, _temp) = setup();
        assert!(matches!(
            repo.list(OptionKind::Category, None),
            Err(PlaintsError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn test_seed_is_idempotent() {
        let (repo, _temp) = setup();
        assert!(repo.seed().unwrap());
        assert!(!repo.seed().unwrap());
        assert_eq!(repo.load().unwrap().len(), 3 + 5 + 14);
    }

    #[test]
    fn test_seed_keeps_existing_options() {
        let (repo, _temp) = setup();
        repo.save(&[TaxonomyOption::category("library")]).unwrap();
        assert!(!repo.seed().unwrap());
        let categories = repo.list(OptionKind::Category, None).unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].value, "library");
    }

    #[test]
    fn test_list_subcategories_by_parent() {
        let (repo, _temp) = setup();
        repo.seed().unwrap();

        let subs = repo.list(OptionKind::SubCategory, Some("REQUEST")).unwrap();
        let values: Vec<&str> = subs.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["wheelchair", "mat", "Table-Cloth", "Sound-System", "Seminar-Hall"]
        );
    }

    #[test]
    fn test_save_drops_case_insensitive_duplicates() {
        let (repo, _temp) = setup();
        repo.save(&[
            TaxonomyOption::sub_category("Fan", "facility"),
            TaxonomyOption::sub_category("fan", "Facility"),
            TaxonomyOption::sub_category("fan", "hostel"),
        ])
        .unwrap();
        assert_eq!(repo.load().unwrap().len(), 2);
    }

    #[test]
    fn test_ensure_department_codes() {
        let (repo, _temp) = setup();
        repo.save(&[
            TaxonomyOption::department("computer science", None),
            TaxonomyOption::department("Civil Engineering", Some("00000")),
            TaxonomyOption::department("Mechanical Engineering", Some("61210")),
            TaxonomyOption::department("Information Technology", None),
            TaxonomyOption::department("Philosophy", Some("777")),
        ])
        .unwrap();

        assert_eq!(repo.ensure_department_codes().unwrap(), 2);
        assert_eq!(repo.ensure_department_codes().unwrap(), 0);

        let depts = repo.list(OptionKind::Department, None).unwrap();
        let codes: Vec<Option<&str>> = depts.iter().map(|d| d.code.as_deref()).collect();
        assert_eq!(
            codes,
            vec![Some("24510"), Some("19110"), Some("61210"), None, Some("777")]
        );
    }
}
