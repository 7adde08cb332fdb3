use chrono::Duration;
use loan_wizard::config::CatalogConfig;
use loan_wizard::error::AppError;
use loan_wizard::workflows::catalog::{
    parse_catalog_json, CatalogError, CatalogProvider, CatalogSnapshot,
};
use loan_wizard::workflows::documents::RequirementTable;
use loan_wizard::workflows::recommendation::{Country, LookingFor, RecommendationConfig};
use loan_wizard::workflows::wizard::LendingWizardService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

const DEMO_CATALOG: &str = include_str!("../data/demo_lenders.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Re-reads the exported catalog file on every snapshot so staff syncs are picked up live.
pub(crate) struct FileCatalogProvider {
    path: PathBuf,
}

impl FileCatalogProvider {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogProvider for FileCatalogProvider {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        CatalogSnapshot::from_path(&self.path)
    }
}

pub(crate) struct StaticCatalogProvider {
    snapshot: CatalogSnapshot,
}

impl StaticCatalogProvider {
    pub(crate) fn demo() -> Result<Self, CatalogError> {
        let snapshot = parse_catalog_json(DEMO_CATALOG.as_bytes())?;
        Ok(Self { snapshot })
    }
}

impl CatalogProvider for StaticCatalogProvider {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        Ok(self.snapshot.clone())
    }
}

/// Catalog source chosen at startup.
pub(crate) enum ConfiguredCatalog {
    File(FileCatalogProvider),
    Demo(StaticCatalogProvider),
}

impl ConfiguredCatalog {
    /// A configured file is read once up front so a broken export fails at startup.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => {
                let provider = FileCatalogProvider::new(path);
                let snapshot = provider.snapshot()?;
                info!(
                    path = %path.display(),
                    products = snapshot.products.len(),
                    "loaded lender catalog"
                );
                Ok(Self::File(provider))
            }
            None => {
                info!("no catalog path configured, using the built-in demo catalog");
                Ok(Self::Demo(StaticCatalogProvider::demo()?))
            }
        }
    }
}

impl CatalogProvider for ConfiguredCatalog {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        match self {
            Self::File(provider) => provider.snapshot(),
            Self::Demo(provider) => provider.snapshot(),
        }
    }
}

pub(crate) fn load_requirement_table(path: Option<&Path>) -> Result<RequirementTable, AppError> {
    match path {
        Some(path) => {
            let file = File::open(path)?;
            let table = RequirementTable::from_reader(BufReader::new(file))?;
            info!(path = %path.display(), version = %table.version, "loaded requirement table");
            Ok(table)
        }
        None => Ok(RequirementTable::standard()),
    }
}

pub(crate) fn build_wizard_service(
    config: &CatalogConfig,
) -> Result<LendingWizardService<ConfiguredCatalog>, AppError> {
    let catalog = ConfiguredCatalog::load(config.catalog_path.as_deref())?;
    let table = load_requirement_table(config.requirements_path.as_deref())?;
    let service =
        LendingWizardService::new(Arc::new(catalog), RecommendationConfig::default(), table);

    // Zero hours disables the staleness warning.
    if config.max_age_hours == 0 {
        return Ok(service);
    }
    Ok(service.with_max_catalog_age(Duration::hours(i64::from(config.max_age_hours))))
}

pub(crate) fn parse_country(raw: &str) -> Result<Country, String> {
    Country::parse(raw).ok_or_else(|| format!("unsupported country '{raw}' (expected US or CA)"))
}

pub(crate) fn parse_looking_for(raw: &str) -> Result<LookingFor, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "capital" => Ok(LookingFor::Capital),
        "equipment" => Ok(LookingFor::Equipment),
        "both" => Ok(LookingFor::Both),
        _ => Err(format!(
            "unsupported intent '{raw}' (expected capital, equipment, or both)"
        )),
    }
}
