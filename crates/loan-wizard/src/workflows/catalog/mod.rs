//! Lender catalog ingestion.
//!
//! The staff service exposes products in several loosely-typed shapes. Everything is
//! normalized into [`LenderProduct`] here so the recommendation and document modules only
//! ever see one canonical record.

mod normalizer;
mod parser;
pub mod summary;

#[cfg(test)]
mod tests;

pub use summary::{CatalogSummary, CatalogSummaryEntry};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::workflows::recommendation::domain::LenderProduct;
use normalizer::RawLenderProduct;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read lender catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid lender catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid lender catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid lender product '{id}': {reason}")]
    Invalid { id: String, reason: String },
    #[error("duplicate lender product id '{0}'")]
    DuplicateId(String),
    #[error("unsupported catalog format '{0}'")]
    UnsupportedFormat(String),
    #[error("lender catalog unavailable: {0}")]
    Unavailable(String),
}

/// Source of the current lender catalog.
pub trait CatalogProvider: Send + Sync {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError>;
}

/// Normalized catalog plus the time it was last synced from staff, when known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub products: Vec<LenderProduct>,
    #[serde(default)]
    pub synced_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Envelope {
        products: Vec<RawLenderProduct>,
        #[serde(default, alias = "syncedAt", alias = "lastSync")]
        synced_at: Option<DateTime<Utc>>,
    },
    Bare(Vec<RawLenderProduct>),
}

impl CatalogSnapshot {
    pub fn new(products: Vec<LenderProduct>, synced_at: Option<DateTime<Utc>>) -> Self {
        Self {
            products,
            synced_at,
        }
    }

    /// A snapshot without a sync timestamp is never reported stale.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.synced_at
            .map_or(false, |synced_at| now.signed_duration_since(synced_at) > max_age)
    }

    pub fn active_products(&self) -> impl Iterator<Item = &LenderProduct> {
        self.products.iter().filter(|product| product.active)
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary::from_products(&self.products)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let file = std::fs::File::open(path)?;

        match extension.as_str() {
            "json" => parse_catalog_json(file),
            "csv" => parse_catalog_csv(file),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Accepts either a bare product array or a `{ "products": [...] }` envelope.
pub fn parse_catalog_json<R: Read>(reader: R) -> Result<CatalogSnapshot, CatalogError> {
    let (raw, synced_at) = match serde_json::from_reader::<_, CatalogPayload>(reader)? {
        CatalogPayload::Envelope {
            products,
            synced_at,
        } => (products, synced_at),
        CatalogPayload::Bare(products) => (products, None),
    };

    Ok(CatalogSnapshot::new(normalize_all(raw)?, synced_at))
}

pub fn parse_catalog_csv<R: Read>(reader: R) -> Result<CatalogSnapshot, CatalogError> {
    let raw = parser::parse_rows(reader)?;
    Ok(CatalogSnapshot::new(normalize_all(raw)?, None))
}

fn normalize_all(raw: Vec<RawLenderProduct>) -> Result<Vec<LenderProduct>, CatalogError> {
    let mut seen = HashSet::new();
    let mut products = Vec::with_capacity(raw.len());

    for record in raw {
        let product = record.normalize()?;
        if !seen.insert(product.id.clone()) {
            return Err(CatalogError::DuplicateId(product.id));
        }
        products.push(product);
    }

    debug!(products = products.len(), "normalized lender catalog");
    Ok(products)
}
