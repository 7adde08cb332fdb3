use std::sync::Arc;

use axum::response::Response;
use chrono::{Duration, Utc};
use serde_json::Value;

use crate::workflows::catalog::{CatalogError, CatalogProvider, CatalogSnapshot};
use crate::workflows::documents::{RequirementTable, UploadStatus, UploadedFile};
use crate::workflows::recommendation::{
    AmountRange, Country, FundingProfile, IndustryScope, LenderProduct, LookingFor, ProductType,
    RecommendationConfig,
};
use crate::workflows::wizard::LendingWizardService;

pub(super) struct StaticCatalog {
    snapshot: CatalogSnapshot,
}

impl StaticCatalog {
    pub(super) fn new(products: Vec<LenderProduct>) -> Self {
        Self {
            snapshot: CatalogSnapshot::new(products, Some(Utc::now() - Duration::hours(1))),
        }
    }
}

impl CatalogProvider for StaticCatalog {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        Ok(self.snapshot.clone())
    }
}

pub(super) struct OfflineCatalog;

impl CatalogProvider for OfflineCatalog {
    fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        Err(CatalogError::Unavailable("staff API timed out".to_string()))
    }
}

fn product(
    id: &str,
    product_type: ProductType,
    geography: Vec<Country>,
    min: u64,
    max: u64,
    documents: &[&str],
) -> LenderProduct {
    LenderProduct {
        id: id.to_string(),
        product_name: format!("{} {id}", product_type.label()),
        lender_name: format!("Lender {id}"),
        product_type,
        geography,
        amount_range: AmountRange::new(min, Some(max)),
        min_revenue: None,
        industries: IndustryScope::All,
        active: true,
        required_documents: documents.iter().map(|doc| doc.to_string()).collect(),
    }
}

pub(super) fn catalog() -> Vec<LenderProduct> {
    use Country::{Canada, UnitedStates};

    vec![
        product("1", ProductType::TermLoan, vec![UnitedStates], 10_000, 500_000, &[]),
        product(
            "2",
            ProductType::EquipmentFinancing,
            vec![UnitedStates, Canada],
            25_000,
            2_000_000,
            &["Equipment Quote", "Proof of Insurance"],
        ),
        product(
            "3",
            ProductType::InvoiceFactoring,
            vec![UnitedStates],
            1_000,
            5_000_000,
            &["Invoice Samples"],
        ),
        product(
            "4",
            ProductType::PurchaseOrderFinancing,
            vec![UnitedStates, Canada],
            5_000,
            1_000_000,
            &[],
        ),
        product("5", ProductType::WorkingCapital, vec![Canada], 15_000, 750_000, &[]),
    ]
}

pub(super) fn profile(
    headquarters: Country,
    funding_amount: u64,
    looking_for: LookingFor,
) -> FundingProfile {
    FundingProfile {
        headquarters,
        funding_amount,
        looking_for,
        accounts_receivable_balance: 0,
        funds_purpose: "working_capital".to_string(),
        annual_revenue: None,
        industry: None,
    }
}

pub(super) fn build_service() -> Arc<LendingWizardService<StaticCatalog>> {
    Arc::new(
        LendingWizardService::new(
            Arc::new(StaticCatalog::new(catalog())),
            RecommendationConfig::default(),
            RequirementTable::standard(),
        )
        .with_max_catalog_age(Duration::hours(24)),
    )
}

pub(super) fn offline_service() -> Arc<LendingWizardService<OfflineCatalog>> {
    Arc::new(LendingWizardService::new(
        Arc::new(OfflineCatalog),
        RecommendationConfig::default(),
        RequirementTable::standard(),
    ))
}

pub(super) fn upload(id: &str, document_type: &str, status: UploadStatus) -> UploadedFile {
    UploadedFile {
        id: id.to_string(),
        name: format!("{id}.pdf"),
        size: 52_000,
        status,
        document_type: document_type.to_string(),
    }
}

pub(super) fn complete_uploads() -> Vec<UploadedFile> {
    (0..3)
        .map(|index| {
            upload(
                &format!("fs-{index}"),
                "accountant_financials",
                UploadStatus::Completed,
            )
        })
        .chain((0..3).map(|index| {
            upload(&format!("tax-{index}"), "tax_returns", UploadStatus::Completed)
        }))
        .collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
