use std::sync::Arc;

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::workflows::catalog::{CatalogError, CatalogProvider, CatalogSnapshot};
use crate::workflows::documents::{
    document_categories, generate_document_progress_summary,
    validate_strict_document_requirements, DocumentRequirementResolver, DocumentResolution,
    RequirementTable, ResolutionContext, StrictValidationResult, UploadedFile,
};
use crate::workflows::recommendation::{
    category_breakdown, CategoryCount, Country, FundingProfile, LenderProduct, LookingFor,
    ProductDecision, ProductScore, RecommendationConfig, RecommendationEngine,
};

/// Service composing the catalog provider, recommendation engine, and document resolver.
pub struct LendingWizardService<C> {
    catalog: Arc<C>,
    engine: Arc<RecommendationEngine>,
    resolver: Arc<DocumentRequirementResolver>,
    max_catalog_age: Option<Duration>,
}

/// Filtered products with their category breakdown, match scores and decision trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub products: Vec<LenderProduct>,
    pub categories: Vec<CategoryCount>,
    pub scores: Vec<ProductScore>,
    pub trail: Vec<ProductDecision>,
}

/// Input for the document checklist: explicit categories, or the wizard intent plus picks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    #[serde(alias = "businessLocation")]
    pub country: Country,
    #[serde(alias = "fundingAmount")]
    pub funding_amount: u64,
    #[serde(default, alias = "selectedCategories")]
    pub categories: Vec<String>,
    #[serde(default, alias = "lookingFor")]
    pub looking_for: Option<LookingFor>,
    #[serde(default, alias = "selectedProductIds")]
    pub selected_product_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentValidation {
    pub result: StrictValidationResult,
    pub summary: String,
}

impl<C> LendingWizardService<C>
where
    C: CatalogProvider + 'static,
{
    pub fn new(catalog: Arc<C>, config: RecommendationConfig, table: RequirementTable) -> Self {
        Self {
            catalog,
            engine: Arc::new(RecommendationEngine::new(config)),
            resolver: Arc::new(DocumentRequirementResolver::new(table)),
            max_catalog_age: None,
        }
    }

    /// Log a warning whenever the catalog snapshot is older than `max_age`.
    pub fn with_max_catalog_age(mut self, max_age: Duration) -> Self {
        self.max_catalog_age = Some(max_age);
        self
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub fn resolver(&self) -> &DocumentRequirementResolver {
        &self.resolver
    }

    /// Current catalog snapshot as published to the wizard.
    pub fn lenders(&self) -> Result<CatalogSnapshot, WizardServiceError> {
        let snapshot = self.catalog.snapshot()?;

        if let Some(max_age) = self.max_catalog_age {
            if snapshot.is_stale(Utc::now(), max_age) {
                warn!(
                    synced_at = ?snapshot.synced_at,
                    max_age_hours = max_age.num_hours(),
                    "lender catalog snapshot is stale"
                );
            }
        }

        Ok(snapshot)
    }

    pub fn recommend(
        &self,
        profile: &FundingProfile,
    ) -> Result<Recommendation, WizardServiceError> {
        let snapshot = self.lenders()?;
        let outcome = self.engine.recommend(&snapshot.products, profile);

        info!(
            headquarters = %profile.headquarters,
            funding_amount = profile.funding_amount,
            matched = outcome.products.len(),
            "recommended lender products"
        );

        Ok(Recommendation {
            categories: category_breakdown(&outcome.products),
            products: outcome.products,
            scores: outcome.scores,
            trail: outcome.trail,
        })
    }

    pub fn required_documents(
        &self,
        request: &DocumentRequest,
    ) -> Result<DocumentResolution, WizardServiceError> {
        let snapshot = self.lenders()?;

        let categories = match request.looking_for {
            Some(looking_for) if request.categories.is_empty() => {
                let selected: Vec<LenderProduct> = snapshot
                    .products
                    .iter()
                    .filter(|product| request.selected_product_ids.contains(&product.id))
                    .cloned()
                    .collect();
                document_categories(looking_for, &selected)
            }
            _ => request.categories.clone(),
        };

        let context = ResolutionContext {
            country: request.country,
            funding_amount: request.funding_amount,
            catalog: &snapshot.products,
        };
        let resolution = self.resolver.resolve(&categories, &context);

        info!(
            categories = categories.len(),
            documents = resolution.required_documents.len(),
            has_matches = resolution.has_matches,
            "resolved document checklist"
        );

        Ok(resolution)
    }

    pub fn validate_documents(&self, files: &[UploadedFile]) -> DocumentValidation {
        let result = validate_strict_document_requirements(files);
        let summary = generate_document_progress_summary(&result);
        DocumentValidation { result, summary }
    }
}

/// Error raised by the wizard service.
#[derive(Debug, thiserror::Error)]
pub enum WizardServiceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
