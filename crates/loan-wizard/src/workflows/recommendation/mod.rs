//! Lender product recommendation rules.
//!
//! Filtering runs in three explicit stages: base eligibility, the `looking_for` type rule,
//! and additive special inclusions. Products are deduplicated by id in first-admission order.
//! Every admitted product is then scored; scores rank but never reorder or filter the list.

mod config;
pub mod domain;
pub mod rules;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use config::RecommendationConfig;
pub use domain::{
    AmountRange, Country, FundingProfile, IndustryScope, LenderProduct, LookingFor, ProductType,
};
pub use scoring::{ProductScore, RecommendationLevel};

use std::collections::HashSet;

use rules::{BaseEligibility, SpecialInclusion, TypeRule};
use serde::Serialize;
use tracing::debug;

/// Filter a catalog with the default rule set.
pub fn filter_products(catalog: &[LenderProduct], profile: &FundingProfile) -> Vec<LenderProduct> {
    RecommendationEngine::default().filter(catalog, profile)
}

/// Stateless engine applying the staged rules to a catalog snapshot.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
    base: BaseEligibility,
    type_rule: TypeRule,
    inclusions: Vec<SpecialInclusion>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(RecommendationConfig::default())
    }
}

impl RecommendationEngine {
    pub fn new(config: RecommendationConfig) -> Self {
        Self {
            config,
            base: BaseEligibility::default(),
            type_rule: TypeRule,
            inclusions: SpecialInclusion::defaults(),
        }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    pub fn filter(
        &self,
        catalog: &[LenderProduct],
        profile: &FundingProfile,
    ) -> Vec<LenderProduct> {
        self.recommend(catalog, profile).products
    }

    pub fn recommend(
        &self,
        catalog: &[LenderProduct],
        profile: &FundingProfile,
    ) -> RecommendationOutcome {
        let mut trail = Vec::with_capacity(catalog.len());
        let mut eligible = Vec::new();

        for product in catalog {
            match self.base.first_failure(product, profile) {
                Some(predicate) => trail.push(ProductDecision {
                    product_id: product.id.clone(),
                    product_type: product.product_type.clone(),
                    verdict: Verdict::Rejected { predicate },
                }),
                None => eligible.push(product),
            }
        }

        let mut seen = HashSet::new();
        let mut products = Vec::new();

        for product in &eligible {
            if self
                .type_rule
                .admits(&product.product_type, profile.looking_for)
                && seen.insert(product.id.as_str())
            {
                products.push((*product).clone());
                trail.push(ProductDecision::admitted(product, Admission::TypeRule));
            }
        }

        for inclusion in &self.inclusions {
            if !inclusion.is_triggered(profile, &self.config) {
                continue;
            }
            for product in &eligible {
                if inclusion.admits(product, profile, &self.config)
                    && seen.insert(product.id.as_str())
                {
                    products.push((*product).clone());
                    trail.push(ProductDecision::admitted(
                        product,
                        Admission::SpecialInclusion {
                            rule: inclusion.name,
                        },
                    ));
                }
            }
        }

        for product in &eligible {
            if !seen.contains(product.id.as_str()) {
                trail.push(ProductDecision {
                    product_id: product.id.clone(),
                    product_type: product.product_type.clone(),
                    verdict: Verdict::Rejected {
                        predicate: "product_type",
                    },
                });
            }
        }

        debug!(
            catalog = catalog.len(),
            eligible = eligible.len(),
            matched = products.len(),
            looking_for = ?profile.looking_for,
            "filtered lender catalog"
        );

        let scores = products
            .iter()
            .map(|product| {
                scoring::score_product(product, profile, &self.inclusions, &self.config)
            })
            .collect();

        RecommendationOutcome {
            products,
            trail,
            scores,
        }
    }
}

/// Filtered products plus the audit trail explaining each decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationOutcome {
    pub products: Vec<LenderProduct>,
    pub trail: Vec<ProductDecision>,
    /// One entry per product, in the same order as `products`.
    pub scores: Vec<ProductScore>,
}

impl RecommendationOutcome {
    pub fn decision_for(&self, product_id: &str) -> Option<&ProductDecision> {
        self.trail
            .iter()
            .find(|decision| decision.product_id == product_id)
    }

    pub fn score_for(&self, product_id: &str) -> Option<&ProductScore> {
        self.scores
            .iter()
            .find(|score| score.product_id == product_id)
    }

    /// Scores from best to worst; ties keep first-match order.
    pub fn ranked(&self) -> Vec<&ProductScore> {
        let mut ranked: Vec<&ProductScore> = self.scores.iter().collect();
        ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        ranked
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDecision {
    pub product_id: String,
    pub product_type: ProductType,
    pub verdict: Verdict,
}

impl ProductDecision {
    fn admitted(product: &LenderProduct, admission: Admission) -> Self {
        Self {
            product_id: product.id.clone(),
            product_type: product.product_type.clone(),
            verdict: Verdict::Admitted(admission),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Admitted(Admission),
    Rejected { predicate: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Admission {
    TypeRule,
    SpecialInclusion { rule: &'static str },
}

/// Share of a recommendation list held by one product type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub product_type: ProductType,
    pub label: String,
    pub count: usize,
    pub percentage: f32,
}

/// Group products by type in first-seen order.
pub fn category_breakdown(products: &[LenderProduct]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();

    for product in products {
        match counts
            .iter_mut()
            .find(|entry| entry.product_type == product.product_type)
        {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                product_type: product.product_type.clone(),
                label: product.product_type.label(),
                count: 1,
                percentage: 0.0,
            }),
        }
    }

    let total = products.len();
    for entry in &mut counts {
        entry.percentage = (entry.count as f32 / total as f32) * 100.0;
    }

    counts
}
