use serde::Serialize;

use super::config::RecommendationConfig;
use super::domain::{FundingProfile, LenderProduct, LookingFor, ProductType};
use super::rules::SpecialInclusion;
use crate::workflows::documents::requirements::format_amount;

pub const MAX_MATCH_SCORE: u8 = 100;
pub const EXCELLENT_THRESHOLD: u8 = 70;
pub const GOOD_THRESHOLD: u8 = 50;

const INCLUSION_BONUS: u8 = 15;
const REVENUE_SCORE: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationLevel {
    Excellent,
    Good,
    Fair,
}

impl RecommendationLevel {
    pub fn from_score(score: u8) -> Self {
        if score >= EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if score >= GOOD_THRESHOLD {
            Self::Good
        } else {
            Self::Fair
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent match",
            Self::Good => "Good match",
            Self::Fair => "Fair match",
        }
    }
}

/// How well an admitted product fits the profile. Never affects admission or order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductScore {
    pub product_id: String,
    pub match_score: u8,
    pub match_reasons: Vec<String>,
    pub level: RecommendationLevel,
}

/// Points for the product type under the applicant's intent.
pub fn category_score(product_type: &ProductType, looking_for: LookingFor) -> u8 {
    use LookingFor::{Both, Capital, Equipment};

    match (product_type, looking_for) {
        (ProductType::TermLoan, Capital) => 30,
        (ProductType::TermLoan, Both) => 25,
        (ProductType::WorkingCapital, Capital) => 25,
        (ProductType::WorkingCapital, Both) => 20,
        (ProductType::LineOfCredit, Capital) => 20,
        (ProductType::LineOfCredit, Both) => 15,
        (ProductType::EquipmentFinancing, Equipment) => 30,
        (ProductType::EquipmentFinancing, Both) => 25,
        (ProductType::InvoiceFactoring, Capital) => 15,
        (ProductType::InvoiceFactoring, Both) => 10,
        (ProductType::PurchaseOrderFinancing, Capital) => 10,
        (ProductType::PurchaseOrderFinancing, Both) => 5,
        (ProductType::AssetBasedLending, Capital) => 15,
        (ProductType::AssetBasedLending, Equipment) => 5,
        (ProductType::AssetBasedLending, Both) => 10,
        (ProductType::SbaLoan, Capital) => 25,
        (ProductType::SbaLoan, Equipment) => 15,
        (ProductType::SbaLoan, Both) => 20,
        _ => 0,
    }
}

/// Requests close to the product minimum score highest.
pub fn amount_score(product: &LenderProduct, funding_amount: u64) -> u8 {
    let min = product.amount_range.min;
    if min == 0 {
        return 10;
    }

    if funding_amount < min {
        5
    } else if funding_amount <= min.saturating_mul(2) {
        20
    } else if funding_amount <= min.saturating_mul(5) {
        15
    } else {
        10
    }
}

/// Uses declared revenue when present, otherwise assumes twice the requested amount.
pub fn revenue_score(product: &LenderProduct, profile: &FundingProfile) -> u8 {
    if revenue_likely_met(product, profile) {
        REVENUE_SCORE
    } else {
        0
    }
}

/// Bonus for every triggered special inclusion targeting the product's type.
pub fn inclusion_score(
    product: &LenderProduct,
    profile: &FundingProfile,
    inclusions: &[SpecialInclusion],
    config: &RecommendationConfig,
) -> u8 {
    inclusions
        .iter()
        .filter(|inclusion| inclusion.admits(product, profile, config))
        .fold(0u8, |score, _| score.saturating_add(INCLUSION_BONUS))
}

pub fn score_product(
    product: &LenderProduct,
    profile: &FundingProfile,
    inclusions: &[SpecialInclusion],
    config: &RecommendationConfig,
) -> ProductScore {
    let total = [
        category_score(&product.product_type, profile.looking_for),
        amount_score(product, profile.funding_amount),
        revenue_score(product, profile),
        inclusion_score(product, profile, inclusions, config),
    ]
    .into_iter()
    .fold(0u8, u8::saturating_add);
    let match_score = total.min(MAX_MATCH_SCORE);

    ProductScore {
        product_id: product.id.clone(),
        match_score,
        match_reasons: match_reasons(product, profile),
        level: RecommendationLevel::from_score(match_score),
    }
}

fn match_reasons(product: &LenderProduct, profile: &FundingProfile) -> Vec<String> {
    let mut reasons = vec![
        format!("Available in {}", profile.headquarters.label()),
        format!(
            "Supports ${} funding range",
            format_amount(profile.funding_amount)
        ),
    ];

    let highlight = match product.product_type {
        ProductType::TermLoan => Some("Term loan for business growth and expansion"),
        ProductType::WorkingCapital => Some("Working capital for operational expenses"),
        ProductType::LineOfCredit => Some("Flexible credit line for ongoing needs"),
        ProductType::EquipmentFinancing => Some("Specialized equipment financing"),
        ProductType::InvoiceFactoring => Some("Convert receivables to immediate cash"),
        _ => None,
    };
    reasons.extend(highlight.map(str::to_string));

    if revenue_likely_met(product, profile) {
        reasons.push("Revenue requirements likely met".to_string());
    }

    reasons
}

fn revenue_likely_met(product: &LenderProduct, profile: &FundingProfile) -> bool {
    match product.min_revenue {
        None => true,
        Some(minimum) => {
            let revenue = profile
                .annual_revenue
                .unwrap_or_else(|| profile.funding_amount.saturating_mul(2));
            revenue >= minimum
        }
    }
}
