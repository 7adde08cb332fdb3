use crate::workflows::recommendation::domain::{
    AmountRange, Country, FundingProfile, IndustryScope, LenderProduct, LookingFor, ProductType,
};
use crate::workflows::recommendation::{RecommendationConfig, RecommendationEngine};

pub(super) fn product(
    id: &str,
    product_type: ProductType,
    geography: &[Country],
    min: u64,
    max: u64,
) -> LenderProduct {
    LenderProduct {
        id: id.to_string(),
        product_name: format!("{} {id}", product_type.label()),
        lender_name: "Northern Lending".to_string(),
        product_type,
        geography: geography.to_vec(),
        amount_range: AmountRange::new(min, Some(max)),
        min_revenue: None,
        industries: IndustryScope::All,
        active: true,
        required_documents: Vec::new(),
    }
}

/// Five-product catalog mirroring the wizard's recommendation fixtures.
pub(super) fn catalog() -> Vec<LenderProduct> {
    use Country::{Canada, UnitedStates};

    let mut term_loan = product(
        "1",
        ProductType::TermLoan,
        &[UnitedStates],
        10_000,
        500_000,
    );
    term_loan.min_revenue = Some(100_000);
    term_loan.industries = IndustryScope::Only(vec![
        "technology".to_string(),
        "manufacturing".to_string(),
    ]);

    let mut equipment = product(
        "2",
        ProductType::EquipmentFinancing,
        &[UnitedStates, Canada],
        25_000,
        2_000_000,
    );
    equipment.min_revenue = Some(200_000);

    let factoring = product(
        "3",
        ProductType::InvoiceFactoring,
        &[UnitedStates],
        1_000,
        5_000_000,
    );

    let purchase_order = product(
        "4",
        ProductType::PurchaseOrderFinancing,
        &[UnitedStates, Canada],
        5_000,
        1_000_000,
    );

    let working_capital = product(
        "5",
        ProductType::WorkingCapital,
        &[Canada],
        15_000,
        750_000,
    );

    vec![term_loan, equipment, factoring, purchase_order, working_capital]
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

pub(super) fn ids(products: &[LenderProduct]) -> Vec<&str> {
    products.iter().map(|product| product.id.as_str()).collect()
}

pub(super) fn engine() -> RecommendationEngine {
    RecommendationEngine::new(RecommendationConfig::default())
}
