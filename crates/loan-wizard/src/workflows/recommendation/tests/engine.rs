use super::common::*;
use crate::workflows::recommendation::domain::{Country, LookingFor, ProductType};
use crate::workflows::recommendation::{
    category_breakdown, filter_products, Admission, RecommendationConfig, RecommendationEngine,
    Verdict,
};

#[test]
fn canadian_capital_request_matches_purchase_order_and_working_capital() {
    let result = filter_products(
        &catalog(),
        &profile(Country::Canada, 100_000, LookingFor::Capital),
    );

    assert_eq!(ids(&result), vec!["4", "5"]);
}

#[test]
fn duplicate_admissions_collapse_to_one_entry() {
    let mut request = profile(Country::UnitedStates, 50_000, LookingFor::Both);
    request.accounts_receivable_balance = 10_000;

    let result = filter_products(&catalog(), &request);

    let factoring: Vec<_> = result
        .iter()
        .filter(|product| product.product_type == ProductType::InvoiceFactoring)
        .collect();
    assert_eq!(factoring.len(), 1);
    assert_eq!(factoring[0].id, "3");
}

#[test]
fn special_rule_additions_follow_type_rule_admissions() {
    let mut request = profile(Country::UnitedStates, 50_000, LookingFor::Equipment);
    request.accounts_receivable_balance = 15_000;
    request.funds_purpose = "inventory".to_string();

    let result = filter_products(&catalog(), &request);

    assert_eq!(ids(&result), vec!["2", "3", "4"]);
}

#[test]
fn duplicate_catalog_ids_are_returned_once() {
    let mut products = catalog();
    products.push(products[3].clone());

    let result = filter_products(
        &products,
        &profile(Country::Canada, 100_000, LookingFor::Capital),
    );

    assert_eq!(ids(&result), vec!["4", "5"]);
}

#[test]
fn trail_explains_every_catalog_entry() {
    let mut request = profile(Country::UnitedStates, 50_000, LookingFor::Equipment);
    request.accounts_receivable_balance = 5_000;

    let outcome = engine().recommend(&catalog(), &request);

    assert_eq!(outcome.trail.len(), 5);
    assert_eq!(
        outcome.decision_for("2").map(|decision| &decision.verdict),
        Some(&Verdict::Admitted(Admission::TypeRule))
    );
    assert_eq!(
        outcome.decision_for("3").map(|decision| &decision.verdict),
        Some(&Verdict::Admitted(Admission::SpecialInclusion {
            rule: "accounts_receivable"
        }))
    );
    assert_eq!(
        outcome.decision_for("5").map(|decision| &decision.verdict),
        Some(&Verdict::Rejected {
            predicate: "geography"
        })
    );
    assert_eq!(
        outcome.decision_for("1").map(|decision| &decision.verdict),
        Some(&Verdict::Rejected {
            predicate: "product_type"
        })
    );
}

#[test]
fn disabling_receivable_rule_keeps_factoring_out_for_equipment() {
    let engine = RecommendationEngine::new(RecommendationConfig {
        include_factoring_for_receivables: false,
        ..RecommendationConfig::default()
    });
    let mut request = profile(Country::UnitedStates, 50_000, LookingFor::Equipment);
    request.accounts_receivable_balance = 25_000;

    let result = engine.filter(&catalog(), &request);

    assert_eq!(ids(&result), vec!["2"]);
}

#[test]
fn additional_purchase_order_purposes_can_be_configured() {
    let engine = RecommendationEngine::new(RecommendationConfig {
        purchase_order_purposes: vec!["inventory".to_string(), "Bulk Orders".to_string()],
        ..RecommendationConfig::default()
    });
    let mut request = profile(Country::UnitedStates, 50_000, LookingFor::Equipment);
    request.funds_purpose = "bulk orders".to_string();

    let result = engine.filter(&catalog(), &request);

    assert_eq!(ids(&result), vec!["2", "4"]);
}

#[test]
fn repeated_calls_return_identical_results() {
    let request = profile(Country::UnitedStates, 120_000, LookingFor::Both);
    let products = catalog();

    let first = filter_products(&products, &request);
    let second = filter_products(&products, &request);

    assert_eq!(first, second);
}

#[test]
fn revenue_and_industry_apply_only_when_declared() {
    let mut request = profile(Country::UnitedStates, 100_000, LookingFor::Capital);
    assert!(ids(&filter_products(&catalog(), &request)).contains(&"1"));

    request.annual_revenue = Some(80_000);
    assert!(!ids(&filter_products(&catalog(), &request)).contains(&"1"));

    request.annual_revenue = Some(150_000);
    request.industry = Some("Retail".to_string());
    assert!(!ids(&filter_products(&catalog(), &request)).contains(&"1"));

    request.industry = Some("Technology".to_string());
    assert!(ids(&filter_products(&catalog(), &request)).contains(&"1"));
}

#[test]
fn breakdown_groups_by_type_with_percentages() {
    let result = filter_products(
        &catalog(),
        &profile(Country::UnitedStates, 100_000, LookingFor::Both),
    );

    let breakdown = category_breakdown(&result);

    assert_eq!(breakdown.len(), result.len());
    let total: usize = breakdown.iter().map(|entry| entry.count).sum();
    assert_eq!(total, result.len());
    let pct: f32 = breakdown.iter().map(|entry| entry.percentage).sum();
    assert!((pct - 100.0).abs() < 0.01);
    assert!(category_breakdown(&[]).is_empty());
}
