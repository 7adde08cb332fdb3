use super::common::{build_service, complete_uploads, offline_service, profile};
use crate::workflows::recommendation::{Country, LookingFor, ProductType, Verdict};
use crate::workflows::wizard::{DocumentRequest, WizardServiceError};

#[test]
fn recommend_returns_products_categories_and_trail() {
    let service = build_service();
    let recommendation = service
        .recommend(&profile(Country::Canada, 100_000, LookingFor::Capital))
        .expect("catalog available");

    let ids: Vec<_> = recommendation
        .products
        .iter()
        .map(|product| product.id.as_str())
        .collect();
    assert_eq!(ids, ["4", "5"]);
    assert_eq!(recommendation.trail.len(), 5);
    assert_eq!(recommendation.categories.len(), 2);
    let scored: Vec<_> = recommendation
        .scores
        .iter()
        .map(|score| score.product_id.as_str())
        .collect();
    assert_eq!(scored, ids);
    assert_eq!(
        recommendation.categories[0].product_type,
        ProductType::PurchaseOrderFinancing
    );

    let equipment = recommendation
        .trail
        .iter()
        .find(|decision| decision.product_id == "2")
        .expect("decision recorded");
    assert_eq!(
        equipment.verdict,
        Verdict::Rejected {
            predicate: "product_type"
        }
    );
}

#[test]
fn explicit_categories_resolve_with_catalog_lenders() {
    let service = build_service();
    let resolution = service
        .required_documents(&DocumentRequest {
            country: Country::UnitedStates,
            funding_amount: 50_000,
            categories: vec!["equipment_financing".to_string()],
            looking_for: None,
            selected_product_ids: Vec::new(),
        })
        .expect("catalog available");

    assert!(resolution.has_matches);
    assert_eq!(resolution.eligible_lenders.len(), 1);
    assert!(resolution
        .required_documents
        .iter()
        .any(|document| document.label == "Proof of Insurance"));
}

#[test]
fn intent_and_selected_products_derive_categories() {
    let service = build_service();
    let resolution = service
        .required_documents(&DocumentRequest {
            country: Country::UnitedStates,
            funding_amount: 50_000,
            categories: Vec::new(),
            looking_for: Some(LookingFor::Equipment),
            selected_product_ids: vec!["3".to_string()],
        })
        .expect("catalog available");

    let lenders: Vec<_> = resolution
        .eligible_lenders
        .iter()
        .map(|product| product.id.as_str())
        .collect();
    assert_eq!(lenders, ["2", "3"]);
    assert!(resolution
        .required_documents
        .iter()
        .any(|document| document.document_type.as_deref() == Some("invoice_samples")));
}

#[test]
fn validation_includes_progress_summary() {
    let service = build_service();
    let validation = service.validate_documents(&complete_uploads());

    assert!(validation.result.can_proceed);
    assert_eq!(
        validation.summary,
        "Accountant Documents: 3/3 | Tax Documents: 3/3"
    );
}

#[test]
fn catalog_outage_is_reported() {
    let service = offline_service();
    let error = service
        .recommend(&profile(Country::UnitedStates, 50_000, LookingFor::Both))
        .expect_err("catalog offline");

    assert!(matches!(error, WizardServiceError::Catalog(_)));
    assert!(error.to_string().contains("staff API timed out"));
}
