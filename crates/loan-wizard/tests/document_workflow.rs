use loan_wizard::workflows::catalog::parse_catalog_json;
use loan_wizard::workflows::documents::{
    document_categories, generate_document_progress_summary,
    validate_strict_document_requirements, DocumentRequirementResolver, ResolutionContext,
    UploadStatus, UploadedFile,
};
use loan_wizard::workflows::recommendation::{
    filter_products, Country, FundingProfile, LenderProduct, LookingFor,
};
use loan_wizard::workflows::wizard::{ApplicationState, DocumentGate, WizardStep};

fn catalog() -> Vec<LenderProduct> {
    let data = include_str!("data/lender_catalog.json");
    parse_catalog_json(data.as_bytes())
        .expect("fixture catalog parses")
        .products
}

fn upload(id: &str, document_type: &str, status: UploadStatus) -> UploadedFile {
    UploadedFile {
        id: id.to_string(),
        name: format!("{id}.pdf"),
        size: 64_000,
        status,
        document_type: document_type.to_string(),
    }
}

fn uploads(accountant: usize, tax: usize) -> Vec<UploadedFile> {
    let mut files = Vec::new();
    for index in 0..accountant {
        files.push(upload(
            &format!("fs-{index}"),
            "accountant_financials",
            UploadStatus::Completed,
        ));
    }
    for index in 0..tax {
        files.push(upload(
            &format!("tax-{index}"),
            "tax_returns",
            UploadStatus::Completed,
        ));
    }
    files
}

#[test]
fn categories_sharing_bank_statements_list_it_once() {
    let catalog = catalog();
    let resolver = DocumentRequirementResolver::default();
    let context = ResolutionContext {
        country: Country::UnitedStates,
        funding_amount: 50_000,
        catalog: &catalog,
    };

    let resolution = resolver.resolve(
        &[
            "equipment_financing".to_string(),
            "purchase_order_financing".to_string(),
        ],
        &context,
    );

    assert!(resolution.has_matches);
    let bank_statements = resolution
        .required_documents
        .iter()
        .filter(|document| document.label == "Bank Statements")
        .count();
    assert_eq!(bank_statements, 1);

    let lenders: Vec<_> = resolution
        .eligible_lenders
        .iter()
        .map(|product| product.id.as_str())
        .collect();
    assert_eq!(lenders, ["2", "4"]);
}

#[test]
fn two_accountant_and_four_tax_documents_are_invalid() {
    let result = validate_strict_document_requirements(&uploads(2, 4));

    assert!(!result.is_valid);
    assert!(result
        .errors
        .iter()
        .any(|error| error.starts_with("Missing 1 accountant")));
    assert!(result
        .warnings
        .iter()
        .any(|warning| warning.contains("1 extra tax")));
}

#[test]
fn exact_counts_without_failures_can_proceed() {
    let result = validate_strict_document_requirements(&uploads(3, 3));

    assert!(result.is_valid);
    assert!(result.can_proceed);
    assert!(result.errors.is_empty());
    assert_eq!(
        generate_document_progress_summary(&result),
        "Accountant Documents: 3/3 | Tax Documents: 3/3"
    );
}

#[test]
fn uploading_and_fallback_files_do_not_count() {
    let mut files = uploads(3, 2);
    files.push(upload("tax-pending", "tax_returns", UploadStatus::Uploading));
    files.push(upload("tax-offline", "tax_returns", UploadStatus::Fallback));

    let result = validate_strict_document_requirements(&files);

    assert_eq!(result.tax_docs_count, 2);
    assert!(!result.is_valid);
}

#[test]
fn wizard_flow_from_profile_to_signature() {
    let catalog = catalog();
    let profile = FundingProfile {
        headquarters: Country::UnitedStates,
        funding_amount: 80_000,
        looking_for: LookingFor::Equipment,
        accounts_receivable_balance: 12_000,
        funds_purpose: "equipment".to_string(),
        annual_revenue: Some(900_000),
        industry: Some("construction".to_string()),
    };

    let mut state = ApplicationState::new().with_profile(profile.clone());
    assert_eq!(state.advance(), Ok(WizardStep::Recommendations));

    let products = filter_products(&catalog, &profile);
    let selected: Vec<LenderProduct> = products
        .iter()
        .filter(|product| product.id == "3")
        .cloned()
        .collect();
    state.selected_categories = document_categories(profile.looking_for, &selected);
    assert_eq!(
        state.selected_categories,
        ["equipment_financing", "invoice_factoring"]
    );

    let resolution = DocumentRequirementResolver::default().resolve(
        &state.selected_categories,
        &ResolutionContext {
            country: profile.headquarters,
            funding_amount: profile.funding_amount,
            catalog: &catalog,
        },
    );
    assert!(resolution
        .required_documents
        .iter()
        .any(|document| document.document_type.as_deref() == Some("equipment_quote")));

    assert_eq!(state.advance(), Ok(WizardStep::BusinessDetails));
    assert_eq!(state.advance(), Ok(WizardStep::ApplicantDetails));
    assert_eq!(state.advance(), Ok(WizardStep::Documents));
    assert!(matches!(state.documents_gate(), DocumentGate::Blocked { .. }));

    for file in uploads(3, 3) {
        state.record_upload(file);
    }
    assert_eq!(state.advance(), Ok(WizardStep::Signature));
}
