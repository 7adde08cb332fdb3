use crate::infra::{build_wizard_service, parse_country, parse_looking_for, ConfiguredCatalog};
use clap::Args;
use loan_wizard::config::CatalogConfig;
use loan_wizard::error::AppError;
use loan_wizard::workflows::catalog::{CatalogError, CatalogSummary};
use loan_wizard::workflows::documents::{DocumentResolution, UploadStatus, UploadedFile};
use loan_wizard::workflows::recommendation::{
    Admission, Country, FundingProfile, LookingFor, ProductDecision, Verdict,
};
use loan_wizard::workflows::wizard::{
    ApplicationState, DocumentRequest, DocumentValidation, LendingWizardService, Recommendation,
    WizardError, WizardStep,
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Business headquarters (US or CA)
    #[arg(long, value_parser = parse_country)]
    pub(crate) country: Country,
    /// Requested funding amount in whole dollars
    #[arg(long)]
    pub(crate) amount: u64,
    /// What the applicant is looking for: capital, equipment, or both
    #[arg(long, value_parser = parse_looking_for, default_value = "capital")]
    pub(crate) looking_for: LookingFor,
    /// Outstanding accounts receivable balance
    #[arg(long, default_value_t = 0)]
    pub(crate) ar_balance: u64,
    /// Free-text use of funds, e.g. "inventory"
    #[arg(long)]
    pub(crate) purpose: Option<String>,
    /// Last year's revenue
    #[arg(long)]
    pub(crate) revenue: Option<u64>,
    /// Applicant industry
    #[arg(long)]
    pub(crate) industry: Option<String>,
    /// Lender catalog file (JSON or CSV). Defaults to the built-in demo catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Print why every catalog product was admitted or rejected
    #[arg(long)]
    pub(crate) show_trail: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DocumentRequirementsArgs {
    /// Business headquarters (US or CA)
    #[arg(long, value_parser = parse_country)]
    pub(crate) country: Country,
    /// Requested funding amount in whole dollars
    #[arg(long)]
    pub(crate) amount: u64,
    /// Product category to resolve; repeat for several
    #[arg(long = "category")]
    pub(crate) categories: Vec<String>,
    /// Derive categories from the wizard intent when no --category is given
    #[arg(long, value_parser = parse_looking_for)]
    pub(crate) looking_for: Option<LookingFor>,
    /// Selected product id feeding the derived categories; repeat for several
    #[arg(long = "product")]
    pub(crate) products: Vec<String>,
    /// Lender catalog file (JSON or CSV). Defaults to the built-in demo catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Requirement table JSON. Defaults to the standard table.
    #[arg(long)]
    pub(crate) requirements: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DocumentValidationArgs {
    /// JSON array of upload records ({id, name, size, status, document_type})
    #[arg(long)]
    pub(crate) uploads: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogSummaryArgs {
    /// Lender catalog file (JSON or CSV). Defaults to the built-in demo catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Only show one country
    #[arg(long, value_parser = parse_country)]
    pub(crate) country: Option<Country>,
    /// Emit CSV on stdout instead of a readable listing
    #[arg(long)]
    pub(crate) csv: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Lender catalog file (JSON or CSV). Defaults to the built-in demo catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Business headquarters (US or CA)
    #[arg(long, value_parser = parse_country, default_value = "US")]
    pub(crate) country: Country,
    /// Requested funding amount in whole dollars
    #[arg(long, default_value_t = 150_000)]
    pub(crate) amount: u64,
    /// What the applicant is looking for: capital, equipment, or both
    #[arg(long, value_parser = parse_looking_for, default_value = "capital")]
    pub(crate) looking_for: LookingFor,
    /// Stop after the document checklist
    #[arg(long)]
    pub(crate) skip_uploads: bool,
}

fn wizard_service(
    catalog: Option<PathBuf>,
    requirements: Option<PathBuf>,
) -> Result<LendingWizardService<ConfiguredCatalog>, AppError> {
    build_wizard_service(&CatalogConfig {
        catalog_path: catalog,
        requirements_path: requirements,
        max_age_hours: 0,
    })
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        country,
        amount,
        looking_for,
        ar_balance,
        purpose,
        revenue,
        industry,
        catalog,
        show_trail,
    } = args;

    let service = wizard_service(catalog, None)?;
    let profile = FundingProfile {
        headquarters: country,
        funding_amount: amount,
        looking_for,
        accounts_receivable_balance: ar_balance,
        funds_purpose: purpose.unwrap_or_default(),
        annual_revenue: revenue,
        industry,
    };

    let recommendation = service.recommend(&profile)?;
    render_recommendation(&profile, &recommendation, show_trail);
    Ok(())
}

pub(crate) fn run_document_requirements(args: DocumentRequirementsArgs) -> Result<(), AppError> {
    let DocumentRequirementsArgs {
        country,
        amount,
        categories,
        looking_for,
        products,
        catalog,
        requirements,
    } = args;

    let service = wizard_service(catalog, requirements)?;
    let request = DocumentRequest {
        country,
        funding_amount: amount,
        categories,
        looking_for,
        selected_product_ids: products,
    };

    let resolution = service.required_documents(&request)?;
    render_resolution(&resolution);
    Ok(())
}

pub(crate) fn run_document_validation(args: DocumentValidationArgs) -> Result<(), AppError> {
    let file = File::open(&args.uploads)?;
    let uploads: Vec<UploadedFile> = serde_json::from_reader(BufReader::new(file))?;

    let validation = wizard_service(None, None)?.validate_documents(&uploads);
    println!(
        "Document check for {} ({} uploads)",
        args.uploads.display(),
        uploads.len()
    );
    render_validation(&validation);
    Ok(())
}

pub(crate) fn run_catalog_summary(args: CatalogSummaryArgs) -> Result<(), AppError> {
    let CatalogSummaryArgs {
        catalog,
        country,
        csv,
    } = args;

    let service = wizard_service(catalog, None)?;
    let snapshot = service.lenders()?;
    let mut summary = snapshot.summary();
    if let Some(country) = country {
        summary.entries.retain(|entry| entry.country == country);
    }

    if csv {
        let stdout = std::io::stdout();
        summary
            .write_csv(stdout.lock())
            .map_err(CatalogError::from)?;
        return Ok(());
    }

    match snapshot.synced_at {
        Some(synced_at) => println!("Lender catalog (synced {})", synced_at.to_rfc3339()),
        None => println!("Lender catalog (sync time unknown)"),
    }
    render_catalog_summary(&summary);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        catalog,
        country,
        amount,
        looking_for,
        skip_uploads,
    } = args;

    let service = wizard_service(catalog, None)?;

    println!("Business loan wizard demo");
    let snapshot = service.lenders()?;
    render_catalog_summary(&snapshot.summary());

    let profile = FundingProfile {
        headquarters: country,
        funding_amount: amount,
        looking_for,
        accounts_receivable_balance: 40_000,
        funds_purpose: "inventory".to_string(),
        annual_revenue: Some(900_000),
        industry: Some("retail".to_string()),
    };

    println!();
    let recommendation = service.recommend(&profile)?;
    render_recommendation(&profile, &recommendation, false);

    let selected: Vec<String> = recommendation
        .products
        .first()
        .map(|product| product.id.clone())
        .into_iter()
        .collect();
    let request = DocumentRequest {
        country,
        funding_amount: amount,
        categories: Vec::new(),
        looking_for: Some(looking_for),
        selected_product_ids: selected,
    };

    println!();
    let resolution = service.required_documents(&request)?;
    render_resolution(&resolution);

    if skip_uploads {
        return Ok(());
    }

    println!();
    walk_upload_gate(&service, profile);
    Ok(())
}

fn walk_upload_gate(service: &LendingWizardService<ConfiguredCatalog>, profile: FundingProfile) {
    let mut state = ApplicationState::new().with_profile(profile);
    while state.step != WizardStep::Documents {
        match state.advance() {
            Ok(step) => println!("Step {}: {}", step.number(), step.label()),
            Err(error) => {
                println!("Wizard stopped: {}", describe_wizard_error(&error));
                return;
            }
        }
    }

    let first_batch = [
        demo_upload("acc-2023", "accountant_financials", UploadStatus::Completed),
        demo_upload("acc-2024", "accountant_financials", UploadStatus::Completed),
        demo_upload("acc-2025", "accountant_financials", UploadStatus::Uploading),
        demo_upload("tax-2023", "tax_returns", UploadStatus::Completed),
        demo_upload("tax-2024", "tax_returns", UploadStatus::Completed),
        demo_upload("tax-2025", "tax_returns", UploadStatus::Error),
    ];
    for upload in first_batch {
        state.record_upload(upload);
    }

    println!("\nFirst upload batch");
    render_validation(&service.validate_documents(&state.uploaded_files));
    if let Err(error) = state.advance() {
        println!("Continue blocked: {}", describe_wizard_error(&error));
    }

    state.record_upload(demo_upload(
        "acc-2025",
        "accountant_financials",
        UploadStatus::Completed,
    ));
    state.record_upload(demo_upload("tax-2025", "tax_returns", UploadStatus::Completed));

    println!("\nAfter retrying the pending uploads");
    render_validation(&service.validate_documents(&state.uploaded_files));
    match state.advance() {
        Ok(step) => println!("Step {}: {}", step.number(), step.label()),
        Err(error) => println!("Continue blocked: {}", describe_wizard_error(&error)),
    }
}

fn demo_upload(id: &str, document_type: &str, status: UploadStatus) -> UploadedFile {
    UploadedFile {
        id: id.to_string(),
        name: format!("{id}.pdf"),
        size: 180_000,
        status,
        document_type: document_type.to_string(),
    }
}

fn describe_wizard_error(error: &WizardError) -> String {
    match error {
        WizardError::DocumentsIncomplete(errors) => errors.join("; "),
        other => other.to_string(),
    }
}

fn render_recommendation(
    profile: &FundingProfile,
    recommendation: &Recommendation,
    show_trail: bool,
) {
    println!(
        "Recommendations for {} | {} | {}",
        profile.headquarters.label(),
        dollars(profile.funding_amount),
        profile.looking_for.label()
    );

    if recommendation.products.is_empty() {
        println!("- No lender products match this profile");
    }
    for category in &recommendation.categories {
        println!(
            "- {}: {} products ({:.0}%)",
            category.label, category.count, category.percentage
        );
    }
    for (product, score) in recommendation.products.iter().zip(&recommendation.scores) {
        let max = product
            .amount_range
            .max
            .map_or_else(|| "no cap".to_string(), dollars);
        println!(
            "  - [{}] {} by {} ({} to {}) | {} ({})",
            product.id,
            product.product_name,
            product.lender_name,
            dollars(product.amount_range.min),
            max,
            score.level.label(),
            score.match_score
        );
    }

    if show_trail {
        println!("Decision trail:");
        for decision in &recommendation.trail {
            println!("  - {}", describe_decision(decision));
        }
    }
}

fn describe_decision(decision: &ProductDecision) -> String {
    let verdict = match &decision.verdict {
        Verdict::Admitted(Admission::TypeRule) => "admitted by product type".to_string(),
        Verdict::Admitted(Admission::SpecialInclusion { rule }) => {
            format!("admitted by {rule}")
        }
        Verdict::Rejected { predicate } => format!("rejected on {predicate}"),
    };
    format!(
        "{} ({}): {verdict}",
        decision.product_id,
        decision.product_type.label()
    )
}

fn render_resolution(resolution: &DocumentResolution) {
    println!("{}", resolution.message);
    for document in &resolution.required_documents {
        match document.quantity {
            Some(quantity) => println!("- {} (x{quantity})", document.label),
            None => println!("- {}", document.label),
        }
    }

    if !resolution.eligible_lenders.is_empty() {
        let lenders: Vec<&str> = resolution
            .eligible_lenders
            .iter()
            .map(|product| product.lender_name.as_str())
            .collect();
        println!("Eligible lenders: {}", lenders.join(", "));
    }
}

fn render_validation(validation: &DocumentValidation) {
    println!("{}", validation.summary);
    for error in &validation.result.errors {
        println!("  ! {error}");
    }
    for warning in &validation.result.warnings {
        println!("  ~ {warning}");
    }
    println!(
        "Can continue: {}",
        if validation.result.can_proceed {
            "yes"
        } else {
            "no"
        }
    );
}

fn render_catalog_summary(summary: &CatalogSummary) {
    println!(
        "{} products ({} active) from {} lenders",
        summary.total_products, summary.active_products, summary.lenders
    );
    for entry in &summary.entries {
        let max = entry
            .max_amount
            .map_or_else(|| "no cap".to_string(), dollars);
        println!(
            "- {} {}: {} products from {} lenders, {} to {}",
            entry.country,
            entry.label,
            entry.products,
            entry.lenders,
            dollars(entry.min_amount),
            max
        );
    }
}

fn dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_wizard::workflows::recommendation::ProductType;

    #[test]
    fn dollars_groups_thousands() {
        assert_eq!(dollars(0), "$0");
        assert_eq!(dollars(950), "$950");
        assert_eq!(dollars(150_000), "$150,000");
        assert_eq!(dollars(2_500_000), "$2,500,000");
    }

    #[test]
    fn decisions_name_the_failed_predicate() {
        let decision = ProductDecision {
            product_id: "us-mca-01".to_string(),
            product_type: ProductType::TermLoan,
            verdict: Verdict::Rejected { predicate: "active" },
        };
        assert_eq!(
            describe_decision(&decision),
            "us-mca-01 (Term Loan): rejected on active"
        );
    }

    #[test]
    fn demo_walkthrough_completes_on_the_builtin_catalog() {
        let args = DemoArgs {
            catalog: None,
            country: Country::UnitedStates,
            amount: 150_000,
            looking_for: LookingFor::Capital,
            skip_uploads: false,
        };
        assert!(run_demo(args).is_ok());
    }
}
