use serde::{Deserialize, Serialize};

use super::vocabulary::normalize_key;

pub const REQUIRED_ACCOUNTANT_DOCS: usize = 3;
pub const REQUIRED_TAX_DOCS: usize = 3;

/// Upload types counted toward the accountant prepared financial statements bucket.
pub const ACCOUNTANT_DOCUMENT_ALIASES: &[&str] = &[
    "accountant_financials",
    "accountant_prepared_financial_statements",
    "accountant_prepared_statements",
    "accountant_prepared_financials",
    "account_prepared_financials",
    "audited_financial_statements",
    "audited_financials",
    "compiled_financial_statements",
    "financial_statements",
];

/// Upload types counted toward the tax return bucket.
pub const TAX_DOCUMENT_ALIASES: &[&str] = &[
    "tax_returns",
    "tax_return",
    "business_tax_returns",
    "corporate_tax_returns",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Completed,
    Uploading,
    Error,
    Fallback,
}

/// Upload record reported back by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: u64,
    pub status: UploadStatus,
    #[serde(default, alias = "documentType")]
    pub document_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrictValidationResult {
    pub is_valid: bool,
    pub can_proceed: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub accountant_docs_count: usize,
    pub tax_docs_count: usize,
    pub required_accountant_docs: usize,
    pub required_tax_docs: usize,
}

/// Counting buckets a document type falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BucketMatch {
    pub accountant: bool,
    pub tax: bool,
}

/// Case-insensitive, substring-tolerant in both directions.
///
/// Partial names such as `"financial_statements_2023"` or `"tax"` count, and so does any
/// unrelated type that happens to contain an alias.
pub fn classify_document_type(document_type: &str) -> BucketMatch {
    let key = normalize_key(document_type);
    if key.is_empty() {
        return BucketMatch::default();
    }

    let matches = |aliases: &[&str]| {
        aliases
            .iter()
            .any(|alias| key.contains(alias) || alias.contains(key.as_str()))
    };

    BucketMatch {
        accountant: matches(ACCOUNTANT_DOCUMENT_ALIASES),
        tax: matches(TAX_DOCUMENT_ALIASES),
    }
}

/// Exact-count check gating the documents step: three of each bucket, no failed uploads.
pub fn validate_strict_document_requirements(files: &[UploadedFile]) -> StrictValidationResult {
    let mut accountant_docs_count = 0;
    let mut tax_docs_count = 0;

    for file in files
        .iter()
        .filter(|file| file.status == UploadStatus::Completed)
    {
        let bucket = classify_document_type(&file.document_type);
        if bucket.accountant {
            accountant_docs_count += 1;
        }
        if bucket.tax {
            tax_docs_count += 1;
        }
    }

    let failed_uploads = files
        .iter()
        .filter(|file| file.status == UploadStatus::Error)
        .count();

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if accountant_docs_count < REQUIRED_ACCOUNTANT_DOCS {
        errors.push(format!(
            "Missing {} accountant prepared financial statements ({}/{} uploaded)",
            REQUIRED_ACCOUNTANT_DOCS - accountant_docs_count,
            accountant_docs_count,
            REQUIRED_ACCOUNTANT_DOCS
        ));
    }
    if tax_docs_count < REQUIRED_TAX_DOCS {
        errors.push(format!(
            "Missing {} tax returns ({}/{} uploaded)",
            REQUIRED_TAX_DOCS - tax_docs_count,
            tax_docs_count,
            REQUIRED_TAX_DOCS
        ));
    }
    if failed_uploads > 0 {
        errors.push(format!(
            "{failed_uploads} document upload(s) failed. Remove and re-upload the failed files."
        ));
    }

    if accountant_docs_count > REQUIRED_ACCOUNTANT_DOCS {
        warnings.push(format!(
            "You have uploaded {} extra accountant prepared financial statements. Only {} are required.",
            accountant_docs_count - REQUIRED_ACCOUNTANT_DOCS,
            REQUIRED_ACCOUNTANT_DOCS
        ));
    }
    if tax_docs_count > REQUIRED_TAX_DOCS {
        warnings.push(format!(
            "You have uploaded {} extra tax documents. Only {} are required.",
            tax_docs_count - REQUIRED_TAX_DOCS,
            REQUIRED_TAX_DOCS
        ));
    }

    let is_valid =
        accountant_docs_count == REQUIRED_ACCOUNTANT_DOCS && tax_docs_count == REQUIRED_TAX_DOCS;

    StrictValidationResult {
        is_valid,
        can_proceed: is_valid && failed_uploads == 0,
        errors,
        warnings,
        accountant_docs_count,
        tax_docs_count,
        required_accountant_docs: REQUIRED_ACCOUNTANT_DOCS,
        required_tax_docs: REQUIRED_TAX_DOCS,
    }
}

pub fn generate_document_progress_summary(result: &StrictValidationResult) -> String {
    format!(
        "Accountant Documents: {}/{} | Tax Documents: {}/{}",
        result.accountant_docs_count,
        result.required_accountant_docs,
        result.tax_docs_count,
        result.required_tax_docs
    )
}
