use std::collections::{BTreeMap, HashSet};
use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::vocabulary::{normalize_key, DocumentType};
use crate::workflows::recommendation::domain::{
    Country, LenderProduct, LookingFor, ProductType,
};

/// One entry of a document checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDocument {
    #[serde(default)]
    pub document_type: Option<String>,
    pub label: String,
    #[serde(default)]
    pub quantity: Option<u8>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RequiredDocument {
    pub fn of(document_type: DocumentType) -> Self {
        Self {
            document_type: Some(document_type.as_str().to_string()),
            label: document_type.label().to_string(),
            quantity: None,
            description: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u8) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Lender-supplied requirement text; unknown names are kept as label-only entries.
    pub fn from_raw(raw: &str) -> Self {
        match DocumentType::normalize(raw) {
            Some(document_type) => Self::of(document_type),
            None => Self {
                document_type: None,
                label: raw.trim().to_string(),
                quantity: None,
                description: None,
            },
        }
    }

    /// Case-insensitive type, or the label when no type is set.
    pub fn dedup_key(&self) -> String {
        match self.document_type.as_deref().map(normalize_key) {
            Some(key) if !key.is_empty() => key,
            _ => normalize_key(&self.label),
        }
    }
}

/// Versioned category → checklist mapping, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementTable {
    pub version: String,
    pub base: Vec<RequiredDocument>,
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<RequiredDocument>>,
}

impl Default for RequirementTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RequirementTable {
    pub fn standard() -> Self {
        use DocumentType::*;

        let base = vec![
            RequiredDocument::of(BankStatements)
                .with_quantity(6)
                .with_description("Most recent 6 months of business bank statements"),
            RequiredDocument::of(TaxReturns)
                .with_quantity(3)
                .with_description("Business tax returns for the last 3 years"),
            RequiredDocument::of(AccountantFinancials)
                .with_quantity(3)
                .with_description("Accountant prepared P&L and balance sheet, last 3 years"),
            RequiredDocument::of(BusinessLicense),
            RequiredDocument::of(ArticlesOfIncorporation),
        ];

        let core = [
            BankStatements,
            TaxReturns,
            AccountantFinancials,
            BusinessLicense,
            ArticlesOfIncorporation,
        ];
        let category = |extra: &[DocumentType]| -> Vec<RequiredDocument> {
            core.iter()
                .chain(extra)
                .copied()
                .map(RequiredDocument::of)
                .collect()
        };

        let categories = BTreeMap::from([
            (
                ProductType::LineOfCredit.as_str().to_string(),
                category(&[AccountsReceivable, CashFlowStatement, PersonalGuarantee]),
            ),
            (
                ProductType::TermLoan.as_str().to_string(),
                category(&[BusinessPlan, PersonalFinancials, CollateralDocs]),
            ),
            (
                ProductType::EquipmentFinancing.as_str().to_string(),
                category(&[EquipmentQuote, CollateralDocs]),
            ),
            (
                ProductType::InvoiceFactoring.as_str().to_string(),
                category(&[InvoiceSamples, AccountsReceivable]),
            ),
            (
                ProductType::WorkingCapital.as_str().to_string(),
                category(&[AccountsReceivable, CashFlowStatement]),
            ),
            (
                ProductType::PurchaseOrderFinancing.as_str().to_string(),
                category(&[SupplierAgreement]),
            ),
            (
                ProductType::AssetBasedLending.as_str().to_string(),
                category(&[CollateralDocs, AccountsReceivable]),
            ),
            (
                ProductType::SbaLoan.as_str().to_string(),
                category(&[BusinessPlan, PersonalFinancials, PersonalGuarantee]),
            ),
        ]);

        Self {
            version: "2025-07-18".to_string(),
            base,
            categories,
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// Categories resolve through the product-type aliases, so `"Working Capital"` works.
    pub fn category(&self, category: &str) -> &[RequiredDocument] {
        let key = ProductType::parse(category);
        self.categories
            .get(key.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Applicant facts that decide which catalog products count as eligible lenders.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    pub country: Country,
    pub funding_amount: u64,
    pub catalog: &'a [LenderProduct],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentResolution {
    pub eligible_lenders: Vec<LenderProduct>,
    pub required_documents: Vec<RequiredDocument>,
    pub has_matches: bool,
    pub message: String,
}

/// Pure resolver over an injected [`RequirementTable`].
#[derive(Debug, Clone, Default)]
pub struct DocumentRequirementResolver {
    table: RequirementTable,
}

impl DocumentRequirementResolver {
    pub fn new(table: RequirementTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RequirementTable {
        &self.table
    }

    pub fn resolve(
        &self,
        categories: &[String],
        context: &ResolutionContext<'_>,
    ) -> DocumentResolution {
        let mut checklist = Checklist::default();
        for document in &self.table.base {
            checklist.push(document.clone());
        }

        let mut resolved_categories: Vec<ProductType> = Vec::new();
        for raw in categories {
            let category = ProductType::parse(raw);
            if !raw.trim().is_empty() && !resolved_categories.contains(&category) {
                resolved_categories.push(category);
            }
        }

        let mut has_matches = false;
        let mut eligible_lenders: Vec<LenderProduct> = Vec::new();
        let base_only = checklist.clone();

        for category in &resolved_categories {
            let entry = self.table.category(category.as_str());
            if !entry.is_empty() {
                has_matches = true;
            }
            for document in entry {
                checklist.push(document.clone());
            }

            for product in context.catalog.iter().filter(|product| {
                product.active
                    && product.product_type == *category
                    && product.serves(context.country)
                    && product.amount_range.contains(context.funding_amount)
            }) {
                if eligible_lenders.iter().any(|known| known.id == product.id) {
                    continue;
                }
                has_matches = true;
                for raw in &product.required_documents {
                    checklist.push(RequiredDocument::from_raw(raw));
                }
                eligible_lenders.push(product.clone());
            }
        }

        let labels = resolved_categories
            .iter()
            .map(ProductType::label)
            .collect::<Vec<_>>()
            .join(", ");

        let (required_documents, message) = if has_matches {
            let message = if eligible_lenders.is_empty() {
                format!("Standard documents required for {labels}")
            } else {
                format!(
                    "Documents required across {} eligible lenders for {labels}",
                    eligible_lenders.len()
                )
            };
            (checklist.documents, message)
        } else if resolved_categories.is_empty() {
            (
                base_only.documents,
                "No product category selected. Showing standard business documents.".to_string(),
            )
        } else {
            (
                base_only.documents,
                format!(
                    "No lenders or document requirements match {labels} in {} for ${}. \
                     Showing standard business documents.",
                    context.country.label(),
                    format_amount(context.funding_amount)
                ),
            )
        };

        debug!(
            categories = resolved_categories.len(),
            lenders = eligible_lenders.len(),
            documents = required_documents.len(),
            has_matches,
            "resolved document requirements"
        );

        DocumentResolution {
            eligible_lenders,
            required_documents,
            has_matches,
            message,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Checklist {
    seen: HashSet<String>,
    documents: Vec<RequiredDocument>,
}

impl Checklist {
    fn push(&mut self, document: RequiredDocument) {
        if self.seen.insert(document.dedup_key()) {
            self.documents.push(document);
        }
    }
}

/// Categories to resolve: the intent-derived category first, then selected product types.
///
/// Products with an unrecognised type fall back to keywords in their name and are skipped
/// when none match.
pub fn document_categories(
    looking_for: LookingFor,
    selected_products: &[LenderProduct],
) -> Vec<String> {
    let intent = match looking_for {
        LookingFor::Equipment => ProductType::EquipmentFinancing,
        LookingFor::Capital => ProductType::TermLoan,
        LookingFor::Both => ProductType::LineOfCredit,
    };

    let mut categories = vec![intent.as_str().to_string()];
    for product in selected_products {
        let category = match &product.product_type {
            ProductType::Other(_) => match keyword_category(&product.product_name) {
                Some(category) => category,
                None => continue,
            },
            known => known.clone(),
        };
        if !categories.iter().any(|existing| existing == category.as_str()) {
            categories.push(category.as_str().to_string());
        }
    }

    categories
}

/// Checked in order; the first keyword found in the lowercased name wins.
fn keyword_category(product_name: &str) -> Option<ProductType> {
    let name = product_name.to_lowercase();

    if name.contains("line of credit") || name.contains("loc") {
        Some(ProductType::LineOfCredit)
    } else if name.contains("equipment") {
        Some(ProductType::EquipmentFinancing)
    } else if name.contains("factoring") || name.contains("receivable") {
        Some(ProductType::InvoiceFactoring)
    } else if name.contains("working capital") {
        Some(ProductType::WorkingCapital)
    } else {
        None
    }
}

pub(crate) fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
