use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical document types accepted by the staff upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    AccountsPayable,
    AccountsReceivable,
    ArticlesOfIncorporation,
    BalanceSheet,
    BankStatements,
    BusinessLicense,
    BusinessPlan,
    CashFlowStatement,
    CollateralDocs,
    DriversLicenseFrontBack,
    EquipmentQuote,
    AccountantFinancials,
    InvoiceSamples,
    Other,
    PersonalFinancials,
    PersonalGuarantee,
    ProfitAndLoss,
    ProofOfIdentity,
    SignedApplication,
    SupplierAgreement,
    TaxReturns,
    VoidCheque,
}

/// Legacy client names and staff-side variations, keyed by their normalized form.
const ALIASES: &[(&str, DocumentType)] = &[
    ("bank_statement", DocumentType::BankStatements),
    ("banking_statements", DocumentType::BankStatements),
    ("bank_account_statements", DocumentType::BankStatements),
    ("account_prepared_financials", DocumentType::AccountantFinancials),
    ("accountant_prepared_financials", DocumentType::AccountantFinancials),
    ("accountant_prepared_statements", DocumentType::AccountantFinancials),
    ("accountant_prepared_financial_statements", DocumentType::AccountantFinancials),
    ("audited_financial_statements", DocumentType::AccountantFinancials),
    ("audited_financials", DocumentType::AccountantFinancials),
    ("compiled_financial_statements", DocumentType::AccountantFinancials),
    ("financial_statements", DocumentType::AccountantFinancials),
    ("pnl_statement", DocumentType::ProfitAndLoss),
    ("p&l_statement", DocumentType::ProfitAndLoss),
    ("income_statement", DocumentType::ProfitAndLoss),
    ("profit_and_loss_statement", DocumentType::ProfitAndLoss),
    ("profit_loss_statement", DocumentType::ProfitAndLoss),
    ("tax_return", DocumentType::TaxReturns),
    ("business_tax_returns", DocumentType::TaxReturns),
    ("corporate_tax_returns", DocumentType::TaxReturns),
    ("void_check", DocumentType::VoidCheque),
    ("voided_check", DocumentType::VoidCheque),
    ("cancelled_check", DocumentType::VoidCheque),
    ("banking_info", DocumentType::VoidCheque),
    ("bank_verification", DocumentType::VoidCheque),
    ("void_pad", DocumentType::VoidCheque),
    ("personal_financial_statement", DocumentType::PersonalFinancials),
    ("personal_financial_statements", DocumentType::PersonalFinancials),
    ("personal_balance_sheet", DocumentType::PersonalFinancials),
    ("driver_license", DocumentType::DriversLicenseFrontBack),
    ("drivers_license", DocumentType::DriversLicenseFrontBack),
    ("driver's_license", DocumentType::DriversLicenseFrontBack),
    ("driving_license", DocumentType::DriversLicenseFrontBack),
    ("id_verification", DocumentType::DriversLicenseFrontBack),
    ("government_id", DocumentType::DriversLicenseFrontBack),
    ("invoice_summary", DocumentType::InvoiceSamples),
    ("invoices", DocumentType::InvoiceSamples),
    ("sample_invoices", DocumentType::InvoiceSamples),
    ("customer_invoices", DocumentType::InvoiceSamples),
    ("ar_report", DocumentType::AccountsReceivable),
    ("receivables", DocumentType::AccountsReceivable),
    ("ar_aging", DocumentType::AccountsReceivable),
    ("accounts_receivable_aging", DocumentType::AccountsReceivable),
    ("ap_report", DocumentType::AccountsPayable),
    ("payables", DocumentType::AccountsPayable),
    ("ap_aging", DocumentType::AccountsPayable),
    ("accounts_payable_aging", DocumentType::AccountsPayable),
    ("equipment_invoice", DocumentType::EquipmentQuote),
    ("equipment_specifications", DocumentType::EquipmentQuote),
    ("operating_license", DocumentType::BusinessLicense),
    ("professional_license", DocumentType::BusinessLicense),
    ("incorporation_documents", DocumentType::ArticlesOfIncorporation),
    ("corporate_formation_documents", DocumentType::ArticlesOfIncorporation),
    ("collateral_documents", DocumentType::CollateralDocs),
    ("security_documents", DocumentType::CollateralDocs),
    ("identity_verification", DocumentType::ProofOfIdentity),
    ("id_documents", DocumentType::ProofOfIdentity),
    ("supplier_contracts", DocumentType::SupplierAgreement),
    ("vendor_agreements", DocumentType::SupplierAgreement),
    ("business_plans", DocumentType::BusinessPlan),
    ("financial_projections", DocumentType::BusinessPlan),
    ("personal_guarantees", DocumentType::PersonalGuarantee),
    ("personal_guaranty", DocumentType::PersonalGuarantee),
    ("guarantee_documents", DocumentType::PersonalGuarantee),
    ("completed_application", DocumentType::SignedApplication),
    ("loan_application", DocumentType::SignedApplication),
    ("other_documents", DocumentType::Other),
    ("additional_documents", DocumentType::Other),
];

/// Ordered keyword pairs tried when neither the canonical names nor the aliases match.
/// Personal statements are checked before business financial statements.
const KEYWORD_FALLBACKS: &[(&str, &str, DocumentType)] = &[
    ("bank", "statement", DocumentType::BankStatements),
    ("tax", "return", DocumentType::TaxReturns),
    ("personal", "financial", DocumentType::PersonalFinancials),
    ("personal", "guarant", DocumentType::PersonalGuarantee),
    ("financial", "statement", DocumentType::AccountantFinancials),
    ("business", "license", DocumentType::BusinessLicense),
    ("article", "incorporation", DocumentType::ArticlesOfIncorporation),
    ("void", "check", DocumentType::VoidCheque),
    ("void", "cheque", DocumentType::VoidCheque),
    ("void", "pad", DocumentType::VoidCheque),
    ("equipment", "quote", DocumentType::EquipmentQuote),
    ("accounts", "receivable", DocumentType::AccountsReceivable),
    ("invoice", "sample", DocumentType::InvoiceSamples),
    ("cash", "flow", DocumentType::CashFlowStatement),
    ("business", "plan", DocumentType::BusinessPlan),
    ("collateral", "", DocumentType::CollateralDocs),
    ("profit", "loss", DocumentType::ProfitAndLoss),
    ("balance", "sheet", DocumentType::BalanceSheet),
    ("accounts", "payable", DocumentType::AccountsPayable),
    ("supplier", "agreement", DocumentType::SupplierAgreement),
    ("driver", "license", DocumentType::DriversLicenseFrontBack),
    ("proof", "identity", DocumentType::ProofOfIdentity),
    ("signed", "application", DocumentType::SignedApplication),
];

impl DocumentType {
    pub const ALL: [Self; 22] = [
        Self::AccountsPayable,
        Self::AccountsReceivable,
        Self::ArticlesOfIncorporation,
        Self::BalanceSheet,
        Self::BankStatements,
        Self::BusinessLicense,
        Self::BusinessPlan,
        Self::CashFlowStatement,
        Self::CollateralDocs,
        Self::DriversLicenseFrontBack,
        Self::EquipmentQuote,
        Self::AccountantFinancials,
        Self::InvoiceSamples,
        Self::Other,
        Self::PersonalFinancials,
        Self::PersonalGuarantee,
        Self::ProfitAndLoss,
        Self::ProofOfIdentity,
        Self::SignedApplication,
        Self::SupplierAgreement,
        Self::TaxReturns,
        Self::VoidCheque,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccountsPayable => "accounts_payable",
            Self::AccountsReceivable => "accounts_receivable",
            Self::ArticlesOfIncorporation => "articles_of_incorporation",
            Self::BalanceSheet => "balance_sheet",
            Self::BankStatements => "bank_statements",
            Self::BusinessLicense => "business_license",
            Self::BusinessPlan => "business_plan",
            Self::CashFlowStatement => "cash_flow_statement",
            Self::CollateralDocs => "collateral_docs",
            Self::DriversLicenseFrontBack => "drivers_license_front_back",
            Self::EquipmentQuote => "equipment_quote",
            Self::AccountantFinancials => "accountant_financials",
            Self::InvoiceSamples => "invoice_samples",
            Self::Other => "other",
            Self::PersonalFinancials => "personal_financials",
            Self::PersonalGuarantee => "personal_guarantee",
            Self::ProfitAndLoss => "profit_and_loss",
            Self::ProofOfIdentity => "proof_of_identity",
            Self::SignedApplication => "signed_application",
            Self::SupplierAgreement => "supplier_agreement",
            Self::TaxReturns => "tax_returns",
            Self::VoidCheque => "void_cheque",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AccountsPayable => "Accounts Payable",
            Self::AccountsReceivable => "Accounts Receivable",
            Self::ArticlesOfIncorporation => "Articles of Incorporation",
            Self::BalanceSheet => "Balance Sheet",
            Self::BankStatements => "Bank Statements",
            Self::BusinessLicense => "Business License",
            Self::BusinessPlan => "Business Plan",
            Self::CashFlowStatement => "Cash Flow Statement",
            Self::CollateralDocs => "Collateral Documents",
            Self::DriversLicenseFrontBack => "Driver's License (Front & Back)",
            Self::EquipmentQuote => "Equipment Quote",
            Self::AccountantFinancials => "Accountant Prepared Financial Statements",
            Self::InvoiceSamples => "Invoice Samples",
            Self::Other => "Other Documents",
            Self::PersonalFinancials => "Personal Financial Statement",
            Self::PersonalGuarantee => "Personal Guarantee",
            Self::ProfitAndLoss => "Profit & Loss Statement",
            Self::ProofOfIdentity => "Proof of Identity",
            Self::SignedApplication => "Signed Application",
            Self::SupplierAgreement => "Supplier Agreement",
            Self::TaxReturns => "Business Tax Returns",
            Self::VoidCheque => "Void Cheque",
        }
    }

    /// Exact match on a canonical name or a known alias.
    pub fn lookup(raw: &str) -> Option<Self> {
        let key = normalize_key(raw);
        Self::ALL
            .into_iter()
            .find(|doc_type| doc_type.as_str() == key)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == key)
                    .map(|(_, doc_type)| *doc_type)
            })
    }

    /// Maps labels like `"Bank Statements (6 months)"` onto the vocabulary.
    pub fn normalize(raw: &str) -> Option<Self> {
        if let Some(doc_type) = Self::lookup(raw) {
            return Some(doc_type);
        }

        let key = normalize_key(raw);
        if key.is_empty() {
            return None;
        }

        KEYWORD_FALLBACKS
            .iter()
            .find(|(first, second, _)| key.contains(first) && key.contains(second))
            .map(|(_, _, doc_type)| *doc_type)
    }

    pub(crate) fn aliases_of(self) -> impl Iterator<Item = &'static str> {
        ALIASES
            .iter()
            .filter(move |(_, doc_type)| *doc_type == self)
            .map(|(alias, _)| *alias)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase, trimmed, with spaces and hyphens folded to underscores.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Human-readable name for a document type identifier.
pub fn get_document_type_display_name(raw: &str) -> String {
    if let Some(doc_type) = DocumentType::lookup(raw) {
        return doc_type.label().to_string();
    }

    raw.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
