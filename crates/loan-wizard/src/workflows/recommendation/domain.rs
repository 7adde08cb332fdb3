use std::fmt;

use serde::{Deserialize, Serialize};

/// Countries the wizard accepts as a business headquarters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Country {
    UnitedStates,
    Canada,
}

impl Country {
    pub const fn ordered() -> [Self; 2] {
        [Self::UnitedStates, Self::Canada]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::UnitedStates => "US",
            Self::Canada => "CA",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UnitedStates => "United States",
            Self::Canada => "Canada",
        }
    }

    /// Accepts ISO codes as well as the location strings the wizard form emits.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "us" | "usa" | "united_states" | "united_states_of_america" => {
                Some(Self::UnitedStates)
            }
            "ca" | "can" | "canada" => Some(Self::Canada),
            _ => None,
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for Country {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unsupported country '{value}'"))
    }
}

impl From<Country> for String {
    fn from(value: Country) -> Self {
        value.code().to_string()
    }
}

/// Canonical financing category attached to every lender product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    TermLoan,
    EquipmentFinancing,
    InvoiceFactoring,
    PurchaseOrderFinancing,
    WorkingCapital,
    LineOfCredit,
    AssetBasedLending,
    SbaLoan,
    Other(String),
}

impl ProductType {
    pub const fn known() -> [Self; 8] {
        [
            Self::TermLoan,
            Self::EquipmentFinancing,
            Self::InvoiceFactoring,
            Self::PurchaseOrderFinancing,
            Self::WorkingCapital,
            Self::LineOfCredit,
            Self::AssetBasedLending,
            Self::SbaLoan,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::TermLoan => "term_loan",
            Self::EquipmentFinancing => "equipment_financing",
            Self::InvoiceFactoring => "invoice_factoring",
            Self::PurchaseOrderFinancing => "purchase_order_financing",
            Self::WorkingCapital => "working_capital",
            Self::LineOfCredit => "line_of_credit",
            Self::AssetBasedLending => "asset_based_lending",
            Self::SbaLoan => "sba_loan",
            Self::Other(raw) => raw.as_str(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::TermLoan => "Term Loan".to_string(),
            Self::EquipmentFinancing => "Equipment Financing".to_string(),
            Self::InvoiceFactoring => "Invoice Factoring".to_string(),
            Self::PurchaseOrderFinancing => "Purchase Order Financing".to_string(),
            Self::WorkingCapital => "Working Capital".to_string(),
            Self::LineOfCredit => "Business Line of Credit".to_string(),
            Self::AssetBasedLending => "Asset-Based Lending".to_string(),
            Self::SbaLoan => "SBA Loan".to_string(),
            Self::Other(raw) => raw.clone(),
        }
    }

    /// Resolves display names, plurals, and staff-side aliases to a canonical type.
    ///
    /// Anything unrecognised is preserved verbatim as [`ProductType::Other`] so catalog
    /// records with new categories still flow through the filter.
    pub fn parse(raw: &str) -> Self {
        let key = raw
            .trim()
            .to_ascii_lowercase()
            .replace(['-', ' ', '/'], "_");

        match key.as_str() {
            "term_loan" | "term_loans" | "business_term_loan" | "commercial_term_loan" => {
                Self::TermLoan
            }
            "equipment_financing" | "equipment_finance" | "equipment_loan" | "equipment" => {
                Self::EquipmentFinancing
            }
            "invoice_factoring"
            | "factoring"
            | "accounts_receivable_financing"
            | "ar_financing" => Self::InvoiceFactoring,
            "purchase_order_financing" | "po_financing" | "purchase_order" => {
                Self::PurchaseOrderFinancing
            }
            "working_capital" | "working_capital_loan" | "business_working_capital" => {
                Self::WorkingCapital
            }
            "line_of_credit" | "business_line_of_credit" | "loc" | "credit_line"
            | "revolving_credit" => Self::LineOfCredit,
            "asset_based_lending" | "abl" | "asset_based_loan" => Self::AssetBasedLending,
            "sba_loan" | "sba" | "sba_term_loan" => Self::SbaLoan,
            _ => Self::Other(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ProductType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for ProductType {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<ProductType> for String {
    fn from(value: ProductType) -> Self {
        value.as_str().to_string()
    }
}

/// Inclusive funding bounds; a missing maximum is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: u64,
    #[serde(default)]
    pub max: Option<u64>,
}

impl AmountRange {
    pub const fn new(min: u64, max: Option<u64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, amount: u64) -> bool {
        amount >= self.min && self.max.map_or(true, |max| amount <= max)
    }
}

/// Industries a product will lend to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum IndustryScope {
    #[default]
    All,
    Only(Vec<String>),
}

impl IndustryScope {
    pub fn allows(&self, industry: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(industries) => industries
                .iter()
                .any(|candidate| candidate.eq_ignore_ascii_case(industry.trim())),
        }
    }
}

impl From<Vec<String>> for IndustryScope {
    fn from(value: Vec<String>) -> Self {
        let cleaned: Vec<String> = value
            .into_iter()
            .map(|industry| industry.trim().to_ascii_lowercase())
            .filter(|industry| !industry.is_empty())
            .collect();

        if cleaned.is_empty() || cleaned.iter().any(|industry| industry == "all") {
            Self::All
        } else {
            Self::Only(cleaned)
        }
    }
}

impl From<IndustryScope> for Vec<String> {
    fn from(value: IndustryScope) -> Self {
        match value {
            IndustryScope::All => vec!["all".to_string()],
            IndustryScope::Only(industries) => industries,
        }
    }
}

/// One financing offer from the staff catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LenderProduct {
    pub id: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub lender_name: String,
    pub product_type: ProductType,
    pub geography: Vec<Country>,
    pub amount_range: AmountRange,
    #[serde(default)]
    pub min_revenue: Option<u64>,
    #[serde(default)]
    pub industries: IndustryScope,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub required_documents: Vec<String>,
}

fn default_active() -> bool {
    true
}

impl LenderProduct {
    pub fn serves(&self, country: Country) -> bool {
        self.geography.contains(&country)
    }
}

/// Primary financing intent captured on the first wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookingFor {
    Capital,
    Equipment,
    Both,
}

impl LookingFor {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Capital => "Capital",
            Self::Equipment => "Equipment",
            Self::Both => "Capital & Equipment",
        }
    }
}

/// Applicant-declared intent and business facts used to filter the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingProfile {
    pub headquarters: Country,
    #[serde(alias = "fundingAmount")]
    pub funding_amount: u64,
    #[serde(alias = "lookingFor")]
    pub looking_for: LookingFor,
    #[serde(default, alias = "accountsReceivableBalance")]
    pub accounts_receivable_balance: u64,
    #[serde(default, alias = "fundsPurpose")]
    pub funds_purpose: String,
    #[serde(default, alias = "annualRevenue", alias = "lastYearRevenue")]
    pub annual_revenue: Option<u64>,
    #[serde(default)]
    pub industry: Option<String>,
}
