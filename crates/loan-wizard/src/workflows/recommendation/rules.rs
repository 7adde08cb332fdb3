use super::config::RecommendationConfig;
use super::domain::{FundingProfile, LenderProduct, LookingFor, ProductType};

/// Predicate signature shared by every base eligibility check.
pub type ProductPredicate = fn(&LenderProduct, &FundingProfile) -> bool;

/// A base eligibility check with a stable name for decision trails.
#[derive(Clone, Copy)]
pub struct NamedPredicate {
    pub name: &'static str,
    pub check: ProductPredicate,
}

impl std::fmt::Debug for NamedPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamedPredicate")
            .field("name", &self.name)
            .finish()
    }
}

pub fn is_active(product: &LenderProduct, _profile: &FundingProfile) -> bool {
    product.active
}

pub fn serves_headquarters(product: &LenderProduct, profile: &FundingProfile) -> bool {
    product.serves(profile.headquarters)
}

pub fn amount_in_range(product: &LenderProduct, profile: &FundingProfile) -> bool {
    product.amount_range.contains(profile.funding_amount)
}

/// Missing applicant revenue never disqualifies.
pub fn meets_minimum_revenue(product: &LenderProduct, profile: &FundingProfile) -> bool {
    match (product.min_revenue, profile.annual_revenue) {
        (Some(minimum), Some(revenue)) => revenue >= minimum,
        _ => true,
    }
}

/// Missing applicant industry never disqualifies.
pub fn serves_industry(product: &LenderProduct, profile: &FundingProfile) -> bool {
    match profile.industry.as_deref() {
        Some(industry) if !industry.trim().is_empty() => product.industries.allows(industry),
        _ => true,
    }
}

/// Stage one: every predicate must hold for a product to be considered at all.
#[derive(Debug, Clone)]
pub struct BaseEligibility {
    predicates: Vec<NamedPredicate>,
}

impl Default for BaseEligibility {
    fn default() -> Self {
        Self {
            predicates: vec![
                NamedPredicate {
                    name: "active",
                    check: is_active,
                },
                NamedPredicate {
                    name: "geography",
                    check: serves_headquarters,
                },
                NamedPredicate {
                    name: "amount_range",
                    check: amount_in_range,
                },
                NamedPredicate {
                    name: "minimum_revenue",
                    check: meets_minimum_revenue,
                },
                NamedPredicate {
                    name: "industry",
                    check: serves_industry,
                },
            ],
        }
    }
}

impl BaseEligibility {
    pub fn predicates(&self) -> &[NamedPredicate] {
        &self.predicates
    }

    pub fn first_failure(
        &self,
        product: &LenderProduct,
        profile: &FundingProfile,
    ) -> Option<&'static str> {
        self.predicates
            .iter()
            .find(|predicate| !(predicate.check)(product, profile))
            .map(|predicate| predicate.name)
    }

    pub fn admits(&self, product: &LenderProduct, profile: &FundingProfile) -> bool {
        self.first_failure(product, profile).is_none()
    }
}

/// Stage two: the primary `looking_for` intent narrows product types.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeRule;

impl TypeRule {
    pub fn admits(&self, product_type: &ProductType, looking_for: LookingFor) -> bool {
        match looking_for {
            LookingFor::Capital => *product_type != ProductType::EquipmentFinancing,
            LookingFor::Equipment => *product_type == ProductType::EquipmentFinancing,
            LookingFor::Both => true,
        }
    }
}

/// Trigger signature for special inclusion rules.
pub type InclusionTrigger = fn(&FundingProfile, &RecommendationConfig) -> bool;

/// Stage three: re-admits one product type when a secondary signal is present.
#[derive(Clone)]
pub struct SpecialInclusion {
    pub name: &'static str,
    pub product_type: ProductType,
    pub trigger: InclusionTrigger,
}

impl std::fmt::Debug for SpecialInclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecialInclusion")
            .field("name", &self.name)
            .field("product_type", &self.product_type)
            .finish()
    }
}

impl SpecialInclusion {
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                name: "accounts_receivable",
                product_type: ProductType::InvoiceFactoring,
                trigger: has_receivables,
            },
            Self {
                name: "inventory_purpose",
                product_type: ProductType::PurchaseOrderFinancing,
                trigger: is_purchase_order_purpose,
            },
        ]
    }

    pub fn is_triggered(&self, profile: &FundingProfile, config: &RecommendationConfig) -> bool {
        (self.trigger)(profile, config)
    }

    pub fn admits(
        &self,
        product: &LenderProduct,
        profile: &FundingProfile,
        config: &RecommendationConfig,
    ) -> bool {
        product.product_type == self.product_type && self.is_triggered(profile, config)
    }
}

fn has_receivables(profile: &FundingProfile, config: &RecommendationConfig) -> bool {
    config.include_factoring_for_receivables && profile.accounts_receivable_balance > 0
}

fn is_purchase_order_purpose(profile: &FundingProfile, config: &RecommendationConfig) -> bool {
    let purpose = profile.funds_purpose.trim();
    !purpose.is_empty()
        && config
            .purchase_order_purposes
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(purpose))
}
