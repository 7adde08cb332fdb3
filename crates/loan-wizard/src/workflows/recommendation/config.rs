use serde::{Deserialize, Serialize};

/// Dials for the special inclusion rules layered on top of the product-type rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub include_factoring_for_receivables: bool,
    pub purchase_order_purposes: Vec<String>,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            include_factoring_for_receivables: true,
            purchase_order_purposes: vec!["inventory".to_string()],
        }
    }
}
