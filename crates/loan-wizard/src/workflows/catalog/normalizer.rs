use serde::{Deserialize, Deserializer};

use super::CatalogError;
use crate::workflows::recommendation::domain::{
    AmountRange, Country, IndustryScope, LenderProduct, ProductType,
};

/// Loosely-typed product record as the staff API and exports emit it.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawLenderProduct {
    #[serde(default, deserialize_with = "string_or_number")]
    pub(crate) id: Option<String>,
    #[serde(default, alias = "name", alias = "productName")]
    pub(crate) product_name: Option<String>,
    #[serde(default, alias = "lenderName")]
    pub(crate) lender_name: Option<String>,
    #[serde(default, alias = "category", alias = "productType", alias = "type")]
    pub(crate) product_type: Option<String>,
    #[serde(default)]
    pub(crate) geography: Option<OneOrMany>,
    #[serde(default)]
    pub(crate) country: Option<String>,
    #[serde(default, alias = "amountRange")]
    pub(crate) amount_range: Option<RawAmountRange>,
    #[serde(default, alias = "amount_min", alias = "amountMin")]
    pub(crate) min_amount: Option<NumberLike>,
    #[serde(default, alias = "amount_max", alias = "amountMax")]
    pub(crate) max_amount: Option<NumberLike>,
    #[serde(default, alias = "minRevenue")]
    pub(crate) min_revenue: Option<NumberLike>,
    #[serde(default)]
    pub(crate) industries: Option<OneOrMany>,
    #[serde(default, alias = "isActive")]
    pub(crate) active: Option<bool>,
    #[serde(
        default,
        alias = "doc_requirements",
        alias = "documentRequirements",
        alias = "requiredDocuments"
    )]
    pub(crate) required_documents: Option<OneOrMany>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawAmountRange {
    #[serde(default)]
    pub(crate) min: Option<NumberLike>,
    #[serde(default)]
    pub(crate) max: Option<NumberLike>,
}

/// Numbers occasionally arrive as strings (`"25000.00"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum NumberLike {
    Number(f64),
    Text(String),
}

impl NumberLike {
    fn as_amount(&self) -> Option<u64> {
        let value = match self {
            NumberLike::Number(value) => *value,
            NumberLike::Text(raw) => raw.trim().replace([',', '$'], "").parse::<f64>().ok()?,
        };

        if value.is_finite() && value >= 0.0 {
            Some(value.round() as u64)
        } else {
            None
        }
    }
}

/// Either a JSON list or a single delimited string (`"US,CA"` / `"US|CA"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany {
    Many(Vec<String>),
    One(String),
}

impl OneOrMany {
    pub(crate) fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::Many(values) => values
                .into_iter()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect(),
            OneOrMany::One(value) => value
                .split([',', '|'])
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Integer(u64),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(text) => text,
        Id::Integer(value) => value.to_string(),
    }))
}

impl RawLenderProduct {
    pub(crate) fn normalize(self) -> Result<LenderProduct, CatalogError> {
        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CatalogError::Invalid {
                id: String::new(),
                reason: "missing product id".to_string(),
            })?;

        let product_type = self
            .product_type
            .as_deref()
            .map(ProductType::parse)
            .ok_or_else(|| CatalogError::Invalid {
                id: id.clone(),
                reason: "missing product type".to_string(),
            })?;

        let mut geography: Vec<Country> = Vec::new();
        let declared = self
            .geography
            .map(OneOrMany::into_vec)
            .filter(|codes| !codes.is_empty())
            .or_else(|| self.country.clone().map(|country| vec![country]))
            .unwrap_or_default();
        for code in declared {
            if let Some(country) = Country::parse(&code) {
                if !geography.contains(&country) {
                    geography.push(country);
                }
            }
        }

        let (range_min, range_max) = match self.amount_range {
            Some(range) => (range.min, range.max),
            None => (None, None),
        };
        let min = range_min
            .or(self.min_amount)
            .and_then(|value| value.as_amount())
            .unwrap_or(0);
        let max = range_max
            .or(self.max_amount)
            .and_then(|value| value.as_amount())
            .filter(|max| *max > 0);

        if let Some(max) = max {
            if max < min {
                return Err(CatalogError::Invalid {
                    id,
                    reason: format!("amount range max {max} is below min {min}"),
                });
            }
        }

        Ok(LenderProduct {
            product_name: self.product_name.unwrap_or_default(),
            lender_name: self.lender_name.unwrap_or_default(),
            product_type,
            geography,
            amount_range: AmountRange::new(min, max),
            min_revenue: self
                .min_revenue
                .and_then(|value| value.as_amount())
                .filter(|revenue| *revenue > 0),
            industries: self
                .industries
                .map(|industries| IndustryScope::from(industries.into_vec()))
                .unwrap_or_default(),
            active: self.active.unwrap_or(true),
            required_documents: self
                .required_documents
                .map(OneOrMany::into_vec)
                .unwrap_or_default(),
            id,
        })
    }
}
