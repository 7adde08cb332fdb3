use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::normalizer::{NumberLike, OneOrMany, RawLenderProduct};

/// Reads the flat lender export (`id,product_name,...,required_documents`).
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RawLenderProduct>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<CatalogRow>() {
        let row = record?;
        records.push(row.into_raw());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    product_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lender_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    product_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    geography: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    min_amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max_amount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    min_revenue: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    industries: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    active: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    required_documents: Option<String>,
}

impl CatalogRow {
    fn into_raw(self) -> RawLenderProduct {
        RawLenderProduct {
            id: self.id,
            product_name: self.product_name,
            lender_name: self.lender_name,
            product_type: self.product_type,
            geography: self.geography.map(|value| OneOrMany::Many(split_list(&value))),
            country: None,
            amount_range: None,
            min_amount: self.min_amount.map(NumberLike::Text),
            max_amount: self.max_amount.map(NumberLike::Text),
            min_revenue: self.min_revenue.map(NumberLike::Text),
            industries: self
                .industries
                .map(|value| OneOrMany::Many(split_list(&value))),
            active: self.active.as_deref().map(parse_flag),
            required_documents: self
                .required_documents
                .map(|value| OneOrMany::Many(split_list(&value))),
        }
    }
}

/// Lists inside a cell are `|`-separated so commas can appear in labels.
fn split_list(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "no" | "n" | "0" | "inactive"
    )
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
