use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use crate::workflows::recommendation::domain::{Country, LenderProduct, ProductType};

/// Product counts grouped by country and product type, for catalog exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub total_products: usize,
    pub active_products: usize,
    pub lenders: usize,
    pub entries: Vec<CatalogSummaryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummaryEntry {
    pub country: Country,
    pub product_type: ProductType,
    pub label: String,
    pub products: usize,
    pub lenders: usize,
    pub min_amount: u64,
    pub max_amount: Option<u64>,
}

#[derive(Default)]
struct Bucket<'a> {
    products: usize,
    lenders: BTreeSet<&'a str>,
    min_amount: Option<u64>,
    max_amount: Option<Option<u64>>,
}

impl CatalogSummary {
    /// Inactive products are counted in the totals but not in the breakdown.
    pub fn from_products(products: &[LenderProduct]) -> Self {
        let mut buckets: BTreeMap<(Country, ProductType), Bucket<'_>> = BTreeMap::new();
        let mut lenders = BTreeSet::new();

        for product in products.iter().filter(|product| product.active) {
            if !product.lender_name.is_empty() {
                lenders.insert(product.lender_name.as_str());
            }

            for country in &product.geography {
                let bucket = buckets
                    .entry((*country, product.product_type.clone()))
                    .or_default();
                bucket.products += 1;
                if !product.lender_name.is_empty() {
                    bucket.lenders.insert(product.lender_name.as_str());
                }
                bucket.min_amount = Some(
                    bucket
                        .min_amount
                        .map_or(product.amount_range.min, |min| min.min(product.amount_range.min)),
                );
                // `None` inside means at least one product is unbounded.
                bucket.max_amount = Some(match (bucket.max_amount, product.amount_range.max) {
                    (None, max) => max,
                    (Some(None), _) | (Some(_), None) => None,
                    (Some(Some(current)), Some(max)) => Some(current.max(max)),
                });
            }
        }

        let entries = buckets
            .into_iter()
            .map(|((country, product_type), bucket)| CatalogSummaryEntry {
                country,
                label: product_type.label(),
                product_type,
                products: bucket.products,
                lenders: bucket.lenders.len(),
                min_amount: bucket.min_amount.unwrap_or_default(),
                max_amount: bucket.max_amount.flatten(),
            })
            .collect();

        Self {
            total_products: products.len(),
            active_products: products.iter().filter(|product| product.active).count(),
            lenders: lenders.len(),
            entries,
        }
    }

    pub fn entries_for(&self, country: Country) -> impl Iterator<Item = &CatalogSummaryEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.country == country)
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for entry in &self.entries {
            csv_writer.serialize(entry)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
