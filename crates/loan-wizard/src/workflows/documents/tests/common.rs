use crate::workflows::documents::validation::{UploadStatus, UploadedFile};
use crate::workflows::recommendation::domain::{
    AmountRange, Country, IndustryScope, LenderProduct, ProductType,
};

pub(super) fn upload(id: &str, document_type: &str, status: UploadStatus) -> UploadedFile {
    UploadedFile {
        id: id.to_string(),
        name: format!("{id}.pdf"),
        size: 48_000,
        status,
        document_type: document_type.to_string(),
    }
}

/// `accountant` completed accountant statements followed by `tax` completed tax returns.
pub(super) fn completed(accountant: usize, tax: usize) -> Vec<UploadedFile> {
    let statements = (0..accountant).map(|index| {
        upload(
            &format!("fs-{index}"),
            "accountant_financials",
            UploadStatus::Completed,
        )
    });
    let returns = (0..tax)
        .map(|index| upload(&format!("tax-{index}"), "tax_returns", UploadStatus::Completed));
    statements.chain(returns).collect()
}

pub(super) fn lender(
    id: &str,
    product_type: ProductType,
    geography: Vec<Country>,
    range: AmountRange,
    documents: &[&str],
) -> LenderProduct {
    LenderProduct {
        id: id.to_string(),
        product_name: format!("Product {id}"),
        lender_name: format!("Lender {id}"),
        product_type,
        geography,
        amount_range: range,
        min_revenue: None,
        industries: IndustryScope::All,
        active: true,
        required_documents: documents.iter().map(|doc| doc.to_string()).collect(),
    }
}

pub(super) fn keys(documents: &[crate::workflows::documents::RequiredDocument]) -> Vec<String> {
    documents.iter().map(|document| document.dedup_key()).collect()
}
