use std::collections::HashSet;

use crate::workflows::documents::validation::{
    classify_document_type, ACCOUNTANT_DOCUMENT_ALIASES, TAX_DOCUMENT_ALIASES,
};
use crate::workflows::documents::vocabulary::{get_document_type_display_name, DocumentType};

#[test]
fn vocabulary_has_twenty_two_unique_types() {
    let names: HashSet<_> = DocumentType::ALL.iter().map(|doc| doc.as_str()).collect();
    assert_eq!(names.len(), 22);

    for doc_type in DocumentType::ALL {
        assert_eq!(DocumentType::lookup(doc_type.as_str()), Some(doc_type));
    }
}

#[test]
fn bucket_aliases_agree_with_vocabulary() {
    for alias in ACCOUNTANT_DOCUMENT_ALIASES {
        assert_eq!(
            DocumentType::normalize(alias),
            Some(DocumentType::AccountantFinancials),
            "accountant alias {alias} drifted from the vocabulary"
        );
    }
    for alias in TAX_DOCUMENT_ALIASES {
        assert_eq!(
            DocumentType::normalize(alias),
            Some(DocumentType::TaxReturns),
            "tax alias {alias} drifted from the vocabulary"
        );
    }

    let accountant_names = std::iter::once(DocumentType::AccountantFinancials.as_str())
        .chain(DocumentType::AccountantFinancials.aliases_of());
    for name in accountant_names {
        assert!(classify_document_type(name).accountant, "{name} is not counted");
    }

    let tax_names = std::iter::once(DocumentType::TaxReturns.as_str())
        .chain(DocumentType::TaxReturns.aliases_of());
    for name in tax_names {
        assert!(classify_document_type(name).tax, "{name} is not counted");
    }
}

#[test]
fn other_canonical_types_fill_no_bucket() {
    for doc_type in DocumentType::ALL {
        if matches!(
            doc_type,
            DocumentType::AccountantFinancials | DocumentType::TaxReturns
        ) {
            continue;
        }

        let bucket = classify_document_type(doc_type.as_str());
        assert!(!bucket.accountant && !bucket.tax, "{doc_type} counted");
    }
}

#[test]
fn normalize_uses_aliases_then_keywords() {
    assert_eq!(
        DocumentType::normalize("Bank Statements (6 months)"),
        Some(DocumentType::BankStatements)
    );
    assert_eq!(
        DocumentType::normalize("Personal Financial Statement"),
        Some(DocumentType::PersonalFinancials)
    );
    assert_eq!(
        DocumentType::normalize("void_pad"),
        Some(DocumentType::VoidCheque)
    );
    assert_eq!(
        DocumentType::normalize("Voided cheque copy"),
        Some(DocumentType::VoidCheque)
    );
    assert_eq!(
        DocumentType::normalize("AR Aging"),
        Some(DocumentType::AccountsReceivable)
    );
    assert_eq!(
        DocumentType::normalize("Financial Statements (P&L and Balance Sheet)"),
        Some(DocumentType::AccountantFinancials)
    );
    assert_eq!(DocumentType::normalize("Proof of Insurance"), None);
    assert_eq!(DocumentType::normalize("   "), None);
}

#[test]
fn display_names_fall_back_to_title_case() {
    assert_eq!(
        get_document_type_display_name("accountant_financials"),
        "Accountant Prepared Financial Statements"
    );
    assert_eq!(get_document_type_display_name("void_pad"), "Void Cheque");
    assert_eq!(
        get_document_type_display_name("TAX_RETURNS"),
        "Business Tax Returns"
    );
    assert_eq!(
        get_document_type_display_name("custom_lender_form"),
        "Custom Lender Form"
    );
}
