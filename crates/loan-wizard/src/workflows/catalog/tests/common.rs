pub(super) const ENVELOPE: &str = r#"{
    "success": true,
    "synced_at": "2026-10-01T12:00:00Z",
    "products": [
        {
            "id": "1",
            "name": "Growth Term Loan",
            "lenderName": "Maple Street Capital",
            "category": "term_loan",
            "country": "US",
            "amountRange": {"min": "10000", "max": "500000"}
        },
        {
            "id": "2",
            "productName": "Equipment Plus",
            "lender_name": "Northern Capital",
            "productType": "Equipment Financing",
            "geography": ["US", "CA"],
            "min_amount": 25000,
            "max_amount": 2000000,
            "doc_requirements": ["Equipment Quote", "Bank Statements"]
        },
        {
            "id": 3,
            "name": "Receivables Advance",
            "lenderName": "Maple Street Capital",
            "category": "Invoice Factoring",
            "country": "US",
            "amount_min": 1000,
            "amount_max": 0,
            "isActive": false
        }
    ]
}"#;

pub(super) const BARE: &str = r#"[
    {"id": "4", "name": "PO Bridge", "category": "purchase_order_financing",
     "geography": "US,CA", "amount_min": 5000, "amount_max": 1000000},
    {"id": "5", "name": "Prairie Line", "category": "line_of_credit",
     "country": "Canada", "amount_min": 10000, "amount_max": 300000}
]"#;
