//! Document checklist resolution and strict upload validation.
//!
//! Two requirement sources live here side by side: the category-driven checklist
//! ([`DocumentRequirementResolver`]) and the fixed three-plus-three count enforced by
//! [`validate_strict_document_requirements`]. They are not derived from one another.

pub mod requirements;
pub mod validation;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use requirements::{
    document_categories, DocumentRequirementResolver, DocumentResolution, RequiredDocument,
    RequirementTable, ResolutionContext,
};
pub use validation::{
    classify_document_type, generate_document_progress_summary,
    validate_strict_document_requirements, BucketMatch, StrictValidationResult, UploadStatus,
    UploadedFile, REQUIRED_ACCOUNTANT_DOCS, REQUIRED_TAX_DOCS,
};
pub use vocabulary::{get_document_type_display_name, DocumentType};
