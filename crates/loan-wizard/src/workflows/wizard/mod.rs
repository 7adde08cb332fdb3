//! Wizard step gating plus the service and HTTP surface over the lending core.

pub mod router;
pub mod service;
pub mod state;

#[cfg(test)]
mod tests;

pub use router::wizard_router;
pub use service::{
    DocumentRequest, DocumentValidation, LendingWizardService, Recommendation, WizardServiceError,
};
pub use state::{ApplicationState, DocumentGate, WizardError, WizardStep};
