use serde::{Deserialize, Serialize};

use crate::workflows::documents::{validate_strict_document_requirements, UploadedFile};
use crate::workflows::recommendation::domain::FundingProfile;

/// Wizard steps in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    FundingProfile,
    Recommendations,
    BusinessDetails,
    ApplicantDetails,
    Documents,
    Signature,
    Finalization,
}

impl WizardStep {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::FundingProfile,
            Self::Recommendations,
            Self::BusinessDetails,
            Self::ApplicantDetails,
            Self::Documents,
            Self::Signature,
            Self::Finalization,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FundingProfile => "Financial Profile",
            Self::Recommendations => "Recommendations",
            Self::BusinessDetails => "Business Details",
            Self::ApplicantDetails => "Applicant Details",
            Self::Documents => "Upload Documents",
            Self::Signature => "Sign Application",
            Self::Finalization => "Finalization",
        }
    }

    /// 1-based position shown in the progress header.
    pub fn number(self) -> usize {
        Self::ordered()
            .iter()
            .position(|step| *step == self)
            .map_or(0, |index| index + 1)
    }

    pub fn next(self) -> Option<Self> {
        let steps = Self::ordered();
        steps
            .iter()
            .position(|step| *step == self)
            .and_then(|index| steps.get(index + 1).copied())
    }
}

/// Whether the documents step may be left, recomputed from the current uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DocumentGate {
    Ready,
    Bypassed,
    Blocked { errors: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("a funding profile is required before viewing recommendations")]
    MissingProfile,
    #[error("document requirements are not satisfied: {}", .0.join("; "))]
    DocumentsIncomplete(Vec<String>),
    #[error("application is already finalized")]
    AlreadyFinalized,
}

/// Wizard-level state around the pure core, including the document bypass flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationState {
    pub step: WizardStep,
    #[serde(default)]
    pub profile: Option<FundingProfile>,
    #[serde(default)]
    pub selected_categories: Vec<String>,
    #[serde(default)]
    pub bypass_documents: bool,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self {
            step: WizardStep::FundingProfile,
            profile: None,
            selected_categories: Vec::new(),
            bypass_documents: false,
            uploaded_files: Vec::new(),
        }
    }
}

impl ApplicationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: FundingProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn record_upload(&mut self, file: UploadedFile) {
        match self
            .uploaded_files
            .iter_mut()
            .find(|existing| existing.id == file.id)
        {
            Some(existing) => *existing = file,
            None => self.uploaded_files.push(file),
        }
    }

    pub fn remove_upload(&mut self, file_id: &str) -> Option<UploadedFile> {
        let index = self
            .uploaded_files
            .iter()
            .position(|file| file.id == file_id)?;
        Some(self.uploaded_files.remove(index))
    }

    pub fn documents_gate(&self) -> DocumentGate {
        if self.bypass_documents {
            return DocumentGate::Bypassed;
        }

        let result = validate_strict_document_requirements(&self.uploaded_files);
        if result.can_proceed {
            DocumentGate::Ready
        } else {
            // Over-target uploads only warn, but they still keep the set invalid.
            DocumentGate::Blocked {
                errors: result.errors.into_iter().chain(result.warnings).collect(),
            }
        }
    }

    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        match self.step {
            WizardStep::FundingProfile if self.profile.is_none() => {
                return Err(WizardError::MissingProfile);
            }
            WizardStep::Documents => {
                if let DocumentGate::Blocked { errors } = self.documents_gate() {
                    return Err(WizardError::DocumentsIncomplete(errors));
                }
            }
            _ => {}
        }

        let next = self.step.next().ok_or(WizardError::AlreadyFinalized)?;
        self.step = next;
        Ok(next)
    }
}
