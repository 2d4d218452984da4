//! Per-posting correction form: a draft prediction plus submission state.

use findmybike_api::types::{Aspect, Correction, PostingId};

use crate::error::FindMyBikeError;
use crate::selection::CorrectionDraft;
use crate::source::PostingSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorrectionStatus {
    /// The draft is being filled in.
    Editing,
    /// The correction has been sent and no answer has arrived yet.
    Submitting,
    /// The service accepted the correction; the form is closed.
    Submitted,
    /// The last submission failed. The message is shown to the user and the
    /// form stays open so they can resubmit or close it.
    Failed(String),
    /// Dismissed without a successful submission.
    Closed,
}

/// Correction form for a single posting.
#[derive(Debug, Clone)]
pub struct CorrectionForm {
    posting_id: PostingId,
    draft: CorrectionDraft,
    status: CorrectionStatus,
}

impl CorrectionForm {
    /// Opens an empty form for `posting_id`.
    pub fn new(posting_id: PostingId) -> Self {
        Self {
            posting_id,
            draft: CorrectionDraft::default(),
            status: CorrectionStatus::Editing,
        }
    }

    pub fn posting_id(&self) -> &PostingId {
        &self.posting_id
    }

    pub fn draft(&self) -> &CorrectionDraft {
        &self.draft
    }

    pub fn status(&self) -> &CorrectionStatus {
        &self.status
    }

    /// True while the form is shown to the user.
    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            CorrectionStatus::Editing | CorrectionStatus::Submitting | CorrectionStatus::Failed(_)
        )
    }

    fn is_editable(&self) -> bool {
        matches!(
            self.status,
            CorrectionStatus::Editing | CorrectionStatus::Failed(_)
        )
    }

    /// Updates one field of the draft from a raw select value. Editing after
    /// a failure clears the error.
    pub fn set_field(&mut self, aspect: Aspect, raw: &str) -> Result<(), FindMyBikeError> {
        if !self.is_editable() {
            return Err(FindMyBikeError::InvalidInput(
                "correction form is not open for editing".to_string(),
            ));
        }
        self.draft.set_field(aspect, raw)?;
        self.status = CorrectionStatus::Editing;
        Ok(())
    }

    /// Whether the submit action is enabled: the form is editable and all
    /// three aspects are set.
    pub fn can_submit(&self) -> bool {
        self.is_editable() && self.draft.is_complete()
    }

    /// Builds the payload and marks the form as submitting.
    pub fn begin_submit(&mut self) -> Result<Correction, FindMyBikeError> {
        if !self.is_editable() {
            return Err(FindMyBikeError::InvalidInput(
                "correction is already being submitted or the form is closed".to_string(),
            ));
        }
        let prediction = self.draft.to_prediction().ok_or_else(|| {
            let missing: Vec<&str> = Aspect::ALL
                .iter()
                .filter(|a| self.draft.field(**a).is_empty())
                .map(|a| a.field_name())
                .collect();
            FindMyBikeError::InvalidInput(format!(
                "correction is incomplete, missing: {}",
                missing.join(", ")
            ))
        })?;
        self.status = CorrectionStatus::Submitting;
        Ok(Correction::new(self.posting_id.clone(), prediction))
    }

    /// Records the outcome of a submission started with
    /// [`begin_submit`](Self::begin_submit). Failures are kept on the form
    /// and returned.
    pub fn finish_submit(
        &mut self,
        result: Result<(), FindMyBikeError>,
    ) -> Result<(), FindMyBikeError> {
        match result {
            Ok(()) => {
                tracing::info!("correction for posting {} submitted", self.posting_id);
                self.status = CorrectionStatus::Submitted;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("correction for posting {} failed: {}", self.posting_id, e);
                self.status = CorrectionStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Submits the draft through `source`. Never retries on its own.
    pub async fn submit<S: PostingSource>(&mut self, source: &S) -> Result<(), FindMyBikeError> {
        let correction = self.begin_submit()?;
        let result = source.submit_correction(&correction).await;
        self.finish_submit(result)
    }

    /// Dismisses the form. A submitted form stays `Submitted`.
    pub fn close(&mut self) {
        if self.status != CorrectionStatus::Submitted {
            self.status = CorrectionStatus::Closed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> CorrectionForm {
        CorrectionForm::new(PostingId::from("42"))
    }

    fn fill(form: &mut CorrectionForm) {
        form.set_field(Aspect::Bike, "cargo").unwrap();
        form.set_field(Aspect::Frame, "x").unwrap();
        form.set_field(Aspect::Color, "blue").unwrap();
    }

    #[test]
    fn submit_disabled_until_all_fields_set() {
        let mut form = form();
        assert!(!form.can_submit());
        form.set_field(Aspect::Bike, "cargo").unwrap();
        assert!(!form.can_submit());
        form.set_field(Aspect::Frame, "x").unwrap();
        assert!(!form.can_submit());
        form.set_field(Aspect::Color, "blue").unwrap();
        assert!(form.can_submit());

        form.set_field(Aspect::Frame, "").unwrap();
        assert!(!form.can_submit());
    }

    #[test]
    fn incomplete_draft_names_missing_fields() {
        let mut form = form();
        form.set_field(Aspect::Frame, "x").unwrap();
        let err = form.begin_submit().unwrap_err().to_string();
        assert!(err.contains("missing: bike, color"));
        assert_eq!(form.status(), &CorrectionStatus::Editing);
    }

    #[test]
    fn begin_submit_builds_payload() {
        let mut form = form();
        fill(&mut form);
        let correction = form.begin_submit().unwrap();
        assert_eq!(
            serde_json::to_value(&correction).unwrap(),
            serde_json::json!({
                "posting_id": "42",
                "correction": {"bike": "cargo", "frame": "x", "color": "blue"}
            })
        );
        assert_eq!(form.status(), &CorrectionStatus::Submitting);
        assert!(!form.can_submit());
        assert!(form.begin_submit().is_err());
    }

    #[test]
    fn failure_is_surfaced_and_form_stays_open() {
        let mut form = form();
        fill(&mut form);
        form.begin_submit().unwrap();
        let result = form.finish_submit(Err(FindMyBikeError::Api(
            findmybike_api::Error::HttpStatus {
                status: 500,
                body: String::new(),
            },
        )));
        assert!(result.is_err());
        assert_eq!(
            form.status(),
            &CorrectionStatus::Failed("API error: Request failed with status 500".to_string())
        );
        assert!(form.is_open());
        assert!(form.can_submit());
    }

    #[test]
    fn success_closes_form() {
        let mut form = form();
        fill(&mut form);
        form.begin_submit().unwrap();
        form.finish_submit(Ok(())).unwrap();
        assert_eq!(form.status(), &CorrectionStatus::Submitted);
        assert!(!form.is_open());
        form.close();
        assert_eq!(form.status(), &CorrectionStatus::Submitted);
        assert!(form.set_field(Aspect::Bike, "bike").is_err());
    }

    #[test]
    fn close_dismisses_failed_form() {
        let mut form = form();
        fill(&mut form);
        form.begin_submit().unwrap();
        let _ = form.finish_submit(Err(FindMyBikeError::InvalidInput("x".to_string())));
        form.close();
        assert_eq!(form.status(), &CorrectionStatus::Closed);
        assert!(!form.is_open());
    }
}
