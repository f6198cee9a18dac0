//! Form Submission Handler: payload → one POST → page update.
//!
//! The page regions are reset before the request goes out and written once the
//! response (or failure) is known. The page mutex is never held across the
//! request await.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, info, warn};

use crate::client::{BackendResponse, ResumeBackend};
use crate::errors::SubmitError;
use crate::form::FormData;
use crate::models::payload::Payload;
use crate::models::response::{Failure, GenerateResult};
use crate::page::{OutputContent, PageHandles};

pub const GENERATING_PLACEHOLDER: &str = "Generating resume, please wait...";

/// How a submission ended. All three leave the page fully rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Resume text shown and download links revealed.
    Generated,
    /// The server answered with a non-success status.
    Rejected { status: u16 },
    /// No usable response: transport or decoding failure.
    Failed,
}

pub struct FormSubmissionHandler {
    backend: Arc<dyn ResumeBackend>,
    page: Arc<Mutex<PageHandles>>,
    pending: AtomicBool,
}

impl FormSubmissionHandler {
    pub fn new(backend: Arc<dyn ResumeBackend>, page: Arc<Mutex<PageHandles>>) -> Self {
        Self {
            backend,
            page,
            pending: AtomicBool::new(false),
        }
    }

    /// True while a submission is awaiting its response. A UI disables its
    /// submit control while this holds.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Copy of the current page state.
    pub fn page_snapshot(&self) -> PageHandles {
        self.with_page(|page| page.clone())
    }

    /// Runs one submission. Returns `SubmitError::Busy` without touching the
    /// page if another submission is still pending; every other failure is
    /// rendered into the page and reported through the outcome.
    pub async fn submit(&self, form: &FormData) -> Result<SubmitOutcome, SubmitError> {
        if self
            .pending
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Submission ignored: previous request still pending");
            return Err(SubmitError::Busy);
        }
        let _pending = PendingGuard(&self.pending);

        let payload = Payload::from_form(form);
        debug!(
            "Built payload with {} of {} form field(s)",
            payload.len(),
            form.len()
        );

        self.with_page(reset_for_submit);

        let outcome = match self.backend.generate(&payload).await {
            Ok(response) if response.is_success() => {
                info!("Resume generated (status {})", response.status);
                self.with_page(|page| render_success(page, &response.body));
                SubmitOutcome::Generated
            }
            Ok(response) => {
                warn!("Resume generation rejected with status {}", response.status);
                self.with_page(|page| render_failure(page, &response));
                SubmitOutcome::Rejected {
                    status: response.status,
                }
            }
            Err(e) => {
                error!("Resume generation request failed: {e}");
                self.with_page(|page| {
                    page.output
                        .show(OutputContent::Error(format!("An error occurred: {e}")))
                });
                SubmitOutcome::Failed
            }
        };

        Ok(outcome)
    }

    fn with_page<R>(&self, f: impl FnOnce(&mut PageHandles) -> R) -> R {
        let mut page = self.page.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut page)
    }
}

/// Clears the pending flag however the submission future ends.
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn reset_for_submit(page: &mut PageHandles) {
    page.output
        .show(OutputContent::Placeholder(GENERATING_PLACEHOLDER.to_string()));
    page.description.hide_and_clear();
    page.pdf_link.hide_and_reset();
    page.docx_link.hide_and_reset();
}

fn render_success(page: &mut PageHandles, body: &GenerateResult) {
    page.output.show(OutputContent::Preformatted(
        body.resume_text.clone().unwrap_or_default(),
    ));

    if let Some(description) = &body.user_description {
        page.description.reveal(description.as_str());
    }

    page.pdf_link.reveal(body.pdf_file.as_deref());
    page.docx_link.reveal(body.docx_file.as_deref());
}

// Links and description stay as reset_for_submit left them.
fn render_failure(page: &mut PageHandles, response: &BackendResponse) {
    let content = match response.body.failure(&response.status_text) {
        Failure::Validation(lines) => OutputContent::ValidationErrors(lines),
        Failure::Message(message) => OutputContent::Error(format!("Error: {message}")),
    };
    page.output.show(content);
}
