//! Submission handlers and submission status.
//!
//! The sequencing itself (validate, call the handler, reset, show success)
//! lives in [`FormController::submit`](crate::FormController::submit). This
//! module holds the pieces it drives: the [`SubmitHandler`] seam, the built-in
//! [`SimulatedSubmit`] placeholder, the [`SubmissionStatus`] flags and the
//! [`PendingSubmit`] handed out while a submission is in flight.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use tokio::time::Instant;
use tracing::info;

use crate::error::SubmitError;
use crate::value::FormData;

/// Receives validated form data.
///
/// Implemented for any `Fn(FormData) -> impl Future<Output = Result<(),
/// SubmitError>>`, so an async closure can be used directly.
///
/// # Example
///
/// ```ignore
/// let handler = |data: FormData| async move {
///     client.post_lead(&data).await.map_err(|e| SubmitError::Transport(e.to_string()))
/// };
/// let controller = FormController::new(config)?.with_handler(handler);
/// ```
pub trait SubmitHandler: Send + Sync {
    /// Delivers a snapshot of the form data.
    fn submit(&self, data: FormData) -> BoxFuture<'_, Result<(), SubmitError>>;
}

impl<F, Fut> SubmitHandler for F
where
    F: Fn(FormData) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), SubmitError>> + Send + 'static,
{
    fn submit(&self, data: FormData) -> BoxFuture<'_, Result<(), SubmitError>> {
        self(data).boxed()
    }
}

/// Stand-in used when no handler is configured: waits a fixed delay, logs
/// the data and succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedSubmit {
    delay: Duration,
}

impl SimulatedSubmit {
    /// Creates a placeholder with the given delay.
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl SubmitHandler for SimulatedSubmit {
    fn submit(&self, data: FormData) -> BoxFuture<'_, Result<(), SubmitError>> {
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            let mut fields: Vec<_> = data.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            info!(?fields, "form submitted (simulated)");
            Ok(())
        }
        .boxed()
    }
}

/// What a call to `submit` did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Another submission was already in flight. Nothing happened.
    Busy,
    /// Validation failed. `focus` is the first field with an error, in
    /// declaration order.
    Invalid { focus: Option<String> },
    /// The handler accepted the data. The form has been reset.
    Succeeded,
    /// The handler failed. The user's data is untouched.
    Failed(SubmitError),
}

impl SubmitOutcome {
    /// Returns whether the data was delivered.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// In-flight and success-visible flags of a form.
///
/// The in-flight flag is shared with the [`InFlight`] guard of the current
/// submission, so it stays readable while the handler runs.
#[derive(Debug, Default)]
pub struct SubmissionStatus {
    submitting: Arc<AtomicBool>,
    success_until: Option<Instant>,
}

impl SubmissionStatus {
    /// Creates an idle status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Returns whether the success message is currently shown.
    pub fn is_success_visible(&self) -> bool {
        self.success_until
            .is_some_and(|until| Instant::now() < until)
    }

    /// Shows the success message for `duration` from now.
    pub fn show_success(&mut self, duration: Duration) {
        self.success_until = Some(Instant::now() + duration);
    }

    /// Hides the success message.
    pub fn hide_success(&mut self) {
        self.success_until = None;
    }

    /// Marks a submission as in flight until the returned guard is dropped.
    /// Returns `None` if one already is.
    pub fn begin(&self) -> Option<InFlight> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(InFlight {
            submitting: Arc::clone(&self.submitting),
        })
    }
}

/// Clears the submitting flag when dropped, whether the submission finished
/// or was abandoned part-way.
#[derive(Debug)]
pub struct InFlight {
    submitting: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.submitting.store(false, Ordering::Release);
    }
}

/// A validated submission that has not been delivered yet.
///
/// Created by [`FormController::begin_submit`](crate::FormController::begin_submit).
/// The form reports itself as submitting until this is delivered or dropped.
pub struct PendingSubmit {
    data: FormData,
    handler: Arc<dyn SubmitHandler>,
    in_flight: InFlight,
}

impl std::fmt::Debug for PendingSubmit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingSubmit")
            .field("data", &self.data)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl PendingSubmit {
    pub(crate) fn new(
        data: FormData,
        handler: Arc<dyn SubmitHandler>,
        in_flight: InFlight,
    ) -> Self {
        Self {
            data,
            handler,
            in_flight,
        }
    }

    /// Returns the snapshot that will be delivered.
    pub const fn data(&self) -> &FormData {
        &self.data
    }

    /// Hands the snapshot to the handler. The in-flight flag is cleared once
    /// the handler returns.
    pub async fn deliver(self) -> Result<(), SubmitError> {
        let Self {
            data,
            handler,
            in_flight,
        } = self;
        info!(fields = data.len(), "submitting form");
        let result = handler.submit(data).await;
        drop(in_flight);
        result
    }
}
