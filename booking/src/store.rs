//! Session facade over the store runtime.
//!
//! [`BookingSession`] owns one wizard run for one customer. It wraps the
//! generic [`Store`] with booking-shaped entry points: [`start`] resolves
//! the item before the first screen renders, [`dispatch`] feeds field
//! edits and navigation, and [`submit_and_wait`] turns the asynchronous
//! submission lifecycle into a single awaited outcome.
//!
//! [`start`]: BookingSession::start
//! [`dispatch`]: BookingSession::dispatch
//! [`submit_and_wait`]: BookingSession::submit_and_wait

use std::time::Duration;

use tokio::sync::broadcast;
use tripflow_runtime::{EffectHandle, Store, StoreError};

use crate::actions::BookingAction;
use crate::environment::BookingEnvironment;
use crate::reducer::WizardReducer;
use crate::types::{BookingState, ItemId, ItemKind, SubmissionStatus};

/// One customer's journey through the wizard.
///
/// Cloning a session is cheap and shares the underlying state, so a
/// rendering loop and an observer task can hold the same session
/// concurrently.
#[derive(Clone)]
pub struct BookingSession {
    store: Store<BookingState, BookingAction, BookingEnvironment, WizardReducer>,
}

impl BookingSession {
    /// Create a session for the given item.
    ///
    /// The session starts on the dates step with an empty draft. Call
    /// [`start`](Self::start) to resolve the item details.
    #[must_use]
    pub fn new(kind: ItemKind, id: ItemId, environment: BookingEnvironment) -> Self {
        Self {
            store: Store::new(
                BookingState::new(kind, id),
                WizardReducer::new(),
                environment,
            ),
        }
    }

    /// Begin the session and wait for the item lookup to settle.
    ///
    /// When this returns, the state holds either the catalog response or
    /// the fallback item, so the first screen can render a price preview.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the session is
    /// shutting down.
    pub async fn start(&self) -> Result<(), StoreError> {
        let mut handle = self.store.send(BookingAction::Start).await?;
        handle.wait().await;
        Ok(())
    }

    /// Send a wizard action.
    ///
    /// Returns an [`EffectHandle`]; await it when the caller needs the
    /// action's effects to finish before reading state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the session is
    /// shutting down.
    pub async fn dispatch(&self, action: BookingAction) -> Result<EffectHandle, StoreError> {
        self.store.send(action).await
    }

    /// Submit the booking and wait for the terminal outcome.
    ///
    /// Sends [`BookingAction::SubmitPayment`] and waits until either
    /// `SubmissionAccepted` or `SubmissionFailed` comes back through the
    /// feedback loop. If the wizard refuses the submission (wrong step,
    /// validation failure, or a submission already settled), the current
    /// status is returned immediately; inspect `last_error` via
    /// [`state`](Self::state) to tell the cases apart.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`]: no terminal action within `timeout`
    /// - [`StoreError::ChannelClosed`]: the session shut down mid-wait
    /// - [`StoreError::ShutdownInProgress`]: the session is shutting down
    pub async fn submit_and_wait(
        &self,
        timeout: Duration,
    ) -> Result<SubmissionStatus, StoreError> {
        // Subscribe before sending so the terminal action cannot be missed.
        let mut actions = self.store.subscribe_actions();
        self.store.send(BookingAction::SubmitPayment).await?;

        // A refused submission schedules nothing, so there is no terminal
        // action to wait for. Report the current status instead.
        let status = self.store.state(|s| s.submission.clone()).await;
        if !status.is_in_flight() {
            return Ok(status);
        }

        tokio::time::timeout(timeout, async {
            loop {
                match actions.recv().await {
                    Ok(BookingAction::SubmissionAccepted { id }) => {
                        return Ok(SubmissionStatus::Accepted(id));
                    },
                    Ok(BookingAction::SubmissionFailed { message }) => {
                        return Ok(SubmissionStatus::Failed(message));
                    },
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Session observer lagged, {} actions skipped", skipped);
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        })
        .await
        .map_err(|_| StoreError::Timeout)?
    }

    /// Read a view of the session state.
    ///
    /// ```ignore
    /// let step = session.state(|s| s.step).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&BookingState) -> T,
    {
        self.store.state(f).await
    }

    /// Clone the full session state.
    ///
    /// Convenient for rendering a whole screen; prefer
    /// [`state`](Self::state) with a narrow closure on hot paths.
    pub async fn snapshot(&self) -> BookingState {
        self.store.state(Clone::clone).await
    }

    /// Observe feedback actions produced by the session's effects.
    ///
    /// Only actions fed back by effects are broadcast, not the actions
    /// sent via [`dispatch`](Self::dispatch).
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BookingAction> {
        self.store.subscribe_actions()
    }

    /// Shut the session down, waiting for in-flight effects.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if effects are still
    /// running when the timeout expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.store.shutdown(timeout).await
    }
}
