//! The wizard state machine.
//!
//! `WizardReducer` is the single dispatch point for every booking action:
//! input commits, validated step transitions, and the submission
//! lifecycle. All asynchronous work (item lookup, gateway call, operator
//! notification) is returned as effect descriptions; the reducer itself
//! never blocks.

use std::sync::Arc;

use smallvec::{SmallVec, smallvec};
use tripflow_core::{effect::Effect, reducer::Reducer};

use crate::actions::BookingAction;
use crate::catalog::fallback_item;
use crate::environment::BookingEnvironment;
use crate::notification::whatsapp_link;
use crate::types::{BookingState, SubmissionStatus, WizardStep};
use crate::validation::{self, ValidationError};
use crate::{quote, view};

/// Message surfaced when the gateway rejects or cannot be reached
const SUBMISSION_FAILED_MESSAGE: &str =
    "Payment processing failed. Please try again or contact us on WhatsApp.";

/// Reducer driving the booking wizard.
///
/// Step transitions are gated by the validator; the confirmation step is
/// entered only through a successful submission. A second submit while
/// one is in flight is ignored, so a double-click produces exactly one
/// gateway call.
#[derive(Debug, Clone)]
pub struct WizardReducer;

impl WizardReducer {
    /// Create a new wizard reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for WizardReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for WizardReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action keeps the dispatch in one place
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BookingAction::Start => {
                let catalog = Arc::clone(&env.catalog);
                let kind = state.draft.item_kind;
                let id = state.draft.item_id.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    let details = match catalog.fetch_item(kind, id).await {
                        Ok(details) => details,
                        Err(error) => {
                            // Lookup failure never blocks the page.
                            tracing::warn!(%error, "Item lookup failed, using fallback item");
                            fallback_item()
                        },
                    };
                    Some(BookingAction::ItemResolved { details })
                }))]
            },

            BookingAction::ItemResolved { details } => {
                state.draft.item_name = details.name.clone();
                state.draft.base_price_per_night = details.base_price();
                state.item = Some(details);
                quote::refresh(&mut state.draft);
                smallvec![Effect::None]
            },

            BookingAction::SetCheckIn(date) => {
                state.draft.check_in = Some(date);
                state.last_error = None;
                quote::refresh(&mut state.draft);
                smallvec![Effect::None]
            },

            BookingAction::SetCheckOut(date) => {
                state.draft.check_out = Some(date);
                state.last_error = None;
                quote::refresh(&mut state.draft);
                smallvec![Effect::None]
            },

            BookingAction::SetGuests(guests) => {
                state.draft.guests = guests.max(1);
                state.last_error = None;
                quote::refresh(&mut state.draft);
                smallvec![Effect::None]
            },

            BookingAction::SetRoomType(room_type) => {
                state.draft.room_type = room_type;
                state.last_error = None;
                quote::refresh(&mut state.draft);
                smallvec![Effect::None]
            },

            BookingAction::SetCustomerName(name) => {
                state.draft.customer_name = name;
                state.last_error = None;
                smallvec![Effect::None]
            },

            BookingAction::SetCustomerEmail(email) => {
                state.draft.customer_email = email;
                state.last_error = None;
                smallvec![Effect::None]
            },

            BookingAction::SetCustomerPhone(phone) => {
                state.draft.customer_phone = phone;
                state.last_error = None;
                smallvec![Effect::None]
            },

            BookingAction::SetTermsAccepted(accepted) => {
                state.draft.terms_accepted = accepted;
                state.last_error = None;
                smallvec![Effect::None]
            },

            BookingAction::SetPaymentMethod(method) => {
                state.draft.payment_method = method;
                state.last_error = None;
                smallvec![Effect::None]
            },

            BookingAction::Advance => {
                if matches!(state.step, WizardStep::Payment | WizardStep::Confirmation) {
                    // Step 4 is reached through submission success only.
                    smallvec![Effect::None]
                } else {
                    match validation::validate(state.step, &state.draft) {
                        Ok(()) => {
                            state.last_error = None;
                            state.step = state.step.next();
                            // Entering step 3 recomputes the quote from the
                            // draft, never from a cached value.
                            if state.step >= WizardStep::Payment {
                                quote::refresh(&mut state.draft);
                            }
                            smallvec![Effect::None]
                        },
                        Err(error) => {
                            state.last_error = Some(error);
                            smallvec![Effect::None]
                        },
                    }
                }
            },

            BookingAction::Back => {
                if state.step == WizardStep::Confirmation {
                    // Confirmation is terminal for the session.
                    smallvec![Effect::None]
                } else {
                    state.step = state.step.back();
                    state.last_error = None;
                    smallvec![Effect::None]
                }
            },

            BookingAction::SubmitPayment => {
                if state.step != WizardStep::Payment {
                    smallvec![Effect::None]
                } else if state.submission.is_in_flight() || state.submission.is_accepted() {
                    // Double-click guard: one submission per session.
                    smallvec![Effect::None]
                } else if let Err(error) = validation::validate(WizardStep::Dates, &state.draft)
                    .and_then(|()| validation::validate(WizardStep::CustomerInfo, &state.draft))
                {
                    state.last_error = Some(error);
                    smallvec![Effect::None]
                } else {
                    state.submission = SubmissionStatus::InFlight;
                    state.last_error = None;
                    smallvec![Effect::Delay {
                        duration: env.processing_delay,
                        action: Box::new(BookingAction::ProcessSubmission),
                    }]
                }
            },

            BookingAction::ProcessSubmission => {
                if state.submission.is_in_flight() {
                    // The total is rebuilt from the draft at submission time.
                    quote::refresh(&mut state.draft);

                    match state.draft.to_record() {
                        Some(record) => {
                            let gateway = Arc::clone(&env.gateway);
                            smallvec![Effect::Future(Box::pin(async move {
                                match gateway.submit(record).await {
                                    Ok(receipt) => {
                                        Some(BookingAction::SubmissionAccepted { id: receipt.id })
                                    },
                                    Err(error) => {
                                        tracing::warn!(%error, "Booking submission failed");
                                        Some(BookingAction::SubmissionFailed {
                                            message: SUBMISSION_FAILED_MESSAGE.to_string(),
                                        })
                                    },
                                }
                            }))]
                        },
                        None => {
                            // The draft can no longer produce a record.
                            state.submission = SubmissionStatus::Idle;
                            state.last_error = Some(ValidationError::MissingDates);
                            smallvec![Effect::None]
                        },
                    }
                } else {
                    smallvec![Effect::None]
                }
            },

            BookingAction::SubmissionAccepted { id } => {
                state.submission = SubmissionStatus::Accepted(id);
                state.step = WizardStep::Confirmation;
                state.last_error = None;

                // Fire-and-forget operator notification.
                match state.draft.to_record() {
                    Some(record) => {
                        let notifier = Arc::clone(&env.notifier);
                        let link = whatsapp_link(
                            &env.operator_phone,
                            &view::operator_notification(&record),
                        );
                        smallvec![Effect::Future(Box::pin(async move {
                            notifier.deliver(link).await;
                            None
                        }))]
                    },
                    None => smallvec![Effect::None],
                }
            },

            BookingAction::SubmissionFailed { message } => {
                // Stay on the payment step; the draft is intact for a retry.
                state.submission = SubmissionStatus::Failed(message);
                smallvec![Effect::None]
            },
        }
    }
}
