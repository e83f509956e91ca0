//! # Tripflow Booking
//!
//! The booking wizard for the Tripflow travel front end.
//!
//! A booking is a four-step flow: dates and room, customer details,
//! payment, confirmation. The whole wizard is a single reducer over
//! [`BookingState`]: field edits commit as actions, step transitions are
//! gated by the validator, prices are recomputed from committed state,
//! and the final submission runs through effects (processing delay,
//! gateway call, operator notification over a WhatsApp link).
//!
//! # Architecture
//!
//! 1. **Actions** ([`BookingAction`]) carry every field commit, navigation
//!    request, and submission transition
//! 2. **Reducer** ([`WizardReducer`]) applies them synchronously and
//!    describes asynchronous work as effects
//! 3. **Environment** ([`BookingEnvironment`]) injects the clock, item
//!    catalog, booking gateway, and notifier
//! 4. **Session** ([`BookingSession`]) wraps the store runtime with
//!    booking-shaped entry points
//!
//! # Example Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use tripflow_booking::{
//!     BookingAction, BookingEnvironment, BookingSession, Config, ItemId, ItemKind,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Wire the production collaborators from configuration
//! let config = Config::from_env();
//! let environment = BookingEnvironment::from_config(&config);
//!
//! // One session per customer journey
//! let session = BookingSession::new(
//!     ItemKind::Hotel,
//!     ItemId::new("hotel1".to_string()),
//!     environment,
//! );
//! session.start().await?;
//!
//! // Commit a field; invalid input never leaves the current step, it
//! // lands in `state.last_error` instead
//! session.dispatch(BookingAction::SetGuests(2)).await?;
//!
//! // Submit from the payment step and wait for the outcome
//! let status = session.submit_and_wait(Duration::from_secs(10)).await?;
//! println!("submission: {status:?}");
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod catalog;
pub mod config;
pub mod environment;
pub mod gateway;
pub mod notification;
pub mod quote;
pub mod reducer;
pub mod store;
pub mod types;
pub mod validation;
pub mod view;

// Re-export commonly used types
pub use actions::BookingAction;
pub use catalog::ItemCatalog;
pub use config::Config;
pub use environment::BookingEnvironment;
pub use gateway::BookingGateway;
pub use notification::Notifier;
pub use reducer::WizardReducer;
pub use store::BookingSession;
pub use types::{
    BookingDraft, BookingId, BookingRecord, BookingState, ItemDetails, ItemId, ItemKind, Money,
    PaymentMethod, PriceQuote, RoomType, SubmissionStatus, WizardStep,
};
pub use validation::ValidationError;
