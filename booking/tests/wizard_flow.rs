//! Integration tests driving the wizard through the session facade.
//!
//! Each test runs the real reducer on the real store runtime with mock
//! collaborators, covering the paths a customer actually takes: the
//! happy run to confirmation, gateway rejection and retry, the
//! double-submit guard, the catalog fallback, and validation gating.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tripflow_booking::catalog::{MockItemCatalog, fallback_item};
use tripflow_booking::gateway::MockBookingGateway;
use tripflow_booking::notification::MockNotifier;
use tripflow_booking::{
    BookingAction, BookingEnvironment, BookingSession, ItemId, ItemKind, Money, RoomType,
    SubmissionStatus, ValidationError, WizardStep, view,
};
use tripflow_testing::test_clock;

// ============================================================================
// Test Fixtures
// ============================================================================

const FAILED_MESSAGE: &str =
    "Payment processing failed. Please try again or contact us on WhatsApp.";

/// A session plus handles on its mock collaborators for assertions.
struct Wizard {
    session: BookingSession,
    gateway: MockBookingGateway,
    notifier: MockNotifier,
}

fn wizard_with(gateway: MockBookingGateway) -> Wizard {
    let notifier = MockNotifier::new();
    let environment = BookingEnvironment::new(
        Arc::new(test_clock()),
        MockItemCatalog::returning(fallback_item()).shared(),
        gateway.clone().shared(),
        notifier.clone().shared(),
        Duration::from_millis(10),
        "201273426669".to_string(),
    );

    Wizard {
        session: BookingSession::new(
            ItemKind::Hotel,
            ItemId::new("hotel1".to_string()),
            environment,
        ),
        gateway,
        notifier,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Drives a fresh session to the payment step with a complete draft.
///
/// Suite room at the fallback item's 800 EGP base over three nights,
/// which prices at 492,480 piasters including taxes.
async fn drive_to_payment(session: &BookingSession) {
    session.start().await.unwrap();

    for action in [
        BookingAction::SetCheckIn(date(2025, 3, 1)),
        BookingAction::SetCheckOut(date(2025, 3, 4)),
        BookingAction::SetRoomType(RoomType::Suite),
        BookingAction::Advance,
        BookingAction::SetCustomerName("Nour Adel".to_string()),
        BookingAction::SetCustomerEmail("nour@example.com".to_string()),
        BookingAction::SetCustomerPhone("+201000000000".to_string()),
        BookingAction::SetTermsAccepted(true),
        BookingAction::Advance,
    ] {
        session.dispatch(action).await.unwrap();
    }
}

// ============================================================================
// Tests
// ============================================================================

/// The full happy path: lookup, dates, customer info, submission.
///
/// Verifies the terminal state and that the operator got exactly one
/// WhatsApp link for exactly one gateway call.
#[tokio::test]
async fn test_happy_path_reaches_confirmation_and_notifies_operator() {
    let wizard = wizard_with(MockBookingGateway::accepting());
    drive_to_payment(&wizard.session).await;

    let status = wizard
        .session
        .submit_and_wait(Duration::from_secs(5))
        .await
        .unwrap();
    assert!(status.is_accepted());

    let state = wizard.session.snapshot().await;
    assert_eq!(state.step, WizardStep::Confirmation);
    assert_eq!(state.last_error, None);
    assert_eq!(
        state.draft.quote.unwrap().total,
        Money::from_cents(492_480)
    );

    let SubmissionStatus::Accepted(id) = state.submission else {
        panic!("expected an accepted submission, got {:?}", state.submission);
    };
    assert!(id.as_str().starts_with("booking_"));
    assert_eq!(wizard.gateway.call_count(), 1);

    // The notification effect is fire-and-forget; give it a moment to land.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let delivered = wizard.notifier.delivered();
    assert_eq!(delivered.len(), 1);
    assert!(delivered[0].starts_with("https://wa.me/201273426669?text="));
}

/// A rejected submission keeps the customer on the payment step with the
/// draft intact, and a retry goes back out to the gateway.
#[tokio::test]
async fn test_rejected_submission_keeps_draft_for_retry() {
    let wizard = wizard_with(MockBookingGateway::rejecting());
    drive_to_payment(&wizard.session).await;

    let status = wizard
        .session
        .submit_and_wait(Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(status, SubmissionStatus::Failed(FAILED_MESSAGE.to_string()));

    let state = wizard.session.snapshot().await;
    assert_eq!(state.step, WizardStep::Payment);
    assert_eq!(state.draft.customer_name, "Nour Adel");
    assert_eq!(state.draft.check_in, Some(date(2025, 3, 1)));
    assert!(
        view::error_banner(&state).is_some_and(|banner| banner.contains("contact us on WhatsApp"))
    );
    assert_eq!(wizard.gateway.call_count(), 1);
    assert!(wizard.notifier.delivered().is_empty());

    let retry = wizard
        .session
        .submit_and_wait(Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(retry, SubmissionStatus::Failed(FAILED_MESSAGE.to_string()));
    assert_eq!(wizard.gateway.call_count(), 2);
}

/// Submitting repeatedly while a submission is in flight produces exactly
/// one gateway call.
#[tokio::test]
async fn test_double_submit_calls_gateway_once() {
    let wizard = wizard_with(MockBookingGateway::accepting());
    drive_to_payment(&wizard.session).await;

    // Two raw submits back to back, then a third through the waiting helper.
    wizard
        .session
        .dispatch(BookingAction::SubmitPayment)
        .await
        .unwrap();
    wizard
        .session
        .dispatch(BookingAction::SubmitPayment)
        .await
        .unwrap();
    let status = wizard
        .session
        .submit_and_wait(Duration::from_secs(5))
        .await
        .unwrap();

    assert!(status.is_accepted());
    assert_eq!(wizard.gateway.call_count(), 1);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(wizard.notifier.delivered().len(), 1);
}

/// A submission that already settled refuses further submits without
/// touching the gateway again.
#[tokio::test]
async fn test_settled_session_refuses_another_submission() {
    let wizard = wizard_with(MockBookingGateway::accepting());
    drive_to_payment(&wizard.session).await;

    let first = wizard
        .session
        .submit_and_wait(Duration::from_secs(5))
        .await
        .unwrap();
    assert!(first.is_accepted());

    let second = wizard
        .session
        .submit_and_wait(Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(second, first);
    assert_eq!(wizard.gateway.call_count(), 1);
}

/// When the catalog is unreachable the wizard renders the fallback item
/// instead of a dead page.
#[tokio::test]
async fn test_catalog_failure_falls_back_to_default_item() {
    let environment = BookingEnvironment::new(
        Arc::new(test_clock()),
        MockItemCatalog::failing().shared(),
        MockBookingGateway::accepting().shared(),
        MockNotifier::new().shared(),
        Duration::from_millis(10),
        "201273426669".to_string(),
    );
    let session = BookingSession::new(
        ItemKind::Hotel,
        ItemId::new("hotel1".to_string()),
        environment,
    );

    session.start().await.unwrap();

    let state = session.snapshot().await;
    let item = state.item.expect("fallback item should be resolved");
    assert_eq!(item.name, "Hilton Sharm El-Sheikh");
    assert_eq!(state.draft.item_name, "Hilton Sharm El-Sheikh");
    assert_eq!(state.draft.base_price_per_night, Money::from_units(800));
}

/// Step transitions are gated: each validator failure pins the current
/// step and surfaces one typed error, and the next valid commit clears it.
#[tokio::test]
async fn test_advance_gating_surfaces_validation_errors() {
    let wizard = wizard_with(MockBookingGateway::accepting());
    let session = &wizard.session;
    session.start().await.unwrap();

    // No dates committed yet
    session.dispatch(BookingAction::Advance).await.unwrap();
    let state = session.snapshot().await;
    assert_eq!(state.step, WizardStep::Dates);
    assert_eq!(state.last_error, Some(ValidationError::MissingDates));
    assert_eq!(
        view::error_banner(&state).as_deref(),
        Some("Error: Please select both check-in and check-out dates")
    );

    // A same-day stay is rejected
    session
        .dispatch(BookingAction::SetCheckIn(date(2025, 3, 1)))
        .await
        .unwrap();
    session
        .dispatch(BookingAction::SetCheckOut(date(2025, 3, 1)))
        .await
        .unwrap();
    session.dispatch(BookingAction::Advance).await.unwrap();
    let state = session.snapshot().await;
    assert_eq!(state.step, WizardStep::Dates);
    assert_eq!(state.last_error, Some(ValidationError::EndBeforeStart));

    // A valid range clears the error and moves on
    session
        .dispatch(BookingAction::SetCheckOut(date(2025, 3, 4)))
        .await
        .unwrap();
    session.dispatch(BookingAction::Advance).await.unwrap();
    let state = session.snapshot().await;
    assert_eq!(state.step, WizardStep::CustomerInfo);
    assert_eq!(state.last_error, None);
    assert!(view::error_banner(&state).is_none());

    // Customer info must be complete before the terms flag is checked
    session.dispatch(BookingAction::Advance).await.unwrap();
    let state = session.snapshot().await;
    assert_eq!(state.step, WizardStep::CustomerInfo);
    assert_eq!(
        state.last_error,
        Some(ValidationError::IncompleteCustomerInfo)
    );

    session
        .dispatch(BookingAction::SetCustomerName("Nour Adel".to_string()))
        .await
        .unwrap();
    session
        .dispatch(BookingAction::SetCustomerEmail("nour@example.com".to_string()))
        .await
        .unwrap();
    session
        .dispatch(BookingAction::SetCustomerPhone("+201000000000".to_string()))
        .await
        .unwrap();
    session.dispatch(BookingAction::Advance).await.unwrap();
    let state = session.snapshot().await;
    assert_eq!(state.step, WizardStep::CustomerInfo);
    assert_eq!(state.last_error, Some(ValidationError::TermsNotAccepted));

    session
        .dispatch(BookingAction::SetTermsAccepted(true))
        .await
        .unwrap();
    session.dispatch(BookingAction::Advance).await.unwrap();
    let state = session.snapshot().await;
    assert_eq!(state.step, WizardStep::Payment);
    assert!(state.draft.quote.is_some());
}

/// Going back keeps every committed field so nothing is retyped.
#[tokio::test]
async fn test_back_preserves_committed_fields() {
    let wizard = wizard_with(MockBookingGateway::accepting());
    let session = &wizard.session;
    session.start().await.unwrap();

    session
        .dispatch(BookingAction::SetCheckIn(date(2025, 3, 1)))
        .await
        .unwrap();
    session
        .dispatch(BookingAction::SetCheckOut(date(2025, 3, 4)))
        .await
        .unwrap();
    session.dispatch(BookingAction::Advance).await.unwrap();
    session
        .dispatch(BookingAction::SetCustomerName("Nour Adel".to_string()))
        .await
        .unwrap();

    session.dispatch(BookingAction::Back).await.unwrap();
    let state = session.snapshot().await;
    assert_eq!(state.step, WizardStep::Dates);
    assert_eq!(state.draft.check_in, Some(date(2025, 3, 1)));
    assert_eq!(state.draft.customer_name, "Nour Adel");

    session.dispatch(BookingAction::Advance).await.unwrap();
    let state = session.snapshot().await;
    assert_eq!(state.step, WizardStep::CustomerInfo);
}
