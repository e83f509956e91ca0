//! Tripflow booking wizard demo binary.
//!
//! Drives a complete wizard session from item lookup to confirmation,
//! printing each screen the way the front end renders it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin tripflow-demo
//! ```
//!
//! Collaborators are mocked, so the run works without a backend. Swap in
//! [`BookingEnvironment::from_config`] to point the wizard at a live API.
//! The operator WhatsApp link shows up in the log output once the gateway
//! accepts the booking.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripflow_booking::catalog::{MockItemCatalog, fallback_item};
use tripflow_booking::gateway::MockBookingGateway;
use tripflow_booking::notification::{LoggingNotifier, whatsapp_link};
use tripflow_booking::{
    BookingAction, BookingEnvironment, BookingSession, Config, ItemId, ItemKind, PaymentMethod,
    RoomType, view,
};
use tripflow_core::environment::SystemClock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripflow_booking=info,tripflow_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Tripflow Booking Wizard Demo ===\n");

    let config = Config::from_env();
    let environment = BookingEnvironment::new(
        Arc::new(SystemClock),
        MockItemCatalog::returning(fallback_item()).shared(),
        MockBookingGateway::accepting().shared(),
        LoggingNotifier::shared(),
        config.processing_delay(),
        config.operator_phone.clone(),
    );

    let session = BookingSession::new(
        ItemKind::Hotel,
        ItemId::new("hotel1".to_string()),
        environment,
    );

    // Step 1: dates and room
    session.start().await?;
    let state = session.snapshot().await;
    println!("{}\n", view::step_indicator(&state));
    println!("{}\n", view::item_card(&state));

    println!(">>> Trying to continue without dates");
    session.dispatch(BookingAction::Advance).await?;
    let state = session.snapshot().await;
    if let Some(banner) = view::error_banner(&state) {
        println!("{banner}\n");
    }

    let today = Utc::now().date_naive();
    let check_in = today
        .checked_add_days(Days::new(30))
        .ok_or("check-in date out of range")?;
    let check_out = today
        .checked_add_days(Days::new(33))
        .ok_or("check-out date out of range")?;

    println!(">>> Selecting {check_in} to {check_out}, suite, 2 guests");
    session.dispatch(BookingAction::SetCheckIn(check_in)).await?;
    session.dispatch(BookingAction::SetCheckOut(check_out)).await?;
    session.dispatch(BookingAction::SetRoomType(RoomType::Suite)).await?;
    session.dispatch(BookingAction::SetGuests(2)).await?;

    let state = session.snapshot().await;
    println!("\n{}\n", view::price_breakdown(&state));

    session.dispatch(BookingAction::Advance).await?;

    // Step 2: customer details
    let state = session.snapshot().await;
    println!("{}\n", view::step_indicator(&state));
    println!(">>> Entering customer details");
    session
        .dispatch(BookingAction::SetCustomerName("Nour Adel".to_string()))
        .await?;
    session
        .dispatch(BookingAction::SetCustomerEmail("nour@example.com".to_string()))
        .await?;
    session
        .dispatch(BookingAction::SetCustomerPhone("+201000000000".to_string()))
        .await?;
    session.dispatch(BookingAction::SetTermsAccepted(true)).await?;
    session.dispatch(BookingAction::Advance).await?;

    // Step 3: payment
    let state = session.snapshot().await;
    println!("\n{}\n", view::step_indicator(&state));
    println!("{}\n", view::confirmation_summary(&state));

    session
        .dispatch(BookingAction::SetPaymentMethod(PaymentMethod::InstaPay))
        .await?;

    println!(
        ">>> Submitting payment (processing takes {:?})",
        config.processing_delay()
    );
    let status = session.submit_and_wait(Duration::from_secs(30)).await?;
    println!("Submission outcome: {status:?}\n");

    // Step 4: confirmation (or the failure banner when the gateway said no)
    let state = session.snapshot().await;
    println!("{}\n", view::step_indicator(&state));
    if let Some(banner) = view::error_banner(&state) {
        println!("{banner}\n");
    }
    if let Some(message) = view::customer_confirmation(&state) {
        println!("{message}\n");
        println!(
            "Send to customer: {}\n",
            whatsapp_link(&state.draft.customer_phone, &message)
        );
    }

    session.shutdown(Duration::from_secs(5)).await?;
    println!("=== Demo complete ===");

    Ok(())
}
