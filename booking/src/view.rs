//! Plain-text rendering of the wizard state.
//!
//! Every function here is a pure view of [`BookingState`] (or a
//! [`BookingRecord`] for the notification messages). Rendering never
//! mutates state and carries no formatting state of its own.

use crate::types::{BookingRecord, BookingState, SubmissionStatus, WizardStep};

const ALL_STEPS: [WizardStep; 4] = [
    WizardStep::Dates,
    WizardStep::CustomerInfo,
    WizardStep::Payment,
    WizardStep::Confirmation,
];

/// Renders the four-step progress line with the current step bracketed
#[must_use]
pub fn step_indicator(state: &BookingState) -> String {
    ALL_STEPS
        .iter()
        .map(|step| {
            if *step == state.step {
                format!("[{}] {}", step.number(), step.title())
            } else {
                format!(" {}. {}", step.number(), step.title())
            }
        })
        .collect::<Vec<_>>()
        .join("   ")
}

/// Renders the resolved item summary, or a loading line before resolution
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // ratings sit in 0..=5
pub fn item_card(state: &BookingState) -> String {
    let Some(item) = &state.item else {
        return "Loading item details...".to_string();
    };

    let stars = "★".repeat(item.rating.floor() as usize);
    let feature_count = item.features.split(',').count();

    format!(
        "{}\n{}\n{} {:.1}\n{}\n{} per night, {} features",
        item.name,
        item.location,
        stars,
        item.rating,
        item.description,
        state.draft.base_price_per_night,
        feature_count
    )
}

/// Renders the price breakdown, or dashes while the quote is unavailable
#[must_use]
pub fn price_breakdown(state: &BookingState) -> String {
    state.draft.quote.map_or_else(
        || {
            format!(
                "Price per night: {}\nNights: -\nTotal: -",
                state.draft.base_price_per_night
            )
        },
        |quote| {
            format!(
                "Price per night: {}\nNights: {}\nSubtotal: {}\nTaxes & fees (14%): {}\nTotal: {}",
                quote.price_per_night, quote.nights, quote.subtotal, quote.taxes, quote.total
            )
        },
    )
}

/// Renders the final confirmation summary shown on step 4
#[must_use]
pub fn confirmation_summary(state: &BookingState) -> String {
    let draft = &state.draft;

    let dates = match (draft.check_in, draft.check_out) {
        (Some(check_in), Some(check_out)) => format!("from {check_in} to {check_out}"),
        _ => "-".to_string(),
    };
    let nights = draft
        .quote
        .map_or_else(|| "-".to_string(), |quote| quote.nights.to_string());
    let total = draft
        .quote
        .map_or_else(|| "-".to_string(), |quote| quote.total.to_string());

    format!(
        "Name: {}\nEmail: {}\nPhone: {}\nItem: {}\nDates: {}\nGuests: {}\nNights: {}\nTotal: {}\nPayment: {}",
        draft.customer_name,
        draft.customer_email,
        draft.customer_phone,
        draft.item_name,
        dates,
        draft.guests,
        nights,
        total,
        draft.payment_method.label()
    )
}

/// Renders the active error banner, if any
///
/// A pending validation failure wins over an earlier submission failure;
/// both carry their full user-facing message. Returns `None` when there
/// is nothing to show.
#[must_use]
pub fn error_banner(state: &BookingState) -> Option<String> {
    if let Some(error) = &state.last_error {
        return Some(format!("Error: {error}"));
    }
    if let SubmissionStatus::Failed(message) = &state.submission {
        return Some(format!("Error: {message}"));
    }
    None
}

/// Builds the operator notification message for an accepted booking
#[must_use]
pub fn operator_notification(record: &BookingRecord) -> String {
    format!(
        "Hello! A new booking has been confirmed.\n\n\
         Booking details:\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Item: {}\n\
         Dates: from {} to {}\n\
         Guests: {}\n\
         Total: {}\n\
         Status: {}\n\n\
         Thank you for choosing Tripflow!",
        record.customer_name,
        record.customer_email,
        record.customer_phone,
        record.item_name,
        record.check_in,
        record.check_out,
        record.guests,
        record.total_price,
        record.status
    )
}

/// Builds the customer confirmation message from the finished draft
///
/// Returns `None` before the dates and quote are in place.
#[must_use]
pub fn customer_confirmation(state: &BookingState) -> Option<String> {
    let draft = &state.draft;
    let check_in = draft.check_in?;
    let check_out = draft.check_out?;
    let quote = draft.quote?;

    Some(format!(
        "Hello {}!\n\n\
         Your booking is confirmed.\n\n\
         {}\n\
         From {} to {}\n\
         Guests: {}\n\
         Total: {}\n\n\
         Thank you for choosing Tripflow! We will contact you soon.",
        draft.customer_name, draft.item_name, check_in, check_out, draft.guests, quote.total
    ))
}
