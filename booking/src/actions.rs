//! Actions driving the booking wizard.
//!
//! Every user interaction and every asynchronous outcome is expressed as
//! a `BookingAction`; the reducer's match on this enum is the wizard's
//! entire dispatch table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{BookingId, ItemDetails, PaymentMethod, RoomType};

/// Commands and feedback events processed by the wizard reducer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BookingAction {
    // ========== Session lifecycle ==========
    /// Begin the session: triggers the item-catalog lookup
    Start,
    /// Item data resolved (from the catalog or the fallback item)
    ItemResolved {
        /// Resolved item data
        details: ItemDetails,
    },

    // ========== Step inputs ==========
    /// Set the check-in date
    SetCheckIn(NaiveDate),
    /// Set the check-out date
    SetCheckOut(NaiveDate),
    /// Set the guest count (clamped to a minimum of 1)
    SetGuests(u32),
    /// Choose a room category
    SetRoomType(RoomType),
    /// Set the customer's full name
    SetCustomerName(String),
    /// Set the customer's email address
    SetCustomerEmail(String),
    /// Set the customer's phone number
    SetCustomerPhone(String),
    /// Accept or withdraw the terms-and-conditions flag
    SetTermsAccepted(bool),
    /// Choose a payment method
    SetPaymentMethod(PaymentMethod),

    // ========== Navigation ==========
    /// Advance to the next step, gated by the current step's validator
    Advance,
    /// Return to the previous step; no validation, no data loss
    Back,

    // ========== Submission lifecycle ==========
    /// Submit the booking from the payment step
    SubmitPayment,
    /// Internal: fires after the processing delay to call the gateway
    ProcessSubmission,
    /// The gateway accepted the booking
    SubmissionAccepted {
        /// Identifier assigned by the gateway
        id: BookingId,
    },
    /// The gateway rejected the booking or was unreachable
    SubmissionFailed {
        /// User-facing message with a retry suggestion
        message: String,
    },
}
