//! Core domain types for the booking wizard.
//!
//! This module defines the data model for a multi-step travel booking:
//! the wizard progresses through steps Dates → Customer Info → Payment →
//! Confirmation, accumulating a [`BookingDraft`] that is converted into an
//! immutable [`BookingRecord`] only at submission time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::validation::ValidationError;

/// One screen of the booking wizard
///
/// Steps are ordered; the wizard advances one step at a time and
/// Confirmation is terminal for the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    /// Step 1: choose check-in / check-out dates, guests, room type
    Dates,
    /// Step 2: customer name, email, phone, terms acceptance
    CustomerInfo,
    /// Step 3: payment method selection and submission
    Payment,
    /// Step 4: confirmation summary (terminal)
    Confirmation,
}

impl WizardStep {
    /// Returns the 1-based step number shown to the user
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Dates => 1,
            Self::CustomerInfo => 2,
            Self::Payment => 3,
            Self::Confirmation => 4,
        }
    }

    /// Converts a 1-based step number back into a step
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Dates),
            2 => Some(Self::CustomerInfo),
            3 => Some(Self::Payment),
            4 => Some(Self::Confirmation),
            _ => None,
        }
    }

    /// Returns the following step, capped at Confirmation
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Dates => Self::CustomerInfo,
            Self::CustomerInfo => Self::Payment,
            Self::Payment | Self::Confirmation => Self::Confirmation,
        }
    }

    /// Returns the preceding step, floored at Dates
    #[must_use]
    pub const fn back(self) -> Self {
        match self {
            Self::Dates | Self::CustomerInfo => Self::Dates,
            Self::Payment => Self::CustomerInfo,
            Self::Confirmation => Self::Payment,
        }
    }

    /// Short display title for the step indicator
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dates => "Dates",
            Self::CustomerInfo => "Customer Info",
            Self::Payment => "Payment",
            Self::Confirmation => "Confirmation",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Kind of item being booked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A hotel stay priced per night
    Hotel,
    /// A tour package priced per night of the trip
    Tour,
}

impl ItemKind {
    /// Wire code used in lookup URLs and submission payloads
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Tour => "tour",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hotel => write!(f, "Hotel"),
            Self::Tour => write!(f, "Tour"),
        }
    }
}

/// Unique identifier for a bookable item
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new `ItemId` from a string
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an accepted booking
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(String);

impl BookingId {
    /// Creates a new `BookingId` from a string
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the inner string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room category, which scales the nightly price
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Base rate (×1.0)
    #[default]
    Standard,
    /// ×1.3
    Deluxe,
    /// ×1.8
    Suite,
    /// ×2.5
    Villa,
}

impl RoomType {
    /// Price multiplier expressed in tenths for exact integer math
    ///
    /// Standard 10, Deluxe 13, Suite 18, Villa 25.
    #[must_use]
    pub const fn multiplier_tenths(self) -> i64 {
        match self {
            Self::Standard => 10,
            Self::Deluxe => 13,
            Self::Suite => 18,
            Self::Villa => 25,
        }
    }

    /// Wire code used in submission notes
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Deluxe => "deluxe",
            Self::Suite => "suite",
            Self::Villa => "villa",
        }
    }

    /// Parses a wire code; unknown codes fall back to Standard
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "deluxe" => Self::Deluxe,
            "suite" => Self::Suite,
            "villa" => Self::Villa,
            _ => Self::Standard,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "Standard"),
            Self::Deluxe => write!(f, "Deluxe"),
            Self::Suite => write!(f, "Suite"),
            Self::Villa => write!(f, "Villa"),
        }
    }
}

/// Payment method chosen in step 3
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Instant bank payment
    #[default]
    #[serde(rename = "instapay")]
    InstaPay,
    /// Mobile wallet
    #[serde(rename = "vodafone-cash")]
    VodafoneCash,
    /// Manual bank transfer
    #[serde(rename = "bank-transfer")]
    BankTransfer,
    /// Cash on arrival
    #[serde(rename = "cash")]
    Cash,
}

impl PaymentMethod {
    /// Wire code used in submission notes
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InstaPay => "instapay",
            Self::VodafoneCash => "vodafone-cash",
            Self::BankTransfer => "bank-transfer",
            Self::Cash => "cash",
        }
    }

    /// Parses a wire code; unknown codes fall back to `InstaPay`
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "vodafone-cash" => Self::VodafoneCash,
            "bank-transfer" => Self::BankTransfer,
            "cash" => Self::Cash,
            _ => Self::InstaPay,
        }
    }

    /// Display label shown in the payment step and summaries
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InstaPay => "InstaPay",
            Self::VodafoneCash => "Vodafone Cash",
            Self::BankTransfer => "Bank Transfer",
            Self::Cash => "Cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Money amount in cents (to avoid floating point issues)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a new money amount from cents
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Creates a new money amount from whole currency units
    #[must_use]
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Returns the value in cents
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the value in currency units (as floating point, for display)
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // i64 to f64 precision loss is acceptable for display
    pub fn units(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiplies by `numer / denom`, rounding half-up
    ///
    /// Used for the room-type multiplier (tenths) and the tax rate
    /// (percent). Assumes a non-negative amount.
    #[must_use]
    pub const fn scale(self, numer: i64, denom: i64) -> Self {
        Self((self.0 * numer + denom / 2) / denom)
    }

    /// Multiplies by a whole count (e.g. nights)
    #[must_use]
    pub const fn times(self, count: i64) -> Self {
        Self(self.0 * count)
    }
}

impl std::ops::Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EGP {:.2}", self.units())
    }
}

/// Derived price breakdown for the current draft
///
/// Recomputed from scratch on every relevant input change; never cached
/// across edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Base price scaled by the room-type multiplier
    pub price_per_night: Money,
    /// Whole days between check-in and check-out
    pub nights: i64,
    /// `price_per_night × nights`
    pub subtotal: Money,
    /// 14% of the subtotal
    pub taxes: Money,
    /// `subtotal + taxes`
    pub total: Money,
}

/// Lifecycle of the final submission call
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    /// No submission attempted yet (or a failure was acknowledged)
    #[default]
    Idle,
    /// A submission is in flight; further submit requests are ignored
    InFlight,
    /// The gateway accepted the booking
    Accepted(BookingId),
    /// The gateway rejected the booking or was unreachable
    Failed(String),
}

impl SubmissionStatus {
    /// Whether a submission is currently in flight
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// Whether the booking was accepted
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Item data returned by the catalog lookup
///
/// Field names follow the external contract (camelCase on the wire).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    /// Display name
    pub name: String,
    /// City / country line
    pub location: String,
    /// Short marketing description
    pub description: String,
    /// Base nightly price in currency units
    pub price_per_night: f64,
    /// Average rating out of 5
    pub rating: f64,
    /// Comma-separated feature list
    pub features: String,
}

impl ItemDetails {
    /// Base nightly price as exact money
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // prices fit comfortably in i64 cents
    pub fn base_price(&self) -> Money {
        Money::from_cents((self.price_per_night * 100.0).round() as i64)
    }
}

/// Immutable submission payload handed to the booking gateway
///
/// Serialized as the snake_case JSON body of `POST /bookings`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    /// Customer full name
    pub customer_name: String,
    /// Customer email address
    pub customer_email: String,
    /// Customer phone number
    pub customer_phone: String,
    /// Wire code of the booked item kind
    pub item_type: String,
    /// Display name of the booked item
    pub item_name: String,
    /// Check-in date
    pub check_in: NaiveDate,
    /// Check-out date
    pub check_out: NaiveDate,
    /// Number of guests
    pub guests: u32,
    /// Final total in cents
    pub total_price: Money,
    /// Always `"pending"` at submission time
    pub status: String,
    /// Payment method and room type, human-readable
    pub notes: String,
}

/// Gateway response for an accepted booking
///
/// The gateway echoes the submitted fields; only the assigned id matters
/// to the wizard.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SubmissionReceipt {
    /// Identifier assigned by the gateway
    pub id: BookingId,
}

/// The in-progress reservation, mutated in place through each step
///
/// Created at wizard mount with defaults and the caller-provided item
/// target; discarded if the user abandons before confirmation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    /// Kind of item being booked; immutable after initialization
    pub item_kind: ItemKind,
    /// Item identifier; immutable after initialization
    pub item_id: ItemId,
    /// Display name, populated once item data resolves
    pub item_name: String,
    /// Check-in date; `None` before step 1 completes
    pub check_in: Option<NaiveDate>,
    /// Check-out date; `None` before step 1 completes
    pub check_out: Option<NaiveDate>,
    /// Number of guests, minimum 1
    pub guests: u32,
    /// Selected room category
    pub room_type: RoomType,
    /// Customer full name (step 2)
    pub customer_name: String,
    /// Customer email (step 2)
    pub customer_email: String,
    /// Customer phone (step 2)
    pub customer_phone: String,
    /// Terms-and-conditions acceptance flag (step 2)
    pub terms_accepted: bool,
    /// Selected payment method (step 3)
    pub payment_method: PaymentMethod,
    /// Base nightly price from the resolved item
    pub base_price_per_night: Money,
    /// Derived price breakdown; `None` means "unavailable"
    pub quote: Option<PriceQuote>,
}

impl BookingDraft {
    /// Creates a fresh draft targeting the given item
    #[must_use]
    pub const fn new(item_kind: ItemKind, item_id: ItemId) -> Self {
        Self {
            item_kind,
            item_id,
            item_name: String::new(),
            check_in: None,
            check_out: None,
            guests: 2,
            room_type: RoomType::Standard,
            customer_name: String::new(),
            customer_email: String::new(),
            customer_phone: String::new(),
            terms_accepted: false,
            payment_method: PaymentMethod::InstaPay,
            base_price_per_night: Money::from_cents(0),
            quote: None,
        }
    }

    /// Converts the draft into an immutable submission payload
    ///
    /// Returns `None` if the dates are unset or no quote has been
    /// computed; callers gate on validation before reaching this point.
    #[must_use]
    pub fn to_record(&self) -> Option<BookingRecord> {
        let check_in = self.check_in?;
        let check_out = self.check_out?;
        let quote = self.quote?;

        Some(BookingRecord {
            customer_name: self.customer_name.clone(),
            customer_email: self.customer_email.clone(),
            customer_phone: self.customer_phone.clone(),
            item_type: self.item_kind.as_str().to_string(),
            item_name: self.item_name.clone(),
            check_in,
            check_out,
            guests: self.guests,
            total_price: quote.total,
            status: "pending".to_string(),
            notes: format!(
                "Payment method: {}, room type: {}",
                self.payment_method.code(),
                self.room_type.code()
            ),
        })
    }
}

/// Complete wizard state owned by the session store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingState {
    /// Current wizard position
    pub step: WizardStep,
    /// The in-progress reservation
    pub draft: BookingDraft,
    /// Resolved item data for display; `None` until the lookup completes
    pub item: Option<ItemDetails>,
    /// Lifecycle of the final submission call
    pub submission: SubmissionStatus,
    /// Most recent validation failure, cleared on any input change
    pub last_error: Option<ValidationError>,
}

impl BookingState {
    /// Creates a fresh wizard state targeting the given item
    #[must_use]
    pub const fn new(item_kind: ItemKind, item_id: ItemId) -> Self {
        Self {
            step: WizardStep::Dates,
            draft: BookingDraft::new(item_kind, item_id),
            item: None,
            submission: SubmissionStatus::Idle,
            last_error: None,
        }
    }
}

impl Default for BookingState {
    fn default() -> Self {
        Self::new(ItemKind::Hotel, ItemId::new("hotel1".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;

    #[test]
    fn step_numbers_round_trip() {
        for step in [
            WizardStep::Dates,
            WizardStep::CustomerInfo,
            WizardStep::Payment,
            WizardStep::Confirmation,
        ] {
            assert_eq!(WizardStep::from_number(step.number()), Some(step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(5), None);
    }

    #[test]
    fn step_next_caps_at_confirmation() {
        assert_eq!(WizardStep::Dates.next(), WizardStep::CustomerInfo);
        assert_eq!(WizardStep::Payment.next(), WizardStep::Confirmation);
        assert_eq!(WizardStep::Confirmation.next(), WizardStep::Confirmation);
    }

    #[test]
    fn step_back_floors_at_dates() {
        assert_eq!(WizardStep::Confirmation.back(), WizardStep::Payment);
        assert_eq!(WizardStep::CustomerInfo.back(), WizardStep::Dates);
        assert_eq!(WizardStep::Dates.back(), WizardStep::Dates);
    }

    #[test]
    fn money_from_units() {
        let m = Money::from_units(800);
        assert_eq!(m.cents(), 80_000);
        assert!((m.units() - 800.0).abs() < f64::EPSILON);
        assert_eq!(m.to_string(), "EGP 800.00");
    }

    #[test]
    fn money_scale_rounds_half_up() {
        // 14% of 432000 cents is exactly 60480
        assert_eq!(Money::from_cents(432_000).scale(14, 100).cents(), 60_480);
        // 14% of 100.05 is 14.007, rounds to 14.01
        assert_eq!(Money::from_cents(10_005).scale(14, 100).cents(), 1_401);
        // half-up at exactly .5 cents
        assert_eq!(Money::from_cents(25).scale(1, 10).cents(), 3);
    }

    #[test]
    fn room_type_from_code_defaults_to_standard() {
        assert_eq!(RoomType::from_code("suite"), RoomType::Suite);
        assert_eq!(RoomType::from_code("penthouse"), RoomType::Standard);
        assert_eq!(RoomType::from_code(""), RoomType::Standard);
    }

    #[test]
    fn payment_method_codes_and_labels() {
        assert_eq!(PaymentMethod::VodafoneCash.code(), "vodafone-cash");
        assert_eq!(PaymentMethod::VodafoneCash.label(), "Vodafone Cash");
        assert_eq!(
            PaymentMethod::from_code("bank-transfer"),
            PaymentMethod::BankTransfer
        );
        assert_eq!(PaymentMethod::from_code("barter"), PaymentMethod::InstaPay);
    }

    #[test]
    fn payment_method_serde_uses_wire_codes() {
        let json = serde_json::to_string(&PaymentMethod::VodafoneCash).unwrap();
        assert_eq!(json, "\"vodafone-cash\"");
        let parsed: PaymentMethod = serde_json::from_str("\"instapay\"").unwrap();
        assert_eq!(parsed, PaymentMethod::InstaPay);
    }

    #[test]
    fn item_details_wire_format_is_camel_case() {
        let json = r#"{
            "name": "Desert Oasis",
            "location": "Siwa, Egypt",
            "description": "Quiet eco-lodge",
            "pricePerNight": 450.5,
            "rating": 4.2,
            "features": "WiFi, Pool"
        }"#;
        let details: ItemDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.name, "Desert Oasis");
        assert_eq!(details.base_price(), Money::from_cents(45_050));
    }

    #[test]
    fn draft_defaults() {
        let draft = BookingDraft::new(ItemKind::Hotel, ItemId::new("hotel1".to_string()));
        assert_eq!(draft.guests, 2);
        assert_eq!(draft.room_type, RoomType::Standard);
        assert_eq!(draft.payment_method, PaymentMethod::InstaPay);
        assert!(draft.check_in.is_none());
        assert!(draft.quote.is_none());
    }

    #[test]
    fn draft_without_dates_has_no_record() {
        let draft = BookingDraft::new(ItemKind::Hotel, ItemId::new("hotel1".to_string()));
        assert!(draft.to_record().is_none());
    }

    #[test]
    fn record_wire_format_is_snake_case() {
        let mut draft = BookingDraft::new(ItemKind::Hotel, ItemId::new("hotel1".to_string()));
        draft.item_name = "Hilton Sharm El-Sheikh".to_string();
        draft.check_in = NaiveDate::from_ymd_opt(2025, 3, 1);
        draft.check_out = NaiveDate::from_ymd_opt(2025, 3, 4);
        draft.customer_name = "Nour Adel".to_string();
        draft.customer_email = "nour@example.com".to_string();
        draft.customer_phone = "+201000000000".to_string();
        draft.room_type = RoomType::Suite;
        draft.base_price_per_night = Money::from_units(800);
        draft.quote = crate::quote::compute(
            draft.check_in,
            draft.check_out,
            draft.room_type,
            draft.base_price_per_night,
        );

        let record = draft.to_record().unwrap();
        assert_eq!(record.status, "pending");
        assert_eq!(
            record.notes,
            "Payment method: instapay, room type: suite"
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["customer_name"], "Nour Adel");
        assert_eq!(json["item_type"], "hotel");
        assert_eq!(json["check_in"], "2025-03-01");
        assert_eq!(json["total_price"], 492_480);
    }

    #[test]
    fn submission_status_guards() {
        assert!(SubmissionStatus::InFlight.is_in_flight());
        assert!(!SubmissionStatus::Idle.is_in_flight());
        assert!(SubmissionStatus::Accepted(BookingId::new("b-1".to_string())).is_accepted());
        assert!(!SubmissionStatus::Failed("boom".to_string()).is_accepted());
    }
}
