//! Per-step validation gates for the booking wizard.
//!
//! The validator is pure with respect to the draft: it only reports
//! pass/fail, never mutates. Each failure variant carries the exact
//! user-facing message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{BookingDraft, WizardStep};

/// A step validation failure, carrying the user-facing message
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    /// Step 1: one or both dates unset
    #[error("Please select both check-in and check-out dates")]
    MissingDates,
    /// Step 1: both dates set but not strictly ordered
    #[error("Check-out must be after check-in")]
    EndBeforeStart,
    /// Step 2: name, email, or phone empty after trimming
    #[error("Please fill in all required fields")]
    IncompleteCustomerInfo,
    /// Step 2: terms-and-conditions flag not set
    #[error("You must accept the terms and conditions to continue")]
    TermsNotAccepted,
}

/// Runs the validation gate for one step against the current draft
///
/// # Errors
///
/// Returns the step's [`ValidationError`] when its gate fails. Steps 3
/// and 4 always pass: payment method has a default, and the confirmation
/// step is terminal with no forward validation.
pub fn validate(step: WizardStep, draft: &BookingDraft) -> Result<(), ValidationError> {
    match step {
        WizardStep::Dates => validate_dates(draft),
        WizardStep::CustomerInfo => validate_customer_info(draft),
        WizardStep::Payment | WizardStep::Confirmation => Ok(()),
    }
}

fn validate_dates(draft: &BookingDraft) -> Result<(), ValidationError> {
    match (draft.check_in, draft.check_out) {
        (Some(check_in), Some(check_out)) => {
            if check_out > check_in {
                Ok(())
            } else {
                Err(ValidationError::EndBeforeStart)
            }
        },
        _ => Err(ValidationError::MissingDates),
    }
}

fn validate_customer_info(draft: &BookingDraft) -> Result<(), ValidationError> {
    let any_field_empty = draft.customer_name.trim().is_empty()
        || draft.customer_email.trim().is_empty()
        || draft.customer_phone.trim().is_empty();

    // Field emptiness is reported before the terms flag.
    if any_field_empty {
        return Err(ValidationError::IncompleteCustomerInfo);
    }
    if !draft.terms_accepted {
        return Err(ValidationError::TermsNotAccepted);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::types::{ItemId, ItemKind};
    use chrono::NaiveDate;

    fn draft() -> BookingDraft {
        BookingDraft::new(ItemKind::Hotel, ItemId::new("hotel1".to_string()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn with_customer_info(mut draft: BookingDraft) -> BookingDraft {
        draft.customer_name = "Nour Adel".to_string();
        draft.customer_email = "nour@example.com".to_string();
        draft.customer_phone = "+201000000000".to_string();
        draft.terms_accepted = true;
        draft
    }

    #[test]
    fn dates_missing() {
        let mut d = draft();
        assert_eq!(
            validate(WizardStep::Dates, &d),
            Err(ValidationError::MissingDates)
        );

        d.check_in = Some(date(2025, 3, 1));
        assert_eq!(
            validate(WizardStep::Dates, &d),
            Err(ValidationError::MissingDates)
        );
    }

    #[test]
    fn dates_end_before_start() {
        let mut d = draft();
        d.check_in = Some(date(2025, 3, 4));
        d.check_out = Some(date(2025, 3, 1));
        assert_eq!(
            validate(WizardStep::Dates, &d),
            Err(ValidationError::EndBeforeStart)
        );

        // Equal dates are also rejected: check-out must be strictly after.
        d.check_out = Some(date(2025, 3, 4));
        assert_eq!(
            validate(WizardStep::Dates, &d),
            Err(ValidationError::EndBeforeStart)
        );
    }

    #[test]
    fn dates_ordered_pass() {
        let mut d = draft();
        d.check_in = Some(date(2025, 3, 1));
        d.check_out = Some(date(2025, 3, 4));
        assert_eq!(validate(WizardStep::Dates, &d), Ok(()));
    }

    #[test]
    fn date_failures_carry_distinct_messages() {
        assert_ne!(
            ValidationError::MissingDates.to_string(),
            ValidationError::EndBeforeStart.to_string()
        );
    }

    #[test]
    fn customer_info_requires_all_fields() {
        let d = with_customer_info(draft());
        assert_eq!(validate(WizardStep::CustomerInfo, &d), Ok(()));

        for clear in [
            |d: &mut BookingDraft| d.customer_name.clear(),
            |d: &mut BookingDraft| d.customer_email.clear(),
            |d: &mut BookingDraft| d.customer_phone.clear(),
        ] {
            let mut d = with_customer_info(draft());
            clear(&mut d);
            assert_eq!(
                validate(WizardStep::CustomerInfo, &d),
                Err(ValidationError::IncompleteCustomerInfo)
            );
        }
    }

    #[test]
    fn customer_info_rejects_whitespace_only_fields() {
        let mut d = with_customer_info(draft());
        d.customer_email = "   ".to_string();
        assert_eq!(
            validate(WizardStep::CustomerInfo, &d),
            Err(ValidationError::IncompleteCustomerInfo)
        );
    }

    #[test]
    fn customer_info_requires_terms() {
        let mut d = with_customer_info(draft());
        d.terms_accepted = false;
        assert_eq!(
            validate(WizardStep::CustomerInfo, &d),
            Err(ValidationError::TermsNotAccepted)
        );
    }

    #[test]
    fn empty_fields_reported_before_terms() {
        let mut d = draft();
        d.terms_accepted = false;
        assert_eq!(
            validate(WizardStep::CustomerInfo, &d),
            Err(ValidationError::IncompleteCustomerInfo)
        );
    }

    #[test]
    fn payment_and_confirmation_always_pass() {
        let d = draft();
        assert_eq!(validate(WizardStep::Payment, &d), Ok(()));
        assert_eq!(validate(WizardStep::Confirmation, &d), Ok(()));
    }
}
