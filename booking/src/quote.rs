//! Price derivation for the booking wizard.
//!
//! Pure functions from draft inputs to a [`PriceQuote`]. Quotes are
//! recomputed from scratch on every relevant input change so the displayed
//! total can never go stale after back-navigation edits.

use chrono::NaiveDate;

use crate::types::{BookingDraft, Money, PriceQuote, RoomType};

/// Fixed tax-and-fees rate applied to the subtotal
pub const TAX_RATE_PERCENT: i64 = 14;

/// Derives the full price breakdown for a stay
///
/// Returns `None` (the "unavailable" sentinel) when either date is unset
/// or the dates are not strictly ordered. Ordering violations are also
/// caught upstream by the step validator; the quote simply refuses to
/// produce a breakdown for them.
#[must_use]
pub fn compute(
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    room_type: RoomType,
    base_price_per_night: Money,
) -> Option<PriceQuote> {
    let check_in = check_in?;
    let check_out = check_out?;

    // Dates are day-granular, so the night count is the day difference.
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return None;
    }

    let price_per_night = base_price_per_night.scale(room_type.multiplier_tenths(), 10);
    let subtotal = price_per_night.times(nights);
    let taxes = subtotal.scale(TAX_RATE_PERCENT, 100);
    let total = subtotal + taxes;

    Some(PriceQuote {
        price_per_night,
        nights,
        subtotal,
        taxes,
        total,
    })
}

/// Pre-wizard price preview: the subtotal without taxes
///
/// Shown on item pages before the wizard starts; agrees with the
/// subtotal the wizard will later display for the same inputs.
#[must_use]
pub fn preview(
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
    room_type: RoomType,
    base_price_per_night: Money,
) -> Option<Money> {
    compute(check_in, check_out, room_type, base_price_per_night).map(|quote| quote.subtotal)
}

/// Recomputes the draft's quote in place from its current inputs
pub fn refresh(draft: &mut BookingDraft) {
    draft.quote = compute(
        draft.check_in,
        draft.check_out,
        draft.room_type,
        draft.base_price_per_night,
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use crate::types::{ItemId, ItemKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn canonical_suite_scenario() {
        // 2025-03-01 → 2025-03-04, suite, base 800.00
        let quote = compute(
            Some(date(2025, 3, 1)),
            Some(date(2025, 3, 4)),
            RoomType::Suite,
            Money::from_units(800),
        )
        .unwrap();

        assert_eq!(quote.nights, 3);
        assert_eq!(quote.price_per_night, Money::from_cents(144_000)); // 1440.00
        assert_eq!(quote.subtotal, Money::from_cents(432_000)); // 4320.00
        assert_eq!(quote.taxes, Money::from_cents(60_480)); // 604.80
        assert_eq!(quote.total, Money::from_cents(492_480)); // 4924.80
    }

    #[test]
    fn unset_dates_are_unavailable() {
        assert!(compute(None, None, RoomType::Standard, Money::from_units(800)).is_none());
        assert!(
            compute(
                Some(date(2025, 3, 1)),
                None,
                RoomType::Standard,
                Money::from_units(800)
            )
            .is_none()
        );
        assert!(
            compute(
                None,
                Some(date(2025, 3, 4)),
                RoomType::Standard,
                Money::from_units(800)
            )
            .is_none()
        );
    }

    #[test]
    fn unordered_dates_are_unavailable() {
        // check_out == check_in
        assert!(
            compute(
                Some(date(2025, 3, 1)),
                Some(date(2025, 3, 1)),
                RoomType::Standard,
                Money::from_units(800)
            )
            .is_none()
        );
        // check_out before check_in
        assert!(
            compute(
                Some(date(2025, 3, 4)),
                Some(date(2025, 3, 1)),
                RoomType::Standard,
                Money::from_units(800)
            )
            .is_none()
        );
    }

    #[test]
    fn multiplier_table() {
        let base = Money::from_units(100);
        let one_night = |room| {
            compute(Some(date(2025, 6, 1)), Some(date(2025, 6, 2)), room, base)
                .unwrap()
                .price_per_night
        };

        assert_eq!(one_night(RoomType::Standard), Money::from_units(100));
        assert_eq!(one_night(RoomType::Deluxe), Money::from_units(130));
        assert_eq!(one_night(RoomType::Suite), Money::from_units(180));
        assert_eq!(one_night(RoomType::Villa), Money::from_units(250));
    }

    #[test]
    fn preview_is_subtotal_without_taxes() {
        let subtotal = preview(
            Some(date(2025, 3, 1)),
            Some(date(2025, 3, 4)),
            RoomType::Suite,
            Money::from_units(800),
        )
        .unwrap();
        assert_eq!(subtotal, Money::from_cents(432_000));

        assert!(preview(None, None, RoomType::Suite, Money::from_units(800)).is_none());
    }

    #[test]
    fn refresh_keeps_quote_in_sync() {
        let mut draft = BookingDraft::new(ItemKind::Hotel, ItemId::new("hotel1".to_string()));
        draft.base_price_per_night = Money::from_units(800);

        refresh(&mut draft);
        assert!(draft.quote.is_none());

        draft.check_in = Some(date(2025, 3, 1));
        draft.check_out = Some(date(2025, 3, 4));
        refresh(&mut draft);
        assert_eq!(draft.quote.unwrap().nights, 3);

        draft.room_type = RoomType::Villa;
        refresh(&mut draft);
        assert_eq!(
            draft.quote.unwrap().price_per_night,
            Money::from_units(2000)
        );
    }
}
