// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Clamped calendar-month arithmetic
//!
//! Recurring due dates are defined by *calendar* addition, not by fixed
//! durations: advancing `2022-01-31` by one month must land on the last
//! day of February, and advancing `2020-02-29` by four years must land on
//! `2024-02-29` again.  This module isolates the two primitives everything
//! else is built on:
//!
//! - [`add_months_clamped`] — move an instant by a signed number of
//!   calendar months, snapping the day-of-month down to the last valid day
//!   of the target month and preserving the time-of-day.
//! - [`whole_months_between`] — the number of *complete* calendar months
//!   between two ordered instants, measured with the same clamping rule.
//!
//! ## Clamping is not cumulative
//!
//! Offsets are always applied from a fixed origin (the cycle anchor), so a
//! day-of-month lost to a short month is recovered as soon as a later
//! target month can hold it: `Jan 31 + 1 month = Feb 28`, but
//! `Jan 31 + 2 months = Mar 31`, not `Mar 28`.
//!
//! ## Consistency with the month measure
//!
//! [`whole_months_between`] deems a month complete exactly when the
//! clamped addition from the earlier instant reaches the later one.  The
//! closed-form month-index difference can overshoot the true count by at
//! most one (the candidate lands in the later instant's own month), so a
//! single correction step suffices.  The due-date searches rely on this:
//! their estimates are always within a small constant number of cycles of
//! the answer.

use chrono::{DateTime, Datelike, Months, Utc};

/// Moves `origin` by `months` calendar months (either direction).
///
/// The day-of-month is clamped down to the last valid day of the target
/// month when necessary; the time-of-day is preserved.  Returns `None`
/// only when the result falls outside chrono's representable range.
pub(crate) fn add_months_clamped(origin: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        origin.checked_add_months(Months::new(magnitude))
    } else {
        origin.checked_sub_months(Months::new(magnitude))
    }
}

/// Number of whole calendar months from `start` to `end`.
///
/// Requires `start <= end`; the result is never negative.  A month counts
/// as whole once the clamped addition from `start` reaches `end`, so with
/// `start = Jan 31` the count becomes 1 at `Feb 28` (the clamped target),
/// not at a fictitious `Feb 31`.
pub(crate) fn whole_months_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    debug_assert!(start <= end, "whole_months_between requires start <= end");

    let mut months = (i64::from(end.year()) - i64::from(start.year())) * 12
        + i64::from(end.month())
        - i64::from(start.month());
    if months <= 0 {
        return 0;
    }

    // The candidate lands in end's own month, so it can exceed `end` only
    // through the clamped day-of-month or the time-of-day: one step back
    // always corrects it.
    match add_months_clamped(start, months) {
        Some(candidate) if candidate <= end => months,
        _ => months - 1,
    }
}
