// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The billing cycle value object.
//!
//! [`BillingCycle`] is the core type of the crate.  It stores an anchor
//! instant (cycle 0) plus a normalized recurrence interval, and every
//! query — cycle counting, due-date search, period enumeration, progress
//! within the current period — is a pure function of the cycle and a
//! caller-supplied reference instant.  The struct is `Copy` and immutable:
//! instances can be recomputed or shared freely, and every method is safe
//! to call concurrently.
//!
//! Due dates are spaced by *calendar* addition with month-end clamping
//! (see the `calendar` module), so cycle lengths vary: a monthly
//! cycle anchored on Jan 31 is due on Feb 28, then Mar 31.  The forward
//! and backward searches start from a closed-form cycle-count estimate and
//! correct it with a short loop; the estimate is always within a small
//! constant number of cycles of the answer, so the loops are bounded.

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calendar::{add_months_clamped, whole_months_between};
use crate::error::BillingCycleError;
use crate::period::BillingPeriod;
use crate::unit::CycleUnit;

/// The minimal representable step between two instants.
///
/// Used to move a search cursor strictly past a due date.
fn one_millisecond() -> TimeDelta {
    TimeDelta::milliseconds(1)
}

/// A recurring billing schedule anchored at a fixed instant.
///
/// Cycle `k` (signed) is due at `anchor + k * interval` calendar units,
/// with the day-of-month clamped down to the last valid day of the target
/// month.  The anchor's time-of-day is preserved by every due instant.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use duecycle::BillingCycle;
///
/// let anchor = Utc.with_ymd_and_hms(2022, 1, 31, 0, 0, 0).unwrap();
/// let cycle = BillingCycle::new(anchor, 1, "months")?;
///
/// // Feb 2023 has no 31st: the due date clamps to the 28th.
/// let at = Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap();
/// assert_eq!(
///     cycle.next_due_at(at),
///     Utc.with_ymd_and_hms(2023, 2, 28, 0, 0, 0).unwrap()
/// );
/// # Ok::<(), duecycle::BillingCycleError>(())
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BillingCycle {
    anchor: DateTime<Utc>,
    interval: u32,
    unit: CycleUnit,
}

impl BillingCycle {
    // ── constructors ──────────────────────────────────────────────────

    /// Create a cycle from a raw unit token.
    ///
    /// Accepted tokens are `month(s)`, `quarter(s)` and `year(s)`;
    /// quarters normalize to a tripled interval of months (see
    /// [`CycleUnit::normalize`]).  Fails with
    /// [`BillingCycleError::InvalidUnit`] on an unknown token and
    /// [`BillingCycleError::InvalidInterval`] on a zero interval value.
    pub fn new(
        anchor: DateTime<Utc>,
        interval_value: u32,
        interval_unit: &str,
    ) -> Result<Self, BillingCycleError> {
        let (value, unit) = CycleUnit::normalize(interval_unit, interval_value)?;
        Self::from_parts(anchor, value, unit)
    }

    /// Create a cycle from an already-canonical unit.
    pub fn from_parts(
        anchor: DateTime<Utc>,
        interval_value: u32,
        unit: CycleUnit,
    ) -> Result<Self, BillingCycleError> {
        if interval_value == 0 {
            return Err(BillingCycleError::InvalidInterval {
                value: interval_value,
            });
        }
        Ok(BillingCycle {
            anchor,
            interval: interval_value,
            unit,
        })
    }

    /// A cycle due every month.
    pub fn monthly(anchor: DateTime<Utc>) -> Self {
        BillingCycle {
            anchor,
            interval: 1,
            unit: CycleUnit::Months,
        }
    }

    /// A cycle due every three months.
    pub fn quarterly(anchor: DateTime<Utc>) -> Self {
        BillingCycle {
            anchor,
            interval: 3,
            unit: CycleUnit::Months,
        }
    }

    /// A cycle due every year.
    pub fn yearly(anchor: DateTime<Utc>) -> Self {
        BillingCycle {
            anchor,
            interval: 1,
            unit: CycleUnit::Years,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The anchor instant (due date of cycle 0).
    #[inline]
    pub const fn anchor(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// The normalized interval multiplier (always `>= 1`).
    #[inline]
    pub const fn interval_value(&self) -> u32 {
        self.interval
    }

    /// The canonical recurrence unit.
    #[inline]
    pub const fn unit(&self) -> CycleUnit {
        self.unit
    }

    /// Calendar months spanned by one full cycle.
    #[inline]
    fn months_per_cycle(&self) -> i64 {
        i64::from(self.interval) * self.unit.months_per_step()
    }

    // ── cycle counting ────────────────────────────────────────────────

    /// Signed number of whole cycles between the anchor and `at`.
    ///
    /// Negative when `at` precedes the anchor.  The count is a floor
    /// division on *calendar* distance, not on wall-clock duration: a
    /// reference a full 31 days past a Feb 28 due date has still only
    /// completed one calendar month since Jan 31.
    pub fn cycle_count_difference(&self, at: DateTime<Utc>) -> i64 {
        let (start, end, sign) = if at < self.anchor {
            (at, self.anchor, -1)
        } else {
            (self.anchor, at, 1)
        };

        let months = whole_months_between(start, end);
        let cycles = match self.unit {
            CycleUnit::Months => months / i64::from(self.interval),
            CycleUnit::Years => months / 12 / i64::from(self.interval),
        };
        sign * cycles
    }

    /// Number of whole cycles completed since the anchor, clamped at zero
    /// for references that precede it.
    pub fn cycles_since_anchor(&self, at: DateTime<Utc>) -> u64 {
        self.cycle_count_difference(at).max(0) as u64
    }

    // ── due dates ─────────────────────────────────────────────────────

    /// Due instant of cycle `cycles` (signed).
    ///
    /// The anchor advanced by `cycles * interval` calendar units, with the
    /// day-of-month clamped down where the target month is too short.
    /// Clamping is recomputed from the anchor each time, so a leap-day
    /// anchor re-snaps to Feb 29 whenever the target year allows it.
    ///
    /// # Panics
    ///
    /// Panics when the result falls outside chrono's representable range
    /// (roughly ±262,000 years), far outside the documented domain.
    pub fn due_at(&self, cycles: i64) -> DateTime<Utc> {
        add_months_clamped(self.anchor, cycles * self.months_per_cycle())
            .expect("due date outside chrono's representable range")
    }

    /// The earliest due instant at or after `at`.
    ///
    /// A reference exactly on a due date returns that due date; any
    /// reference at or before the anchor returns the anchor (cycle 0 is
    /// always reachable).
    pub fn next_due_at(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        if at <= self.anchor {
            return self.anchor;
        }

        let mut cycles = self.cycle_count_difference(at);
        let mut due = self.due_at(cycles);

        // The estimate can undershoot near clamped month ends (a skipped
        // Feb 29, a short month); it is never more than a couple of
        // cycles off, so this terminates in at most two steps.
        while due < at {
            cycles += 1;
            due = self.due_at(cycles);
        }
        due
    }

    /// The latest due instant strictly before `at`, or `None` when no
    /// cycle has come due yet (`at` at or before the anchor).
    pub fn prev_due_at(&self, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if at <= self.anchor {
            return None;
        }

        // Start just past the containing cycle and walk back; the
        // overshoot is bounded by the same calendar irregularities as the
        // forward search, so this terminates within a few steps.
        let mut cycles = self.cycle_count_difference(at) + 2;
        let mut due = self.due_at(cycles);
        while due >= at {
            cycles -= 1;
            due = self.due_at(cycles);
        }

        debug_assert!(cycles >= 0, "backward search crossed the anchor");
        Some(due)
    }

    // ── enumeration ───────────────────────────────────────────────────

    /// The next `n` due instants from `at`, strictly increasing.
    ///
    /// The first entry is [`next_due_at`](Self::next_due_at)`(at)`; each
    /// subsequent entry is the earliest due instant strictly after the
    /// previous one.
    pub fn next_due_dates(&self, n: usize, at: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let mut dates = Vec::with_capacity(n);
        let mut cursor = at;
        for _ in 0..n {
            let due = self.next_due_at(cursor);
            dates.push(due);
            cursor = due + one_millisecond();
        }
        dates
    }

    /// Up to `n` past due instants before `at`, strictly decreasing.
    ///
    /// Stops at the anchor boundary, so the result never contains an
    /// instant before the anchor and is empty when `at` precedes it.
    pub fn prev_due_dates(&self, n: usize, at: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let mut dates = Vec::new();
        if n == 0 {
            return dates;
        }
        let Some(first) = self.prev_due_at(at) else {
            return dates;
        };
        dates.push(first);
        while dates.len() < n {
            match self.prev_due_at(dates[dates.len() - 1]) {
                Some(due) => dates.push(due),
                None => break,
            }
        }
        dates
    }

    /// The period containing `at`, or `None` when no period has started.
    ///
    /// A reference exactly on a due date yields the period *ending* at
    /// that instant, matching the elapsed/remaining queries (which report
    /// 100% elapsed there).
    pub fn current_period(&self, at: DateTime<Utc>) -> Option<BillingPeriod> {
        let start = self.prev_due_at(at)?;
        let end = self.next_due_at(start + one_millisecond());
        Some(BillingPeriod::new(start, end))
    }

    /// Up to `n` period windows walking forward from the period containing
    /// `at`.
    ///
    /// When `at` falls before any started period the walk begins at the
    /// first period `[anchor, …)`.  Each window is half-open; consecutive
    /// windows share their boundary instant.
    pub fn next_periods(&self, n: usize, at: DateTime<Utc>) -> Vec<BillingPeriod> {
        let mut periods = Vec::with_capacity(n);
        let mut start = self.prev_due_at(at).unwrap_or(self.anchor);
        for _ in 0..n {
            let end = self.next_due_at(start + one_millisecond());
            periods.push(BillingPeriod::new(start, end));
            start = end;
        }
        periods
    }

    /// Up to `n` period windows walking backward from the period
    /// containing `at`, most recent first.
    ///
    /// Truncates at the anchor boundary: no returned window starts before
    /// the anchor, and the result is empty when `at` precedes it.
    pub fn previous_periods(&self, n: usize, at: DateTime<Utc>) -> Vec<BillingPeriod> {
        let mut periods = Vec::new();
        if n == 0 {
            return periods;
        }
        let Some(mut start) = self.prev_due_at(at) else {
            return periods;
        };
        loop {
            let end = self.next_due_at(start + one_millisecond());
            periods.push(BillingPeriod::new(start, end));
            if periods.len() == n {
                break;
            }
            match self.prev_due_at(start) {
                Some(earlier) => start = earlier,
                None => break,
            }
        }
        periods
    }

    // ── elapsed / remaining ───────────────────────────────────────────

    /// Time from `at` until the next due instant.  Never negative; zero
    /// exactly on a due date.
    pub fn time_remaining(&self, at: DateTime<Utc>) -> TimeDelta {
        (self.next_due_at(at) - at).max(TimeDelta::zero())
    }

    /// Time since the period containing `at` started, or `None` when no
    /// period has started yet.
    pub fn time_elapsed(&self, at: DateTime<Utc>) -> Option<TimeDelta> {
        self.prev_due_at(at).map(|prev| at - prev)
    }

    /// Full duration of the period containing `at`, or `None` when no
    /// period has started yet.
    pub fn current_cycle_duration(&self, at: DateTime<Utc>) -> Option<TimeDelta> {
        let prev = self.prev_due_at(at)?;
        Some(self.next_due_at(at) - prev)
    }

    /// Percentage of the current period already elapsed, or `None` when
    /// no period has started yet.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use duecycle::BillingCycle;
    ///
    /// let anchor = Utc.with_ymd_and_hms(2022, 1, 31, 0, 0, 0).unwrap();
    /// let cycle = BillingCycle::monthly(anchor);
    ///
    /// // 20 of the 28 February days are gone.
    /// let at = Utc.with_ymd_and_hms(2022, 2, 20, 0, 0, 0).unwrap();
    /// let elapsed = cycle.percent_elapsed(at).unwrap();
    /// assert!((elapsed - 71.43).abs() < 0.01);
    /// ```
    pub fn percent_elapsed(&self, at: DateTime<Utc>) -> Option<f64> {
        let prev = self.prev_due_at(at)?;
        let cycle = self.next_due_at(at) - prev;
        Some(percent_of(at - prev, cycle))
    }

    /// Percentage of the current period still remaining, or `None` when
    /// no period has started yet.
    pub fn percent_remaining(&self, at: DateTime<Utc>) -> Option<f64> {
        let prev = self.prev_due_at(at)?;
        let next = self.next_due_at(at);
        Some(percent_of(next - at, next - prev))
    }
}

/// `part` as a percentage of `whole`.  `whole` is a full cycle length and
/// therefore always positive.
fn percent_of(part: TimeDelta, whole: TimeDelta) -> f64 {
    (100.0 * part.num_milliseconds() as f64 / whole.num_milliseconds() as f64).max(0.0)
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "every {} {} anchored at {}",
            self.interval, self.unit, self.anchor
        )
    }
}
