// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Billing period windows.
//!
//! A [`BillingPeriod`] is one half-open window `[start, end)` between two
//! consecutive due instants.  The start belongs to the window, the end is
//! the next due instant and belongs to the following window.

use chrono::{DateTime, TimeDelta, Utc};
use qtty::Days;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A half-open billing window `[start, end)` between consecutive due dates.
///
/// Produced by [`BillingCycle::next_periods`](crate::BillingCycle::next_periods),
/// [`BillingCycle::previous_periods`](crate::BillingCycle::previous_periods)
/// and [`BillingCycle::current_period`](crate::BillingCycle::current_period).
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use duecycle::BillingPeriod;
/// use qtty::Days;
///
/// let period = BillingPeriod::new(
///     Utc.with_ymd_and_hms(2022, 1, 31, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2022, 2, 28, 0, 0, 0).unwrap(),
/// );
///
/// assert!(period.contains(Utc.with_ymd_and_hms(2022, 2, 20, 0, 0, 0).unwrap()));
/// assert_eq!(period.duration_days(), Days::new(28.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BillingPeriod {
    /// First instant of the window (a due date).
    pub start: DateTime<Utc>,
    /// First instant *after* the window (the next due date).
    pub end: DateTime<Utc>,
}

impl BillingPeriod {
    /// Creates a new period between two due instants.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        BillingPeriod { start, end }
    }

    /// Returns the duration of the period.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns the duration of the period in days.
    pub fn duration_days(&self) -> Days {
        const NANOS_PER_DAY: f64 = 86_400_000_000_000.0;
        const SECONDS_PER_DAY: f64 = 86_400.0;

        let duration = self.duration();
        match duration.num_nanoseconds() {
            Some(ns) => Days::new(ns as f64 / NANOS_PER_DAY),
            // Fallback for exceptionally large durations that do not fit in i64 nanoseconds.
            None => Days::new(duration.num_seconds() as f64 / SECONDS_PER_DAY),
        }
    }

    /// Returns the duration of the period in whole seconds.
    pub fn duration_seconds(&self) -> i64 {
        self.duration().num_seconds()
    }

    /// Whether `at` falls inside the half-open window `[start, end)`.
    ///
    /// The end instant is excluded: it belongs to the next period.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
