// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Billing Cycle Module
//!
//! This crate provides calendar-aware primitives for recurring billing:
//! due-date computation, cycle counting, period enumeration, and
//! elapsed/remaining progress within the current period.
//!
//! # Core types
//!
//! - [`BillingCycle`] — immutable recurring schedule anchored at an
//!   instant; every query is a pure function of the cycle and a reference
//!   instant.
//! - [`CycleUnit`] — canonical recurrence unit (`Months` or `Years`);
//!   quarter tokens normalize to tripled months.
//! - [`BillingPeriod`] — half-open `[start, end)` window between two
//!   consecutive due instants.
//! - [`BillingCycleError`] — construction failures (unknown unit token,
//!   zero interval).
//!
//! # Calendar arithmetic
//!
//! Due dates advance by *calendar* months/years, not fixed durations:
//! the day-of-month clamps down to the last valid day of short target
//! months and re-snaps when a later month can hold it again.
//!
//! | Anchor | +1 cycle | +2 cycles |
//! |--------|----------|-----------|
//! | 2022-01-31 (monthly) | 2022-02-28 | 2022-03-31 |
//! | 2020-02-29 (yearly) | 2021-02-28 | 2022-02-28 (…+4 → 2024-02-29) |
//!
//! # Quick example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use duecycle::BillingCycle;
//!
//! let anchor = Utc.with_ymd_and_hms(2022, 1, 31, 0, 0, 0).unwrap();
//! let cycle = BillingCycle::new(anchor, 1, "quarter")?;
//!
//! let at = Utc.with_ymd_and_hms(2022, 6, 15, 0, 0, 0).unwrap();
//! assert_eq!(cycle.cycles_since_anchor(at), 1);
//! assert_eq!(
//!     cycle.next_due_at(at),
//!     Utc.with_ymd_and_hms(2022, 7, 31, 0, 0, 0).unwrap()
//! );
//! # Ok::<(), duecycle::BillingCycleError>(())
//! ```

mod calendar;
mod cycle;
mod error;
mod period;
mod unit;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use cycle::BillingCycle;
pub use error::BillingCycleError;
pub use period::BillingPeriod;
pub use unit::CycleUnit;
