// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Recurrence unit normalization.
//!
//! Billing intervals are configured with a free-form unit token but the
//! arithmetic engine only ever deals with two canonical units.  The
//! accepted tokens and their normalization:
//!
//! | Token | Canonical unit | Interval value |
//! |-------|----------------|----------------|
//! | `month`, `months` | [`CycleUnit::Months`] | unchanged |
//! | `quarter`, `quarters` | [`CycleUnit::Months`] | × 3 |
//! | `year`, `years` | [`CycleUnit::Years`] | unchanged |
//!
//! Any other token is rejected with
//! [`BillingCycleError::InvalidUnit`](crate::BillingCycleError::InvalidUnit).

use crate::error::BillingCycleError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical recurrence unit of a [`BillingCycle`](crate::BillingCycle).
///
/// Quarters do not appear here: they are folded into [`CycleUnit::Months`]
/// with a tripled interval value during [normalization](CycleUnit::normalize).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CycleUnit {
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

impl CycleUnit {
    /// Normalize a raw unit token and interval value into canonical form.
    ///
    /// Returns the adjusted interval value together with the canonical
    /// unit tag.  The interval value itself is validated by the
    /// [`BillingCycle`](crate::BillingCycle) constructors, not here.
    ///
    /// # Examples
    ///
    /// ```
    /// use duecycle::CycleUnit;
    ///
    /// assert_eq!(CycleUnit::normalize("month", 1).unwrap(), (1, CycleUnit::Months));
    /// assert_eq!(CycleUnit::normalize("quarters", 2).unwrap(), (6, CycleUnit::Months));
    /// assert_eq!(CycleUnit::normalize("years", 1).unwrap(), (1, CycleUnit::Years));
    /// assert!(CycleUnit::normalize("fortnight", 1).is_err());
    /// ```
    pub fn normalize(token: &str, value: u32) -> Result<(u32, CycleUnit), BillingCycleError> {
        match token {
            "month" | "months" => Ok((value, CycleUnit::Months)),
            "quarter" | "quarters" => Ok((value.saturating_mul(3), CycleUnit::Months)),
            "year" | "years" => Ok((value, CycleUnit::Years)),
            other => Err(BillingCycleError::InvalidUnit {
                token: other.to_string(),
            }),
        }
    }

    /// Calendar months spanned by one interval step of this unit.
    #[inline]
    pub(crate) const fn months_per_step(self) -> i64 {
        match self {
            CycleUnit::Months => 1,
            CycleUnit::Years => 12,
        }
    }

    /// The canonical token for this unit (`"months"` or `"years"`).
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            CycleUnit::Months => "months",
            CycleUnit::Years => "years",
        }
    }
}

impl std::fmt::Display for CycleUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────
//
// The unit round-trips as its canonical token string.

#[cfg(feature = "serde")]
impl Serialize for CycleUnit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CycleUnit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        match token.as_str() {
            "months" => Ok(CycleUnit::Months),
            "years" => Ok(CycleUnit::Years),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["months", "years"],
            )),
        }
    }
}
