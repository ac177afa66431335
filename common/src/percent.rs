//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::{Display, Into};
use rust_decimal::Decimal;

use crate::Money;

/// Exact decimal percentage in the `[0, 100]` range.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided value is
    /// not less than `0` and not greater than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must not be less than `0` and not greater than
    /// `100`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }

    /// Returns the share of the provided [`Money`] this [`Percent`] stands
    /// for.
    ///
    /// The result is exact as long as it fits into the [`Decimal`] precision.
    #[must_use]
    pub fn of(self, money: Money) -> Money {
        Money::new(money.amount() * self.0 / Decimal::ONE_HUNDRED)
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str_exact(s.trim())
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}
