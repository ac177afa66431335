//! [`Settlement`] definitions.

use std::{iter::Sum, ops::Add};

use common::{Money, Percent};
use derive_more::{Display, Error};
use rust_decimal::Decimal;

use crate::domain::booking::{Charges, Expenses, Field};
#[cfg(doc)]
use crate::domain::Booking;

/// Simplified tax plus bank fee, taken from the total charge of a
/// [`Booking`].
// SAFETY: `7` is within `[0, 100]`.
#[expect(unsafe_code, reason = "constant is valid")]
pub const TAX_AND_BANK_COMMISSION: Percent =
    unsafe { Percent::new_unchecked(Decimal::from_parts(7, 0, 0, false, 0)) };

/// Fee of the property management, taken from what remains after the
/// aggregator commission.
// SAFETY: `20` is within `[0, 100]`.
#[expect(unsafe_code, reason = "constant is valid")]
pub const MANAGEMENT_COMMISSION: Percent =
    unsafe { Percent::new_unchecked(Decimal::from_parts(20, 0, 0, false, 0)) };

/// Maximum monetary amount accepted by [`calculate()`].
///
/// Keeps every intermediate value far away from the [`Decimal`] limits.
pub const MAX_AMOUNT: Decimal =
    Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Maximum number of fractional digits of an amount or a percentage accepted
/// by [`calculate()`].
///
/// Together with the [`MAX_AMOUNT`] it keeps every [`Settlement`] amount
/// exact within the [`Decimal`] precision.
pub const MAX_SCALE: u32 = 4;

/// Financial breakdown of a [`Booking`].
///
/// Never stored on its own, but always recalculated from [`Charges`] and
/// [`Expenses`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Settlement {
    /// Sum of all the [`Charges`].
    pub total_amount: Money,

    /// Share of the [`Settlement::total_amount`] retained by the booking
    /// channel.
    pub aggregator_commission_amount: Money,

    /// [`TAX_AND_BANK_COMMISSION`] of the [`Settlement::total_amount`].
    ///
    /// Informational only: it is not deducted from the
    /// [`Settlement::owner_funds`].
    pub tax_and_bank_commission: Money,

    /// [`Settlement::total_amount`] without the
    /// [`Settlement::aggregator_commission_amount`].
    pub remainder_before_management: Money,

    /// [`MANAGEMENT_COMMISSION`] of the
    /// [`Settlement::remainder_before_management`].
    pub management_commission: Money,

    /// [`Settlement::remainder_before_management`] without the
    /// [`Settlement::management_commission`].
    pub remainder_before_expenses: Money,

    /// Sum of all the [`Expenses`].
    pub operating_expenses_total: Money,

    /// Net amount due to the apartment owner.
    ///
    /// Negative when [`Expenses`] exceed the
    /// [`Settlement::remainder_before_expenses`].
    pub owner_funds: Money,
}

impl Add for Settlement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total_amount: self.total_amount + rhs.total_amount,
            aggregator_commission_amount: self.aggregator_commission_amount
                + rhs.aggregator_commission_amount,
            tax_and_bank_commission: self.tax_and_bank_commission
                + rhs.tax_and_bank_commission,
            remainder_before_management: self.remainder_before_management
                + rhs.remainder_before_management,
            management_commission: self.management_commission
                + rhs.management_commission,
            remainder_before_expenses: self.remainder_before_expenses
                + rhs.remainder_before_expenses,
            operating_expenses_total: self.operating_expenses_total
                + rhs.operating_expenses_total,
            owner_funds: self.owner_funds + rhs.owner_funds,
        }
    }
}

impl Sum for Settlement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a Settlement> for Settlement {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Calculates the [`Settlement`] of the provided [`Charges`] and
/// [`Expenses`].
///
/// Absent amounts are treated as zero. Deductions are applied in a fixed
/// order: aggregator commission, then management commission, then
/// operating expenses.
///
/// # Errors
///
/// With a [`ValidationError`] if any amount is negative, exceeds
/// [`MAX_AMOUNT`] or has more than [`MAX_SCALE`] fractional digits, or the
/// aggregator commission is out of `[0, 100]`.
pub fn calculate(
    charges: &Charges,
    expenses: &Expenses,
) -> Result<Settlement, ValidationError> {
    let Normalized {
        charges,
        aggregator_commission,
        expenses,
    } = Normalized::new(charges, expenses)?;

    let total_amount = charges.iter().sum::<Money>();
    let aggregator_commission_amount = aggregator_commission.of(total_amount);
    let tax_and_bank_commission = TAX_AND_BANK_COMMISSION.of(total_amount);
    let remainder_before_management =
        total_amount - aggregator_commission_amount;
    let management_commission =
        MANAGEMENT_COMMISSION.of(remainder_before_management);
    let remainder_before_expenses =
        remainder_before_management - management_commission;
    let operating_expenses_total = expenses.iter().sum::<Money>();
    let owner_funds = remainder_before_expenses - operating_expenses_total;

    Ok(Settlement {
        total_amount,
        aggregator_commission_amount,
        tax_and_bank_commission,
        remainder_before_management,
        management_commission,
        remainder_before_expenses,
        operating_expenses_total,
        owner_funds,
    })
}

/// [`Charges`] and [`Expenses`] with all the absent values defaulted and all
/// the present ones validated.
#[derive(Clone, Copy, Debug)]
struct Normalized {
    /// Amounts of the [`Charges`].
    charges: [Money; 4],

    /// [`Charges::aggregator_commission`].
    aggregator_commission: Percent,

    /// Amounts of the [`Expenses`].
    expenses: [Money; 6],
}

impl Normalized {
    /// Normalizes the provided [`Charges`] and [`Expenses`].
    fn new(
        charges: &Charges,
        expenses: &Expenses,
    ) -> Result<Self, ValidationError> {
        let aggregator_commission = match charges.aggregator_commission {
            None => Percent::ZERO,
            Some(val) => {
                let percent = Percent::new(val).ok_or(
                    ValidationError::AggregatorCommissionOutOfRange(val),
                )?;
                if val.normalize().scale() > MAX_SCALE {
                    return Err(ValidationError::TooPrecise {
                        field: Field::AggregatorCommission,
                        value: val,
                    });
                }
                percent
            }
        };

        Ok(Self {
            charges: amounts(charges.amounts())?,
            aggregator_commission,
            expenses: amounts(expenses.amounts())?,
        })
    }
}

/// Defaults the provided amounts to zero and ensures they are within the
/// `[0, MAX_AMOUNT]` range with at most [`MAX_SCALE`] fractional digits.
fn amounts<const N: usize>(
    fields: [(Field, Option<Money>); N],
) -> Result<[Money; N], ValidationError> {
    let mut out = [Money::ZERO; N];
    for (slot, (field, value)) in out.iter_mut().zip(fields) {
        let value = value.unwrap_or(Money::ZERO);
        if value.is_negative() {
            return Err(ValidationError::Negative { field, value });
        }
        if value.amount() > MAX_AMOUNT {
            return Err(ValidationError::TooLarge { field, value });
        }
        if value.amount().normalize().scale() > MAX_SCALE {
            return Err(ValidationError::TooPrecise {
                field,
                value: value.amount(),
            });
        }
        *slot = value;
    }
    Ok(out)
}

/// Error of [`Charges`] or [`Expenses`] being invalid for a [`Settlement`]
/// calculation.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// Amount is below zero.
    #[display("`{field}` must not be negative, but is {value}")]
    Negative {
        /// [`Field`] holding the amount.
        field: Field,

        /// Provided amount.
        value: Money,
    },

    /// Amount exceeds the [`MAX_AMOUNT`].
    #[display("`{field}` must not exceed {}, but is {value}", MAX_AMOUNT)]
    TooLarge {
        /// [`Field`] holding the amount.
        field: Field,

        /// Provided amount.
        value: Money,
    },

    /// Value has more than [`MAX_SCALE`] fractional digits.
    #[display(
        "`{field}` must have at most {} fractional digits, but is {value}",
        MAX_SCALE
    )]
    TooPrecise {
        /// [`Field`] holding the value.
        field: Field,

        /// Provided value.
        value: Decimal,
    },

    /// [`Charges::aggregator_commission`] is out of `[0, 100]`.
    #[display(
        "`aggregatorCommissionPercent` must be within `[0, 100]`, \
         but is {_0}"
    )]
    AggregatorCommissionOutOfRange(#[error(not(source))] Decimal),
}

impl ValidationError {
    /// Returns the [`Field`] this [`ValidationError`] is about.
    #[must_use]
    pub fn field(self) -> Field {
        match self {
            Self::Negative { field, .. }
            | Self::TooLarge { field, .. }
            | Self::TooPrecise { field, .. } => field,
            Self::AggregatorCommissionOutOfRange(_) => {
                Field::AggregatorCommission
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Money;
    use rust_decimal::Decimal;

    use crate::domain::booking::{Charges, Expenses, Field};

    use super::{calculate, Settlement, ValidationError, MAX_AMOUNT, MAX_SCALE};

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn charges(accommodation: &str, aggregator_commission: i64) -> Charges {
        Charges {
            accommodation: Some(money(accommodation)),
            aggregator_commission: Some(Decimal::new(aggregator_commission, 0)),
            ..Charges::default()
        }
    }

    fn zeroes() -> (Charges, Expenses) {
        let zero = Some(Money::ZERO);
        (
            Charges {
                accommodation: zero,
                early_check_in: zero,
                late_check_out: zero,
                parking: zero,
                aggregator_commission: Some(Decimal::ZERO),
            },
            Expenses {
                maid: zero,
                laundry: zero,
                hygiene: zero,
                transport: zero,
                compliment: zero,
                other: zero,
                other_note: None,
            },
        )
    }

    #[test]
    fn constants() {
        assert_eq!(super::TAX_AND_BANK_COMMISSION.to_string(), "7");
        assert_eq!(super::MANAGEMENT_COMMISSION.to_string(), "20");
        assert_eq!(MAX_AMOUNT, Decimal::new(1_000_000_000_000_000, 0));
    }

    #[test]
    fn deduction_order() {
        let expenses = Expenses {
            maid: Some(money("2000")),
            laundry: Some(money("500")),
            compliment: Some(money("500")),
            ..Expenses::default()
        };

        let settlement = calculate(&charges("10000", 15), &expenses).unwrap();

        assert_eq!(
            settlement,
            Settlement {
                total_amount: money("10000"),
                aggregator_commission_amount: money("1500"),
                tax_and_bank_commission: money("700"),
                remainder_before_management: money("8500"),
                management_commission: money("1700"),
                remainder_before_expenses: money("6800"),
                operating_expenses_total: money("3000"),
                owner_funds: money("3800"),
            },
        );
    }

    #[test]
    fn negative_owner_funds_are_kept() {
        let expenses = Expenses {
            maid: Some(money("2000")),
            ..Expenses::default()
        };

        let settlement = calculate(&charges("1000", 25), &expenses).unwrap();

        assert_eq!(settlement.total_amount, money("1000"));
        assert_eq!(settlement.aggregator_commission_amount, money("250"));
        assert_eq!(settlement.remainder_before_management, money("750"));
        assert_eq!(settlement.management_commission, money("150"));
        assert_eq!(settlement.remainder_before_expenses, money("600"));
        assert_eq!(settlement.operating_expenses_total, money("2000"));
        assert_eq!(settlement.owner_funds, money("-1400"));
    }

    #[test]
    fn tax_is_reported_but_not_deducted() {
        let settlement =
            calculate(&charges("1000", 0), &Expenses::default()).unwrap();

        assert_eq!(settlement.tax_and_bank_commission, money("70"));
        assert_eq!(settlement.owner_funds, money("800"));
    }

    #[test]
    fn is_idempotent() {
        let charges = Charges {
            accommodation: Some(money("4321.17")),
            early_check_in: Some(money("300")),
            late_check_out: Some(money("250.5")),
            parking: Some(money("99.99")),
            aggregator_commission: Some(Decimal::new(155, 1)),
        };
        let expenses = Expenses {
            maid: Some(money("700")),
            hygiene: Some(money("33.3")),
            other: Some(money("12")),
            other_note: Some("light bulbs".to_owned()),
            ..Expenses::default()
        };

        let first = calculate(&charges, &expenses).unwrap();
        let second = calculate(&charges, &expenses).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.owner_funds.amount().to_string(),
            second.owner_funds.amount().to_string(),
        );
    }

    #[test]
    fn zero_input_is_zero_output() {
        let (charges, expenses) = zeroes();

        let settlement = calculate(&charges, &expenses).unwrap();

        assert_eq!(settlement, Settlement::default());
    }

    #[test]
    fn absent_fields_are_zeroes() {
        let (charges, expenses) = zeroes();
        let explicit = calculate(&charges, &expenses).unwrap();
        let absent =
            calculate(&Charges::default(), &Expenses::default()).unwrap();

        assert_eq!(explicit, absent);

        let partial = Charges {
            accommodation: Some(money("5000")),
            ..Charges::default()
        };
        let settlement = calculate(&partial, &Expenses::default()).unwrap();
        assert_eq!(settlement.total_amount, money("5000"));
        assert_eq!(settlement.aggregator_commission_amount, Money::ZERO);
        assert_eq!(settlement.owner_funds, money("4000"));
    }

    #[test]
    fn total_amount_is_additive() {
        let cases = [
            ("0", "0", "0", "0"),
            ("10000", "500", "750.25", "300"),
            ("1.01", "2.02", "3.03", "4.04"),
            ("999999.99", "0", "0.01", "0"),
        ];
        for (a, b, c, d) in cases {
            let charges = Charges {
                accommodation: Some(money(a)),
                early_check_in: Some(money(b)),
                late_check_out: Some(money(c)),
                parking: Some(money(d)),
                aggregator_commission: Some(Decimal::ZERO),
            };

            let settlement =
                calculate(&charges, &Expenses::default()).unwrap();

            assert_eq!(
                settlement.total_amount,
                money(a) + money(b) + money(c) + money(d),
                "{a} + {b} + {c} + {d}",
            );
        }
    }

    #[test]
    fn commission_is_monotonic() {
        let expenses = Expenses {
            laundry: Some(money("100")),
            ..Expenses::default()
        };

        let mut previous: Option<Settlement> = None;
        for percent in [0, 10, 15, 25, 50, 100] {
            let current =
                calculate(&charges("7000", percent), &expenses).unwrap();
            if let Some(previous) = previous {
                assert!(
                    current.remainder_before_management
                        < previous.remainder_before_management,
                    "remainder must decrease at {percent}%",
                );
                assert!(
                    current.owner_funds < previous.owner_funds,
                    "owner funds must decrease at {percent}%",
                );
            }
            previous = Some(current);
        }

        let free = calculate(&charges("0", 0), &Expenses::default()).unwrap();
        let charged =
            calculate(&charges("0", 25), &Expenses::default()).unwrap();
        assert_eq!(free, charged);
    }

    #[test]
    fn accepts_any_commission_within_range() {
        let settlement =
            calculate(&charges("200", 100), &Expenses::default()).unwrap();
        assert_eq!(settlement.remainder_before_management, Money::ZERO);
        assert_eq!(settlement.owner_funds, Money::ZERO);

        let fractional = Charges {
            aggregator_commission: Some(Decimal::new(125, 1)),
            ..charges("1000", 0)
        };
        let settlement =
            calculate(&fractional, &Expenses::default()).unwrap();
        assert_eq!(settlement.aggregator_commission_amount, money("125"));
    }

    #[test]
    fn rejects_negative_amounts() {
        let err = calculate(&charges("-100", 0), &Expenses::default())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Negative {
                field: Field::Accommodation,
                value: money("-100"),
            },
        );
        assert_eq!(
            err.to_string(),
            "`accommodationAmount` must not be negative, but is -100",
        );

        let expenses = Expenses {
            transport: Some(money("-0.01")),
            ..Expenses::default()
        };
        let err = calculate(&Charges::default(), &expenses).unwrap_err();
        assert_eq!(err.field(), Field::Transport);
    }

    #[test]
    fn rejects_too_precise_values() {
        let err = calculate(
            &charges("0.0000000000000000000000000001", 15),
            &Expenses::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooPrecise {
                field: Field::Accommodation,
                value: Decimal::new(1, 28),
            },
        );

        let expenses = Expenses {
            other: Some(money("0.00001")),
            ..Expenses::default()
        };
        let err = calculate(&Charges::default(), &expenses).unwrap_err();
        assert_eq!(err.field(), Field::Other);
        assert_eq!(
            err.to_string(),
            "`other` must have at most 4 fractional digits, but is 0.00001",
        );

        let fractional = Charges {
            aggregator_commission: Some(Decimal::new(123_456, 5)),
            ..charges("100", 0)
        };
        let err = calculate(&fractional, &Expenses::default()).unwrap_err();
        assert_eq!(err.field(), Field::AggregatorCommission);
    }

    #[test]
    fn trailing_zeroes_are_not_precision() {
        let charges = Charges {
            aggregator_commission: Some(Decimal::new(150_000_000, 7)),
            ..charges("100.000000000", 0)
        };

        let settlement = calculate(&charges, &Expenses::default()).unwrap();

        assert_eq!(settlement.aggregator_commission_amount, money("15"));
    }

    #[test]
    fn smallest_values_stay_exact() {
        let smallest = Decimal::new(1, MAX_SCALE);
        let tiny = |percent: Decimal| Charges {
            accommodation: Some(Money::new(smallest)),
            aggregator_commission: Some(percent),
            ..Charges::default()
        };

        let at_15 =
            calculate(&tiny(Decimal::new(15, 0)), &Expenses::default())
                .unwrap();
        let at_smallest = calculate(&tiny(smallest), &Expenses::default())
            .unwrap();
        let at_zero =
            calculate(&tiny(Decimal::ZERO), &Expenses::default()).unwrap();

        assert_eq!(at_15.aggregator_commission_amount, money("0.000015"));
        assert!(
            at_smallest.remainder_before_management
                < at_zero.remainder_before_management,
        );
        assert!(
            at_15.remainder_before_management
                < at_smallest.remainder_before_management,
        );
    }

    #[test]
    fn extreme_values_stay_exact() {
        let largest = Money::new(MAX_AMOUNT - Decimal::new(1, MAX_SCALE));
        let charges = Charges {
            accommodation: Some(largest),
            early_check_in: Some(largest),
            late_check_out: Some(largest),
            parking: Some(largest),
            aggregator_commission: Some(Decimal::new(999_999, MAX_SCALE)),
        };
        let expenses = Expenses {
            maid: Some(Money::new(Decimal::new(1, MAX_SCALE))),
            ..Expenses::default()
        };

        let s = calculate(&charges, &expenses).unwrap();

        assert_eq!(
            s.aggregator_commission_amount + s.remainder_before_management,
            s.total_amount,
        );
        assert_eq!(
            s.management_commission + s.remainder_before_expenses,
            s.remainder_before_management,
        );
        assert_eq!(
            s.owner_funds + s.operating_expenses_total,
            s.remainder_before_expenses,
        );
        assert_eq!(
            s.management_commission.amount() * Decimal::new(5, 0),
            s.remainder_before_management.amount(),
        );
    }

    #[test]
    fn accepts_negative_zero() {
        let settlement =
            calculate(&charges("-0", 0), &Expenses::default()).unwrap();
        assert_eq!(settlement, Settlement::default());
    }

    #[test]
    fn rejects_commission_out_of_range() {
        for percent in [-1, 101] {
            let err = calculate(&charges("1000", percent), &Expenses::default())
                .unwrap_err();
            assert_eq!(
                err,
                ValidationError::AggregatorCommissionOutOfRange(Decimal::new(
                    percent, 0,
                )),
            );
            assert_eq!(err.field(), Field::AggregatorCommission);
        }
    }

    #[test]
    fn rejects_too_large_amounts() {
        let huge = Money::new(MAX_AMOUNT + Decimal::ONE);
        let charges = Charges {
            parking: Some(huge),
            ..Charges::default()
        };

        let err = calculate(&charges, &Expenses::default()).unwrap_err();

        assert_eq!(
            err,
            ValidationError::TooLarge {
                field: Field::Parking,
                value: huge,
            },
        );

        let max = Money::new(MAX_AMOUNT);
        let charges = Charges {
            accommodation: Some(max),
            early_check_in: Some(max),
            late_check_out: Some(max),
            parking: Some(max),
            aggregator_commission: Some(Decimal::new(15, 0)),
        };
        assert!(calculate(&charges, &Expenses::default()).is_ok());
    }

    #[test]
    fn sums_field_wise() {
        let a = calculate(&charges("10000", 15), &Expenses::default()).unwrap();
        let b = calculate(
            &charges("1000", 25),
            &Expenses {
                maid: Some(money("2000")),
                ..Expenses::default()
            },
        )
        .unwrap();

        let total = [a, b].iter().sum::<Settlement>();

        assert_eq!(total.total_amount, money("11000"));
        assert_eq!(total.tax_and_bank_commission, money("770"));
        assert_eq!(total.owner_funds, a.owner_funds + b.owner_funds);
        assert_eq!(
            std::iter::empty::<Settlement>().sum::<Settlement>(),
            Settlement::default(),
        );
    }
}
