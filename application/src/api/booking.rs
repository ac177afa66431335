//! Booking-related GraphQL input definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{
    GraphQLInputObject, GraphQLScalar, InputValue, ScalarValue, Value,
};
use rust_decimal::Decimal;
use service::domain;

use crate::api::scalar;

/// Unique identifier of a `Booking`, assigned by the booking store.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "BookingId", with = scalar::Via::<domain::booking::Id>)]
pub struct Id(domain::booking::Id);

/// Decimal percentage, e.g. `"15"` or `"12.5"`.
///
/// Its range and precision are checked when a `Settlement` is calculated.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    to_output_with = Self::to_output,
    from_input_with = Self::from_input,
    parse_token(String),
)]
pub struct Percent(Decimal);

impl Percent {
    /// Resolves this [`Percent`] as a GraphQL string.
    fn to_output<S: ScalarValue>(&self) -> Value<S> {
        Value::scalar(self.0.to_string())
    }

    /// Parses a [`Percent`] from a GraphQL string, never rounding it.
    fn from_input<S: ScalarValue>(
        input: &InputValue<S>,
    ) -> Result<Self, String> {
        let s = input.as_string_value().ok_or_else(|| {
            format!("Expected string for `Percent` scalar, found: {input}")
        })?;
        Decimal::from_str_exact(s.trim())
            .map(Self)
            .map_err(|e| format!("Invalid `Percent` scalar \"{s}\": {e}"))
    }
}

/// Stored `Booking` to calculate a settlement of.
#[derive(Clone, Debug, GraphQLInputObject)]
#[graphql(name = "BookingInput")]
pub struct Booking {
    /// ID of the `Booking` in the booking store.
    pub id: Id,

    /// Amounts charged to the guest.
    pub charges: Option<Charges>,

    /// Operating costs of the stay.
    pub expenses: Option<Expenses>,
}

impl From<Booking> for domain::Booking {
    fn from(booking: Booking) -> Self {
        let Booking {
            id,
            charges,
            expenses,
        } = booking;
        Self {
            id: id.into(),
            charges: charges.map(Into::into).unwrap_or_default(),
            expenses: expenses.map(Into::into).unwrap_or_default(),
        }
    }
}

/// Amounts charged to a guest for a `Booking`.
///
/// Absent amounts are treated as zero.
#[derive(Clone, Copy, Debug, Default, GraphQLInputObject)]
#[graphql(name = "BookingChargesInput")]
pub struct Charges {
    /// Base charge for the stay.
    pub accommodation_amount: Option<Money>,

    /// Charge for an early check-in.
    pub early_check_in: Option<Money>,

    /// Charge for a late check-out.
    pub late_check_out: Option<Money>,

    /// Charge for parking.
    pub parking: Option<Money>,

    /// Percentage of the total charge retained by the booking channel.
    pub aggregator_commission_percent: Option<Percent>,
}

impl From<Charges> for domain::booking::Charges {
    fn from(charges: Charges) -> Self {
        let Charges {
            accommodation_amount,
            early_check_in,
            late_check_out,
            parking,
            aggregator_commission_percent,
        } = charges;
        Self {
            accommodation: accommodation_amount,
            early_check_in,
            late_check_out,
            parking,
            aggregator_commission: aggregator_commission_percent
                .map(Into::into),
        }
    }
}

/// Operating costs attributable to a `Booking`.
///
/// Absent amounts are treated as zero.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "OperatingExpensesInput")]
pub struct Expenses {
    /// Housekeeping.
    pub maid: Option<Money>,

    /// Linen laundry.
    pub laundry: Option<Money>,

    /// Hygiene supplies.
    pub hygiene: Option<Money>,

    /// Transport.
    pub transport: Option<Money>,

    /// Compliment for a guest.
    pub compliment: Option<Money>,

    /// Miscellaneous expenses.
    pub other: Option<Money>,

    /// Annotation of the miscellaneous expenses.
    pub other_note: Option<String>,
}

impl From<Expenses> for domain::booking::Expenses {
    fn from(expenses: Expenses) -> Self {
        let Expenses {
            maid,
            laundry,
            hygiene,
            transport,
            compliment,
            other,
            other_note,
        } = expenses;
        Self {
            maid,
            laundry,
            hygiene,
            transport,
            compliment,
            other,
            other_note,
        }
    }
}
