//! [`Booking`] definitions.

use std::{fmt, str::FromStr};

use common::Money;
use derive_more::{AsRef, Display};
use rust_decimal::Decimal;
#[cfg(feature = "serde")]
use serde::Deserialize;

#[cfg(doc)]
use crate::domain::Settlement;

/// Booking of an apartment, as stored by the external booking store.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// [`Charges`] of this [`Booking`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub charges: Charges,

    /// [`Expenses`] of this [`Booking`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub expenses: Expenses,
}

/// Opaque ID of a [`Booking`] assigned by the external booking store.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the provided value is not blank.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.trim().is_empty()).then_some(Self(id))
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("blank booking ID")
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        Self::new(id).ok_or_else(|| {
            serde::de::Error::custom("booking ID must not be blank")
        })
    }
}

/// Amounts charged to a guest for a [`Booking`].
///
/// Absent amounts are treated as zero.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Charges {
    /// Base charge for the stay.
    #[cfg_attr(feature = "serde", serde(rename = "accommodationAmount"))]
    pub accommodation: Option<Money>,

    /// Charge for an early check-in.
    pub early_check_in: Option<Money>,

    /// Charge for a late check-out.
    pub late_check_out: Option<Money>,

    /// Charge for parking.
    pub parking: Option<Money>,

    /// Percentage of the total charge retained by the booking channel.
    ///
    /// Zero (or absent) means a direct booking.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "aggregatorCommissionPercent")
    )]
    pub aggregator_commission: Option<Decimal>,
}

impl Charges {
    /// Returns all the monetary amounts of these [`Charges`] along with the
    /// [`Field`] each of them is stored in.
    #[must_use]
    pub fn amounts(&self) -> [(Field, Option<Money>); 4] {
        [
            (Field::Accommodation, self.accommodation),
            (Field::EarlyCheckIn, self.early_check_in),
            (Field::LateCheckOut, self.late_check_out),
            (Field::Parking, self.parking),
        ]
    }
}

/// Operating costs attributable to a [`Booking`].
///
/// Absent amounts are treated as zero.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize),
    serde(default, rename_all = "camelCase")
)]
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

    /// Miscellaneous expenses, described by the [`Expenses::other_note`].
    pub other: Option<Money>,

    /// Free-text annotation of the [`Expenses::other`] amount.
    ///
    /// Doesn't affect any [`Settlement`].
    pub other_note: Option<String>,
}

impl Expenses {
    /// Returns all the monetary amounts of these [`Expenses`] along with the
    /// [`Field`] each of them is stored in.
    #[must_use]
    pub fn amounts(&self) -> [(Field, Option<Money>); 6] {
        [
            (Field::Maid, self.maid),
            (Field::Laundry, self.laundry),
            (Field::Hygiene, self.hygiene),
            (Field::Transport, self.transport),
            (Field::Compliment, self.compliment),
            (Field::Other, self.other),
        ]
    }
}

/// Numeric field of [`Charges`] or [`Expenses`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    /// [`Charges::accommodation`].
    Accommodation,

    /// [`Charges::early_check_in`].
    EarlyCheckIn,

    /// [`Charges::late_check_out`].
    LateCheckOut,

    /// [`Charges::parking`].
    Parking,

    /// [`Charges::aggregator_commission`].
    AggregatorCommission,

    /// [`Expenses::maid`].
    Maid,

    /// [`Expenses::laundry`].
    Laundry,

    /// [`Expenses::hygiene`].
    Hygiene,

    /// [`Expenses::transport`].
    Transport,

    /// [`Expenses::compliment`].
    Compliment,

    /// [`Expenses::other`].
    Other,
}

impl Field {
    /// Returns the name this [`Field`] is known by in the booking form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Accommodation => "accommodationAmount",
            Self::EarlyCheckIn => "earlyCheckIn",
            Self::LateCheckOut => "lateCheckOut",
            Self::Parking => "parking",
            Self::AggregatorCommission => "aggregatorCommissionPercent",
            Self::Maid => "maid",
            Self::Laundry => "laundry",
            Self::Hygiene => "hygiene",
            Self::Transport => "transport",
            Self::Compliment => "compliment",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
