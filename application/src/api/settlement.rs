//! [`Settlement`] definitions.

use common::Money;
use derive_more::From;
use juniper::graphql_object;
use service::{command, domain};

use crate::{AsError, Context, Error};

/// Financial breakdown of a `Booking`.
#[derive(Clone, Copy, Debug, From)]
pub struct Settlement(domain::Settlement);

/// Financial breakdown of a `Booking`.
#[graphql_object(context = Context)]
impl Settlement {
    /// Sum of all the charges of the `Booking`.
    #[must_use]
    pub fn total_amount(&self) -> Money {
        self.0.total_amount
    }

    /// Share of the `totalAmount` retained by the booking channel.
    #[must_use]
    pub fn aggregator_commission_amount(&self) -> Money {
        self.0.aggregator_commission_amount
    }

    /// Simplified tax plus bank fee (7% of the `totalAmount`).
    ///
    /// Informational only: not deducted from the `ownerFunds`.
    #[must_use]
    pub fn tax_and_bank_commission(&self) -> Money {
        self.0.tax_and_bank_commission
    }

    /// `totalAmount` without the `aggregatorCommissionAmount`.
    #[must_use]
    pub fn remainder_before_management(&self) -> Money {
        self.0.remainder_before_management
    }

    /// Management fee (20% of the `remainderBeforeManagement`).
    #[must_use]
    pub fn management_commission(&self) -> Money {
        self.0.management_commission
    }

    /// `remainderBeforeManagement` without the `managementCommission`.
    #[must_use]
    pub fn remainder_before_expenses(&self) -> Money {
        self.0.remainder_before_expenses
    }

    /// Sum of all the operating expenses of the `Booking`.
    #[must_use]
    pub fn operating_expenses_total(&self) -> Money {
        self.0.operating_expenses_total
    }

    /// Net amount due to the apartment owner.
    ///
    /// Negative when the expenses exceed the `remainderBeforeExpenses`.
    #[must_use]
    pub fn owner_funds(&self) -> Money {
        self.0.owner_funds
    }
}

impl AsError for command::calculate_settlement::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Invalid(e) => e.try_as_error(),
        }
    }
}
