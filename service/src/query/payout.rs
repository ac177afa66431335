//! [`Payout`] definition.

use derive_more::{Display, Error};
use tracerr::Traced;

use crate::{
    domain::{booking, settlement, Booking, Settlement},
    Query, Service,
};

/// [`Query`] to show the payout details of a previously stored [`Booking`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    /// [`Booking`] to show the payout of.
    pub booking: Booking,
}

/// Output of the [`Payout`] [`Query`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Output {
    /// ID of the [`Booking`].
    pub booking_id: booking::Id,

    /// [`Settlement`] of the [`Booking`].
    pub settlement: Settlement,

    /// Annotation of the [`booking::Expenses::other`] amount, if any.
    pub other_note: Option<String>,
}

impl Query<Payout> for Service {
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Payout { booking }: Payout,
    ) -> Result<Self::Ok, Self::Err> {
        let Booking {
            id,
            charges,
            expenses,
        } = booking;

        let settlement = settlement::calculate(&charges, &expenses)
            .map_err(|error| ExecutionError::Invalid {
                booking_id: id.clone(),
                error,
            })
            .map_err(tracerr::wrap!())?;

        Ok(Output {
            booking_id: id,
            settlement,
            other_note: expenses.other_note,
        })
    }
}

/// Error of [`Payout`] [`Query`] execution.
#[derive(Clone, Debug, Display, Error)]
pub enum ExecutionError {
    /// Stored [`Booking`] has invalid amounts.
    #[display("`Booking(id: {booking_id})` is invalid: {error}")]
    Invalid {
        /// ID of the invalid [`Booking`].
        booking_id: booking::Id,

        /// Reason of the [`Booking`] being invalid.
        #[error(source)]
        error: settlement::ValidationError,
    },
}
