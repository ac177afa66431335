//! [`Command`] for calculating a [`Settlement`] of a [`Booking`] being
//! edited.

use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Booking;
use crate::{
    domain::{
        booking::{Charges, Expenses},
        settlement, Settlement,
    },
    Service,
};

use super::Command;

/// [`Command`] for calculating a [`Settlement`] of a [`Booking`] being
/// edited, before it's submitted to the booking store.
#[derive(Clone, Debug, Default)]
pub struct CalculateSettlement {
    /// [`Charges`] entered so far.
    pub charges: Charges,

    /// [`Expenses`] entered so far.
    pub expenses: Expenses,
}

impl Command<CalculateSettlement> for Service {
    type Ok = Settlement;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CalculateSettlement,
    ) -> Result<Self::Ok, Self::Err> {
        let CalculateSettlement { charges, expenses } = cmd;

        let settlement = settlement::calculate(&charges, &expenses)
            .map_err(ExecutionError::from)
            .map_err(tracerr::wrap!())?;

        log::debug!(
            total_amount = %settlement.total_amount,
            owner_funds = %settlement.owner_funds,
            "`Settlement` calculated",
        );

        Ok(settlement)
    }
}

/// Error of [`CalculateSettlement`] [`Command`] execution.
#[derive(Clone, Copy, Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Provided [`Charges`] or [`Expenses`] are invalid.
    #[display("Invalid booking amounts: {_0}")]
    Invalid(settlement::ValidationError),
}
