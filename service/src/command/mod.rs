//! [`Command`] definition.

pub mod calculate_settlement;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::calculate_settlement::CalculateSettlement;
