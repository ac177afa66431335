//! [`Query`] definition.

pub mod payout;
pub mod report;

/// [`Query`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Query;

pub use self::payout::Payout;
