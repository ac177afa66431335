//! Domain definitions.

pub mod booking;
pub mod settlement;

pub use self::{booking::Booking, settlement::Settlement};
