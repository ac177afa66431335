//! Report [`Query`]s definitions.
//!
//! [`Query`]: super::Query

pub mod owner;

pub use self::owner::Owner;
