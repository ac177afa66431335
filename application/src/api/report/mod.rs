//! GraphQL report definitions.

pub mod owner;

pub use self::owner::Owner;
