//! GraphQL API definitions.

pub mod booking;
mod payout;
mod query;
pub mod report;
pub mod scalar;
mod settlement;

use juniper::{EmptyMutation, EmptySubscription};

use crate::Context;

pub use self::{payout::Payout, query::Query, settlement::Settlement};

/// GraphQL schema.
pub type Schema = juniper::RootNode<
    'static,
    Query,
    EmptyMutation<Context>,
    EmptySubscription<Context>,
>;

/// Creates a new GraphQL [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, EmptyMutation::new(), EmptySubscription::new())
}
