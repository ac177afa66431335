//! [`Payout`] definitions.

use juniper::graphql_object;
use service::query;

use crate::{api, AsError, Context, Error};

/// Payout details of a stored `Booking`.
#[derive(Clone, Debug)]
pub struct Payout(query::payout::Output);

impl From<query::payout::Output> for Payout {
    fn from(output: query::payout::Output) -> Self {
        Self(output)
    }
}

/// Payout details of a stored `Booking`.
#[graphql_object(context = Context)]
impl Payout {
    /// ID of the `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Payout.bookingId",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn booking_id(&self) -> api::booking::Id {
        self.0.booking_id.clone().into()
    }

    /// `Settlement` of the `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Payout.settlement",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn settlement(&self) -> api::Settlement {
        self.0.settlement.into()
    }

    /// Annotation of the miscellaneous expenses, if any.
    #[must_use]
    pub fn other_note(&self) -> Option<&str> {
        self.0.other_note.as_deref()
    }
}

impl AsError for query::payout::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Invalid { error, .. } => {
                Some(error.try_as_error()?.with_message(self))
            }
        }
    }
}
