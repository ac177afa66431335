//! GraphQL [`Query`]s definitions.

use juniper::graphql_object;
use service::{command, query, Query as _};

use crate::{api, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Calculates the `Settlement` of a `Booking` being edited.
    ///
    /// Absent amounts are treated as zero.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NEGATIVE_AMOUNT` - any of the provided amounts is negative;
    /// - `AMOUNT_TOO_LARGE` - any of the provided amounts is too large;
    /// - `AMOUNT_TOO_PRECISE` - any of the provided values has too many
    ///   fractional digits;
    /// - `AGGREGATOR_COMMISSION_OUT_OF_RANGE` - the provided aggregator
    ///   commission is out of `[0, 100]`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "settlement",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn settlement(
        charges: Option<api::booking::Charges>,
        expenses: Option<api::booking::Expenses>,
        ctx: &Context,
    ) -> Result<api::Settlement, Error> {
        ctx.service()
            .execute(command::CalculateSettlement {
                charges: charges.map(Into::into).unwrap_or_default(),
                expenses: expenses.map(Into::into).unwrap_or_default(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the payout details of a stored `Booking`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NEGATIVE_AMOUNT` - any of the `Booking` amounts is negative;
    /// - `AMOUNT_TOO_LARGE` - any of the `Booking` amounts is too large;
    /// - `AMOUNT_TOO_PRECISE` - any of the `Booking` values has too many
    ///   fractional digits;
    /// - `AGGREGATOR_COMMISSION_OUT_OF_RANGE` - the `Booking` aggregator
    ///   commission is out of `[0, 100]`.
    #[tracing::instrument(
        skip_all,
        fields(
            booking.id = %booking.id,
            gql.name = "payout",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn payout(
        booking: api::booking::Booking,
        ctx: &Context,
    ) -> Result<api::Payout, Error> {
        ctx.service()
            .execute(query::Payout {
                booking: booking.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Builds a financial report for an apartment owner out of the stored
    /// `Booking`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TOO_MANY_BOOKINGS` - too many `Booking`s are provided at once;
    /// - `NEGATIVE_AMOUNT` - any of the `Booking` amounts is negative;
    /// - `AMOUNT_TOO_LARGE` - any of the `Booking` amounts is too large;
    /// - `AMOUNT_TOO_PRECISE` - any of the `Booking` values has too many
    ///   fractional digits;
    /// - `AGGREGATOR_COMMISSION_OUT_OF_RANGE` - the `Booking` aggregator
    ///   commission is out of `[0, 100]`.
    #[tracing::instrument(
        skip_all,
        fields(
            bookings = bookings.len(),
            gql.name = "ownerReport",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn owner_report(
        bookings: Vec<api::booking::Booking>,
        ctx: &Context,
    ) -> Result<api::report::Owner, Error> {
        ctx.service()
            .execute(query::report::Owner {
                bookings: bookings.into_iter().map(Into::into).collect(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}
