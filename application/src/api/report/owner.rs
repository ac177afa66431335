//! [`Owner`] report definition.

use std::sync::OnceLock;

use juniper::graphql_object;
use service::query;

use crate::{api, define_error, AsError, Context, Error};

/// Financial report for an apartment owner.
#[derive(Clone, Debug)]
pub struct Owner {
    /// Underlying [`query::report::owner::Output`].
    output: query::report::owner::Output,

    /// [`Row`]s of this report.
    rows: OnceLock<Vec<Row>>,
}

impl From<query::report::owner::Output> for Owner {
    fn from(output: query::report::owner::Output) -> Self {
        Self {
            output,
            rows: OnceLock::new(),
        }
    }
}

/// Financial report for an apartment owner.
#[graphql_object(name = "OwnerReport", context = Context)]
impl Owner {
    /// `OwnerReportRow`s of this report, one per `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OwnerReport.rows",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        self.rows
            .get_or_init(|| {
                self.output.rows.iter().cloned().map(Row::from).collect()
            })
            .as_slice()
    }

    /// Sum of all the `rows` settlements.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OwnerReport.total",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn total(&self) -> api::Settlement {
        self.output.total.into()
    }
}

/// Row of an [`Owner`] report.
#[derive(Clone, Debug)]
pub struct Row(query::report::owner::Row);

impl From<query::report::owner::Row> for Row {
    fn from(row: query::report::owner::Row) -> Self {
        Self(row)
    }
}

/// Row of an `OwnerReport`.
#[graphql_object(name = "OwnerReportRow", context = Context)]
impl Row {
    /// ID of the `Booking` this `Row` is about.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "OwnerReportRow.bookingId",
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
            gql.name = "OwnerReportRow.settlement",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn settlement(&self) -> api::Settlement {
        self.0.settlement.into()
    }
}

impl AsError for query::report::owner::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::TooManyBookings { .. } => Some(
                Error::from(ReportError::TooManyBookings).with_message(self),
            ),
            Self::Invalid { error, .. } => {
                Some(error.try_as_error()?.with_message(self))
            }
        }
    }
}

define_error! {
    enum ReportError {
        #[code = "TOO_MANY_BOOKINGS"]
        #[status = BAD_REQUEST]
        #[message = "Too many `Booking`s requested for a single report"]
        TooManyBookings,
    }
}
