//! [`Owner`] report definition.

use derive_more::{Display, Error};
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{booking, settlement, Booking, Settlement},
    Query, Service,
};

/// Configuration of the [`Owner`] report.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Maximum number of [`Booking`]s a single report may cover.
    #[default(1000)]
    pub max_bookings: usize,
}

/// [`Query`] to build a financial report for an apartment owner out of the
/// previously stored [`Booking`]s.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Owner {
    /// [`Booking`]s to include into the report.
    pub bookings: Vec<Booking>,
}

/// Output of the [`Owner`] [`Query`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Output {
    /// Rows of the report, in the order of the provided [`Booking`]s.
    pub rows: Vec<Row>,

    /// Field-wise sum of all the [`Row`]s' [`Settlement`]s.
    pub total: Settlement,
}

/// Row in the [`Output`] of the [`Owner`] [`Query`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Row {
    /// ID of the [`Booking`] this [`Row`] is about.
    pub booking_id: booking::Id,

    /// [`Settlement`] of the [`Booking`].
    pub settlement: Settlement,
}

impl Query<Owner> for Service {
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Owner { bookings }: Owner,
    ) -> Result<Self::Ok, Self::Err> {
        let max = self.config().report.max_bookings;
        if bookings.len() > max {
            return Err(tracerr::new!(ExecutionError::TooManyBookings {
                count: bookings.len(),
                max,
            }));
        }

        let rows = bookings
            .into_iter()
            .map(|Booking { id, charges, expenses }| {
                settlement::calculate(&charges, &expenses)
                    .map(|settlement| Row {
                        booking_id: id.clone(),
                        settlement,
                    })
                    .map_err(|error| ExecutionError::Invalid {
                        booking_id: id,
                        error,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(tracerr::wrap!())?;
        let total = rows.iter().map(|r| r.settlement).sum::<Settlement>();

        log::debug!(
            rows = rows.len(),
            owner_funds = %total.owner_funds,
            "owner report built",
        );

        Ok(Output { rows, total })
    }
}

/// Error of [`Owner`] [`Query`] execution.
#[derive(Clone, Debug, Display, Error)]
pub enum ExecutionError {
    /// Too many [`Booking`]s are requested to be reported at once.
    #[display("{count} `Booking`s requested, but at most {max} allowed")]
    TooManyBookings {
        /// Number of the requested [`Booking`]s.
        count: usize,

        /// Maximum allowed number of [`Booking`]s.
        max: usize,
    },

    /// Stored [`Booking`] has invalid amounts.
    #[display("`Booking(id: {booking_id})` is invalid: {error}")]
    Invalid {
        /// ID of the invalid [`Booking`].
        booking_id: booking::Id,

        /// Reason of the [`Booking`] being invalid.
        #[error(source)]
        error: settlement::ValidationError,
    },
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Money;
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            booking::{self, Booking, Charges, Expenses, Field},
            Settlement,
        },
        query::report::owner,
        Config, Query as _, Service,
    };

    use super::{ExecutionError, Owner};

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn booking(
        id: &str,
        accommodation: &str,
        percent: i64,
        maid: &str,
    ) -> Booking {
        Booking {
            id: booking::Id::new(id).unwrap(),
            charges: Charges {
                accommodation: Some(money(accommodation)),
                aggregator_commission: Some(Decimal::new(percent, 0)),
                ..Charges::default()
            },
            expenses: Expenses {
                maid: Some(money(maid)),
                ..Expenses::default()
            },
        }
    }

    #[tokio::test]
    async fn sums_rows() {
        let service = Service::new(Config::default());

        let output = service
            .execute(Owner {
                bookings: vec![
                    booking("a", "10000", 15, "3000"),
                    booking("b", "1000", 25, "2000"),
                    booking("c", "5000", 0, "0"),
                ],
            })
            .await
            .unwrap();

        let ids = output
            .rows
            .iter()
            .map(|r| r.booking_id.to_string())
            .collect::<Vec<_>>();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(output.rows[0].settlement.owner_funds, money("3800"));
        assert_eq!(output.rows[1].settlement.owner_funds, money("-1400"));
        assert_eq!(output.rows[2].settlement.owner_funds, money("4000"));

        assert_eq!(output.total.total_amount, money("16000"));
        assert_eq!(output.total.aggregator_commission_amount, money("1750"));
        assert_eq!(output.total.tax_and_bank_commission, money("1120"));
        assert_eq!(output.total.operating_expenses_total, money("5000"));
        assert_eq!(output.total.owner_funds, money("6400"));
    }

    #[tokio::test]
    async fn empty_report_is_zero() {
        let service = Service::new(Config::default());

        let output = service.execute(Owner::default()).await.unwrap();

        assert!(output.rows.is_empty());
        assert_eq!(output.total, Settlement::default());
    }

    #[tokio::test]
    async fn limits_bookings() {
        let service = Service::new(Config {
            report: owner::Config { max_bookings: 2 },
        });

        let err = service
            .execute(Owner {
                bookings: vec![
                    booking("a", "1", 0, "0"),
                    booking("b", "1", 0, "0"),
                    booking("c", "1", 0, "0"),
                ],
            })
            .await
            .unwrap_err();

        let err: &ExecutionError = err.as_ref();
        assert!(
            matches!(err, ExecutionError::TooManyBookings { count: 3, max: 2 }),
            "unexpected error: {err}",
        );
    }

    #[tokio::test]
    async fn fails_on_first_invalid_booking() {
        let service = Service::new(Config::default());

        let err = service
            .execute(Owner {
                bookings: vec![
                    booking("a", "1000", 15, "0"),
                    booking("b", "1000", 150, "0"),
                    booking("c", "-1", 0, "0"),
                ],
            })
            .await
            .unwrap_err();

        let err: &ExecutionError = err.as_ref();
        let ExecutionError::Invalid { booking_id, error } = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(booking_id.to_string(), "b");
        assert_eq!(error.field(), Field::AggregatorCommission);
    }
}
