//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of a command or query.
///
/// The `Args` type parameter describes the operation being executed, so a
/// single type may handle many different operations.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
