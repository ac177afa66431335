//! Helpers for defining custom GraphQL scalars.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Strategy for `#[graphql(with = ..)]` attribute representing a wrapper type
/// as a GraphQL string through the [`FromStr`] and [`Display`] impls of the
/// wrapped `Inner` type.
///
/// The wrapper type must implement [`AsRef`] and [`TryFrom`] for `Inner`.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<Inner>(PhantomData<Inner>);

impl<Inner> Via<Inner> {
    /// Resolves the provided wrapper as a GraphQL string.
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        Inner: fmt::Display,
        T: AsRef<Inner>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the wrapper from a GraphQL string [`InputValue`].
    ///
    /// # Errors
    ///
    /// If the [`InputValue`] is not a string, or it cannot be parsed into the
    /// `Inner` type, or the parsed `Inner` value is rejected by the wrapper.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        Inner: FromStr,
        Inner::Err: fmt::Display,
        T: TryFrom<Inner> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or("<unnamed>");

        let Some(s) = input.as_string_value() else {
            return Err(format!(
                "Expected string for `{name}` scalar, found: {input}",
            ));
        };
        let inner = s.parse::<Inner>().map_err(|e| {
            format!("Invalid `{name}` scalar \"{s}\": {e}")
        })?;
        T::try_from(inner)
            .map_err(|e| format!("Invalid `{name}` scalar \"{s}\": {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a string.
    ///
    /// # Errors
    ///
    /// If the [`ScalarToken`] is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}
