//! Listener return value conversion.

use crate::error::BoxError;

/// Trait for converting a listener closure's return value into the outcome
/// the dispatcher understands.
///
/// # Default Implementations
///
/// - `()` → success
/// - `Result<(), E>` → success, or `E` boxed into a [`BoxError`]
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a listener outcome",
    label = "listeners must return `()` or `Result<(), E>`",
    note = "The error type of a `Result` must convert into `BoxError`."
)]
pub trait IntoOutcome {
    /// Convert the value into a dispatch outcome.
    fn into_outcome(self) -> Result<(), BoxError>;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoOutcome for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_outcome(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}
