//! The driver error type.

/// Errors that driver operations can raise.
///
/// `CommE` is the error type of the underlying bus interface. Transport failures
/// propagate through unchanged; the driver applies no retry policy of its own, as
/// that belongs to the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<CommE> {
    /// The bus transport reported a failure (NACK, device absent, ...).
    Comm(CommE),
    /// A command argument was outside the range the controller accepts.
    OutOfRange,
    /// The controller never reported ready within the polling budget.
    ReadyTimeout,
}
