//! Output trait for components that emit signal streams.

use crate::signal::Signal;
use futures::Stream;

/// A component that emits a stream of [`Signal`]s.
///
/// `Output` is the value type carried by `Next` signals and `Failure` the cause
/// carried by `Error` signals. The stream must be `Send` so it can be driven
/// from any executor thread.
pub trait Output {
  /// The value type of `Next` signals.
  type Output;
  /// The cause type of `Error` signals.
  type Failure;
  /// The stream of signals this component emits.
  type OutputStream: Stream<Item = Signal<Self::Output, Self::Failure>> + Send;
}
