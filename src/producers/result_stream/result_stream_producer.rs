use crate::traits::ProducerConfig;

/// A producer that adapts an existing `Result` stream into signals.
///
/// Every `Ok` item becomes a `Next` signal. The first `Err` becomes the terminal
/// `Error` signal, and the source is not polled past it. If the source runs dry
/// first, the sequence ends with `Complete`.
///
/// The source can only be subscribed once. A second call to `produce` returns
/// an empty sequence that completes immediately.
#[derive(Debug)]
pub struct ResultStreamProducer<S> {
  /// The wrapped stream, taken by the first subscription.
  pub source: Option<S>,
  /// Producer configuration.
  pub config: ProducerConfig,
}

impl<S> ResultStreamProducer<S> {
  /// Wraps `source`.
  pub fn new(source: S) -> Self {
    Self {
      source: Some(source),
      config: ProducerConfig::default(),
    }
  }

  /// Returns `true` once the source has been handed to a subscription.
  pub fn is_consumed(&self) -> bool {
    self.source.is_none()
  }
}
