use crate::traits::ProducerConfig;

/// A producer that emits every item of a vector, then completes.
///
/// Each call to `produce` replays the full vector, so the same producer can
/// serve several subscriptions.
#[derive(Debug, Clone)]
pub struct VecProducer<T> {
  /// The items to emit, in order.
  pub data: Vec<T>,
  /// Producer configuration.
  pub config: ProducerConfig,
}

impl<T: Clone + Send + 'static> VecProducer<T> {
  /// Creates a producer over `data`.
  pub fn new(data: Vec<T>) -> Self {
    Self {
      data,
      config: ProducerConfig::default(),
    }
  }

  /// Number of values one subscription will receive.
  pub fn len(&self) -> usize {
    self.data.len()
  }

  /// Returns `true` if subscriptions complete without any value.
  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }
}
