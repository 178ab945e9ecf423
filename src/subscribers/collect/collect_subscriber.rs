use super::outcome::Outcome;
use crate::error::StreamError;
use crate::traits::SubscriberConfig;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A subscriber that records every signal it receives.
///
/// The recorded [`Outcome`] lives behind a shared handle, so a clone of the
/// subscriber, or a handle taken with [`CollectSubscriber::handle`], can inspect
/// it while another task drives the subscription.
#[derive(Debug, Clone)]
pub struct CollectSubscriber<T, E = StreamError> {
  /// Shared record of received signals.
  pub outcome: Arc<Mutex<Outcome<T, E>>>,
  /// Subscriber configuration.
  pub config: SubscriberConfig,
}

impl<T, E> Default for CollectSubscriber<T, E> {
  fn default() -> Self {
    Self {
      outcome: Arc::new(Mutex::new(Outcome::default())),
      config: SubscriberConfig::default(),
    }
  }
}

impl<T, E> CollectSubscriber<T, E> {
  /// Creates an empty collector.
  pub fn new() -> Self {
    Self::default()
  }

  /// Replaces the configuration.
  #[must_use]
  pub fn with_config(mut self, config: SubscriberConfig) -> Self {
    self.config = config;
    self
  }

  /// Returns the shared outcome handle.
  pub fn handle(&self) -> Arc<Mutex<Outcome<T, E>>> {
    Arc::clone(&self.outcome)
  }

  /// Returns a snapshot of what has been received so far.
  pub async fn outcome(&self) -> Outcome<T, E>
  where
    T: Clone,
    E: Clone,
  {
    self.outcome.lock().await.clone()
  }
}
