//! Subscriber trait for components that receive signal streams.
//!
//! A subscriber reacts to the three signal kinds through [`Subscriber::on_next`],
//! [`Subscriber::on_error`] and [`Subscriber::on_complete`]. The provided
//! [`Subscriber::consume`] drives a whole stream into it on the subscriber's
//! behalf. `consume` returns as soon as it has delivered `on_error` or
//! `on_complete`, so the stream is never polled again and nothing reaches the
//! subscriber after its terminal callback.

use crate::error::{ComponentInfo, ErrorAction, ErrorStrategy, StreamError, SubscribeError};
use crate::sequence::SequenceState;
use crate::signal::Signal;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use tracing::{debug, trace, warn};

/// Configuration for a subscriber component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriberConfig {
  /// What to do when `on_next` fails.
  pub error_strategy: ErrorStrategy,
  /// Optional name for identifying this subscriber in logs and errors.
  pub name: Option<String>,
}

impl SubscriberConfig {
  /// Sets the error handling strategy.
  #[must_use]
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy) -> Self {
    self.error_strategy = strategy;
    self
  }

  /// Sets the name.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Returns the current error handling strategy.
  pub fn error_strategy(&self) -> ErrorStrategy {
    self.error_strategy.clone()
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }
}

/// Trait for components that receive signals.
#[async_trait]
pub trait Subscriber: Send {
  /// The value type of `Next` signals.
  type Input: Send;
  /// The cause type of `Error` signals.
  type Failure: Send;

  /// Handles one value.
  ///
  /// A returned error is resolved through the configured [`ErrorStrategy`].
  async fn on_next(&mut self, value: Self::Input) -> Result<(), StreamError>;

  /// Handles the failure that ended the sequence.
  async fn on_error(&mut self, cause: Self::Failure);

  /// Handles normal completion of the sequence.
  async fn on_complete(&mut self);

  /// Returns the subscriber's configuration.
  fn config(&self) -> &SubscriberConfig;

  /// Decides how to react to a failed `on_next`.
  fn handle_error(&self, error: &StreamError) -> ErrorAction {
    self.config().error_strategy.action_for(error)
  }

  /// Returns information about the component for logging and error reporting.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config()
        .name()
        .unwrap_or_else(|| "subscriber".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Drives `stream` into this subscriber until its terminal signal.
  ///
  /// The stream is not polled again once a terminal signal has been delivered.
  ///
  /// # Returns
  ///
  /// The terminal state reached: `Completed` or `Failed`.
  ///
  /// # Errors
  ///
  /// * [`SubscribeError::Aborted`] if `on_next` failed and the strategy chose `Stop`.
  /// * [`SubscribeError::Unterminated`] if the stream ended without a terminal signal.
  ///   `on_complete` is not called in that case.
  async fn consume<S>(&mut self, stream: S) -> Result<SequenceState, SubscribeError>
  where
    S: Stream<Item = Signal<Self::Input, Self::Failure>> + Send,
    Self::Input: Clone,
  {
    let component = self.component_info();
    let mut delivered = 0;
    let mut stream = std::pin::pin!(stream);

    // Terminal arms return, so nothing after a terminal signal is polled.
    while let Some(signal) = stream.next().await {
      match signal {
        Signal::Next(value) => {
          trace!(component = %component.name, index = delivered, "onNext");
          let mut retries = 0;
          loop {
            match self.on_next(value.clone()).await {
              Ok(()) => break,
              Err(mut error) => {
                error.retries = retries;
                match self.handle_error(&error) {
                  ErrorAction::Stop => {
                    warn!(component = %component.name, error = %error, "stopping subscription");
                    return Err(SubscribeError::Aborted {
                      delivered,
                      source: error,
                    });
                  }
                  ErrorAction::Skip => {
                    warn!(component = %component.name, error = %error, "skipping value");
                    break;
                  }
                  ErrorAction::Retry => {
                    retries += 1;
                    debug!(component = %component.name, retries, "retrying value");
                  }
                }
              }
            }
          }
          delivered += 1;
        }
        Signal::Error(cause) => {
          debug!(component = %component.name, delivered, "onError");
          self.on_error(cause).await;
          return Ok(SequenceState::Failed);
        }
        Signal::Complete => {
          debug!(component = %component.name, delivered, "onComplete");
          self.on_complete().await;
          return Ok(SequenceState::Completed);
        }
      }
    }

    warn!(component = %component.name, "source ended without a terminal signal");
    Err(SubscribeError::Unterminated { delivered })
  }
}
