//! # Error Handling System
//!
//! Error types shared by the signal protocol, the subscriber machinery and the
//! content-negotiation layer.
//!
//! ## Overview
//!
//! - **SignalError**: a caller asked a signal for a payload it does not carry, or
//!   a sequence received a signal after it had already terminated
//! - **StreamError**: the failure cause carried by `Signal::Error`, with component
//!   information and a timestamp
//! - **ErrorAction / ErrorStrategy**: how a subscriber reacts when handling a value fails
//! - **SubscribeError**: why driving a signal stream into a subscriber stopped early
//! - **NegotiationError**: malformed media types or resolver input
//!
//! ## Example
//!
//! ```rust
//! use fluxweave::error::{ComponentInfo, ErrorStrategy, StreamError};
//!
//! let strategy = ErrorStrategy::Retry(3);
//!
//! let error = StreamError::new(
//!     std::io::Error::from(std::io::ErrorKind::NotFound),
//!     ComponentInfo::new("reader".to_string(), "FileProducer".to_string()),
//! );
//! assert_eq!(error.retries, 0);
//! # let _ = strategy;
//! ```
//!
//! ## Error Strategies
//!
//! - **Stop**: abort the subscription (default)
//! - **Skip**: drop the value that failed and keep consuming
//! - **Retry(n)**: hand the same value to the subscriber up to n more times
//! - **Custom**: user-defined handler function

use crate::sequence::SequenceState;
use crate::signal::SignalKind;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// A signal was used in a way its variant does not allow.
///
/// Both variants indicate a bug in the calling code. They are reported
/// immediately and must never be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
  /// A payload accessor was called on a signal of the wrong variant.
  #[error("illegal signal state: expected {expected}, found {actual}")]
  IllegalState {
    /// The variant the accessor requires.
    expected: SignalKind,
    /// The variant the signal actually is.
    actual: SignalKind,
  },
  /// A signal arrived after the sequence had delivered its terminal signal.
  #[error("received {received} after the sequence was {state}")]
  AfterTerminal {
    /// The terminal state the sequence was already in.
    state: SequenceState,
    /// The kind of the offending signal.
    received: SignalKind,
  },
}

/// Action to take when a subscriber fails to handle a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
  /// Stop consuming and report the failure to the caller.
  Stop,
  /// Drop the value and continue with the next signal.
  Skip,
  /// Hand the same value to the subscriber again.
  Retry,
}

// Type alias for the custom error handler function
type CustomErrorHandler = Arc<dyn Fn(&StreamError) -> ErrorAction + Send + Sync>;

/// Strategy for handling failed values in a subscriber.
///
/// # Example
///
/// ```rust
/// use fluxweave::error::{ErrorAction, ErrorStrategy};
///
/// // Retry twice, then give up
/// let strategy = ErrorStrategy::new_custom(|error| {
///     if error.retries < 2 {
///         ErrorAction::Retry
///     } else {
///         ErrorAction::Stop
///     }
/// });
/// # let _ = strategy;
/// ```
#[derive(Default)]
pub enum ErrorStrategy {
  /// Stop on the first failure.
  #[default]
  Stop,
  /// Skip values whose handling fails.
  Skip,
  /// Retry a failed value up to the given number of times, then stop.
  Retry(usize),
  /// Decide per failure.
  Custom(CustomErrorHandler),
}

impl Clone for ErrorStrategy {
  fn clone(&self) -> Self {
    match self {
      ErrorStrategy::Stop => ErrorStrategy::Stop,
      ErrorStrategy::Skip => ErrorStrategy::Skip,
      ErrorStrategy::Retry(n) => ErrorStrategy::Retry(*n),
      ErrorStrategy::Custom(handler) => ErrorStrategy::Custom(handler.clone()),
    }
  }
}

impl fmt::Debug for ErrorStrategy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ErrorStrategy::Stop => write!(f, "ErrorStrategy::Stop"),
      ErrorStrategy::Skip => write!(f, "ErrorStrategy::Skip"),
      ErrorStrategy::Retry(n) => write!(f, "ErrorStrategy::Retry({})", n),
      ErrorStrategy::Custom(_) => write!(f, "ErrorStrategy::Custom"),
    }
  }
}

impl PartialEq for ErrorStrategy {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (ErrorStrategy::Stop, ErrorStrategy::Stop) => true,
      (ErrorStrategy::Skip, ErrorStrategy::Skip) => true,
      (ErrorStrategy::Retry(n1), ErrorStrategy::Retry(n2)) => n1 == n2,
      (ErrorStrategy::Custom(_), ErrorStrategy::Custom(_)) => true,
      _ => false,
    }
  }
}

impl ErrorStrategy {
  /// Creates a custom error handling strategy from a handler function.
  ///
  /// # Arguments
  ///
  /// * `f` - A function that takes a `StreamError` and returns an `ErrorAction`.
  pub fn new_custom<F>(f: F) -> Self
  where
    F: Fn(&StreamError) -> ErrorAction + Send + Sync + 'static,
  {
    Self::Custom(Arc::new(f))
  }

  /// Resolves the action for a failure under this strategy.
  ///
  /// `Retry(n)` yields `Retry` while `error.retries < n` and `Stop` afterwards.
  pub fn action_for(&self, error: &StreamError) -> ErrorAction {
    match self {
      ErrorStrategy::Stop => ErrorAction::Stop,
      ErrorStrategy::Skip => ErrorAction::Skip,
      ErrorStrategy::Retry(n) if error.retries < *n => ErrorAction::Retry,
      ErrorStrategy::Custom(handler) => handler(error),
      _ => ErrorAction::Stop,
    }
  }
}

/// Failure cause carried by an error signal.
///
/// The source error is shared behind an `Arc`, so a `StreamError` can be cloned
/// and handed to several consumers without losing the original error value.
#[derive(Debug, Clone)]
pub struct StreamError {
  /// The original error that occurred.
  pub source: Arc<dyn Error + Send + Sync>,
  /// Information about the component that raised the error.
  pub component: ComponentInfo,
  /// When the error was raised.
  pub timestamp: chrono::DateTime<chrono::Utc>,
  /// Number of times the failed operation has been retried.
  pub retries: usize,
}

impl StreamError {
  /// Creates a new `StreamError` from a source error and component information.
  ///
  /// # Arguments
  ///
  /// * `source` - The original error that occurred.
  /// * `component` - Information about the component that encountered the error.
  ///
  /// # Returns
  ///
  /// A new `StreamError` with `retries` set to 0.
  pub fn new<E>(source: E, component: ComponentInfo) -> Self
  where
    E: Error + Send + Sync + 'static,
  {
    Self::from_boxed(Box::new(source), component)
  }

  /// Creates a new `StreamError` from an already boxed source error.
  pub fn from_boxed(source: Box<dyn Error + Send + Sync>, component: ComponentInfo) -> Self {
    Self {
      source: Arc::from(source),
      component,
      timestamp: chrono::Utc::now(),
      retries: 0,
    }
  }

  /// Creates a `StreamError` from a plain message, attributed to the default component.
  pub fn msg(message: impl Into<String>) -> Self {
    Self::new(StringError(message.into()), ComponentInfo::default())
  }

  /// Replaces the component information.
  #[must_use]
  pub fn with_component(mut self, component: ComponentInfo) -> Self {
    self.component = component;
    self
  }
}

impl fmt::Display for StreamError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Error in {} ({}): {}",
      self.component.name, self.component.type_name, self.source
    )
  }
}

impl Error for StreamError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(&*self.source)
  }
}

// Two causes are equal when they render the same message for the same component.
impl PartialEq for StreamError {
  fn eq(&self, other: &Self) -> bool {
    self.component == other.component && self.source.to_string() == other.source.to_string()
  }
}

/// A simple error type that wraps a string message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringError(pub String);

impl fmt::Display for StringError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Error for StringError {}

/// Information about a pipeline component.
///
/// Used in logs and error reports to identify the producer or subscriber
/// involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
  /// The name of the component.
  pub name: String,
  /// The type name of the component.
  pub type_name: String,
}

impl Default for ComponentInfo {
  fn default() -> Self {
    Self {
      name: "default".to_string(),
      type_name: "default".to_string(),
    }
  }
}

impl ComponentInfo {
  /// Creates a new `ComponentInfo` with the given name and type name.
  pub fn new(name: String, type_name: String) -> Self {
    Self { name, type_name }
  }
}

/// Why driving a signal stream into a subscriber stopped before a terminal signal.
#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
  /// Handling a value failed and the error strategy chose to stop.
  #[error("subscription aborted after {delivered} values: {source}")]
  Aborted {
    /// Values delivered before the failing one.
    delivered: usize,
    /// The failure reported by the subscriber.
    source: StreamError,
  },
  /// The source stream ended without a completion or error signal.
  #[error("source ended after {delivered} values without a terminal signal")]
  Unterminated {
    /// Values delivered before the source ended.
    delivered: usize,
  },
}

/// Errors raised while parsing media types or resolving requested content types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NegotiationError {
  /// A media type string could not be parsed.
  #[error("invalid media type {value:?}: {reason}")]
  InvalidMediaType {
    /// The offending input.
    value: String,
    /// What was wrong with it.
    reason: String,
  },
  /// A `q` parameter was not a number between 0 and 1.
  #[error("invalid quality value {value:?} in {media_type:?}")]
  InvalidQuality {
    /// The media type the parameter belongs to.
    media_type: String,
    /// The offending `q` value.
    value: String,
  },
  /// A format parameter named a key with no registered media type.
  #[error("no media type registered for format key {key:?}")]
  UnknownFormatKey {
    /// The unrecognised key.
    key: String,
  },
  /// A request header was not valid visible ASCII.
  #[error("header {name} is not valid visible ASCII")]
  InvalidHeader {
    /// The header name.
    name: String,
  },
}
