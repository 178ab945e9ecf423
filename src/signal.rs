//! # Signals
//!
//! A [`Signal`] is one event emitted by an asynchronous, value-producing stream:
//! a next value, a failure, or completion of the sequence.
//!
//! Signals are immutable values. A producer creates one at the moment an event
//! occurs and hands it straight to a subscriber; nothing mutates it afterwards.
//!
//! ## Sequencing
//!
//! A well-formed sequence is any number of `Next` signals followed by at most one
//! terminal signal, either `Complete` or `Error`, and nothing after it. `Signal`
//! itself does not enforce that ordering; [`SignalSequence`](crate::sequence::SignalSequence)
//! and the adapters in [`stream`](crate::stream) do.
//!
//! ## Example
//!
//! ```rust
//! use fluxweave::signal::Signal;
//!
//! let signals: Vec<Signal<i32>> = vec![Signal::on_next(1), Signal::on_next(2), Signal::COMPLETE];
//!
//! let sum: i32 = signals.iter().filter_map(Signal::as_next).sum();
//! assert_eq!(sum, 3);
//! assert!(signals[2].is_complete());
//! assert!(signals[2].next().is_err());
//! ```

use crate::error::{SignalError, StreamError};
use std::fmt;

/// The variant of a [`Signal`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
  /// A value was produced.
  Next,
  /// The sequence failed.
  Error,
  /// The sequence finished normally.
  Complete,
}

impl SignalKind {
  /// Returns `true` for the kinds that end a sequence.
  pub fn is_terminal(self) -> bool {
    !matches!(self, SignalKind::Next)
  }
}

impl fmt::Display for SignalKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SignalKind::Next => write!(f, "onNext"),
      SignalKind::Error => write!(f, "onError"),
      SignalKind::Complete => write!(f, "onComplete"),
    }
  }
}

/// One event of an asynchronous sequence.
///
/// The failure type defaults to [`StreamError`].
///
/// | Variant | `is_complete` | `is_on_next` | `is_on_error` |
/// |---|---|---|---|
/// | `Next(value)` | false | true | false |
/// | `Error(cause)` | false | false | true |
/// | `Complete` | true | false | false |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal<T, E = StreamError> {
  /// A value produced by the stream.
  Next(T),
  /// The stream failed. Terminal.
  Error(E),
  /// The stream is exhausted. Terminal.
  Complete,
}

impl<T, E> Signal<T, E> {
  /// The completion signal.
  ///
  /// Completion carries no state, so this one constant stands for every
  /// completion of every sequence and is freely shared across threads.
  pub const COMPLETE: Self = Signal::Complete;

  /// Returns the completion signal.
  pub const fn complete() -> Self {
    Self::COMPLETE
  }

  /// Creates a value signal.
  pub fn on_next(value: T) -> Self {
    Signal::Next(value)
  }

  /// Creates a failure signal.
  pub fn on_error(cause: E) -> Self {
    Signal::Error(cause)
  }

  /// Returns the variant of this signal.
  pub fn kind(&self) -> SignalKind {
    match self {
      Signal::Next(_) => SignalKind::Next,
      Signal::Error(_) => SignalKind::Error,
      Signal::Complete => SignalKind::Complete,
    }
  }

  /// Returns `true` only for the completion signal.
  pub fn is_complete(&self) -> bool {
    matches!(self, Signal::Complete)
  }

  /// Returns `true` only for a value signal.
  pub fn is_on_next(&self) -> bool {
    matches!(self, Signal::Next(_))
  }

  /// Returns `true` only for a failure signal.
  pub fn is_on_error(&self) -> bool {
    matches!(self, Signal::Error(_))
  }

  /// Returns `true` if this signal ends its sequence.
  pub fn is_terminal(&self) -> bool {
    self.kind().is_terminal()
  }

  /// Returns the carried value.
  ///
  /// # Errors
  ///
  /// Returns [`SignalError::IllegalState`] if this is not a `Next` signal.
  pub fn next(&self) -> Result<&T, SignalError> {
    match self {
      Signal::Next(value) => Ok(value),
      other => Err(other.illegal_state(SignalKind::Next)),
    }
  }

  /// Returns the carried failure cause.
  ///
  /// # Errors
  ///
  /// Returns [`SignalError::IllegalState`] if this is not an `Error` signal.
  pub fn error(&self) -> Result<&E, SignalError> {
    match self {
      Signal::Error(cause) => Ok(cause),
      other => Err(other.illegal_state(SignalKind::Error)),
    }
  }

  /// Consumes the signal and returns the carried value.
  ///
  /// # Errors
  ///
  /// Returns [`SignalError::IllegalState`] if this is not a `Next` signal.
  pub fn into_next(self) -> Result<T, SignalError> {
    match self {
      Signal::Next(value) => Ok(value),
      other => Err(other.illegal_state(SignalKind::Next)),
    }
  }

  /// Consumes the signal and returns the carried failure cause.
  ///
  /// # Errors
  ///
  /// Returns [`SignalError::IllegalState`] if this is not an `Error` signal.
  pub fn into_error(self) -> Result<E, SignalError> {
    match self {
      Signal::Error(cause) => Ok(cause),
      other => Err(other.illegal_state(SignalKind::Error)),
    }
  }

  /// Returns the value if this is a `Next` signal.
  pub fn as_next(&self) -> Option<&T> {
    match self {
      Signal::Next(value) => Some(value),
      _ => None,
    }
  }

  /// Returns the cause if this is an `Error` signal.
  pub fn as_error(&self) -> Option<&E> {
    match self {
      Signal::Error(cause) => Some(cause),
      _ => None,
    }
  }

  /// Borrows the payload of this signal.
  pub fn as_ref(&self) -> Signal<&T, &E> {
    match self {
      Signal::Next(value) => Signal::Next(value),
      Signal::Error(cause) => Signal::Error(cause),
      Signal::Complete => Signal::Complete,
    }
  }

  /// Maps the value of a `Next` signal, leaving terminal signals untouched.
  pub fn map<U, F>(self, f: F) -> Signal<U, E>
  where
    F: FnOnce(T) -> U,
  {
    match self {
      Signal::Next(value) => Signal::Next(f(value)),
      Signal::Error(cause) => Signal::Error(cause),
      Signal::Complete => Signal::Complete,
    }
  }

  /// Maps the cause of an `Error` signal, leaving the other variants untouched.
  pub fn map_err<E2, F>(self, f: F) -> Signal<T, E2>
  where
    F: FnOnce(E) -> E2,
  {
    match self {
      Signal::Next(value) => Signal::Next(value),
      Signal::Error(cause) => Signal::Error(f(cause)),
      Signal::Complete => Signal::Complete,
    }
  }

  /// Converts the signal into a `Result`, or `None` for completion.
  pub fn into_result(self) -> Option<Result<T, E>> {
    match self {
      Signal::Next(value) => Some(Ok(value)),
      Signal::Error(cause) => Some(Err(cause)),
      Signal::Complete => None,
    }
  }

  fn illegal_state(&self, expected: SignalKind) -> SignalError {
    SignalError::IllegalState {
      expected,
      actual: self.kind(),
    }
  }
}

impl<T, E> From<Result<T, E>> for Signal<T, E> {
  fn from(result: Result<T, E>) -> Self {
    match result {
      Ok(value) => Signal::Next(value),
      Err(cause) => Signal::Error(cause),
    }
  }
}

impl<T: fmt::Display, E: fmt::Display> fmt::Display for Signal<T, E> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Signal::Next(value) => write!(f, "onNext({})", value),
      Signal::Error(cause) => write!(f, "onError({})", cause),
      Signal::Complete => write!(f, "onComplete"),
    }
  }
}
