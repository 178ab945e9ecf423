//! # Signal Sequences
//!
//! Tracks a single sequence's progress through the signal protocol:
//! `onNext*` followed by at most one terminal signal.
//!
//! ```rust
//! use fluxweave::sequence::{SequenceState, SignalSequence};
//! use fluxweave::signal::Signal;
//!
//! let mut sequence = SignalSequence::new();
//! sequence.observe(&Signal::<_>::on_next(1)).unwrap();
//! sequence.observe(&Signal::<i32>::COMPLETE).unwrap();
//! assert_eq!(sequence.state(), SequenceState::Completed);
//!
//! // Nothing may follow a terminal signal.
//! assert!(sequence.observe(&Signal::<_>::on_next(2)).is_err());
//! ```

use crate::error::SignalError;
use crate::signal::{Signal, SignalKind};
use std::fmt;

/// Where a sequence is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SequenceState {
  /// No terminal signal has been seen yet.
  #[default]
  Active,
  /// The sequence ended with `Complete`.
  Completed,
  /// The sequence ended with `Error`.
  Failed,
}

impl SequenceState {
  /// Returns `true` once a terminal signal has been observed.
  pub fn is_terminated(self) -> bool {
    !matches!(self, SequenceState::Active)
  }
}

impl fmt::Display for SequenceState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SequenceState::Active => write!(f, "active"),
      SequenceState::Completed => write!(f, "completed"),
      SequenceState::Failed => write!(f, "failed"),
    }
  }
}

/// Validates that signals arrive in protocol order.
#[derive(Debug, Clone, Default)]
pub struct SignalSequence {
  state: SequenceState,
  delivered: usize,
}

impl SignalSequence {
  /// Creates a sequence in the `Active` state.
  pub fn new() -> Self {
    Self::default()
  }

  /// Records a signal.
  ///
  /// # Errors
  ///
  /// Returns [`SignalError::AfterTerminal`] if the sequence already terminated.
  /// The state is left unchanged in that case.
  pub fn observe<T, E>(&mut self, signal: &Signal<T, E>) -> Result<(), SignalError> {
    self.observe_kind(signal.kind())
  }

  /// Records a signal by kind alone.
  pub fn observe_kind(&mut self, kind: SignalKind) -> Result<(), SignalError> {
    if self.state.is_terminated() {
      return Err(SignalError::AfterTerminal {
        state: self.state,
        received: kind,
      });
    }

    match kind {
      SignalKind::Next => self.delivered += 1,
      SignalKind::Error => self.state = SequenceState::Failed,
      SignalKind::Complete => self.state = SequenceState::Completed,
    }
    Ok(())
  }

  /// The current state.
  pub fn state(&self) -> SequenceState {
    self.state
  }

  /// Returns `true` once a terminal signal has been observed.
  pub fn is_terminated(&self) -> bool {
    self.state.is_terminated()
  }

  /// Number of `Next` signals observed.
  pub fn delivered(&self) -> usize {
    self.delivered
  }
}
