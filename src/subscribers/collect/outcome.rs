/// How a collected sequence ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terminal<E> {
  /// The sequence completed normally.
  Completed,
  /// The sequence failed with the given cause.
  Failed(E),
}

/// Everything a [`CollectSubscriber`](super::CollectSubscriber) has received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T, E> {
  /// Values in delivery order.
  pub values: Vec<T>,
  /// The terminal signal, once it has arrived.
  pub terminal: Option<Terminal<E>>,
}

impl<T, E> Default for Outcome<T, E> {
  fn default() -> Self {
    Self {
      values: Vec::new(),
      terminal: None,
    }
  }
}

impl<T, E> Outcome<T, E> {
  /// Returns `true` if the sequence ended with `Complete`.
  pub fn is_completed(&self) -> bool {
    matches!(self.terminal, Some(Terminal::Completed))
  }

  /// Returns the failure cause if the sequence ended with `Error`.
  pub fn failure(&self) -> Option<&E> {
    match &self.terminal {
      Some(Terminal::Failed(cause)) => Some(cause),
      _ => None,
    }
  }

  /// Converts the outcome into the collected values, or the failure cause.
  ///
  /// A sequence that has not terminated yet yields the values received so far.
  pub fn into_result(self) -> Result<Vec<T>, E> {
    match self.terminal {
      Some(Terminal::Failed(cause)) => Err(cause),
      _ => Ok(self.values),
    }
  }
}
