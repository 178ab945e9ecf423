//! # Subscriber Test Suite
//!
//! Covers `Subscriber::consume`: terminal delivery, the error strategies applied
//! to failing `on_next` calls, and sources that break the signal protocol.

use crate::error::{ErrorStrategy, StreamError, SubscribeError};
use crate::producers::VecProducer;
use crate::sequence::SequenceState;
use crate::signal::Signal;
use crate::subscribers::{CollectSubscriber, Terminal};
use crate::traits::{Producer, Subscriber, SubscriberConfig};
use async_trait::async_trait;
use futures::{StreamExt, stream};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fails `on_next` for selected values a fixed number of times before accepting them.
struct FlakySubscriber {
  failures: HashMap<i32, usize>,
  attempts: usize,
  accepted: Vec<i32>,
  completed: bool,
  errors: Vec<String>,
  config: SubscriberConfig,
}

impl FlakySubscriber {
  fn new(strategy: ErrorStrategy, failures: &[(i32, usize)]) -> Self {
    Self {
      failures: failures.iter().copied().collect(),
      attempts: 0,
      accepted: Vec::new(),
      completed: false,
      errors: Vec::new(),
      config: SubscriberConfig::default()
        .with_error_strategy(strategy)
        .with_name("flaky".to_string()),
    }
  }
}

#[async_trait]
impl Subscriber for FlakySubscriber {
  type Input = i32;
  type Failure = String;

  async fn on_next(&mut self, value: i32) -> Result<(), StreamError> {
    self.attempts += 1;
    if let Some(remaining) = self.failures.get_mut(&value) {
      if *remaining > 0 {
        *remaining -= 1;
        return Err(StreamError::msg(format!("rejected {}", value)));
      }
    }
    self.accepted.push(value);
    Ok(())
  }

  async fn on_error(&mut self, cause: String) {
    self.errors.push(cause);
  }

  async fn on_complete(&mut self) {
    self.completed = true;
  }

  fn config(&self) -> &SubscriberConfig {
    &self.config
  }
}

fn values_then_complete(values: &[i32]) -> Vec<Signal<i32, String>> {
  values
    .iter()
    .copied()
    .map(Signal::Next)
    .chain(std::iter::once(Signal::Complete))
    .collect()
}

#[tokio::test]
async fn test_collect_subscriber_records_values_and_completion() {
  let mut producer = VecProducer::new(vec![1, 2, 3]);
  let mut subscriber = CollectSubscriber::<i32>::new();

  let state = subscriber.consume(producer.produce()).await.unwrap();
  assert_eq!(state, SequenceState::Completed);

  let outcome = subscriber.outcome().await;
  assert_eq!(outcome.values, vec![1, 2, 3]);
  assert!(outcome.is_completed());
  assert_eq!(outcome.into_result().unwrap(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_collect_subscriber_records_failure() {
  let signals = vec![Signal::Next(1), Signal::Error("broken".to_string())];
  let mut subscriber = CollectSubscriber::<i32, String>::new();

  let state = subscriber.consume(stream::iter(signals)).await.unwrap();
  assert_eq!(state, SequenceState::Failed);

  let outcome = subscriber.outcome().await;
  assert_eq!(outcome.values, vec![1]);
  assert_eq!(outcome.failure(), Some(&"broken".to_string()));
  assert_eq!(outcome.terminal, Some(Terminal::Failed("broken".to_string())));
}

#[tokio::test]
async fn test_collect_subscriber_handle_is_shared() {
  let mut subscriber = CollectSubscriber::<i32, String>::new();
  let handle = subscriber.handle();

  subscriber
    .consume(stream::iter(values_then_complete(&[9])))
    .await
    .unwrap();
  assert_eq!(handle.lock().await.values, vec![9]);
}

#[tokio::test]
async fn test_consume_ignores_signals_after_terminal() {
  let signals = vec![
    Signal::Next(1),
    Signal::Complete,
    Signal::Next(2),
    Signal::Error("late".to_string()),
  ];
  let mut subscriber = FlakySubscriber::new(ErrorStrategy::Stop, &[]);

  let state = subscriber.consume(stream::iter(signals)).await.unwrap();
  assert_eq!(state, SequenceState::Completed);
  assert_eq!(subscriber.accepted, vec![1]);
  assert!(subscriber.errors.is_empty());
}

#[tokio::test]
async fn test_consume_stops_polling_at_terminal() {
  let polled = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&polled);
  let signals = stream::iter(vec![
    Signal::Next(1),
    Signal::Error("first".to_string()),
    Signal::Complete,
    Signal::Next(2),
  ])
  .inspect(move |_| {
    counter.fetch_add(1, Ordering::SeqCst);
  });
  let mut subscriber = FlakySubscriber::new(ErrorStrategy::Stop, &[]);

  let state = subscriber.consume(signals).await.unwrap();
  assert_eq!(state, SequenceState::Failed);
  assert_eq!(polled.load(Ordering::SeqCst), 2);
  assert_eq!(subscriber.errors, vec!["first".to_string()]);
  assert!(!subscriber.completed);
  assert_eq!(subscriber.accepted, vec![1]);
}

#[tokio::test]
async fn test_consume_error_terminates() {
  let signals = vec![Signal::Next(1), Signal::Error("eof".to_string())];
  let mut subscriber = FlakySubscriber::new(ErrorStrategy::Stop, &[]);

  let state = subscriber.consume(stream::iter(signals)).await.unwrap();
  assert_eq!(state, SequenceState::Failed);
  assert_eq!(subscriber.errors, vec!["eof".to_string()]);
  assert!(!subscriber.completed);
}

#[tokio::test]
async fn test_consume_stop_strategy_aborts() {
  let mut subscriber = FlakySubscriber::new(ErrorStrategy::Stop, &[(2, 1)]);

  let err = subscriber
    .consume(stream::iter(values_then_complete(&[1, 2, 3])))
    .await
    .unwrap_err();
  match err {
    SubscribeError::Aborted { delivered, source } => {
      assert_eq!(delivered, 1);
      assert_eq!(source.source.to_string(), "rejected 2");
    }
    other => panic!("expected Aborted, got {:?}", other),
  }
  assert_eq!(subscriber.accepted, vec![1]);
  assert!(!subscriber.completed);
}

#[tokio::test]
async fn test_consume_skip_strategy_continues() {
  let mut subscriber = FlakySubscriber::new(ErrorStrategy::Skip, &[(2, usize::MAX)]);

  let state = subscriber
    .consume(stream::iter(values_then_complete(&[1, 2, 3])))
    .await
    .unwrap();
  assert_eq!(state, SequenceState::Completed);
  assert_eq!(subscriber.accepted, vec![1, 3]);
  assert!(subscriber.completed);
}

#[tokio::test]
async fn test_consume_retry_strategy_recovers() {
  let mut subscriber = FlakySubscriber::new(ErrorStrategy::Retry(3), &[(2, 2)]);

  subscriber
    .consume(stream::iter(values_then_complete(&[1, 2])))
    .await
    .unwrap();
  assert_eq!(subscriber.accepted, vec![1, 2]);
  assert_eq!(subscriber.attempts, 4);
}

#[tokio::test]
async fn test_consume_retry_strategy_gives_up() {
  let mut subscriber = FlakySubscriber::new(ErrorStrategy::Retry(2), &[(1, usize::MAX)]);

  let err = subscriber
    .consume(stream::iter(values_then_complete(&[1])))
    .await
    .unwrap_err();
  match err {
    SubscribeError::Aborted { delivered, source } => {
      assert_eq!(delivered, 0);
      assert_eq!(source.retries, 2);
    }
    other => panic!("expected Aborted, got {:?}", other),
  }
  assert_eq!(subscriber.attempts, 3);
}

#[tokio::test]
async fn test_consume_unterminated_source() {
  let mut subscriber = FlakySubscriber::new(ErrorStrategy::Stop, &[]);

  let err = subscriber
    .consume(stream::iter(vec![Signal::Next(1), Signal::Next(2)]))
    .await
    .unwrap_err();
  assert!(matches!(err, SubscribeError::Unterminated { delivered: 2 }));
  assert!(!subscriber.completed);
}

#[test]
fn test_subscriber_component_info() {
  let subscriber = FlakySubscriber::new(ErrorStrategy::Skip, &[]);
  assert_eq!(subscriber.component_info().name, "flaky");

  let unnamed = CollectSubscriber::<i32>::new();
  assert_eq!(unnamed.component_info().name, "subscriber");
}
