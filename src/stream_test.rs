//! # Signal Stream Adapter Test Suite
//!
//! Covers `materialize` and `dematerialize`: exactly one terminal signal, no
//! polling past a failure, and fused behaviour after termination.

use crate::signal::Signal;
use crate::stream::{SignalStream, SignalStreamExt};
use futures::stream::{self, FusedStream};
use futures::{Stream, StreamExt, TryStreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[tokio::test]
async fn test_materialize_appends_single_complete() {
  let signals: Vec<Signal<i32, String>> = stream::iter(vec![Ok(1), Ok(2)])
    .materialize()
    .collect()
    .await;

  assert_eq!(
    signals,
    vec![Signal::Next(1), Signal::Next(2), Signal::Complete]
  );
}

#[tokio::test]
async fn test_materialize_empty_source_completes() {
  let signals: Vec<Signal<i32, String>> = stream::iter(Vec::<Result<i32, String>>::new())
    .materialize()
    .collect()
    .await;

  assert_eq!(signals, vec![Signal::Complete]);
}

#[tokio::test]
async fn test_materialize_stops_polling_after_error() {
  let polled = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&polled);
  let source = stream::iter(vec![Ok(1), Err("boom".to_string()), Ok(3), Ok(4)]).inspect(move |_| {
    counter.fetch_add(1, Ordering::SeqCst);
  });

  let mut signals = source.materialize();
  assert_eq!(signals.next().await, Some(Signal::Next(1)));
  assert_eq!(signals.next().await, Some(Signal::Error("boom".to_string())));
  assert!(signals.is_terminated());
  assert_eq!(signals.next().await, None);
  assert_eq!(signals.next().await, None);
  assert_eq!(polled.load(Ordering::SeqCst), 2);
}

#[test]
fn test_materialize_size_hint_counts_terminal() {
  let signals = stream::iter(vec![Ok::<_, String>(1), Ok(2)]).materialize();
  assert_eq!(signals.size_hint(), (1, Some(3)));
}

#[tokio::test]
async fn test_dematerialize_ends_at_complete() {
  let signals = stream::iter(vec![
    Signal::<i32, String>::Next(1),
    Signal::Complete,
    Signal::Next(2),
  ]);

  let values: Vec<i32> = signals.dematerialize().try_collect().await.unwrap();
  assert_eq!(values, vec![1]);
}

#[tokio::test]
async fn test_dematerialize_yields_error_once() {
  let mut results = stream::iter(vec![
    Signal::<i32, String>::Next(1),
    Signal::Error("bad".to_string()),
    Signal::Next(2),
  ])
  .dematerialize();

  assert_eq!(results.next().await, Some(Ok(1)));
  assert_eq!(results.next().await, Some(Err("bad".to_string())));
  assert_eq!(results.next().await, None);
  assert!(results.is_terminated());
}

#[tokio::test]
async fn test_dematerialize_unterminated_source_just_ends() {
  let values: Vec<Result<i32, String>> = stream::iter(vec![Signal::Next(5)])
    .dematerialize()
    .collect()
    .await;
  assert_eq!(values, vec![Ok(5)]);
}

#[tokio::test]
async fn test_round_trip_preserves_prefix_up_to_error() {
  let input = vec![Ok(1), Ok(2), Err("stop".to_string()), Ok(3)];
  let output: Vec<Result<i32, String>> = stream::iter(input)
    .materialize()
    .dematerialize()
    .collect()
    .await;
  assert_eq!(output, vec![Ok(1), Ok(2), Err("stop".to_string())]);
}

#[tokio::test]
async fn test_boxed_signals() {
  let boxed: SignalStream<i32, String> = stream::iter(vec![Ok(1)]).materialize().boxed_signals();
  let signals: Vec<_> = boxed.collect().await;
  assert_eq!(signals, vec![Signal::Next(1), Signal::Complete]);
}
