//! # Producer Test Suite
//!
//! Covers the built-in producers and the provided configuration methods of the
//! `Producer` trait.

use crate::error::StreamError;
use crate::producers::{ResultStreamProducer, VecProducer};
use crate::signal::Signal;
use crate::traits::{Producer, ProducerConfig};
use futures::{StreamExt, stream};

#[tokio::test]
async fn test_vec_producer_emits_values_then_complete() {
  let mut producer = VecProducer::new(vec!["a", "b"]);
  let signals: Vec<Signal<&str>> = producer.produce().collect().await;
  assert_eq!(
    signals,
    vec![Signal::Next("a"), Signal::Next("b"), Signal::Complete]
  );
}

#[tokio::test]
async fn test_vec_producer_empty() {
  let mut producer = VecProducer::<u8>::new(Vec::new());
  assert!(producer.is_empty());
  let signals: Vec<Signal<u8>> = producer.produce().collect().await;
  assert_eq!(signals, vec![Signal::Complete]);
}

#[tokio::test]
async fn test_vec_producer_replays_for_each_subscription() {
  let mut producer = VecProducer::new(vec![1, 2, 3]);
  let first: Vec<Signal<i32>> = producer.produce().collect().await;
  let second: Vec<Signal<i32>> = producer.produce().collect().await;
  assert_eq!(first, second);
  assert_eq!(producer.len(), 3);
}

#[test]
fn test_producer_config_and_component_info() {
  let producer = VecProducer::new(vec![1]).with_name("numbers".to_string());
  assert_eq!(producer.config().name(), Some("numbers".to_string()));

  let info = producer.component_info();
  assert_eq!(info.name, "numbers");
  assert!(info.type_name.contains("VecProducer"));
}

#[test]
fn test_producer_default_component_name() {
  let producer = VecProducer::new(vec![1]);
  assert_eq!(producer.component_info().name, "producer");
}

#[test]
fn test_producer_with_config_clones() {
  let producer = VecProducer::new(vec![1, 2]);
  let renamed = producer.with_config(ProducerConfig::default().with_name("copy".to_string()));
  assert_eq!(renamed.config().name(), Some("copy".to_string()));
  assert_eq!(producer.config().name(), None);
  assert_eq!(renamed.data, producer.data);
}

#[tokio::test]
async fn test_result_stream_producer_materializes() {
  let source = stream::iter(vec![Ok(1), Err(StreamError::msg("bad")), Ok(3)]);
  let mut producer = ResultStreamProducer::new(source);

  let signals: Vec<Signal<i32>> = producer.produce().collect().await;
  assert_eq!(signals.len(), 2);
  assert_eq!(signals[0], Signal::Next(1));
  assert!(signals[1].is_on_error());
  assert!(producer.is_consumed());
}

#[tokio::test]
async fn test_result_stream_producer_second_subscription_completes_empty() {
  let mut producer = ResultStreamProducer::new(stream::iter(vec![Ok::<_, String>(1)]));
  let _first: Vec<Signal<i32, String>> = producer.produce().collect().await;

  let second: Vec<Signal<i32, String>> = producer.produce().collect().await;
  assert_eq!(second, vec![Signal::Complete]);
}
