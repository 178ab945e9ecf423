//! Component traits for signal pipelines.
//!
//! - [`Output`] describes what a component emits
//! - [`Producer`] creates a signal stream
//! - [`Subscriber`] receives one, signal by signal

pub mod output;
/// Producer trait and configuration.
pub mod producer;
pub mod subscriber;

pub use output::Output;
pub use producer::{Producer, ProducerConfig};
pub use subscriber::{Subscriber, SubscriberConfig};
