//! # FluxWeave
//!
//! Reactive signals and server-side content negotiation in pure Rust.
//!
//! FluxWeave models an asynchronous sequence as a stream of [`Signal`]s: any
//! number of values, then exactly one terminal signal that says whether the
//! sequence completed or failed. Producers emit signal streams, subscribers
//! consume them, and the adapters in [`stream`] convert to and from ordinary
//! `Result` streams.
//!
//! The [`web`] module picks a response media type from a request's `Accept`
//! preferences and writes signal streams as negotiated JSON bodies.
//!
//! ## Key Features
//!
//! - **Explicit termination**: completion and failure are values, not the end of a stream
//! - **Protocol checking**: nothing is delivered after a terminal signal
//! - **Async-first**: built on `futures` streams, tested on Tokio
//! - **Content negotiation**: quality and specificity ordering of media types
//!
//! ## Quick Start
//!
//! ```rust
//! use fluxweave::producers::VecProducer;
//! use fluxweave::subscribers::CollectSubscriber;
//! use fluxweave::traits::{Producer, Subscriber};
//!
//! # tokio_test::block_on(async {
//! let mut producer = VecProducer::new(vec![1, 2, 3]);
//! let mut subscriber = CollectSubscriber::<i32>::new();
//! subscriber.consume(producer.produce()).await.unwrap();
//!
//! let outcome = subscriber.outcome().await;
//! assert_eq!(outcome.values, vec![1, 2, 3]);
//! assert!(outcome.is_completed());
//! # });
//! ```

// Documentation enforcement - treat missing docs as errors
#![deny(missing_docs)]

/// Error types and error handling strategies.
pub mod error;
/// Built-in producers.
pub mod producers;
/// Signal ordering state machine.
pub mod sequence;
/// The `Signal` type.
pub mod signal;
/// Adapters between result streams and signal streams.
pub mod stream;
/// Built-in subscribers.
pub mod subscribers;
/// Producer and subscriber traits.
pub mod traits;
/// Content negotiation and response writing.
pub mod web;

#[cfg(test)]
mod producer_test;
#[cfg(test)]
mod stream_test;
#[cfg(test)]
mod subscriber_test;

pub use error::{
  ComponentInfo, ErrorAction, ErrorStrategy, NegotiationError, SignalError, StreamError,
  StringError, SubscribeError,
};
pub use sequence::{SequenceState, SignalSequence};
pub use signal::{Signal, SignalKind};
pub use stream::{Dematerialize, Materialize, SignalStream, SignalStreamExt};
pub use traits::{Output, Producer, ProducerConfig, Subscriber, SubscriberConfig};
