//! # Signal Stream Adapters
//!
//! Converts between the two ways a fallible asynchronous sequence can be
//! expressed:
//!
//! - a stream of `Result<T, E>` that simply ends, and
//! - a stream of [`Signal<T, E>`] that states explicitly how it ended.
//!
//! [`Materialize`] goes from results to signals: every `Ok` becomes `Next`, the
//! first `Err` becomes a terminal `Error`, and exhaustion becomes exactly one
//! `Complete`. [`Dematerialize`] goes back, stopping at the first terminal signal
//! without polling the source again.
//!
//! ## Example
//!
//! ```rust
//! use fluxweave::signal::Signal;
//! use fluxweave::stream::SignalStreamExt;
//! use futures::{StreamExt, executor::block_on, stream};
//!
//! let signals: Vec<Signal<i32, String>> = block_on(
//!     stream::iter(vec![Ok(1), Err("boom".to_string()), Ok(3)])
//!         .materialize()
//!         .collect(),
//! );
//!
//! assert_eq!(signals, vec![Signal::Next(1), Signal::Error("boom".to_string())]);
//! ```

use crate::error::StreamError;
use crate::signal::Signal;
use futures::Stream;
use futures::stream::FusedStream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll, ready};
use tracing::trace;

/// A boxed, sendable stream of signals.
pub type SignalStream<T, E = StreamError> = Pin<Box<dyn Stream<Item = Signal<T, E>> + Send>>;

/// Stream for the [`materialize`](SignalStreamExt::materialize) method.
#[pin_project]
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct Materialize<S> {
  #[pin]
  source: S,
  terminated: bool,
}

impl<S> Materialize<S> {
  /// Wraps a result stream.
  pub fn new(source: S) -> Self {
    Self {
      source,
      terminated: false,
    }
  }

  /// Consumes the adapter, returning the underlying stream.
  pub fn into_inner(self) -> S {
    self.source
  }
}

impl<S, T, E> Stream for Materialize<S>
where
  S: Stream<Item = Result<T, E>>,
{
  type Item = Signal<T, E>;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    let this = self.project();
    if *this.terminated {
      return Poll::Ready(None);
    }

    let signal = match ready!(this.source.poll_next(cx)) {
      Some(Ok(value)) => Signal::Next(value),
      Some(Err(cause)) => {
        *this.terminated = true;
        trace!("materialize: source failed, emitting onError");
        Signal::Error(cause)
      }
      None => {
        *this.terminated = true;
        trace!("materialize: source exhausted, emitting onComplete");
        Signal::Complete
      }
    };
    Poll::Ready(Some(signal))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    if self.terminated {
      return (0, Some(0));
    }
    // An early error can cut the sequence short, so only the terminal signal is certain.
    let (_, upper) = self.source.size_hint();
    (1, upper.and_then(|n| n.checked_add(1)))
  }
}

impl<S, T, E> FusedStream for Materialize<S>
where
  S: Stream<Item = Result<T, E>>,
{
  fn is_terminated(&self) -> bool {
    self.terminated
  }
}

/// Stream for the [`dematerialize`](SignalStreamExt::dematerialize) method.
#[pin_project]
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct Dematerialize<S> {
  #[pin]
  source: S,
  terminated: bool,
}

impl<S> Dematerialize<S> {
  /// Wraps a signal stream.
  pub fn new(source: S) -> Self {
    Self {
      source,
      terminated: false,
    }
  }

  /// Consumes the adapter, returning the underlying stream.
  pub fn into_inner(self) -> S {
    self.source
  }
}

impl<S, T, E> Stream for Dematerialize<S>
where
  S: Stream<Item = Signal<T, E>>,
{
  type Item = Result<T, E>;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    let this = self.project();
    if *this.terminated {
      return Poll::Ready(None);
    }

    match ready!(this.source.poll_next(cx)) {
      Some(Signal::Next(value)) => Poll::Ready(Some(Ok(value))),
      Some(Signal::Error(cause)) => {
        *this.terminated = true;
        Poll::Ready(Some(Err(cause)))
      }
      Some(Signal::Complete) | None => {
        *this.terminated = true;
        Poll::Ready(None)
      }
    }
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    if self.terminated {
      (0, Some(0))
    } else {
      (0, self.source.size_hint().1)
    }
  }
}

impl<S, T, E> FusedStream for Dematerialize<S>
where
  S: Stream<Item = Signal<T, E>>,
{
  fn is_terminated(&self) -> bool {
    self.terminated
  }
}

/// Signal adapters for any [`Stream`].
pub trait SignalStreamExt: Stream {
  /// Turns a stream of results into a stream of signals ending in exactly one
  /// terminal signal.
  fn materialize<T, E>(self) -> Materialize<Self>
  where
    Self: Stream<Item = Result<T, E>> + Sized,
  {
    Materialize::new(self)
  }

  /// Turns a stream of signals back into a stream of results, ending at the
  /// first terminal signal.
  fn dematerialize<T, E>(self) -> Dematerialize<Self>
  where
    Self: Stream<Item = Signal<T, E>> + Sized,
  {
    Dematerialize::new(self)
  }

  /// Boxes the stream into a [`SignalStream`].
  fn boxed_signals<T, E>(self) -> SignalStream<T, E>
  where
    Self: Stream<Item = Signal<T, E>> + Sized + Send + 'static,
  {
    Box::pin(self)
  }
}

impl<S: Stream + ?Sized> SignalStreamExt for S {}
