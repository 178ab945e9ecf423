use super::vec_producer::VecProducer;
use crate::error::StreamError;
use crate::signal::Signal;
use crate::traits::Output;
use futures::Stream;
use std::pin::Pin;

impl<T: Clone + Send + 'static> Output for VecProducer<T> {
  type Output = T;
  type Failure = StreamError;
  type OutputStream = Pin<Box<dyn Stream<Item = Signal<T>> + Send>>;
}
