use super::result_stream_producer::ResultStreamProducer;
use crate::signal::Signal;
use crate::traits::Output;
use futures::Stream;
use std::pin::Pin;

impl<S, T, E> Output for ResultStreamProducer<S>
where
  S: Stream<Item = Result<T, E>> + Send + 'static,
  T: Send + 'static,
  E: Send + 'static,
{
  type Output = T;
  type Failure = E;
  type OutputStream = Pin<Box<dyn Stream<Item = Signal<T, E>> + Send>>;
}
