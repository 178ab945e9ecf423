use super::result_stream_producer::ResultStreamProducer;
use crate::signal::Signal;
use crate::stream::SignalStreamExt;
use crate::traits::{Producer, ProducerConfig};
use futures::Stream;
use tracing::warn;

impl<S, T, E> Producer for ResultStreamProducer<S>
where
  S: Stream<Item = Result<T, E>> + Send + 'static,
  T: Send + 'static,
  E: Send + 'static,
{
  fn produce(&mut self) -> Self::OutputStream {
    match self.source.take() {
      Some(source) => Box::pin(source.materialize()),
      None => {
        warn!(
          producer = %self.component_info().name,
          "source already consumed, completing immediately"
        );
        Box::pin(futures::stream::iter([Signal::<T, E>::COMPLETE]))
      }
    }
  }

  fn set_config_impl(&mut self, config: ProducerConfig) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &ProducerConfig {
    &self.config
  }

  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig {
    &mut self.config
  }
}
