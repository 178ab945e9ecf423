use super::vec_producer::VecProducer;
use crate::error::StreamError;
use crate::signal::Signal;
use crate::traits::{Producer, ProducerConfig};
use tracing::debug;

impl<T: Clone + Send + 'static> Producer for VecProducer<T> {
  fn produce(&mut self) -> Self::OutputStream {
    let items = self.data.clone();
    let name = self.component_info().name;
    Box::pin(async_stream::stream! {
      let count = items.len();
      for item in items {
        yield Signal::<T, StreamError>::Next(item);
      }
      debug!(producer = %name, count, "vec producer exhausted");
      yield Signal::COMPLETE;
    })
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
