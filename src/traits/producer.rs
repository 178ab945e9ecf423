use crate::error::ComponentInfo;
use crate::traits::output::Output;

/// Configuration for a producer component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerConfig {
  /// Optional name for identifying this producer in logs and errors.
  pub name: Option<String>,
}

impl ProducerConfig {
  /// Sets the name for this producer configuration.
  ///
  /// # Arguments
  ///
  /// * `name` - The name to assign to this producer.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }
}

/// Trait for components that produce signal streams.
///
/// A producer is the start of a pipeline. Every stream it returns must follow
/// the signal protocol: any number of `Next` signals, then exactly one terminal
/// signal, then nothing.
///
/// # Example
///
/// ```rust,ignore
/// use fluxweave::signal::Signal;
/// use fluxweave::traits::{Output, Producer, ProducerConfig};
/// use futures::Stream;
/// use std::pin::Pin;
///
/// struct Countdown {
///     from: u32,
///     config: ProducerConfig,
/// }
///
/// impl Output for Countdown {
///     type Output = u32;
///     type Failure = fluxweave::error::StreamError;
///     type OutputStream = Pin<Box<dyn Stream<Item = Signal<u32>> + Send>>;
/// }
///
/// impl Producer for Countdown {
///     fn produce(&mut self) -> Self::OutputStream {
///         let values = (0..=self.from).rev().map(Signal::Next);
///         Box::pin(futures::stream::iter(values.chain(std::iter::once(Signal::COMPLETE))))
///     }
///
///     fn set_config_impl(&mut self, config: ProducerConfig) {
///         self.config = config;
///     }
///
///     fn get_config_impl(&self) -> &ProducerConfig {
///         &self.config
///     }
///
///     fn get_config_mut_impl(&mut self) -> &mut ProducerConfig {
///         &mut self.config
///     }
/// }
/// ```
pub trait Producer: Output {
  /// Produces a stream of signals.
  ///
  /// Called once per subscription. The stream is lazy; nothing happens until
  /// it is polled.
  fn produce(&mut self) -> Self::OutputStream;

  /// Creates a new producer instance with the given configuration.
  #[must_use]
  fn with_config(&self, config: ProducerConfig) -> Self
  where
    Self: Sized + Clone,
  {
    let mut this = self.clone();
    this.set_config(config);
    this
  }

  /// Sets the configuration for this producer.
  fn set_config(&mut self, config: ProducerConfig) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the producer's configuration.
  fn config(&self) -> &ProducerConfig {
    self.get_config_impl()
  }

  /// Returns a mutable reference to the producer's configuration.
  fn config_mut(&mut self) -> &mut ProducerConfig {
    self.get_config_mut_impl()
  }

  /// Sets the name for this producer.
  #[must_use]
  fn with_name(mut self, name: String) -> Self
  where
    Self: Sized,
  {
    self.config_mut().name = Some(name);
    self
  }

  /// Returns information about the component for logging and error reporting.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config()
        .name()
        .unwrap_or_else(|| "producer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Stores the configuration. Implemented by each producer.
  fn set_config_impl(&mut self, config: ProducerConfig);

  /// Returns the stored configuration. Implemented by each producer.
  fn get_config_impl(&self) -> &ProducerConfig;

  /// Returns the stored configuration mutably. Implemented by each producer.
  fn get_config_mut_impl(&mut self) -> &mut ProducerConfig;
}
