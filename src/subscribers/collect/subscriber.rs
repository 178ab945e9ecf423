use super::collect_subscriber::CollectSubscriber;
use super::outcome::Terminal;
use crate::error::StreamError;
use crate::traits::{Subscriber, SubscriberConfig};
use async_trait::async_trait;

#[async_trait]
impl<T, E> Subscriber for CollectSubscriber<T, E>
where
  T: Send + 'static,
  E: Send + 'static,
{
  type Input = T;
  type Failure = E;

  async fn on_next(&mut self, value: T) -> Result<(), StreamError> {
    self.outcome.lock().await.values.push(value);
    Ok(())
  }

  async fn on_error(&mut self, cause: E) {
    self.outcome.lock().await.terminal = Some(Terminal::Failed(cause));
  }

  async fn on_complete(&mut self) {
    self.outcome.lock().await.terminal = Some(Terminal::Completed);
  }

  fn config(&self) -> &SubscriberConfig {
    &self.config
  }
}
