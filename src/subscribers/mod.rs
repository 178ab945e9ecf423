//! Built-in subscribers.

pub mod collect;

pub use collect::{CollectSubscriber, Outcome, Terminal};
