//! Subscriber that records everything it receives.

/// The [`CollectSubscriber`] type.
pub mod collect_subscriber;
/// What a collector has recorded.
pub mod outcome;
/// `Subscriber` implementation for [`CollectSubscriber`].
pub mod subscriber;

pub use collect_subscriber::CollectSubscriber;
pub use outcome::{Outcome, Terminal};
