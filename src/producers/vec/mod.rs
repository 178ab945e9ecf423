//! Producer that replays a vector.

/// `Output` implementation for [`VecProducer`].
pub mod output;
/// `Producer` implementation for [`VecProducer`].
pub mod producer;
/// The [`VecProducer`] type.
pub mod vec_producer;

pub use vec_producer::VecProducer;
