//! Producer that adapts an existing `Result` stream.

/// `Output` implementation for [`ResultStreamProducer`].
pub mod output;
/// `Producer` implementation for [`ResultStreamProducer`].
pub mod producer;
/// The [`ResultStreamProducer`] type.
pub mod result_stream_producer;

pub use result_stream_producer::ResultStreamProducer;
