//! Built-in producers.
//!
//! - [`VecProducer`]: replays a vector, then completes
//! - [`ResultStreamProducer`]: adapts an existing `Result` stream

pub mod result_stream;
pub mod vec;

pub use result_stream::ResultStreamProducer;
pub use vec::VecProducer;
