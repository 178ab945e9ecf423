//! # Web
//!
//! Server-side content negotiation. A [`ContentNegotiator`] reads the media
//! types a request asks for through a [`RequestedContentTypeResolver`], matches
//! them against what a handler can produce, and selects the response type.
//! [`ResponseBodyResultHandler`] uses it to write signal streams as JSON.

pub mod exchange;
pub mod media_type;
pub mod negotiation;
pub mod resolver;
pub mod result_handler;

#[cfg(test)]
mod negotiation_test;

pub use exchange::{ProducibleMediaTypes, ServerWebExchange};
pub use media_type::MediaType;
pub use negotiation::ContentNegotiator;
pub use resolver::{
  CompositeContentTypeResolver, FixedContentTypeResolver, HeaderContentTypeResolver,
  ParameterContentTypeResolver, RequestedContentTypeResolver,
};
pub use result_handler::{BodyEncoding, ResponseBodyResultHandler, ResultHandlerConfig, error_response};
