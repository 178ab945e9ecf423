//! # Requested Content Type Resolution
//!
//! A [`RequestedContentTypeResolver`] decides which media types a request asks
//! for. An empty list means the request expressed no preference.

use crate::error::NegotiationError;
use crate::web::exchange::ServerWebExchange;
use crate::web::media_type::MediaType;
use http::header::ACCEPT;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::trace;

/// Resolves the media types requested by an exchange.
pub trait RequestedContentTypeResolver: Debug + Send + Sync {
  /// Returns the requested media types, most preferred first.
  ///
  /// # Errors
  ///
  /// Returns a [`NegotiationError`] if the request's preference cannot be read.
  fn resolve_media_types(
    &self,
    exchange: &ServerWebExchange,
  ) -> Result<Vec<MediaType>, NegotiationError>;
}

/// Reads the `Accept` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderContentTypeResolver;

impl RequestedContentTypeResolver for HeaderContentTypeResolver {
  fn resolve_media_types(
    &self,
    exchange: &ServerWebExchange,
  ) -> Result<Vec<MediaType>, NegotiationError> {
    let mut media_types = Vec::new();
    for value in exchange.headers().get_all(ACCEPT) {
      let value = value.to_str().map_err(|_| NegotiationError::InvalidHeader {
        name: ACCEPT.to_string(),
      })?;
      media_types.extend(MediaType::parse_list(value)?);
    }
    MediaType::sort_by_specificity_and_quality(&mut media_types);
    trace!(count = media_types.len(), "resolved Accept header");
    Ok(media_types)
  }
}

/// Always returns the same media types.
#[derive(Debug, Clone, Default)]
pub struct FixedContentTypeResolver {
  media_types: Vec<MediaType>,
}

impl FixedContentTypeResolver {
  /// Resolves every exchange to `media_types`.
  pub fn new(media_types: Vec<MediaType>) -> Self {
    Self { media_types }
  }

  /// Resolves every exchange to a single media type.
  pub fn single(media_type: MediaType) -> Self {
    Self::new(vec![media_type])
  }
}

impl RequestedContentTypeResolver for FixedContentTypeResolver {
  fn resolve_media_types(
    &self,
    _exchange: &ServerWebExchange,
  ) -> Result<Vec<MediaType>, NegotiationError> {
    Ok(self.media_types.clone())
  }
}

/// Maps a query parameter such as `?format=json` to a media type.
#[derive(Debug, Clone)]
pub struct ParameterContentTypeResolver {
  parameter_name: String,
  mappings: HashMap<String, MediaType>,
}

impl ParameterContentTypeResolver {
  /// Default query parameter name.
  pub const DEFAULT_PARAMETER_NAME: &'static str = "format";

  /// Creates a resolver with a key → media type table. Keys match
  /// case-insensitively.
  pub fn new<I, K>(mappings: I) -> Self
  where
    I: IntoIterator<Item = (K, MediaType)>,
    K: AsRef<str>,
  {
    Self {
      parameter_name: Self::DEFAULT_PARAMETER_NAME.to_string(),
      mappings: mappings
        .into_iter()
        .map(|(key, media_type)| (key.as_ref().to_ascii_lowercase(), media_type))
        .collect(),
    }
  }

  /// Reads a different query parameter.
  #[must_use]
  pub fn with_parameter_name(mut self, name: impl Into<String>) -> Self {
    self.parameter_name = name.into();
    self
  }

  /// Adds one mapping.
  #[must_use]
  pub fn with_mapping(mut self, key: &str, media_type: MediaType) -> Self {
    self.mappings.insert(key.to_ascii_lowercase(), media_type);
    self
  }

  /// The query parameter this resolver reads.
  pub fn parameter_name(&self) -> &str {
    &self.parameter_name
  }
}

impl RequestedContentTypeResolver for ParameterContentTypeResolver {
  fn resolve_media_types(
    &self,
    exchange: &ServerWebExchange,
  ) -> Result<Vec<MediaType>, NegotiationError> {
    let key = match exchange.query_param(&self.parameter_name) {
      Some(key) if !key.trim().is_empty() => key.trim().to_ascii_lowercase(),
      _ => return Ok(Vec::new()),
    };
    match self.mappings.get(&key) {
      Some(media_type) => Ok(vec![media_type.clone()]),
      None => Err(NegotiationError::UnknownFormatKey { key }),
    }
  }
}

/// Tries several resolvers in order.
#[derive(Debug, Clone, Default)]
pub struct CompositeContentTypeResolver {
  resolvers: Vec<Arc<dyn RequestedContentTypeResolver>>,
}

impl CompositeContentTypeResolver {
  /// Creates an empty composite, which resolves to an empty list.
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a resolver.
  #[must_use]
  pub fn with<R>(mut self, resolver: R) -> Self
  where
    R: RequestedContentTypeResolver + 'static,
  {
    self.resolvers.push(Arc::new(resolver));
    self
  }
}

impl RequestedContentTypeResolver for CompositeContentTypeResolver {
  /// Returns the first non-empty result. Errors are returned immediately.
  fn resolve_media_types(
    &self,
    exchange: &ServerWebExchange,
  ) -> Result<Vec<MediaType>, NegotiationError> {
    for resolver in &self.resolvers {
      let media_types = resolver.resolve_media_types(exchange)?;
      if !media_types.is_empty() {
        return Ok(media_types);
      }
    }
    Ok(Vec::new())
  }
}
