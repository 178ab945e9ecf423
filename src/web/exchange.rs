//! The request side of a server exchange.

use crate::web::media_type::MediaType;
use http::{Extensions, HeaderMap, Method, Request, Uri, request::Parts};

/// Exchange attribute that overrides the media types a handler can produce.
///
/// Set by routing code that knows more than the handler, for example a mapping
/// declared with an explicit `produces` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducibleMediaTypes(pub Vec<MediaType>);

/// An incoming request plus per-exchange attributes.
#[derive(Debug, Default)]
pub struct ServerWebExchange {
  method: Method,
  uri: Uri,
  headers: HeaderMap,
  attributes: Extensions,
}

impl ServerWebExchange {
  /// Creates an exchange with no headers or attributes.
  pub fn new(method: Method, uri: Uri) -> Self {
    Self {
      method,
      uri,
      headers: HeaderMap::new(),
      attributes: Extensions::new(),
    }
  }

  /// Builds an exchange from request parts. The request's extensions become the
  /// exchange attributes.
  pub fn from_parts(parts: Parts) -> Self {
    Self {
      method: parts.method,
      uri: parts.uri,
      headers: parts.headers,
      attributes: parts.extensions,
    }
  }

  /// The request method.
  pub fn method(&self) -> &Method {
    &self.method
  }

  /// The request URI.
  pub fn uri(&self) -> &Uri {
    &self.uri
  }

  /// The request headers.
  pub fn headers(&self) -> &HeaderMap {
    &self.headers
  }

  /// The request headers, mutably.
  pub fn headers_mut(&mut self) -> &mut HeaderMap {
    &mut self.headers
  }

  /// Typed exchange attributes.
  pub fn attributes(&self) -> &Extensions {
    &self.attributes
  }

  /// Typed exchange attributes, mutably.
  pub fn attributes_mut(&mut self) -> &mut Extensions {
    &mut self.attributes
  }

  /// Decoded query string pairs in order. A malformed query yields no pairs.
  pub fn query_pairs(&self) -> Vec<(String, String)> {
    self
      .uri
      .query()
      .and_then(|query| serde_urlencoded::from_str::<Vec<(String, String)>>(query).ok())
      .unwrap_or_default()
  }

  /// First value of the query parameter `name`.
  pub fn query_param(&self, name: &str) -> Option<String> {
    self
      .query_pairs()
      .into_iter()
      .find(|(key, _)| key == name)
      .map(|(_, value)| value)
  }

  /// The [`ProducibleMediaTypes`] attribute, if set.
  pub fn producible_media_types(&self) -> Option<&[MediaType]> {
    self
      .attributes
      .get::<ProducibleMediaTypes>()
      .map(|producible| producible.0.as_slice())
  }

  /// Sets the [`ProducibleMediaTypes`] attribute.
  pub fn set_producible_media_types(&mut self, media_types: Vec<MediaType>) {
    self.attributes.insert(ProducibleMediaTypes(media_types));
  }
}

impl<B> From<Request<B>> for ServerWebExchange {
  fn from(request: Request<B>) -> Self {
    let (parts, _body) = request.into_parts();
    Self::from_parts(parts)
  }
}
