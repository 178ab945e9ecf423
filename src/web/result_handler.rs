//! # Response Body Result Handler
//!
//! Turns a handler's signal stream into an HTTP response. The response media
//! type is negotiated first, so a request that accepts nothing this handler can
//! write is rejected before the stream is polled.

use crate::error::StreamError;
use crate::signal::Signal;
use crate::stream::SignalStreamExt;
use crate::web::exchange::ServerWebExchange;
use crate::web::media_type::MediaType;
use crate::web::negotiation::ContentNegotiator;
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use http::header::CONTENT_TYPE;
use http::{HeaderValue, Response, StatusCode};
use serde::Serialize;
use tracing::{debug, error, warn};

/// How values are written into the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
  /// All values as one JSON array.
  Json,
  /// One JSON document per line.
  NdJson,
}

impl BodyEncoding {
  /// The encoding for a negotiated media type, if one applies.
  ///
  /// `application/json` and any `+json` subtype map to [`BodyEncoding::Json`].
  pub fn for_media_type(media_type: &MediaType) -> Option<Self> {
    if media_type.type_() != "application" {
      return None;
    }
    match media_type.subtype() {
      "json" => Some(BodyEncoding::Json),
      "x-ndjson" => Some(BodyEncoding::NdJson),
      _ if media_type.subtype_suffix() == Some("json") => Some(BodyEncoding::Json),
      _ => None,
    }
  }

  fn encode<T: Serialize>(self, values: &[T], pretty: bool) -> Result<Vec<u8>, serde_json::Error> {
    match self {
      BodyEncoding::Json if pretty => serde_json::to_vec_pretty(values),
      BodyEncoding::Json => serde_json::to_vec(values),
      BodyEncoding::NdJson => {
        let mut body = Vec::new();
        for value in values {
          serde_json::to_writer(&mut body, value)?;
          body.push(b'\n');
        }
        Ok(body)
      }
    }
  }
}

/// Configuration for [`ResponseBodyResultHandler`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultHandlerConfig {
  /// Optional name for identifying this handler in logs.
  pub name: Option<String>,
  /// Pretty-print JSON array bodies.
  pub pretty: bool,
}

impl ResultHandlerConfig {
  /// Sets the name.
  #[must_use]
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Enables or disables pretty-printed JSON.
  #[must_use]
  pub fn with_pretty(mut self, pretty: bool) -> Self {
    self.pretty = pretty;
    self
  }
}

/// Writes signal streams as negotiated JSON responses.
#[derive(Debug, Clone, Default)]
pub struct ResponseBodyResultHandler {
  negotiator: ContentNegotiator,
  config: ResultHandlerConfig,
}

impl ResponseBodyResultHandler {
  /// Creates a handler using `negotiator`.
  pub fn new(negotiator: ContentNegotiator) -> Self {
    Self {
      negotiator,
      config: ResultHandlerConfig::default(),
    }
  }

  /// Replaces the configuration.
  #[must_use]
  pub fn with_config(mut self, config: ResultHandlerConfig) -> Self {
    self.config = config;
    self
  }

  /// The configuration.
  pub fn config(&self) -> &ResultHandlerConfig {
    &self.config
  }

  /// Media types this handler can write.
  pub fn supported_media_types() -> Vec<MediaType> {
    vec![MediaType::application_json(), MediaType::application_ndjson()]
  }

  /// Negotiates a media type, drains `body` and builds the response.
  ///
  /// | Outcome | Status |
  /// |---|---|
  /// | stream completed | `200 OK` |
  /// | requested types unreadable, or nothing acceptable can be written | `406 Not Acceptable` |
  /// | stream emitted `Error`, or encoding failed | `500 Internal Server Error` |
  pub async fn handle<S, T>(&self, exchange: &ServerWebExchange, body: S) -> Response<Bytes>
  where
    S: Stream<Item = Signal<T, StreamError>>,
    T: Serialize,
  {
    let name = self.config.name.as_deref().unwrap_or("result_handler");

    let selected = match self
      .negotiator
      .select_media_type(exchange, &Self::supported_media_types())
    {
      Ok(Some(selected)) => selected,
      Ok(None) => {
        debug!(handler = name, "no acceptable media type");
        return error_response(StatusCode::NOT_ACCEPTABLE, "no acceptable representation");
      }
      Err(err) => {
        warn!(handler = name, error = %err, "content negotiation failed");
        return error_response(StatusCode::NOT_ACCEPTABLE, &err.to_string());
      }
    };
    let Some(encoding) = BodyEncoding::for_media_type(&selected) else {
      debug!(handler = name, selected = %selected, "no encoder for selected media type");
      return error_response(StatusCode::NOT_ACCEPTABLE, "no acceptable representation");
    };

    let values: Vec<T> = match body.dematerialize().try_collect().await {
      Ok(values) => values,
      Err(err) => {
        error!(handler = name, error = %err, "response stream failed");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
      }
    };

    match encoding.encode(&values, self.config.pretty) {
      Ok(bytes) => {
        debug!(handler = name, selected = %selected, count = values.len(), "writing response");
        build_response(StatusCode::OK, &selected.to_string(), Bytes::from(bytes))
      }
      Err(err) => {
        error!(handler = name, error = %err, "failed to encode response body");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
      }
    }
  }
}

/// A JSON error body: `{"error": message, "status": code}`.
pub fn error_response(status: StatusCode, message: &str) -> Response<Bytes> {
  let body = serde_json::json!({
    "error": message,
    "status": status.as_u16(),
  });
  match serde_json::to_vec(&body) {
    Ok(bytes) => build_response(status, mime::APPLICATION_JSON.as_ref(), Bytes::from(bytes)),
    Err(_) => build_response(
      status,
      mime::TEXT_PLAIN_UTF_8.as_ref(),
      Bytes::copy_from_slice(message.as_bytes()),
    ),
  }
}

fn build_response(status: StatusCode, content_type: &str, body: Bytes) -> Response<Bytes> {
  let mut response = Response::new(body);
  *response.status_mut() = status;
  if let Ok(value) = HeaderValue::from_str(content_type) {
    response.headers_mut().insert(CONTENT_TYPE, value);
  }
  response
}
