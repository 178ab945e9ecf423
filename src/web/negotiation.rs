//! # Content Negotiation
//!
//! [`ContentNegotiator`] picks the response media type from what the request
//! accepts and what the handler can produce.
//!
//! ## Example
//!
//! ```rust
//! use fluxweave::web::{ContentNegotiator, MediaType, ServerWebExchange};
//! use http::{Request, header::ACCEPT};
//!
//! let request = Request::get("/users")
//!     .header(ACCEPT, "text/plain; q=0.5, application/json")
//!     .body(())
//!     .unwrap();
//! let exchange = ServerWebExchange::from(request);
//!
//! let selected = ContentNegotiator::default()
//!     .select_media_type(&exchange, &[MediaType::text_plain(), MediaType::application_json()])
//!     .unwrap();
//! assert_eq!(selected, Some(MediaType::application_json()));
//! ```

use crate::error::NegotiationError;
use crate::web::exchange::ServerWebExchange;
use crate::web::media_type::MediaType;
use crate::web::resolver::{HeaderContentTypeResolver, RequestedContentTypeResolver};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Selects a response media type for an exchange.
#[derive(Debug, Clone)]
pub struct ContentNegotiator {
  resolver: Arc<dyn RequestedContentTypeResolver>,
}

impl Default for ContentNegotiator {
  fn default() -> Self {
    Self::new(HeaderContentTypeResolver)
  }
}

impl ContentNegotiator {
  /// Creates a negotiator that reads requested types through `resolver`.
  pub fn new<R>(resolver: R) -> Self
  where
    R: RequestedContentTypeResolver + 'static,
  {
    Self {
      resolver: Arc::new(resolver),
    }
  }

  /// Creates a negotiator sharing an existing resolver.
  pub fn with_resolver(resolver: Arc<dyn RequestedContentTypeResolver>) -> Self {
    Self { resolver }
  }

  /// The configured resolver.
  pub fn resolver(&self) -> &Arc<dyn RequestedContentTypeResolver> {
    &self.resolver
  }

  /// Media types the request accepts. No stated preference means `*/*`.
  pub fn acceptable_media_types(
    &self,
    exchange: &ServerWebExchange,
  ) -> Result<Vec<MediaType>, NegotiationError> {
    let media_types = self.resolver.resolve_media_types(exchange)?;
    if media_types.is_empty() {
      Ok(vec![MediaType::all()])
    } else {
      Ok(media_types)
    }
  }

  /// Media types the handler can produce. The exchange's
  /// [`ProducibleMediaTypes`](crate::web::ProducibleMediaTypes) attribute takes
  /// precedence over `supported`.
  pub fn producible_media_types(
    &self,
    exchange: &ServerWebExchange,
    supported: &[MediaType],
  ) -> Vec<MediaType> {
    match exchange.producible_media_types() {
      Some(producible) if !producible.is_empty() => producible.to_vec(),
      _ => supported.to_vec(),
    }
  }

  /// Selects the media type to write the response in.
  ///
  /// Every compatible pair of acceptable and producible types contributes the
  /// more specific of the two, carrying the acceptable side's quality. The
  /// candidates are ranked by specificity, then quality, and the first concrete
  /// one wins, with its quality removed. If a `*/*` or `application/*` candidate
  /// ranks first, the result is `application/octet-stream`.
  ///
  /// # Returns
  ///
  /// `None` if nothing acceptable can be produced.
  ///
  /// # Errors
  ///
  /// Returns a [`NegotiationError`] if the requested types cannot be resolved.
  pub fn select_media_type(
    &self,
    exchange: &ServerWebExchange,
    supported: &[MediaType],
  ) -> Result<Option<MediaType>, NegotiationError> {
    let acceptable = self.acceptable_media_types(exchange)?;
    let producible = self.producible_media_types(exchange, supported);

    let mut compatible: Vec<MediaType> = Vec::new();
    for accepted in &acceptable {
      for produced in &producible {
        if accepted.is_compatible_with(produced) {
          let candidate = more_specific(accepted, &produced.copy_quality_value(accepted));
          if !compatible.contains(&candidate) {
            compatible.push(candidate);
          }
        }
      }
    }
    MediaType::sort_by_specificity_and_quality(&mut compatible);

    let all = MediaType::all();
    let application_all = MediaType::application_all();
    for candidate in compatible {
      if candidate.is_concrete() {
        let selected = candidate.without_quality();
        debug!(accept = ?acceptable, selected = %selected, "selected media type");
        return Ok(Some(selected));
      }
      if candidate.equals_type_and_subtype(&all) || candidate.equals_type_and_subtype(&application_all) {
        debug!(accept = ?acceptable, "no concrete media type, falling back to binary");
        return Ok(Some(MediaType::application_octet_stream()));
      }
    }

    debug!(accept = ?acceptable, producible = ?producible, "no acceptable media type");
    Ok(None)
  }
}

fn more_specific(acceptable: &MediaType, producible: &MediaType) -> MediaType {
  if MediaType::specificity_order(acceptable, producible) != Ordering::Greater {
    acceptable.clone()
  } else {
    producible.clone()
  }
}
