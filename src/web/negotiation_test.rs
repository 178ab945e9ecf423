//! # Content Negotiation Test Suite
//!
//! Covers media type selection from the acceptable and producible lists,
//! including the producible attribute override and the binary fallback.

use crate::error::NegotiationError;
use crate::web::exchange::ServerWebExchange;
use crate::web::media_type::MediaType;
use crate::web::negotiation::ContentNegotiator;
use crate::web::resolver::{
  FixedContentTypeResolver, ParameterContentTypeResolver, RequestedContentTypeResolver,
};
use http::header::ACCEPT;
use http::{Method, Request, Uri};
use std::sync::Arc;

fn exchange_accepting(accept: &str) -> ServerWebExchange {
  let request = Request::get("/").header(ACCEPT, accept).body(()).unwrap();
  ServerWebExchange::from(request)
}

fn images() -> Vec<MediaType> {
  vec![MediaType::image_jpeg(), MediaType::image_gif(), MediaType::image_png()]
}

#[test]
fn test_fixed_resolver_preference_is_selected() {
  let negotiator = ContentNegotiator::new(FixedContentTypeResolver::single(MediaType::image_gif()));
  let exchange = ServerWebExchange::new(Method::GET, Uri::from_static("/"));

  let selected = negotiator.select_media_type(&exchange, &images()).unwrap();
  assert_eq!(selected, Some(MediaType::image_gif()));
}

#[test]
fn test_producible_attribute_overrides_supported_types() {
  let mut exchange = ServerWebExchange::new(Method::GET, Uri::from_static("/"));
  exchange.set_producible_media_types(vec![MediaType::image_gif()]);

  let selected = ContentNegotiator::default()
    .select_media_type(&exchange, &images())
    .unwrap();
  assert_eq!(selected, Some(MediaType::image_gif()));
}

#[test]
fn test_sorts_by_quality() {
  let exchange = exchange_accepting("text/plain; q=0.5, application/json");
  let producible = vec![MediaType::text_plain(), MediaType::application_json_utf8()];

  let selected = ContentNegotiator::default()
    .select_media_type(&exchange, &producible)
    .unwrap()
    .unwrap();
  assert_eq!(selected, MediaType::application_json_utf8());
  assert_eq!(selected.charset(), Some("UTF-8"));
}

#[test]
fn test_charset_from_accept_header_wins() {
  let exchange = exchange_accepting("text/plain; charset=ISO-8859-1");
  let producible = vec![MediaType::text_plain().with_parameter("charset", "UTF-8")];

  let selected = ContentNegotiator::default()
    .select_media_type(&exchange, &producible)
    .unwrap()
    .unwrap();
  assert_eq!(selected, MediaType::text_plain().with_parameter("charset", "ISO-8859-1"));
}

#[test]
fn test_all_producible_falls_back_to_octet_stream() {
  let exchange = ServerWebExchange::new(Method::GET, Uri::from_static("/"));
  let selected = ContentNegotiator::default()
    .select_media_type(&exchange, &[MediaType::all()])
    .unwrap();
  assert_eq!(selected, Some(MediaType::application_octet_stream()));
}

#[test]
fn test_application_wildcard_falls_back_to_octet_stream() {
  let exchange = exchange_accepting("application/*");
  let selected = ContentNegotiator::default()
    .select_media_type(&exchange, &[MediaType::application_all()])
    .unwrap();
  assert_eq!(selected, Some(MediaType::application_octet_stream()));
}

#[test]
fn test_non_application_wildcard_selects_nothing() {
  let exchange = exchange_accepting("text/*");
  let selected = ContentNegotiator::default()
    .select_media_type(&exchange, &[MediaType::parse("text/*").unwrap()])
    .unwrap();
  assert_eq!(selected, None);
}

#[test]
fn test_nothing_acceptable() {
  let exchange = exchange_accepting("text/html");
  let selected = ContentNegotiator::default()
    .select_media_type(&exchange, &[MediaType::application_json()])
    .unwrap();
  assert_eq!(selected, None);
}

#[test]
fn test_wildcard_accept_picks_first_producible() {
  let exchange = exchange_accepting("image/*");
  let selected = ContentNegotiator::default()
    .select_media_type(&exchange, &images())
    .unwrap();
  assert_eq!(selected, Some(MediaType::image_jpeg()));
}

#[test]
fn test_higher_quality_accept_wins_over_order() {
  let exchange = exchange_accepting("image/jpeg;q=0.2, image/png");
  let selected = ContentNegotiator::default()
    .select_media_type(&exchange, &images())
    .unwrap();
  assert_eq!(selected, Some(MediaType::image_png()));
}

#[test]
fn test_selected_type_drops_quality() {
  let exchange = exchange_accepting("application/json;q=0.9");
  let selected = ContentNegotiator::default()
    .select_media_type(&exchange, &[MediaType::application_json()])
    .unwrap()
    .unwrap();
  assert_eq!(selected.parameter("q"), None);
}

#[test]
fn test_acceptable_defaults_to_all() {
  let exchange = ServerWebExchange::new(Method::GET, Uri::from_static("/"));
  let acceptable = ContentNegotiator::default()
    .acceptable_media_types(&exchange)
    .unwrap();
  assert_eq!(acceptable, vec![MediaType::all()]);
}

#[test]
fn test_resolver_errors_propagate() {
  let resolver = ParameterContentTypeResolver::new([("json", MediaType::application_json())]);
  let negotiator = ContentNegotiator::new(resolver);
  let request = Request::get("/?format=csv").body(()).unwrap();

  let result = negotiator.select_media_type(&ServerWebExchange::from(request), &images());
  assert_eq!(
    result,
    Err(NegotiationError::UnknownFormatKey {
      key: "csv".to_string()
    })
  );
}

#[test]
fn test_with_resolver_shares_instance() {
  let resolver: Arc<dyn RequestedContentTypeResolver> =
    Arc::new(FixedContentTypeResolver::single(MediaType::image_png()));
  let negotiator = ContentNegotiator::with_resolver(Arc::clone(&resolver));
  assert!(Arc::ptr_eq(negotiator.resolver(), &resolver));
}

#[test]
fn test_accept_without_subtype_is_rejected() {
  let exchange = exchange_accepting("text/");
  let result = ContentNegotiator::default().select_media_type(&exchange, &[MediaType::text_plain()]);
  assert!(matches!(result, Err(NegotiationError::InvalidMediaType { .. })));
}
