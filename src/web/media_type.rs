//! # Media Types
//!
//! [`MediaType`] is a parsed `type/subtype;param=value` media type, as found in
//! `Accept` and `Content-Type` headers. Parsing is delegated to the `mime` crate;
//! `MediaType` adds the comparison rules content negotiation needs: quality
//! values, wildcard inclusion and compatibility, and specificity ordering.
//!
//! ## Example
//!
//! ```rust
//! use fluxweave::web::MediaType;
//!
//! let accepted = MediaType::parse_list("text/plain; q=0.5, application/json").unwrap();
//! assert_eq!(accepted[0].quality(), 0.5);
//! assert!(MediaType::all().includes(&accepted[1]));
//! ```

use crate::error::NegotiationError;
use mime::Mime;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const WILDCARD: &str = "*";
const PARAM_QUALITY_FACTOR: &str = "q";
const PARAM_CHARSET: &str = "charset";

/// A media type with optional parameters.
///
/// Type, subtype and parameter names are stored lowercase. Parameter values keep
/// their original case, except that `charset` values compare case-insensitively.
#[derive(Debug, Clone)]
pub struct MediaType {
  type_: String,
  subtype: String,
  parameters: Vec<(String, String)>,
}

impl MediaType {
  /// Creates a media type without parameters.
  pub fn new(type_: &str, subtype: &str) -> Self {
    Self {
      type_: type_.to_ascii_lowercase(),
      subtype: subtype.to_ascii_lowercase(),
      parameters: Vec::new(),
    }
  }

  /// `*/*`
  pub fn all() -> Self {
    Self::from(mime::STAR_STAR)
  }

  /// `application/*`
  pub fn application_all() -> Self {
    Self::new("application", WILDCARD)
  }

  /// `application/json`
  pub fn application_json() -> Self {
    Self::from(mime::APPLICATION_JSON)
  }

  /// `application/json;charset=UTF-8`
  pub fn application_json_utf8() -> Self {
    Self::application_json().with_parameter(PARAM_CHARSET, "UTF-8")
  }

  /// `application/x-ndjson`
  pub fn application_ndjson() -> Self {
    Self::new("application", "x-ndjson")
  }

  /// `application/octet-stream`
  pub fn application_octet_stream() -> Self {
    Self::from(mime::APPLICATION_OCTET_STREAM)
  }

  /// `application/xml`
  pub fn application_xml() -> Self {
    Self::new("application", "xml")
  }

  /// `image/gif`
  pub fn image_gif() -> Self {
    Self::from(mime::IMAGE_GIF)
  }

  /// `image/jpeg`
  pub fn image_jpeg() -> Self {
    Self::from(mime::IMAGE_JPEG)
  }

  /// `image/png`
  pub fn image_png() -> Self {
    Self::from(mime::IMAGE_PNG)
  }

  /// `text/html`
  pub fn text_html() -> Self {
    Self::from(mime::TEXT_HTML)
  }

  /// `text/plain`
  pub fn text_plain() -> Self {
    Self::from(mime::TEXT_PLAIN)
  }

  /// Parses a single media type.
  ///
  /// A bare `*` is accepted as `*/*`.
  ///
  /// # Errors
  ///
  /// * [`NegotiationError::InvalidMediaType`] for syntax errors, an empty type or
  ///   subtype such as `text/`, or a wildcard type with a concrete subtype such as
  ///   `*/json`.
  /// * [`NegotiationError::InvalidQuality`] for a `q` outside `0..=1`.
  pub fn parse(value: &str) -> Result<Self, NegotiationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(invalid(value, "media type must not be empty"));
    }
    if trimmed == WILDCARD {
      return Ok(Self::all());
    }

    let mime = trimmed
      .parse::<Mime>()
      .map_err(|err| invalid(value, &err.to_string()))?;
    let media_type = Self::from(mime);

    if media_type.type_.is_empty() {
      return Err(invalid(value, "type must not be empty"));
    }
    if media_type.subtype.is_empty() {
      return Err(invalid(value, "subtype must not be empty"));
    }
    if media_type.is_wildcard_type() && media_type.subtype != WILDCARD {
      return Err(invalid(value, "wildcard type is legal only in '*/*'"));
    }
    if let Some(q) = media_type.parameter(PARAM_QUALITY_FACTOR) {
      match q.parse::<f64>() {
        Ok(quality) if (0.0..=1.0).contains(&quality) => {}
        _ => {
          return Err(NegotiationError::InvalidQuality {
            media_type: trimmed.to_string(),
            value: q.to_string(),
          });
        }
      }
    }
    Ok(media_type)
  }

  /// Parses a comma-separated list such as an `Accept` header value.
  ///
  /// Commas inside quoted parameter values do not split. Empty elements are
  /// ignored, so an empty input yields an empty list.
  pub fn parse_list(value: &str) -> Result<Vec<Self>, NegotiationError> {
    tokenize(value)
      .into_iter()
      .filter(|token| !token.trim().is_empty())
      .map(Self::parse)
      .collect()
  }

  /// The primary type, e.g. `text`.
  pub fn type_(&self) -> &str {
    &self.type_
  }

  /// The subtype including any `+suffix`, e.g. `svg+xml`.
  pub fn subtype(&self) -> &str {
    &self.subtype
  }

  /// The structured-syntax suffix, e.g. `xml` for `image/svg+xml`.
  pub fn subtype_suffix(&self) -> Option<&str> {
    self
      .subtype
      .split_once('+')
      .map(|(_, suffix)| suffix)
      .filter(|suffix| !suffix.is_empty())
  }

  /// `type/subtype` without parameters.
  pub fn essence(&self) -> String {
    format!("{}/{}", self.type_, self.subtype)
  }

  /// Looks up a parameter value by (case-insensitive) name.
  pub fn parameter(&self, name: &str) -> Option<&str> {
    self
      .parameters
      .iter()
      .find(|(key, _)| key.eq_ignore_ascii_case(name))
      .map(|(_, value)| value.as_str())
  }

  /// All parameters, in declaration order.
  pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .parameters
      .iter()
      .map(|(key, value)| (key.as_str(), value.as_str()))
  }

  /// Number of parameters, including `q`.
  pub fn param_count(&self) -> usize {
    self.parameters.len()
  }

  /// The `charset` parameter, if any.
  pub fn charset(&self) -> Option<&str> {
    self.parameter(PARAM_CHARSET)
  }

  /// Returns a copy with `name` set to `value`, replacing any existing value.
  #[must_use]
  pub fn with_parameter(mut self, name: &str, value: &str) -> Self {
    let name = name.to_ascii_lowercase();
    match self.parameters.iter_mut().find(|(key, _)| *key == name) {
      Some((_, existing)) => *existing = value.to_string(),
      None => self.parameters.push((name, value.to_string())),
    }
    self
  }

  /// Returns a copy without the parameter `name`.
  #[must_use]
  pub fn without_parameter(mut self, name: &str) -> Self {
    self.parameters.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    self
  }

  /// The quality factor, `1.0` when no `q` parameter is present.
  pub fn quality(&self) -> f64 {
    self
      .parameter(PARAM_QUALITY_FACTOR)
      .and_then(|q| q.parse::<f64>().ok())
      .unwrap_or(1.0)
  }

  /// Returns a copy with the given quality factor, clamped to `0..=1`.
  #[must_use]
  pub fn with_quality(self, quality: f64) -> Self {
    let quality = quality.clamp(0.0, 1.0);
    self.with_parameter(PARAM_QUALITY_FACTOR, &quality.to_string())
  }

  /// Returns a copy without the `q` parameter.
  #[must_use]
  pub fn without_quality(self) -> Self {
    self.without_parameter(PARAM_QUALITY_FACTOR)
  }

  /// Returns a copy carrying `other`'s `q` parameter, if `other` has one.
  #[must_use]
  pub fn copy_quality_value(&self, other: &MediaType) -> Self {
    match other.parameter(PARAM_QUALITY_FACTOR) {
      Some(q) => self.clone().with_parameter(PARAM_QUALITY_FACTOR, q),
      None => self.clone(),
    }
  }

  /// Returns `true` for `*/*`.
  pub fn is_wildcard_type(&self) -> bool {
    self.type_ == WILDCARD
  }

  /// Returns `true` for `*` and `*+suffix` subtypes.
  pub fn is_wildcard_subtype(&self) -> bool {
    self.subtype == WILDCARD || self.subtype.starts_with("*+")
  }

  /// Returns `true` if neither the type nor the subtype is a wildcard.
  pub fn is_concrete(&self) -> bool {
    !self.is_wildcard_type() && !self.is_wildcard_subtype()
  }

  /// Compares type and subtype only, ignoring parameters.
  pub fn equals_type_and_subtype(&self, other: &MediaType) -> bool {
    self.type_ == other.type_ && self.subtype == other.subtype
  }

  /// Returns `true` if this media type includes `other`.
  ///
  /// Inclusion is asymmetric: `text/*` includes `text/plain`, not the reverse.
  pub fn includes(&self, other: &MediaType) -> bool {
    if self.is_wildcard_type() {
      return true;
    }
    if self.type_ != other.type_ {
      return false;
    }
    if self.subtype == other.subtype {
      return true;
    }
    if !self.is_wildcard_subtype() {
      return false;
    }
    match self.subtype.split_once('+') {
      // `text/*` includes every text subtype
      None => true,
      // `application/*+xml` includes `application/soap+xml`
      Some((prefix, suffix)) => prefix == WILDCARD && other.subtype_suffix() == Some(suffix),
    }
  }

  /// Returns `true` if either media type includes the other.
  pub fn is_compatible_with(&self, other: &MediaType) -> bool {
    if self.is_wildcard_type() || other.is_wildcard_type() {
      return true;
    }
    if self.type_ != other.type_ {
      return false;
    }
    if self.subtype == other.subtype {
      return true;
    }
    if !self.is_wildcard_subtype() && !other.is_wildcard_subtype() {
      return false;
    }
    if self.subtype == WILDCARD || other.subtype == WILDCARD {
      return true;
    }

    let this_suffix = self.subtype_suffix();
    let other_suffix = other.subtype_suffix();
    if self.is_wildcard_subtype() {
      if let Some(suffix) = this_suffix {
        return suffix == other.subtype || Some(suffix) == other_suffix;
      }
    } else if let Some(suffix) = other_suffix {
      return self.subtype == suffix || this_suffix == Some(suffix);
    }
    false
  }

  /// Orders two media types by specificity, most specific first.
  ///
  /// Concrete types come before wildcards. Media types of different types, or of
  /// the same type with different concrete subtypes, are unordered (`Equal`).
  /// Media types of the same type and subtype are ordered by quality, then by
  /// parameter count.
  pub fn specificity_order(a: &MediaType, b: &MediaType) -> Ordering {
    match compare_wildcards(a, b) {
      Some(ordering) => ordering,
      None => compare_quality(a, b).then_with(|| compare_param_count(a, b)),
    }
  }

  /// Orders two media types by quality, highest first, then by specificity.
  pub fn quality_order(a: &MediaType, b: &MediaType) -> Ordering {
    compare_quality(a, b).then_with(|| match compare_wildcards(a, b) {
      Some(ordering) => ordering,
      None => compare_param_count(a, b),
    })
  }

  /// Sorts media types by specificity, breaking ties by quality.
  ///
  /// The sort is stable. It is an insertion sort because the specificity order is
  /// partial: unrelated media types compare `Equal` without being
  /// interchangeable.
  pub fn sort_by_specificity_and_quality(media_types: &mut [MediaType]) {
    for i in 1..media_types.len() {
      let mut j = i;
      while j > 0
        && Self::specificity_order(&media_types[j - 1], &media_types[j])
          .then_with(|| Self::quality_order(&media_types[j - 1], &media_types[j]))
          == Ordering::Greater
      {
        media_types.swap(j - 1, j);
        j -= 1;
      }
    }
  }

  /// Converts into a `mime::Mime`.
  ///
  /// # Errors
  ///
  /// Fails if a parameter value cannot be represented in `mime`'s syntax.
  pub fn to_mime(&self) -> Result<Mime, NegotiationError> {
    let rendered = self.to_string();
    rendered
      .parse::<Mime>()
      .map_err(|err| invalid(&rendered, &err.to_string()))
  }
}

impl From<Mime> for MediaType {
  fn from(mime: Mime) -> Self {
    let subtype = match mime.suffix() {
      Some(suffix) => format!("{}+{}", mime.subtype(), suffix),
      None => mime.subtype().to_string(),
    };
    let parameters = mime
      .params()
      .map(|(name, value)| (name.as_str().to_ascii_lowercase(), unquote(value.as_str())))
      .collect();
    Self {
      type_: mime.type_().as_str().to_ascii_lowercase(),
      subtype: subtype.to_ascii_lowercase(),
      parameters,
    }
  }
}

impl FromStr for MediaType {
  type Err = NegotiationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

impl fmt::Display for MediaType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.type_, self.subtype)?;
    for (name, value) in &self.parameters {
      if is_token(value) {
        write!(f, ";{}={}", name, value)?;
      } else {
        write!(f, ";{}=\"{}\"", name, value.replace('"', "\\\""))?;
      }
    }
    Ok(())
  }
}

impl PartialEq for MediaType {
  fn eq(&self, other: &Self) -> bool {
    self.equals_type_and_subtype(other)
      && self.parameters.len() == other.parameters.len()
      && self.parameters.iter().all(|(name, value)| {
        other.parameter(name).is_some_and(|other_value| {
          if name == PARAM_CHARSET {
            value.eq_ignore_ascii_case(other_value)
          } else {
            value == other_value
          }
        })
      })
  }
}

impl Eq for MediaType {}

// Parameters are left out so that equal values always hash equal.
impl Hash for MediaType {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_.hash(state);
    self.subtype.hash(state);
  }
}

/// `Some(ordering)` when wildcards or differing types/subtypes decide the order
/// on their own, `None` when both share the same concrete type and subtype.
fn compare_wildcards(a: &MediaType, b: &MediaType) -> Option<Ordering> {
  if a.is_wildcard_type() && !b.is_wildcard_type() {
    return Some(Ordering::Greater);
  }
  if b.is_wildcard_type() && !a.is_wildcard_type() {
    return Some(Ordering::Less);
  }
  if a.type_ != b.type_ {
    return Some(Ordering::Equal);
  }
  if a.is_wildcard_subtype() && !b.is_wildcard_subtype() {
    return Some(Ordering::Greater);
  }
  if b.is_wildcard_subtype() && !a.is_wildcard_subtype() {
    return Some(Ordering::Less);
  }
  if a.subtype != b.subtype {
    return Some(Ordering::Equal);
  }
  None
}

fn compare_quality(a: &MediaType, b: &MediaType) -> Ordering {
  b.quality().total_cmp(&a.quality())
}

fn compare_param_count(a: &MediaType, b: &MediaType) -> Ordering {
  b.param_count().cmp(&a.param_count())
}

fn invalid(value: &str, reason: &str) -> NegotiationError {
  NegotiationError::InvalidMediaType {
    value: value.to_string(),
    reason: reason.to_string(),
  }
}

fn unquote(value: &str) -> String {
  value
    .strip_prefix('"')
    .and_then(|inner| inner.strip_suffix('"'))
    .map(|inner| inner.replace("\\\"", "\""))
    .unwrap_or_else(|| value.to_string())
}

fn is_token(value: &str) -> bool {
  !value.is_empty()
    && value.bytes().all(|b| {
      b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
    })
}

// Splits on commas that are not inside a quoted string.
fn tokenize(value: &str) -> Vec<&str> {
  let mut tokens = Vec::new();
  let mut in_quotes = false;
  let mut escaped = false;
  let mut start = 0;
  for (i, c) in value.char_indices() {
    match c {
      _ if escaped => escaped = false,
      '\\' if in_quotes => escaped = true,
      '"' => in_quotes = !in_quotes,
      ',' if !in_quotes => {
        tokens.push(&value[start..i]);
        start = i + 1;
      }
      _ => {}
    }
  }
  tokens.push(&value[start..]);
  tokens
}
