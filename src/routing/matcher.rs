//! Route matching logic.
//!
//! # Responsibilities
//! - Compile path templates ("/api/profile/:id", "*") into segment lists
//! - Match request paths segment by segment, binding named parameters
//! - Match request methods against a route's method filter
//!
//! # Design Decisions
//! - Path matching is case-sensitive and exact on segment count
//! - A `:name` segment binds any non-empty path segment
//! - `*` is a whole-pattern wildcard only
//! - Request segments are percent-decoded after splitting, so `%2F` never
//!   adds a segment; undecodable segments are matched raw
//! - No regex; matching is a single pass over the segments

use std::borrow::Cow;

use axum::http::Method;
use percent_encoding::percent_decode_str;
use thiserror::Error;

/// Template of the catch-all pattern.
pub const CATCH_ALL: &str = "*";

/// Error raised when a route template cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("route pattern `{0}` must start with '/'")]
    MissingLeadingSlash(String),

    #[error("route pattern `{0}` has a parameter without a name")]
    EmptyParameter(String),

    #[error("route pattern `{pattern}` binds `{name}` more than once")]
    DuplicateParameter { pattern: String, name: String },

    #[error("route pattern `{0}` uses '*' outside a catch-all")]
    MisplacedWildcard(String),
}

/// Which request methods a route answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodFilter {
    /// GET, and HEAD by extension.
    Get,
    Post,
    /// Any method.
    All,
}

impl MethodFilter {
    /// Returns true if a request with `method` may use this route.
    pub fn accepts(&self, method: &Method) -> bool {
        match self {
            MethodFilter::Get => *method == Method::GET || *method == Method::HEAD,
            MethodFilter::Post => *method == Method::POST,
            MethodFilter::All => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Path parameters bound while matching, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    /// Look up a bound parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A compiled route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    template: String,
    segments: Option<Vec<Segment>>,
}

impl PathPattern {
    /// Compile a template. `*` compiles to the catch-all pattern.
    pub fn parse(template: &str) -> Result<Self, PatternError> {
        if template == CATCH_ALL {
            return Ok(Self {
                template: template.to_string(),
                segments: None,
            });
        }

        let rest = template
            .strip_prefix('/')
            .ok_or_else(|| PatternError::MissingLeadingSlash(template.to_string()))?;

        let mut segments = Vec::new();
        for raw in split_segments(rest) {
            if raw.contains('*') {
                return Err(PatternError::MisplacedWildcard(template.to_string()));
            }
            match raw.strip_prefix(':') {
                Some("") => return Err(PatternError::EmptyParameter(template.to_string())),
                Some(name) => {
                    let taken = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                    if taken {
                        return Err(PatternError::DuplicateParameter {
                            pattern: template.to_string(),
                            name: name.to_string(),
                        });
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(raw.to_string())),
            }
        }

        Ok(Self {
            template: template.to_string(),
            segments: Some(segments),
        })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn is_catch_all(&self) -> bool {
        self.segments.is_none()
    }

    /// Match a request path, returning the bound parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let Some(segments) = &self.segments else {
            return Some(PathParams::default());
        };

        let rest = path.strip_prefix('/')?;
        let parts: Vec<&str> = split_segments(rest).collect();
        if parts.len() != segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (segment, part) in segments.iter().zip(parts) {
            let part = decode_segment(part);
            match segment {
                Segment::Literal(literal) if *literal == part => {}
                Segment::Param(name) if !part.is_empty() => {
                    params.push((name.clone(), part.into_owned()));
                }
                _ => return None,
            }
        }
        Some(PathParams(params))
    }
}

/// Split the part of a path after its leading '/'.
///
/// The root path has no segments; every other '/' starts a new (possibly
/// empty) segment, so "/a/" yields ["a", ""].
fn split_segments(rest: &str) -> impl Iterator<Item = &str> {
    let skip = rest.is_empty();
    rest.split('/').filter(move |_| !skip)
}

/// Percent-decode one path segment, keeping it raw if it is not valid UTF-8
/// once decoded.
fn decode_segment(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8().unwrap_or(Cow::Borrowed(raw))
}
