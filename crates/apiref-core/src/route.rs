//! Route descriptors embedded in generated reference pages.
//!
//! The scraper writes every page with a one-line header followed by the
//! operation it documents:
//! ```text
//! ---
//! openapi: get /api/widgets/{id}
//! ---
//! ```
//! Only the second line is read. The first two path segments (the empty
//! root and the API prefix such as `api`) carry no naming information.

use std::fmt;
use std::path::Path;

use crate::error::RouteError;

/// Prefix the scraper puts in front of the route on the second line.
pub const ROUTE_LINE_PREFIX: &str = "openapi: ";

/// Index of the first path segment that names a resource.
pub const RESOURCE_SEGMENT: usize = 2;

/// HTTP verb of a documented operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    /// Anything else the scraper emits, kept verbatim.
    Other(String),
}

impl Verb {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for Verb {
    fn from(s: &str) -> Self {
        match s {
            "get" => Self::Get,
            "post" => Self::Post,
            "put" => Self::Put,
            "patch" => Self::Patch,
            "delete" => Self::Delete,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `<verb> <path>` route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    verb: Verb,
    path: String,
}

impl RouteDescriptor {
    /// Parse a route such as `get /api/widgets/{id}`.
    ///
    /// The line is split on the first space only, so the path keeps any
    /// further spaces.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnexpectedFormat`] if there is no space,
    /// [`RouteError::TooFewSegments`] if the path has no resource segment, and
    /// [`RouteError::UnsafeSegment`] if a resource segment is `.` or `..` or
    /// contains a backslash.
    pub fn parse(route: &str) -> Result<Self, RouteError> {
        let (verb, path) = route
            .split_once(' ')
            .ok_or_else(|| RouteError::UnexpectedFormat(route.to_string()))?;

        if path.split('/').count() <= RESOURCE_SEGMENT {
            return Err(RouteError::TooFewSegments {
                route: route.to_string(),
            });
        }

        // resource segments become directories under the target root
        if let Some(segment) = path
            .split('/')
            .skip(RESOURCE_SEGMENT)
            .find(|s| matches!(*s, "." | "..") || s.contains('\\'))
        {
            return Err(RouteError::UnsafeSegment {
                route: route.to_string(),
                segment: segment.to_string(),
            });
        }

        Ok(Self {
            verb: Verb::from(verb),
            path: path.to_string(),
        })
    }

    /// Read the route descriptor out of a page's content.
    ///
    /// `origin` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingRouteLine`] if the content has fewer than
    /// two lines, otherwise whatever [`RouteDescriptor::parse`] returns.
    pub fn from_content(content: &str, origin: &Path) -> Result<Self, RouteError> {
        let line = content
            .lines()
            .nth(1)
            .ok_or_else(|| RouteError::MissingRouteLine {
                path: origin.to_path_buf(),
            })?;
        Self::parse(line.strip_prefix(ROUTE_LINE_PREFIX).unwrap_or(line))
    }

    pub fn verb(&self) -> &Verb {
        &self.verb
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path segments from the resource onward.
    pub fn resource_segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').skip(RESOURCE_SEGMENT)
    }

    /// The resource the route operates on, e.g. `widgets`.
    pub fn resource(&self) -> &str {
        // parse() guarantees the segment exists
        self.resource_segments().next().unwrap_or_default()
    }

    /// Whether the path addresses a single item through a `{param}` segment.
    pub fn has_placeholder(&self) -> bool {
        self.path.contains('{')
    }

    /// Whether the path goes through a literal `/batch/` segment.
    pub fn is_batch(&self) -> bool {
        self.path.contains("/batch/")
    }
}

impl fmt::Display for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.path)
    }
}
