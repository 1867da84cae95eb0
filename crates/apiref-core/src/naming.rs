//! Sidebar names and file locations derived from a route.
//!
//! A route like `get /api/user_groups/{id}` becomes the sidebar title
//! `Get User Group`, the file name `get-user-group.mdx`, and the directory
//! `<target>/user-groups/{id}`.

use std::path::{Path, PathBuf};

use crate::route::{RouteDescriptor, Verb};

/// The kind of operation a route performs, as shown in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    BatchGet,
    List,
    Create,
    Update,
    Delete,
    /// Verb without a sidebar wording.
    Unknown,
}

impl Action {
    pub fn of(route: &RouteDescriptor) -> Self {
        match route.verb() {
            Verb::Get if route.has_placeholder() => Self::Get,
            Verb::Get if route.is_batch() => Self::BatchGet,
            Verb::Get => Self::List,
            Verb::Post => Self::Create,
            Verb::Put | Verb::Patch => Self::Update,
            Verb::Delete => Self::Delete,
            Verb::Other(_) => Self::Unknown,
        }
    }

    /// Sidebar prefix, including its trailing space.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Get => "Get ",
            Self::BatchGet => "Batch Get ",
            Self::List => "List ",
            Self::Create => "Create ",
            Self::Update => "Update ",
            Self::Delete => "Delete ",
            Self::Unknown => "",
        }
    }

    /// Whether the resource name stays plural after this prefix.
    pub fn is_plural(self) -> bool {
        matches!(self, Self::BatchGet | Self::List)
    }
}

/// Default sidebar title for a route, e.g. `List Widgets`.
///
/// Singular actions drop exactly one trailing `s` from the resource. This
/// is deliberately naive: `addresses` becomes `Addresse`.
pub fn default_display_name(route: &RouteDescriptor) -> String {
    let action = Action::of(route);
    let resource = title_case(&route.resource().replace(['-', '_'], " "));
    let resource = if action.is_plural() {
        resource.as_str()
    } else {
        resource.strip_suffix('s').unwrap_or(&resource)
    };
    format!("{}{}", action.prefix(), resource)
}

/// Upper-case the first letter of every word, leaving the rest untouched.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = is_word_separator(c);
    }
    out
}

fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else if c.is_alphanumeric() {
        false
    } else {
        c.is_whitespace()
    }
}

/// File name for a chosen sidebar title: kebab-case plus extension.
pub fn file_name(display_name: &str, extension: &str) -> String {
    format!(
        "{}.{}",
        display_name.replace(' ', "-").to_lowercase(),
        extension
    )
}

/// Directory a route's page lives in: one directory per resource segment,
/// with underscores turned into hyphens.
pub fn route_directory(target_root: &Path, route: &RouteDescriptor) -> PathBuf {
    let mut dir = target_root.to_path_buf();
    for segment in route.resource_segments().filter(|s| !s.is_empty()) {
        dir.push(segment.replace('_', "-"));
    }
    dir
}
