//! # apiref-core
//!
//! Core types for reconciling scraped API reference pages with a curated
//! documentation tree.
//!
//! - [`RouteDescriptor`] — the `<verb> <path>` line embedded in each page
//! - [`naming`] — sidebar titles, file names, and directories derived from a route
//! - [`ContentDigest`] — byte-identity of pages
//! - [`ReconcileConfig`] — directories and protected pages for a run
//! - Error hierarchy ([`ApirefError`], [`RouteError`])

pub mod config;
pub mod digest;
pub mod error;
pub mod naming;
pub mod route;

pub use config::ReconcileConfig;
pub use digest::ContentDigest;
pub use error::{ApirefError, Result, RouteError};
pub use route::{RouteDescriptor, Verb};
