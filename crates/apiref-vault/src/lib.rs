//! # apiref-vault
//!
//! File system stages that fold a fresh scrape into the curated reference
//! tree:
//!
//! 1. [`matcher`] drops scraped pages that already exist byte for byte
//! 2. [`pruner`] removes curated pages whose operation is gone, after confirmation
//! 3. [`renamer`] names the remaining pages and files them by route
//!
//! [`reconcile()`] runs the three in order and always clears the scratch
//! directory afterwards. All prompts go through an [`Operator`].

pub mod matcher;
pub mod operator;
pub mod pruner;
pub mod reconcile;
pub mod renamer;
pub mod report;
pub mod scratch;
pub mod walk;

pub use operator::{Console, Operator};
pub use reconcile::{reconcile, Outcome, Summary};

/// Rule printed before each block of questions.
pub const SEPARATOR: &str = "=====================================";
