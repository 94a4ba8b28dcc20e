//! express-gen library
//!
//! Scaffolds Express-style web application projects: resolves CLI options
//! into a configuration, builds a manifest of filesystem actions from it,
//! and materializes that manifest into the destination directory.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod generate;
pub mod manifest;
pub mod options;
pub mod templates;

pub use generate::{Generator, Outcome};
pub use manifest::Manifest;
pub use options::{Cli, Config, CssEngine, Flavor, ViewEngine};
