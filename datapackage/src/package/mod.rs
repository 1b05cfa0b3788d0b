//! Data package loading and property access.
//!
//! # Overview
//!
//! A package is loaded from one of four reference shapes:
//!
//! | Reference            | Descriptor read from              | Base                      |
//! |----------------------|-----------------------------------|---------------------------|
//! | JSON object          | the object itself                 | `""`                      |
//! | file path            | the file                          | its directory             |
//! | directory path       | `<dir>/<default_filename>`        | the directory             |
//! | URL                  | the URL, or `<url>/<default_filename>` | URL prefix, no trailing `/` |
//!
//! Each entry of the descriptor's `resources` array is then resolved
//! against the base by [`ResourceResolver`](crate::resource::ResourceResolver).

mod core;
mod loader;
mod options;

pub use core::Package;
pub use loader::{PackageLoader, Reference};
pub use options::{PackageOptions, DEFAULT_FILENAME};
