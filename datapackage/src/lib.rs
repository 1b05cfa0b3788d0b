//! Data Package descriptors for Rust
//!
//! This library loads [Data Package](https://specs.frictionlessdata.io/data-package/)
//! descriptors from in-memory JSON, local files and directories, or remote
//! URLs, resolves their resources, and gives typed access to both standard
//! and custom properties.
//!
//! ```no_run
//! use datapackage::{Package, ReqwestClient};
//!
//! let package = Package::load("https://example.com/gdp/")?;
//! println!("{:?} from {}", package.name(), package.base());
//!
//! let http = ReqwestClient::new()?;
//! for resource in package.resources() {
//!     let data = resource.data(&http)?;
//!     println!("{}: {} bytes", resource.location(), data.to_text().len());
//! }
//! # Ok::<(), datapackage::PackageError>(())
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod fetch;
pub mod location;
pub mod package;
pub mod resource;
pub mod schema;

pub use descriptor::{Descriptor, Properties};
pub use error::{PackageError, PackageResult};
pub use fetch::{FetchError, HttpClient, ReqwestClient};
pub use location::Base;
pub use package::{Package, PackageLoader, PackageOptions, Reference};
pub use resource::{Resource, ResourceData, ResourceKind, ResourceResolver};
pub use schema::{Schema, ValidationReport};
