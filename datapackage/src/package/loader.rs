//! Package loading from objects, paths, directories and URLs.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use super::core::Package;
use super::options::PackageOptions;
use crate::descriptor::{json_type_name, parse_descriptor, Descriptor};
use crate::error::{PackageError, PackageResult};
use crate::fetch::{HttpClient, ReqwestClient};
use crate::location::{resolve_local, resolve_reference, Base, DescriptorLocation};
use crate::resource::{Resource, ResourceResolver};
use crate::schema::Schema;

/// What a package is loaded from.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// An in-memory descriptor object.
    Descriptor(Descriptor),
    /// A file path, directory path or URL.
    Location(String),
    /// A filesystem path, used as-is even when it is not valid UTF-8.
    Path(PathBuf),
    /// Any other JSON value; always rejected.
    Other(Value),
}

impl From<Descriptor> for Reference {
    fn from(descriptor: Descriptor) -> Self {
        Reference::Descriptor(descriptor)
    }
}

impl From<Value> for Reference {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Reference::Descriptor(map),
            Value::String(location) => Reference::Location(location),
            other => Reference::Other(other),
        }
    }
}

impl From<&str> for Reference {
    fn from(location: &str) -> Self {
        Reference::Location(location.to_string())
    }
}

impl From<String> for Reference {
    fn from(location: String) -> Self {
        Reference::Location(location)
    }
}

impl From<&Path> for Reference {
    fn from(path: &Path) -> Self {
        Reference::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Reference {
    fn from(path: PathBuf) -> Self {
        Reference::Path(path)
    }
}

impl From<&PathBuf> for Reference {
    fn from(path: &PathBuf) -> Self {
        Reference::from(path.as_path())
    }
}

/// Loads packages and resolves their resources.
///
/// The loader owns the options, the schema new packages validate against,
/// and the HTTP client used for remote descriptors.
///
/// # Example
///
/// ```no_run
/// use datapackage::{PackageLoader, PackageOptions};
///
/// let loader = PackageLoader::new(
///     PackageOptions::new().with_default_filename("valid-datapackage.json"),
/// )?;
/// let package = loader.load("tests/fixtures/test-pkg")?;
/// println!("{} resources", package.resources().len());
/// # Ok::<(), datapackage::PackageError>(())
/// ```
#[derive(Clone)]
pub struct PackageLoader {
    options: PackageOptions,
    schema: Arc<Schema>,
    http: Arc<dyn HttpClient>,
}

impl fmt::Debug for PackageLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageLoader")
            .field("options", &self.options)
            .field("schema", &self.schema.title())
            .finish_non_exhaustive()
    }
}

impl PackageLoader {
    /// Create a loader with the base schema and a default HTTP client.
    pub fn new(options: PackageOptions) -> PackageResult<Self> {
        let http = ReqwestClient::new()?;
        Ok(Self::with_http_client(options, Arc::new(http)))
    }

    /// Create a loader with an explicit HTTP client.
    pub fn with_http_client(options: PackageOptions, http: Arc<dyn HttpClient>) -> Self {
        Self {
            options,
            schema: Schema::base(),
            http,
        }
    }

    /// Use `schema` for packages produced by this loader.
    pub fn with_schema(mut self, schema: Arc<Schema>) -> Self {
        self.schema = schema;
        self
    }

    pub fn options(&self) -> &PackageOptions {
        &self.options
    }

    /// The HTTP client, also usable for [`Resource::data`].
    pub fn http_client(&self) -> &dyn HttpClient {
        self.http.as_ref()
    }

    /// Load a package.
    ///
    /// - objects are used as-is with an empty base;
    /// - file paths are read and their directory becomes the base;
    /// - directories read `<dir>/<default_filename>`;
    /// - URLs are fetched; a URL naming a file is used directly, any other
    ///   URL gets `/<default_filename>` appended.
    pub fn load(&self, reference: impl Into<Reference>) -> PackageResult<Package> {
        let (descriptor, base) = match reference.into() {
            Reference::Descriptor(descriptor) => (descriptor, Base::Memory),
            Reference::Location(location) => {
                self.read_location(resolve_reference(&location, &self.options.default_filename)?)?
            }
            Reference::Path(path) => {
                self.read_location(resolve_local(&path, &self.options.default_filename)?)?
            }
            Reference::Other(value) => {
                return Err(PackageError::ReferenceNotFound(format!(
                    "unsupported reference of type {}",
                    json_type_name(&value)
                )))
            }
        };

        let resources = self.resolve_resources(&descriptor, &base)?;
        let name = descriptor.get("name").and_then(Value::as_str).unwrap_or("");
        tracing::debug!(
            name,
            base = %base,
            resources = resources.len(),
            "loaded package"
        );

        Ok(Package::from_parts(
            descriptor,
            base,
            resources,
            self.schema.clone(),
        ))
    }

    fn read_location(&self, location: DescriptorLocation) -> PackageResult<(Descriptor, Base)> {
        match location {
            DescriptorLocation::File { path, base } => {
                let bytes = fs::read(&path).map_err(|source| PackageError::Io {
                    path: path.clone(),
                    source,
                })?;
                let descriptor = parse_descriptor(&bytes, &path.display().to_string())?;
                Ok((descriptor, base))
            }
            DescriptorLocation::Remote { url, base } => {
                let bytes = self.http.get(&url)?;
                let descriptor = parse_descriptor(&bytes, &url)?;
                Ok((descriptor, base))
            }
        }
    }

    fn resolve_resources(&self, descriptor: &Descriptor, base: &Base) -> PackageResult<Vec<Resource>> {
        let entries = match descriptor.get("resources") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(PackageError::InvalidDescriptor {
                    origin: base.to_string(),
                    reason: format!("resources must be an array, found {}", json_type_name(other)),
                })
            }
        };

        let resolver = ResourceResolver::with_local(self.options.local);
        entries
            .iter()
            .map(|entry| resolver.resolve(entry, base))
            .collect()
    }
}
