//! The loaded package type.
//!
//! A [`Package`] holds the descriptor exactly as parsed (key order included),
//! the base its resources were resolved against, and the resolved
//! resources. Named properties are typed views over the descriptor.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use super::loader::{PackageLoader, Reference};
use super::options::PackageOptions;
use crate::descriptor::{serialize_descriptor, serialize_descriptor_pretty, Descriptor, Properties};
use crate::error::PackageResult;
use crate::location::Base;
use crate::resource::Resource;
use crate::schema::{Schema, ValidationReport};

/// A data package descriptor with its resolved resources.
///
/// # Example
///
/// ```
/// use datapackage::Package;
/// use serde_json::json;
///
/// let package = Package::load(json!({
///     "name": "test-package",
///     "resources": [{"path": "data.csv"}]
/// }))
/// .unwrap();
///
/// assert_eq!(package.name(), Some("test-package"));
/// assert_eq!(package.resources().len(), 1);
/// assert_eq!(package.base(), "");
/// assert!(package.is_local());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    descriptor: Descriptor,
    base: Base,
    resources: Vec<Resource>,
    schema: Arc<Schema>,
}

impl Default for Package {
    fn default() -> Self {
        Self::new()
    }
}

impl Package {
    /// Create an empty in-memory package validated against the base schema.
    pub fn new() -> Self {
        Self::from_parts(Descriptor::new(), Base::Memory, Vec::new(), Schema::base())
    }

    pub(crate) fn from_parts(
        descriptor: Descriptor,
        base: Base,
        resources: Vec<Resource>,
        schema: Arc<Schema>,
    ) -> Self {
        Self {
            descriptor,
            base,
            resources,
            schema,
        }
    }

    /// Load a package with default options.
    ///
    /// See [`PackageLoader::load`] for how references are resolved.
    pub fn load(reference: impl Into<Reference>) -> PackageResult<Self> {
        PackageLoader::new(PackageOptions::default())?.load(reference)
    }

    /// Replace the schema used by [`Package::validate`].
    pub fn with_schema(mut self, schema: Arc<Schema>) -> Self {
        self.schema = schema;
        self
    }

    /// The schema this package validates against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Base that relative resource paths were resolved against.
    pub fn base(&self) -> &Base {
        &self.base
    }

    /// Whether the package came from memory or the local filesystem.
    pub fn is_local(&self) -> bool {
        self.base.is_local()
    }

    /// Resources in descriptor order.
    ///
    /// Resolved once at load time; editing the `resources` property
    /// afterwards does not change this list.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// First resource with the given `name`.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name() == Some(name))
    }

    /// Validate the descriptor against this package's schema.
    pub fn validate(&self) -> PackageResult<ValidationReport> {
        self.schema.validate(&self.descriptor)
    }

    /// Whether the descriptor has no schema errors.
    pub fn is_valid(&self) -> PackageResult<bool> {
        Ok(self.validate()?.is_valid())
    }

    /// The descriptor.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The descriptor as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.descriptor.clone())
    }

    /// The descriptor as compact JSON text.
    pub fn to_json(&self) -> String {
        serialize_descriptor(&self.descriptor)
    }

    /// The descriptor as indented JSON text.
    pub fn to_json_pretty(&self) -> String {
        serialize_descriptor_pretty(&self.descriptor)
    }

    // String properties

    pub fn name(&self) -> Option<&str> {
        self.string_property("name")
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set_property("name", Value::String(name.into()));
    }

    pub fn title(&self) -> Option<&str> {
        self.string_property("title")
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.set_property("title", Value::String(title.into()));
    }

    pub fn description(&self) -> Option<&str> {
        self.string_property("description")
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.set_property("description", Value::String(description.into()));
    }

    pub fn homepage(&self) -> Option<&str> {
        self.string_property("homepage")
    }

    pub fn set_homepage(&mut self, homepage: impl Into<String>) {
        self.set_property("homepage", Value::String(homepage.into()));
    }

    pub fn version(&self) -> Option<&str> {
        self.string_property("version")
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.set_property("version", Value::String(version.into()));
    }

    pub fn image(&self) -> Option<&str> {
        self.string_property("image")
    }

    pub fn set_image(&mut self, image: impl Into<String>) {
        self.set_property("image", Value::String(image.into()));
    }

    /// Single license identifier (older descriptors).
    pub fn license(&self) -> Option<&str> {
        self.string_property("license")
    }

    pub fn set_license(&mut self, license: impl Into<String>) {
        self.set_property("license", Value::String(license.into()));
    }

    // List properties, empty when absent

    /// Keywords; non-string entries are skipped.
    pub fn keywords(&self) -> Vec<&str> {
        self.array_property("keywords")
            .iter()
            .filter_map(Value::as_str)
            .collect()
    }

    pub fn set_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| Value::String(k.into()))
            .collect();
        self.set_property("keywords", Value::Array(keywords));
    }

    pub fn sources(&self) -> &[Value] {
        self.array_property("sources")
    }

    pub fn set_sources(&mut self, sources: Vec<Value>) {
        self.set_property("sources", Value::Array(sources));
    }

    pub fn contributors(&self) -> &[Value] {
        self.array_property("contributors")
    }

    pub fn set_contributors(&mut self, contributors: Vec<Value>) {
        self.set_property("contributors", Value::Array(contributors));
    }

    pub fn licenses(&self) -> &[Value] {
        self.array_property("licenses")
    }

    pub fn set_licenses(&mut self, licenses: Vec<Value>) {
        self.set_property("licenses", Value::Array(licenses));
    }

    pub fn maintainers(&self) -> &[Value] {
        self.array_property("maintainers")
    }

    pub fn set_maintainers(&mut self, maintainers: Vec<Value>) {
        self.set_property("maintainers", Value::Array(maintainers));
    }

    pub fn publishers(&self) -> &[Value] {
        self.array_property("publishers")
    }

    pub fn set_publishers(&mut self, publishers: Vec<Value>) {
        self.set_property("publishers", Value::Array(publishers));
    }

    // Object properties, empty when absent

    /// The `dataDependencies` map of package name to version.
    pub fn data_dependencies(&self) -> Descriptor {
        self.object_property("dataDependencies")
    }

    pub fn set_data_dependencies(&mut self, dependencies: Descriptor) {
        self.set_property("dataDependencies", Value::Object(dependencies));
    }
}

impl Properties for Package {
    fn properties(&self) -> &Descriptor {
        &self.descriptor
    }

    fn properties_mut(&mut self) -> &mut Descriptor {
        &mut self.descriptor
    }
}

impl Serialize for Package {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.descriptor.serialize(serializer)
    }
}
