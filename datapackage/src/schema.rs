//! Descriptor validation against a JSON Schema.
//!
//! The bundled base schema is parsed once per process and handed out as a
//! shared [`Arc`]; loaders and packages hold a reference to whichever schema
//! they were configured with.

use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::descriptor::Descriptor;
use crate::error::{PackageError, PackageResult};

/// Embedded base schema for Data Package descriptors.
const BASE_SCHEMA_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/data-package.json"
));

static BASE_SCHEMA: OnceLock<Arc<Schema>> = OnceLock::new();

/// A JSON Schema document used to validate descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    document: Value,
}

impl Schema {
    /// Wrap a schema document.
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    /// The bundled base schema.
    pub fn base() -> Arc<Schema> {
        BASE_SCHEMA
            .get_or_init(|| {
                let document = serde_json::from_str(BASE_SCHEMA_JSON)
                    .expect("embedded data-package schema is valid JSON");
                Arc::new(Schema::new(document))
            })
            .clone()
    }

    /// The raw schema document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// The schema's `title`, if any.
    pub fn title(&self) -> Option<&str> {
        self.document.get("title").and_then(Value::as_str)
    }

    /// Validate a package descriptor.
    ///
    /// Schema violations become `errors`. Missing recommended properties
    /// (package `name` and `title`, resource `name`) become `warnings`.
    pub fn validate(&self, descriptor: &Descriptor) -> PackageResult<ValidationReport> {
        let validator = jsonschema::options()
            .build(&self.document)
            .map_err(|e| PackageError::InvalidSchema(e.to_string()))?;

        let instance = Value::Object(descriptor.clone());
        let errors: Vec<String> = validator
            .iter_errors(&instance)
            .map(|e| e.to_string())
            .collect();

        let report = ValidationReport {
            errors,
            warnings: recommended_warnings(descriptor),
        };
        tracing::debug!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "validated descriptor"
        );
        Ok(report)
    }
}

fn recommended_warnings(descriptor: &Descriptor) -> Vec<String> {
    let mut warnings = Vec::new();

    for field in ["name", "title"] {
        if descriptor.get(field).map_or(true, Value::is_null) {
            warnings.push(format!("package is missing recommended property '{}'", field));
        }
    }

    let resources = descriptor
        .get("resources")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    for (index, resource) in resources.iter().enumerate() {
        let named = resource
            .get("name")
            .is_some_and(|name| !name.is_null());
        if resource.is_object() && !named {
            warnings.push(format!(
                "resource {} is missing recommended property 'name'",
                index
            ));
        }
    }

    warnings
}

/// Outcome of validating a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Schema violations.
    pub errors: Vec<String>,
    /// Missing recommended properties.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// True when there are no errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// True when there are neither errors nor warnings.
    pub fn is_valid_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}
