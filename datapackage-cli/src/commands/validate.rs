//! Validate command - check a package against its schema.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use datapackage::descriptor::parse_descriptor;
use datapackage::{Schema, ValidationReport};
use serde_json::Value;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the validate command.
pub struct ValidateArgs {
    pub reference: String,
    pub schema: Option<PathBuf>,
    pub strict: bool,
}

/// Run the validate command.
pub fn run(runner: &CliRunner, args: ValidateArgs) -> Result<(), CliError> {
    let mut package = runner.load(&args.reference)?;
    if let Some(path) = &args.schema {
        package = package.with_schema(Arc::new(load_schema(path)?));
    }

    let report = package.validate()?;
    print_report(&report);

    let passed = if args.strict {
        report.is_valid_strict()
    } else {
        report.is_valid()
    };
    if passed {
        println!("Package is valid.");
        Ok(())
    } else {
        Err(CliError::ValidationFailed {
            errors: report.errors.len(),
            warnings: report.warnings.len(),
        })
    }
}

fn load_schema(path: &Path) -> Result<Schema, CliError> {
    let bytes = fs::read(path).map_err(|e| {
        CliError::InvalidArgument(format!("failed to read schema {}: {}", path.display(), e))
    })?;
    let document = parse_descriptor(&bytes, &path.display().to_string())?;
    Ok(Schema::new(Value::Object(document)))
}

fn print_report(report: &ValidationReport) {
    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for error in &report.errors {
            println!("  - {}", error);
        }
    }
    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
    }
}
