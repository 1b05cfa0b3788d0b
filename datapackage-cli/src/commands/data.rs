//! Data command - print a resource's data.

use std::io::{self, Write};

use datapackage::{Package, Resource};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the data command.
///
/// `selector` is a resource name or a zero-based index.
pub fn run(runner: &CliRunner, reference: &str, selector: &str) -> Result<(), CliError> {
    let package = runner.load(reference)?;
    let resource = select_resource(&package, selector)?;

    match resource.data(runner.http())? {
        datapackage::ResourceData::Inline(value) => println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        ),
        datapackage::ResourceData::Bytes(bytes) => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&bytes)
                .and_then(|_| stdout.flush())
                .map_err(|e| CliError::InvalidArgument(format!("failed to write data: {}", e)))?;
        }
    }
    Ok(())
}

/// Find a resource by name, falling back to a numeric index.
pub fn select_resource<'a>(package: &'a Package, selector: &str) -> Result<&'a Resource, CliError> {
    if let Some(resource) = package.resource(selector) {
        return Ok(resource);
    }

    let index: usize = selector.parse().map_err(|_| {
        CliError::InvalidArgument(format!("no resource named '{}'", selector))
    })?;
    package.resources().get(index).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "resource index {} out of range (package has {})",
            index,
            package.resources().len()
        ))
    })
}
