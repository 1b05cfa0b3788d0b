//! Resources command - list resolved resources.

use datapackage::Package;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the resources command.
pub fn run(runner: &CliRunner, reference: &str) -> Result<(), CliError> {
    let package = runner.load(reference)?;
    for line in format_resources(&package) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per resource: index, variant, name and data location.
pub fn format_resources(package: &Package) -> Vec<String> {
    package
        .resources()
        .iter()
        .enumerate()
        .map(|(index, resource)| {
            format!(
                "{:>3}  {:<6}  {:<20}  {}",
                index,
                resource.kind().to_string(),
                resource.name().unwrap_or("-"),
                resource.location()
            )
        })
        .collect()
}
