//! Property command - print one descriptor property as JSON.

use datapackage::Properties;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the property command. Absent properties print `null`.
pub fn run(runner: &CliRunner, reference: &str, name: &str) -> Result<(), CliError> {
    let package = runner.load(reference)?;
    match package.property(name) {
        Some(value) => println!(
            "{}",
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        ),
        None => println!("null"),
    }
    Ok(())
}
