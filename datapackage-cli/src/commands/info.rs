//! Info command - summarize a package.

use datapackage::Package;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the info command.
pub fn run(runner: &CliRunner, reference: &str) -> Result<(), CliError> {
    let package = runner.load(reference)?;
    print!("{}", format_info(&package));
    Ok(())
}

/// Render the package summary.
pub fn format_info(package: &Package) -> String {
    let mut out = String::new();
    let or_unset = |value: Option<&str>| value.unwrap_or("(not set)").to_string();

    out.push_str(&format!("Name:        {}\n", or_unset(package.name())));
    out.push_str(&format!("Title:       {}\n", or_unset(package.title())));
    out.push_str(&format!("Version:     {}\n", or_unset(package.version())));
    out.push_str(&format!(
        "Location:    {}\n",
        if package.is_local() { "local" } else { "remote" }
    ));
    if package.base().to_string().is_empty() {
        out.push_str("Base:        (in memory)\n");
    } else {
        out.push_str(&format!("Base:        {}\n", package.base()));
    }

    let keywords = package.keywords();
    if !keywords.is_empty() {
        out.push_str(&format!("Keywords:    {}\n", keywords.join(", ")));
    }

    out.push_str(&format!("Resources:   {}\n", package.resources().len()));
    for resource in package.resources() {
        out.push_str(&format!(
            "  - {} ({})\n",
            resource.name().unwrap_or("<unnamed>"),
            resource.kind()
        ));
    }
    out
}
