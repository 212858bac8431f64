//! Version comparison for CLI and template compatibility

use semver::Version;

/// Compare CLI version against the version the templates were written for
/// Returns a warning message if the CLI is older than the templates expect
pub fn check_compatibility(cli_version: &str, template_version: &str) -> Option<String> {
    let cli_ver = parse_version(cli_version)?;
    let template_ver = parse_version(template_version)?;

    if cli_ver < template_ver {
        Some(format!(
            "Templates were written for wcli {} or newer, you are running {}",
            template_version, cli_version
        ))
    } else {
        None
    }
}

/// Parse a version string, accepting a leading 'v'
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}
