//! MySQL build metadata tools.
//!
//! Extracts values and the server version from autoconf metadata such as
//! `configure.in` and derives the version numbers used by the Windows build.

use std::{fs, io::Result, path::Path};

/// Product name used in the `AC_INIT` marker of the MySQL server.
pub const PRODUCT: &str = "MySQL Server";

/// Extracts the value assigned to `key` in `text`.
///
/// The value starts after the first occurrence of `KEY=` and runs to the end of
/// that line. One leading and one trailing double quote are removed.
pub fn extract_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!("{key}=");
    let start = text.find(&needle)? + needle.len();

    let value = &text[start..];
    let value = value.split_once('\n').map_or(value, |(line, _)| line);
    let value = value.strip_prefix('"').unwrap_or(value);
    Some(value.strip_suffix('"').unwrap_or(value))
}

/// Extracts the MySQL server version from the `AC_INIT` line in `text`.
pub fn extract_version(text: &str) -> Option<&str> {
    extract_product_version(text, PRODUCT)
}

/// Extracts the version of `product` from a line of the form
/// `AC_INIT([product], [version]...`.
pub fn extract_product_version<'a>(text: &'a str, product: &str) -> Option<&'a str> {
    let marker = format!("AC_INIT([{product}], [");
    let start = text.find(&marker)? + marker.len();
    let (version, _) = text[start..].split_once(']')?;
    Some(version)
}

/// Truncates a version to its `major.minor` part.
pub fn base_version(version: &str) -> Option<&str> {
    let dot = version.find('.')? + 1;
    let end = version[dot..].find('.').map_or(version.len(), |n| dot + n);
    Some(&version[..end])
}

/// Numeric version id: major, then minor and build zero-padded to two digits.
///
/// `5.1.7-beta` becomes `50107`. Components are unsigned; a component
/// without leading digits, such as `-1` or `beta`, yields `None`.
pub fn version_id(version: &str) -> Option<String> {
    let (major, rest) = version.split_once('.')?;
    let (minor, rest) = rest.split_once('.')?;
    let build = rest.split_once('-').map_or(rest, |(build, _)| build);

    let major = parse_int_prefix(major)?;
    let minor = parse_int_prefix(minor)?;
    let build = parse_int_prefix(build)?;

    Some(format!("{major}{minor:02}{build:02}"))
}

/// Parses the leading decimal digits of `s`, skipping leading whitespace and
/// an optional `+`. Negative numbers are not accepted.
fn parse_int_prefix(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

/// Version information derived from a version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Full version, e.g. `5.1.7-beta`.
    pub version: String,
    /// Major and minor version, e.g. `5.1`.
    pub base: String,
    /// Numeric version id, e.g. `50107`.
    pub id: String,
}

impl VersionInfo {
    /// Derives version information from a version string.
    pub fn parse(version: &str) -> Option<Self> {
        Some(Self {
            version: version.to_string(),
            base: base_version(version)?.to_string(),
            id: version_id(version)?,
        })
    }

    /// Derives version information for `product` from `configure.in` contents.
    pub fn from_configure(text: &str, product: &str) -> Option<Self> {
        Self::parse(extract_product_version(text, product)?)
    }
}

/// Reads MySQL server version information from a `configure.in` file.
pub fn read_version(path: &Path) -> Result<Option<VersionInfo>> {
    let text = fs::read_to_string(path)?;
    Ok(VersionInfo::from_configure(&text, PRODUCT))
}

/// Reads the value of `key` from a `KEY=VALUE` metadata file.
pub fn read_value(path: &Path, key: &str) -> Result<Option<String>> {
    let text = fs::read_to_string(path)?;
    Ok(extract_value(&text, key).map(str::to_string))
}
