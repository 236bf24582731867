//! Rendering of the generated C++ header.

use crate::error::{EmitError, Result};
use chrono::NaiveDateTime;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Header location relative to the project directory.
pub const DEFAULT_HEADER_PATH: &str = "lib/config/build_timestamp.h";

/// Name of the generated constant.
pub const DEFAULT_IDENTIFIER: &str = "BUILD_TIMESTAMP";

/// `YYYY-MM-DD HH:MM:SS`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A formatted build time.
///
/// The format only ever produces digits, dashes, colons and a space, so the
/// value can be placed between double quotes without escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTimestamp(String);

impl BuildTimestamp {
    pub fn from_datetime(datetime: NaiveDateTime) -> Self {
        Self(datetime.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render the two-line header body.
pub fn render_header(identifier: &str, timestamp: &BuildTimestamp) -> String {
    format!(
        "#pragma once\nconstexpr const char* {} = \"{}\";\n",
        identifier, timestamp
    )
}

/// Join the project directory with the relative header path.
pub fn header_path(project_dir: &Path, relative_path: &Path) -> PathBuf {
    project_dir.join(relative_path)
}

/// Check that `identifier` is usable as a C/C++ identifier.
pub fn validate_identifier(identifier: &str) -> Result<()> {
    let mut chars = identifier.chars();
    let valid = match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(EmitError::InvalidIdentifier(identifier.to_string()))
    }
}

/// The header path must stay inside the project directory and name a file.
pub fn validate_header_path(relative_path: &Path) -> Result<()> {
    if relative_path.as_os_str().is_empty() {
        return Err(EmitError::InvalidHeaderPath("path is empty".to_string()));
    }

    for component in relative_path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            _ => {
                return Err(EmitError::InvalidHeaderPath(format!(
                    "{} must be relative to the project directory",
                    relative_path.display()
                )));
            }
        }
    }

    if relative_path.file_name().is_none() {
        return Err(EmitError::InvalidHeaderPath(format!(
            "{} does not name a file",
            relative_path.display()
        )));
    }

    Ok(())
}
