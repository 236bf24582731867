use crate::clock::Clock;
use crate::config::HeaderConfig;
use crate::error::{EmitError, Result};
use crate::header::{self, BuildTimestamp};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Outcome of a successful emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitReport {
    pub header_path: PathBuf,
    pub timestamp: BuildTimestamp,
}

impl EmitReport {
    /// The line printed for the build log.
    pub fn confirmation_line(&self) -> String {
        format!("Generated build timestamp: {}", self.timestamp)
    }
}

/// Writes the build-timestamp header into a project tree.
#[derive(Debug, Clone)]
pub struct TimestampHeaderEmitter {
    header: HeaderConfig,
}

impl Default for TimestampHeaderEmitter {
    fn default() -> Self {
        Self::new(HeaderConfig::default())
    }
}

impl TimestampHeaderEmitter {
    pub fn new(header: HeaderConfig) -> Self {
        Self { header }
    }

    /// Generate the header under `project_dir`, replacing any previous one.
    ///
    /// The clock is read exactly once. Missing directories on the way to the
    /// header are created.
    pub fn emit(&self, project_dir: &Path, clock: &dyn Clock) -> Result<EmitReport> {
        header::validate_identifier(&self.header.identifier)?;
        header::validate_header_path(&self.header.path)?;

        let timestamp = BuildTimestamp::from_datetime(clock.now());
        let header_path = header::header_path(project_dir, &self.header.path);

        if let Some(parent) = header_path.parent() {
            tracing::debug!("Ensuring directory exists: {}", parent.display());
            fs::create_dir_all(parent).map_err(|source| EmitError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = header::render_header(&self.header.identifier, &timestamp);
        write_atomically(&header_path, contents.as_bytes())?;

        tracing::info!(
            "Wrote {} ({} = \"{}\")",
            header_path.display(),
            self.header.identifier,
            timestamp
        );

        Ok(EmitReport {
            header_path,
            timestamp,
        })
    }
}

/// Write to a sibling temp file and rename it over `path`, so readers never
/// see a truncated header.
///
/// An existing header is resolved first, so a symlinked header has its target
/// rewritten and the link kept. When the directory refuses the temp file, the
/// header is rewritten in place instead.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let tmp_path = temp_sibling(&target);

    let mut file = match fs::File::create(&tmp_path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::PermissionDenied => {
            tracing::debug!(
                "Cannot create {}, writing {} in place",
                tmp_path.display(),
                target.display()
            );
            return fs::write(&target, contents).map_err(|source| EmitError::Write {
                path: path.to_path_buf(),
                source,
            });
        }
        Err(source) => {
            return Err(EmitError::Write {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let written = file.write_all(contents).and_then(|_| file.sync_all());
    drop(file);

    if let Err(source) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(EmitError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    fs::rename(&tmp_path, &target).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        EmitError::Persist {
            path: path.to_path_buf(),
            source,
        }
    })
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()))
}
