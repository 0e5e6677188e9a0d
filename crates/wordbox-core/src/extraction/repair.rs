use crate::error::NormalizeError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Optional pre-processing step that rewrites a PDF before extraction.
pub trait Repairer: Send + Sync {
    /// Repair `input` into a file inside `scratch`.
    ///
    /// Returns `Ok(None)` when the tool is unavailable or gave up, in which
    /// case the caller keeps using the original file.
    fn repair(&self, input: &Path, scratch: &Path) -> Result<Option<PathBuf>, NormalizeError>;

    fn name(&self) -> &str;
}

/// Repair backend using qpdf, which rewrites broken xref tables and streams.
pub struct QpdfRepairer {
    binary: PathBuf,
}

impl QpdfRepairer {
    pub fn new() -> Self {
        QpdfRepairer {
            binary: PathBuf::from("qpdf"),
        }
    }

    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        QpdfRepairer {
            binary: binary.into(),
        }
    }

    /// Check if qpdf is available on the system.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for QpdfRepairer {
    fn default() -> Self {
        Self::new()
    }
}

impl Repairer for QpdfRepairer {
    fn repair(&self, input: &Path, scratch: &Path) -> Result<Option<PathBuf>, NormalizeError> {
        let output_path = scratch.join("repaired.pdf");

        let output = match Command::new(&self.binary)
            .arg(input)
            .arg(&output_path)
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(binary = %self.binary.display(), "qpdf not found, skipping repair");
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(
                    binary = %self.binary.display(),
                    error = %e,
                    "qpdf could not be started, skipping repair"
                );
                return Ok(None);
            }
        };

        // qpdf exits with 3 when it succeeded but had to fix things up.
        match output.status.code() {
            Some(0) | Some(3) if output_path.exists() => Ok(Some(output_path)),
            code => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                tracing::warn!(
                    code = code.unwrap_or(-1),
                    stderr = %stderr.trim(),
                    "qpdf could not repair input, using original"
                );
                Ok(None)
            }
        }
    }

    fn name(&self) -> &str {
        "qpdf"
    }
}

/// Repairer that leaves every input untouched.
pub struct NoRepair;

impl Repairer for NoRepair {
    fn repair(&self, _input: &Path, _scratch: &Path) -> Result<Option<PathBuf>, NormalizeError> {
        Ok(None)
    }

    fn name(&self) -> &str {
        "none"
    }
}
