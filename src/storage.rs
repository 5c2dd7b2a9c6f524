//! File-level conversion: validate a request, run the pipeline and write the
//! result exactly once.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::converters::dxf::convert_svg_to_dxf;
use crate::errors::{ConversionError, Result};
use crate::models::{ConversionOptions, ConversionReport, ConversionRequest};
use log::{debug, info};

pub const SUCCESS_MESSAGE: &str = "Conversion successful.";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes `contents` to a hidden sibling of `path`, then renames it into place.
///
/// Readers see either the previous file or the complete new one. On failure
/// the temporary file is removed and `path` is left untouched.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        ConversionError::InvalidRequest(format!("'{}' has no file name", path.display()))
    })?;
    let temp = path.with_file_name(format!(
        ".{}.{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let written = fs::write(&temp, contents).and_then(|()| fs::rename(&temp, path));
    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(&temp) {
            if cleanup.kind() != io::ErrorKind::NotFound {
                debug!(
                    "[write_atomically] Could not remove '{}': {}",
                    temp.display(),
                    cleanup
                );
            }
        }
        return Err(e.into());
    }
    Ok(())
}

/// Converts one request and writes `<output_dir>/<base_name>.dxf`.
///
/// Invalid requests are rejected before the SVG is even parsed.
pub fn convert_request(
    request: &ConversionRequest,
    options: &ConversionOptions,
) -> Result<ConversionReport> {
    request.validate()?;
    let output_path = request.output_path();

    let output = convert_svg_to_dxf(&request.svg_content, options)?;
    write_atomically(&output_path, output.dxf.as_bytes())?;
    info!("DXF written to '{}'", output_path.display());

    Ok(ConversionReport {
        message: SUCCESS_MESSAGE.to_string(),
        output_path,
        units: Some(output.units()),
        scale: Some(output.scale()),
        shapes_exported: Some(output.shape_count()),
        warnings: output.warnings,
    })
}

/// Registry of output paths with a conversion in flight.
///
/// At most one conversion may target a given path at a time; a second attempt
/// fails fast with [`ConversionError::OutputBusy`] instead of racing the first.
#[derive(Debug, Default)]
pub struct OutputLocks {
    in_flight: Mutex<HashSet<PathBuf>>,
}

impl OutputLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `path` until the returned guard is dropped.
    pub fn acquire(&self, path: &Path) -> Result<OutputGuard<'_>> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(path.to_path_buf()) {
            return Err(ConversionError::OutputBusy(path.to_path_buf()));
        }
        Ok(OutputGuard {
            locks: self,
            path: path.to_path_buf(),
        })
    }

    pub fn is_busy(&self, path: &Path) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }
}

/// Releases its path on drop.
#[derive(Debug)]
pub struct OutputGuard<'a> {
    locks: &'a OutputLocks,
    path: PathBuf,
}

impl Drop for OutputGuard<'_> {
    fn drop(&mut self) {
        self.locks
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10mm" height="10mm" viewBox="0 0 10 10">
        <polygon points="0,0 10,0 10,10 0,10"/>
    </svg>"#;

    #[test]
    fn converts_and_writes_output_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let request = ConversionRequest::new(SQUARE, dir.path(), "square");
        let report = convert_request(&request, &ConversionOptions::default()).expect("conversion");

        assert_eq!(report.message, SUCCESS_MESSAGE);
        assert_eq!(report.output_path, dir.path().join("square.dxf"));
        assert_eq!(report.shapes_exported, Some(1));
        let written = fs::read_to_string(&report.output_path).expect("output exists");
        let drawing = dxf::Drawing::load(&mut written.as_bytes()).expect("valid DXF");
        assert_eq!(drawing.entities().count(), 4);

        // No temporary files left behind.
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .expect("list dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn invalid_request_never_touches_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let request = ConversionRequest::new("", dir.path(), "empty");
        assert!(matches!(
            convert_request(&request, &ConversionOptions::default()),
            Err(ConversionError::InvalidRequest(_))
        ));
        assert!(!dir.path().join("empty.dxf").exists());
    }

    #[test]
    fn failed_write_leaves_previous_file_intact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("no-such-dir").join("out.dxf");
        assert!(matches!(
            write_atomically(&target, b"data"),
            Err(ConversionError::Io(_))
        ));
        assert!(!target.exists());

        let existing = dir.path().join("keep.dxf");
        fs::write(&existing, "old").expect("seed file");
        write_atomically(&existing, b"new").expect("overwrite");
        assert_eq!(fs::read_to_string(&existing).expect("read back"), "new");
    }

    #[test]
    fn output_locks_are_exclusive_until_dropped() {
        let locks = OutputLocks::new();
        let path = Path::new("/tmp/out.dxf");
        let guard = locks.acquire(path).expect("first claim");
        assert!(locks.is_busy(path));
        assert!(matches!(
            locks.acquire(path),
            Err(ConversionError::OutputBusy(p)) if p == path
        ));
        drop(guard);
        assert!(!locks.is_busy(path));
        assert!(locks.acquire(path).is_ok());
    }
}
