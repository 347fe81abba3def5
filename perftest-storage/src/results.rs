//! Reading and writing [`RunResult`] files.

use std::fs;
use std::path::{Path, PathBuf};

use perftest_core::errors::StorageError;
use perftest_core::RunResult;
use tracing::{debug, info};

const EXTENSION: &str = "json";

fn io_error(path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Writes `result` to `path`, creating missing parent directories.
pub fn save_result(path: &Path, result: &RunResult) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(result).map_err(|e| StorageError::Serialize {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    fs::write(path, json + "\n").map_err(|e| io_error(path, e))?;
    info!(path = %path.display(), kernels = result.kernels.len(), "saved result");
    Ok(())
}

pub fn load_result(path: &Path) -> Result<RunResult, StorageError> {
    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let result = serde_json::from_str(&content).map_err(|e| StorageError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), "loaded result");
    Ok(result)
}

/// `*.json` files directly inside `dir`, sorted by file name.
pub fn list_results(dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Loads every given file; a directory contributes all results it lists.
/// Fails on the first unreadable or malformed file.
pub fn load_results<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<RunResult>, StorageError> {
    let mut results = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            for file in list_results(path)? {
                results.push(load_result(&file)?);
            }
        } else {
            results.push(load_result(path)?);
        }
    }
    Ok(results)
}

/// File name such as `gridtools-strgrid-double-cuda-20240301T120000.json`.
pub fn default_file_name(result: &RunResult) -> String {
    let config = &result.config;
    format!(
        "{}-{}-{}-{}-{}.{EXTENSION}",
        config.runtime(),
        config.grid(),
        config.precision(),
        config.backend(),
        result.environment.datetime.format("%Y%m%dT%H%M%S"),
    )
}
