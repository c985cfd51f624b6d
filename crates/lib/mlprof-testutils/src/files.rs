use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// A path in the system temp directory that is removed when dropped.
#[derive(Debug)]
pub struct TempFile {
    path: PathBuf,
}

impl TempFile {
    pub fn new(extension: &str) -> Self {
        let file_name = format!("mlprof-{}.{}", Uuid::new_v4(), extension);
        Self {
            path: std::env::temp_dir().join(file_name),
        }
    }

    pub fn with_contents(extension: &str, contents: &str) -> Self {
        let file = Self::new(extension);
        fs::write(&file.path, contents).expect("failed to write test file");
        file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.path.clone()
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Writes rows the way the runtime measurement plugin does: one
/// `batch_size,runtime` pair per line, no header.
pub fn write_measurements(rows: &[(u64, f64)]) -> TempFile {
    let contents: String = rows
        .iter()
        .map(|(size, runtime)| format!("{},{}\n", size, runtime))
        .collect();
    TempFile::with_contents("csv", &contents)
}
