//! Filesystem abstraction for partition writers
//!
//! Writers only need "create a file and give me a byte sink". The backend is
//! chosen from `fs.defaultFS`.

use crate::error::{Result, SerializerError};
use snb_datagen_config::{keys, Configuration};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Target filesystem for output files
pub trait FileSystem: Send + Sync {
    /// Create (or truncate) the file at `path` for writing
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>>;
}

/// Local disk, creating parent directories on demand
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Box::new(File::create(path)?))
    }
}

type FileMap = BTreeMap<PathBuf, Arc<Mutex<Vec<u8>>>>;

/// In-process filesystem, useful for dry runs and for inspecting output
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: Arc<Mutex<FileMap>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths of every file created so far, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.keys().cloned().collect()
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files
            .get(path.as_ref())
            .map(|buf| buf.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }
}

impl FileSystem for MemoryFileSystem {
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write + Send>> {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), Arc::clone(&buffer));
        Ok(Box::new(MemoryFile { buffer }))
    }
}

struct MemoryFile {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Pick the filesystem named by `fs.defaultFS`.
///
/// An absent key means local disk, as does any `file:` URI.
pub fn filesystem_for(config: &Configuration) -> Result<Arc<dyn FileSystem>> {
    match config.get(keys::DEFAULT_FS) {
        None => Ok(Arc::new(LocalFileSystem)),
        Some(scheme) if scheme.starts_with("file:") => Ok(Arc::new(LocalFileSystem)),
        Some(scheme) => Err(SerializerError::UnsupportedFileSystem {
            scheme: scheme.to_string(),
        }),
    }
}
