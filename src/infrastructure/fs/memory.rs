//! In-memory file system for unit tests
//!
//! Uses `Arc<Mutex<>>` internally so it can be cloned and shared. Paths can
//! be marked as locked to simulate a file in use.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, String>,
    locked: BTreeSet<PathBuf>,
    renames: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    state: Arc<Mutex<State>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a folder holding `names`, each file's content being its own name
    pub fn with_files(dir: &Path, names: &[&str]) -> Self {
        let fs = Self::new();
        for name in names {
            fs.write(&dir.join(name), name);
        }
        fs
    }

    pub fn write(&self, path: &Path, content: &str) {
        let mut state = self.state.lock().unwrap();
        state.files.insert(path.to_path_buf(), content.to_string());
    }

    pub fn read(&self, path: &Path) -> Option<String> {
        self.state.lock().unwrap().files.get(path).cloned()
    }

    /// Make every rename or removal involving `path` fail with PermissionDenied
    pub fn lock(&self, path: &Path) {
        self.state.lock().unwrap().locked.insert(path.to_path_buf());
    }

    pub fn unlock(&self, path: &Path) {
        self.state.lock().unwrap().locked.remove(path);
    }

    /// Basenames of the files directly in `dir`, sorted
    pub fn names_in(&self, dir: &Path) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    /// Number of successful renames so far
    pub fn rename_count(&self) -> usize {
        self.state.lock().unwrap().renames
    }
}

impl FileSystem for MemoryFs {
    fn list_files(&self, dir: &Path) -> FsResult<Vec<PathBuf>> {
        let state = self.state.lock().unwrap();
        let files: Vec<PathBuf> = state
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect();
        if files.is_empty() && !state.files.keys().any(|p| p.starts_with(dir)) {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }
        Ok(files)
    }

    fn exists(&self, path: &Path) -> bool {
        self.state.lock().unwrap().files.contains_key(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.locked.contains(from) || state.locked.contains(to) {
            return Err(FsError::PermissionDenied(from.to_path_buf()));
        }
        let content = state
            .files
            .remove(from)
            .ok_or_else(|| FsError::NotFound(from.to_path_buf()))?;
        state.files.insert(to.to_path_buf(), content);
        state.renames += 1;
        Ok(())
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.locked.contains(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        state
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        let mut state = self.state.lock().unwrap();
        let content = state
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| FsError::NotFound(from.to_path_buf()))?;
        state.files.insert(to.to_path_buf(), content);
        Ok(())
    }
}
