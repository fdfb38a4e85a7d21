use crate::fs::FileSystem;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct FakeState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    write_file_error: Option<String>,
    remove_all_error: Option<String>,
    remove_all_calls: Vec<PathBuf>,
}

/// In-memory [`FileSystem`] for tests.
///
/// Failures are injected per operation with [`set_write_file_error`](Self::set_write_file_error)
/// and [`set_remove_all_error`](Self::set_remove_all_error); every `remove_all`
/// call is recorded, successful or not.
#[derive(Default)]
pub struct FakeFileSystem {
    state: Mutex<FakeState>,
}

impl FakeFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_write_file_error(&self, message: impl Into<String>) {
        self.lock().write_file_error = Some(message.into());
    }

    pub fn set_remove_all_error(&self, message: impl Into<String>) {
        self.lock().remove_all_error = Some(message.into());
    }

    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.lock().files.contains_key(path.as_ref())
    }

    pub fn remove_all_calls(&self) -> Vec<PathBuf> {
        self.lock().remove_all_calls.clone()
    }

    pub fn file_count(&self) -> usize {
        self.lock().files.len()
    }
}

impl FileSystem for FakeFileSystem {
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.lock();
        if let Some(msg) = &state.write_file_error {
            return Err(io::Error::other(msg.clone()));
        }
        state.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.lock().files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("fake file not found: {}", path.display()),
            )
        })
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock();
        state.remove_all_calls.push(path.to_path_buf());
        if let Some(msg) = &state.remove_all_error {
            return Err(io::Error::other(msg.clone()));
        }
        state.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }
}
