use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read session file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write session file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("Session file {path} is not valid JSON: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Session store lock poisoned")]
    Poisoned,
}

/// Where the access token lives between invocations.
pub trait SessionStore: Send + Sync {
    fn get_token(&self) -> Result<Option<String>, StorageError>;
    fn set_token(&self, token: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    access_token: Option<String>,
}

pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<SessionFile, StorageError> {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(SessionFile::default()),
            Err(source) => Err(StorageError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write_file(&self, session: &SessionFile) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let body = serde_json::to_vec_pretty(session).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        write_private(&self.path, &body).map_err(write_err)
    }
}

/// Writes `body` readable by the owner only; the file holds a bearer token.
fn write_private(path: &Path, body: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(body)
}

impl SessionStore for FileSessionStore {
    fn get_token(&self) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(self
            .read_file()?
            .access_token
            .filter(|token| !token.trim().is_empty()))
    }

    fn set_token(&self, token: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        self.write_file(&SessionFile {
            access_token: Some(token.to_string()),
        })
    }

    fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::Poisoned)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get_token(&self) -> Result<Option<String>, StorageError> {
        Ok(self.token.lock().map_err(|_| StorageError::Poisoned)?.clone())
    }

    fn set_token(&self, token: &str) -> Result<(), StorageError> {
        *self.token.lock().map_err(|_| StorageError::Poisoned)? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.token.lock().map_err(|_| StorageError::Poisoned)? = None;
        Ok(())
    }
}
