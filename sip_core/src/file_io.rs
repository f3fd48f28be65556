//! # State Persistence
//!
//! The whole application state is one JSON blob stored under a fixed
//! storage key. This module is the explicit save/load boundary:
//!
//! - [`StateRepository`] - the interface the application talks to
//! - [`JsonFileRepository`] - `<dir>/sip-configurator-state.json` on disk
//! - [`MemoryRepository`] - in-process store for tests and embedding
//!
//! The file repository writes atomically (`.tmp`, fsync, rename), holds an
//! advisory lock while writing, and checks the schema version on load.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sip_core::file_io::{JsonFileRepository, StateRepository};
//! use sip_core::project::Project;
//!
//! let repo = JsonFileRepository::in_dir("/var/lib/sip");
//! let project = repo.load()?.unwrap_or_default();
//! repo.save(&project)?;
//! # Ok::<(), sip_core::errors::CalcError>(())
//! ```

use std::sync::Mutex;

use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

#[cfg(not(target_arch = "wasm32"))]
pub use disk::{FileLock, JsonFileRepository, LockInfo};

/// Save/load boundary for the application state.
pub trait StateRepository {
    /// Load the stored state; `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> CalcResult<Option<Project>>;

    /// Replace the stored state.
    fn save(&self, project: &Project) -> CalcResult<()>;

    /// Forget the stored state.
    fn clear(&self) -> CalcResult<()>;
}

/// Parse a stored blob and check its schema version.
pub fn parse_state(json: &str) -> CalcResult<Project> {
    let project: Project = serde_json::from_str(json).map_err(CalcError::serialization)?;
    validate_version(&project.meta.version)?;
    Ok(project)
}

/// Check that a stored version is readable by this build.
///
/// Major versions must match; while in 0.x a newer minor is rejected too.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, rest @ ..], [major, current_rest @ ..]) => {
            if file_major != major {
                return Err(mismatch());
            }
            if *major == 0 {
                if let (Some(file_minor), Some(minor)) = (rest.first(), current_rest.first()) {
                    if file_minor > minor {
                        return Err(mismatch());
                    }
                }
            }
            Ok(())
        }
        _ => Err(mismatch()),
    }
}

/// In-memory repository holding the serialized blob.
///
/// Goes through the same JSON encoding as the file repository, so a
/// load/save cycle behaves identically.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    blob: Mutex<Option<String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        MemoryRepository::default()
    }

    /// Seed the store with a raw blob, as if written by another client.
    pub fn with_blob(json: impl Into<String>) -> Self {
        MemoryRepository {
            blob: Mutex::new(Some(json.into())),
        }
    }

    fn slot(&self) -> CalcResult<std::sync::MutexGuard<'_, Option<String>>> {
        self.blob.lock().map_err(|e| CalcError::Internal {
            message: format!("state store poisoned: {e}"),
        })
    }
}

impl StateRepository for MemoryRepository {
    fn load(&self) -> CalcResult<Option<Project>> {
        self.slot()?.as_deref().map(parse_state).transpose()
    }

    fn save(&self, project: &Project) -> CalcResult<()> {
        let json = serde_json::to_string(project).map_err(CalcError::serialization)?;
        debug!(bytes = json.len(), "state saved to memory");
        *self.slot()? = Some(json);
        Ok(())
    }

    fn clear(&self) -> CalcResult<()> {
        *self.slot()? = None;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) mod disk {
    use std::fs::{self, File, OpenOptions};
    use std::io::{ErrorKind, Write};
    use std::path::{Path, PathBuf};

    use chrono::{DateTime, Utc};
    use fs2::FileExt;
    use serde::{Deserialize, Serialize};
    use tracing::{debug, info, warn};

    use super::{parse_state, StateRepository};
    use crate::constants::STORAGE_KEY;
    use crate::errors::{CalcError, CalcResult};
    use crate::project::Project;

    /// Contents of the `.lock` file next to the state file
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct LockInfo {
        /// Who holds the lock (user name, session id, ...)
        pub holder: String,
        pub machine: String,
        pub pid: u32,
        pub locked_at: DateTime<Utc>,
    }

    impl LockInfo {
        pub fn new(holder: impl Into<String>) -> Self {
            LockInfo {
                holder: holder.into(),
                machine: hostname().unwrap_or_else(|| "unknown".to_string()),
                pid: std::process::id(),
                locked_at: Utc::now(),
            }
        }

        /// The holding process is gone, or the lock is older than a day.
        pub fn is_stale(&self) -> bool {
            #[cfg(unix)]
            if hostname().as_deref() == Some(self.machine.as_str())
                && fs::metadata(format!("/proc/{}", self.pid)).is_err()
            {
                return true;
            }
            (Utc::now() - self.locked_at).num_hours() > 24
        }
    }

    fn hostname() -> Option<String> {
        #[cfg(windows)]
        {
            std::env::var("COMPUTERNAME").ok()
        }
        #[cfg(not(windows))]
        {
            std::env::var("HOSTNAME").ok().or_else(|| std::env::var("HOST").ok())
        }
    }

    /// Exclusive advisory lock on a state file, released on drop.
    ///
    /// Combines an OS lock (fs2) with a `.lock` metadata file so other
    /// clients can see who holds it.
    pub struct FileLock {
        lock_path: PathBuf,
        _lock_file: File,
        pub info: LockInfo,
    }

    impl FileLock {
        pub fn acquire(path: &Path, holder: impl Into<String>) -> CalcResult<Self> {
            let lock_path = lock_path_for(path);

            if let Some(existing) = FileLock::check(path) {
                return Err(CalcError::file_locked(
                    path.display().to_string(),
                    format!("{} ({})", existing.holder, existing.machine),
                    existing.locked_at.to_rfc3339(),
                ));
            }

            let mut lock_file = OpenOptions::new()
                .write(true)
                .read(true)
                .create(true)
                .truncate(true)
                .open(&lock_path)
                .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

            lock_file.try_lock_exclusive().map_err(|_| {
                CalcError::file_locked(path.display().to_string(), "another process", "unknown")
            })?;

            let info = LockInfo::new(holder);
            let lock_json = serde_json::to_string_pretty(&info).map_err(CalcError::serialization)?;
            lock_file
                .write_all(lock_json.as_bytes())
                .and_then(|_| lock_file.sync_all())
                .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

            Ok(FileLock {
                lock_path,
                _lock_file: lock_file,
                info,
            })
        }

        /// Current live holder of the lock on `path`, if any.
        pub fn check(path: &Path) -> Option<LockInfo> {
            let contents = fs::read_to_string(lock_path_for(path)).ok()?;
            let info: LockInfo = serde_json::from_str(&contents).ok()?;
            if info.is_stale() {
                warn!(holder = %info.holder, "ignoring stale state lock");
                None
            } else {
                Some(info)
            }
        }
    }

    impl Drop for FileLock {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.lock_path);
        }
    }

    fn lock_path_for(path: &Path) -> PathBuf {
        let mut lock_path = path.to_path_buf();
        let extension = lock_path
            .extension()
            .map(|e| format!("{}.lock", e.to_string_lossy()))
            .unwrap_or_else(|| "lock".to_string());
        lock_path.set_extension(extension);
        lock_path
    }

    /// Write `contents` to `path` via `.tmp` + fsync + rename.
    pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> CalcResult<()> {
        let tmp_path = path.with_extension("tmp");

        let mut tmp_file = File::create(&tmp_path)
            .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
        tmp_file
            .write_all(contents)
            .and_then(|_| tmp_file.sync_all())
            .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

        fs::rename(&tmp_path, path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
        })
    }

    /// State stored as one JSON file.
    #[derive(Debug, Clone)]
    pub struct JsonFileRepository {
        path: PathBuf,
        holder: String,
    }

    impl JsonFileRepository {
        /// Repository at an explicit file path.
        pub fn new(path: impl Into<PathBuf>) -> Self {
            JsonFileRepository {
                path: path.into(),
                holder: "sip".to_string(),
            }
        }

        /// `<dir>/sip-configurator-state.json`
        pub fn in_dir(dir: impl AsRef<Path>) -> Self {
            JsonFileRepository::new(dir.as_ref().join(format!("{STORAGE_KEY}.json")))
        }

        /// Name recorded in the lock file while saving.
        pub fn with_holder(mut self, holder: impl Into<String>) -> Self {
            self.holder = holder.into();
            self
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl StateRepository for JsonFileRepository {
        fn load(&self) -> CalcResult<Option<Project>> {
            let contents = match fs::read_to_string(&self.path) {
                Ok(contents) => contents,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(path = %self.path.display(), "no saved state");
                    return Ok(None);
                }
                Err(e) => return Err(CalcError::file_error("read", self.path.display().to_string(), e.to_string())),
            };
            let project = parse_state(&contents).map_err(|e| match e {
                CalcError::SerializationError { reason } => CalcError::SerializationError {
                    reason: format!("Invalid JSON in {}: {}", self.path.display(), reason),
                },
                other => other,
            })?;
            info!(path = %self.path.display(), client = %project.meta.client, "state loaded");
            Ok(Some(project))
        }

        fn save(&self, project: &Project) -> CalcResult<()> {
            let json = serde_json::to_string_pretty(project).map_err(CalcError::serialization)?;
            let _lock = FileLock::acquire(&self.path, self.holder.clone())?;
            write_atomic(&self.path, json.as_bytes())?;
            debug!(path = %self.path.display(), bytes = json.len(), "state saved");
            Ok(())
        }

        fn clear(&self) -> CalcResult<()> {
            match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(CalcError::file_error("remove", self.path.display().to_string(), e.to_string())),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::env::temp_dir;

        fn temp_repo(name: &str) -> JsonFileRepository {
            let dir = temp_dir().join(format!("sip_state_test_{name}_{}", std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            JsonFileRepository::in_dir(dir)
        }

        #[test]
        fn test_lock_path_generation() {
            let lock_path = lock_path_for(Path::new("/data/sip-configurator-state.json"));
            assert_eq!(lock_path, Path::new("/data/sip-configurator-state.json.lock"));
        }

        #[test]
        fn test_storage_key_file_name() {
            let repo = JsonFileRepository::in_dir("/data");
            assert_eq!(repo.path(), Path::new("/data/sip-configurator-state.json"));
        }

        #[test]
        fn test_missing_file_loads_none() {
            let repo = temp_repo("missing");
            repo.clear().unwrap();
            assert!(repo.load().unwrap().is_none());
        }

        #[test]
        fn test_save_and_load_roundtrip() {
            let repo = temp_repo("roundtrip");
            let mut project = Project::new("Familia Soto", "Frutillar");
            project.settings.adjustment_percentage = 12.5;
            repo.save(&project).unwrap();

            let loaded = repo.load().unwrap().unwrap();
            assert_eq!(loaded, project);
            assert!(!repo.path().with_extension("tmp").exists());
            assert!(!lock_path_for(repo.path()).exists());

            repo.clear().unwrap();
            assert!(repo.load().unwrap().is_none());
        }

        #[test]
        fn test_corrupt_file_is_a_serialization_error() {
            let repo = temp_repo("corrupt");
            fs::write(repo.path(), "{ not json").unwrap();
            let err = repo.load().unwrap_err();
            assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
            repo.clear().unwrap();
        }

        #[test]
        fn test_held_lock_blocks_save() {
            let repo = temp_repo("locked");
            let lock = FileLock::acquire(repo.path(), "tester").unwrap();
            assert_eq!(lock.info.holder, "tester");
            assert!(FileLock::check(repo.path()).is_some());

            let err = repo.save(&Project::default()).unwrap_err();
            assert_eq!(err.error_code(), "FILE_LOCKED");

            drop(lock);
            assert!(FileLock::check(repo.path()).is_none());
            repo.save(&Project::default()).unwrap();
            repo.clear().unwrap();
        }
    }
}
