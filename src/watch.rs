//! File watching for hot reload.
//!
//! Each watched file is observed through its parent directory: editors often
//! save by writing a temporary file and renaming it over the original, which
//! would end a watch placed on the file itself.

use std::{
    collections::HashSet,
    fmt,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use notify::{
    Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    event::{AccessKind, ModifyKind},
};
use tracing::{debug, warn};

use crate::Error;

type Callback = Box<dyn Fn(&Path) + Send>;

struct Target {
    path: PathBuf,
    callback: Callback,
}

/// Invokes callbacks when watched files change.
///
/// Callbacks run on the watcher's thread and should only hand the
/// notification over, e.g. by sending on a channel.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    directories: HashSet<PathBuf>,
    targets: Arc<Mutex<Vec<Target>>>,
}

impl fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileWatcher")
            .field("directories", &self.directories)
            .field("files", &self.watched())
            .finish_non_exhaustive()
    }
}

impl FileWatcher {
    /// Starts a watcher without any watched file.
    ///
    /// # Errors
    ///
    /// Returns the platform error when no watcher can be created.
    pub fn new() -> notify::Result<Self> {
        let targets: Arc<Mutex<Vec<Target>>> = Arc::default();
        let dispatch = Arc::clone(&targets);
        let watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            match result {
                Ok(event) => dispatch_event(&dispatch, &event),
                Err(error) => warn!(%error, "file watcher error"),
            }
        })?;
        Ok(Self {
            watcher,
            directories: HashSet::new(),
            targets,
        })
    }

    /// Calls `callback` with the path whenever the content of `path` changes.
    ///
    /// Watches cannot be removed; they end when the watcher is dropped.
    ///
    /// # Errors
    ///
    /// Fails when the file's directory does not exist or cannot be watched.
    pub fn add_watch(
        &mut self,
        path: impl AsRef<Path>,
        callback: impl Fn(&Path) + Send + 'static,
    ) -> Result<(), Error> {
        let requested = path.as_ref();
        let watch_error = |source| Error::Watch {
            path: requested.to_path_buf(),
            source,
        };
        let resolved = resolve(requested).map_err(|source| watch_error(notify::Error::io(source)))?;
        let directory = resolved
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        if !self.directories.contains(&directory) {
            self.watcher
                .watch(&directory, RecursiveMode::NonRecursive)
                .map_err(watch_error)?;
            debug!(directory = %directory.display(), "watching directory");
            self.directories.insert(directory);
        }

        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Target {
                path: resolved,
                callback: Box::new(callback),
            });
        Ok(())
    }

    /// Watched files, as resolved absolute paths.
    #[must_use]
    pub fn watched(&self) -> Vec<PathBuf> {
        self.targets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|target| target.path.clone())
            .collect()
    }
}

/// Absolute path of `path` with its directory canonicalized. The file itself
/// may not exist yet.
fn resolve(path: &Path) -> std::io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "path does not name a file")
    })?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.canonicalize()?,
        _ => std::env::current_dir()?.canonicalize()?,
    };
    Ok(directory.join(name))
}

/// Whether `kind` may have changed the content of a file.
pub(crate) const fn is_content_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        EventKind::Access(AccessKind::Close(notify::event::AccessMode::Write)) => true,
        _ => false,
    }
}

fn dispatch_event(targets: &Mutex<Vec<Target>>, event: &Event) {
    if !is_content_change(&event.kind) {
        return;
    }
    let targets = targets.lock().unwrap_or_else(PoisonError::into_inner);
    for target in targets.iter() {
        if event.paths.iter().any(|changed| changed == &target.path) {
            debug!(path = %target.path.display(), kind = ?event.kind, "watched file changed");
            (target.callback)(&target.path);
        }
    }
}
