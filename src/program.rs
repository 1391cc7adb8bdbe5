use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
};

use tidepool_core::{PaintError, Surface, Widget};
use tidepool_markup::TreeBuilder;
use tracing::{debug, error, info};

use crate::{Error, Host, watch::FileWatcher};

/// A request to replace the running interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadRequest {
    /// Markup text.
    Source(String),
    /// A markup file to read.
    File(PathBuf),
}

/// Posts reload requests to a [`Program`] from any thread.
///
/// Requests are applied by [`Program::process_reloads`], which the render
/// loop calls between frames.
#[derive(Debug, Clone)]
pub struct ReloadHandle {
    sender: Sender<ReloadRequest>,
}

impl ReloadHandle {
    /// Queues `request`. Returns `false` once the program is gone.
    pub fn send(&self, request: ReloadRequest) -> bool {
        self.sender.send(request).is_ok()
    }

    /// Queues a reload from markup text.
    pub fn reload_source(&self, source: impl Into<String>) -> bool {
        self.send(ReloadRequest::Source(source.into()))
    }

    /// Queues a reload from a markup file.
    pub fn reload_file(&self, path: impl Into<PathBuf>) -> bool {
        self.send(ReloadRequest::File(path.into()))
    }
}

/// Owns the root widgets and drives the render loop.
///
/// The root collection is only ever replaced as a whole, after the new
/// interface was built completely, and only through `&mut self`. A render
/// pass holds `&self`, so it always sees either the old or the new
/// collection, never a mix. Failed loads leave the running interface in
/// place.
#[derive(Debug)]
pub struct Program {
    builder: TreeBuilder,
    roots: Vec<Box<dyn Widget>>,
    generation: u64,
    reloads: Receiver<ReloadRequest>,
    handle: ReloadHandle,
    watcher: Option<FileWatcher>,
    last_reload_error: Option<Error>,
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    /// Creates a program without any widget, resolving markup through the
    /// built-in widget catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::with_builder(TreeBuilder::default())
    }

    /// Creates a program resolving markup through `builder`.
    #[must_use]
    pub fn with_builder(builder: TreeBuilder) -> Self {
        let (sender, reloads) = mpsc::channel();
        Self {
            builder,
            roots: Vec::new(),
            generation: 0,
            reloads,
            handle: ReloadHandle { sender },
            watcher: None,
            last_reload_error: None,
        }
    }

    /// The tree builder, e.g. to register more widget types.
    pub const fn builder_mut(&mut self) -> &mut TreeBuilder {
        &mut self.builder
    }

    /// The live root widgets in render order.
    #[must_use]
    pub fn roots(&self) -> &[Box<dyn Widget>] {
        &self.roots
    }

    /// Number of successful interface replacements.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of widgets across all roots.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.roots.iter().map(|root| root.count()).sum()
    }

    /// Appends a root widget built by host code.
    pub fn add_root(&mut self, root: Box<dyn Widget>) {
        self.roots.push(root);
    }

    /// Builds `source` and, only if that succeeds, replaces the root
    /// collection with the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Markup`] for malformed markup, unknown tags and
    /// invalid attribute values. The running interface is kept.
    pub fn load_user_interface_from_xml(&mut self, source: &str) -> Result<(), Error> {
        let roots = self.builder.build_xml(source)?;
        self.install(roots);
        Ok(())
    }

    /// Reads `path` and loads it like [`Program::load_user_interface_from_xml`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] when the file cannot be read, otherwise the
    /// same errors as [`Program::load_user_interface_from_xml`].
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_user_interface_from_xml(&source)
    }

    /// Reloads the interface in response to a change notification.
    ///
    /// A failure is logged and kept as [`Program::last_reload_error`]; the
    /// running interface stays. A success clears the stored error.
    ///
    /// # Errors
    ///
    /// Returns the stored error on failure.
    pub fn reload_widgets_from_xml(&mut self, source: &str) -> Result<(), &Error> {
        let result = self.load_user_interface_from_xml(source);
        self.record_reload(result)
    }

    /// Reloads the interface from a file, see
    /// [`Program::reload_widgets_from_xml`].
    ///
    /// # Errors
    ///
    /// Returns the stored error on failure.
    pub fn reload_file(&mut self, path: impl AsRef<Path>) -> Result<(), &Error> {
        let result = self.load_file(path);
        self.record_reload(result)
    }

    /// The error of the last failed reload, cleared by the next successful
    /// one.
    #[must_use]
    pub const fn last_reload_error(&self) -> Option<&Error> {
        self.last_reload_error.as_ref()
    }

    /// A handle for posting reloads from other threads.
    #[must_use]
    pub fn reload_handle(&self) -> ReloadHandle {
        self.handle.clone()
    }

    /// Applies queued reload requests.
    ///
    /// Only the most recent request is applied; older ones are superseded.
    /// Returns whether the interface was replaced.
    pub fn process_reloads(&mut self) -> bool {
        let mut latest = None;
        let mut superseded = 0_usize;
        loop {
            match self.reloads.try_recv() {
                Ok(request) => {
                    superseded += usize::from(latest.is_some());
                    latest = Some(request);
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        let Some(request) = latest else {
            return false;
        };
        if superseded > 0 {
            debug!(superseded, "coalesced reload requests");
        }
        match request {
            ReloadRequest::Source(source) => self.reload_widgets_from_xml(&source).is_ok(),
            ReloadRequest::File(path) => self.reload_file(path).is_ok(),
        }
    }

    /// Watches a markup file and reloads it whenever it changes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Watch`] when the file cannot be watched.
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let watcher = match self.watcher.take() {
            Some(watcher) => watcher,
            None => FileWatcher::new().map_err(|source| Error::Watch {
                path: path.to_path_buf(),
                source,
            })?,
        };
        let watcher = self.watcher.insert(watcher);
        let handle = self.handle.clone();
        watcher.add_watch(path, move |changed| {
            handle.reload_file(changed);
        })?;
        info!(path = %path.display(), "watching markup for changes");
        Ok(())
    }

    /// Renders every root widget in order.
    ///
    /// # Errors
    ///
    /// Propagates the first paint failure; the surface state stays balanced.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), PaintError> {
        for root in &self.roots {
            root.render(surface)?;
        }
        Ok(())
    }

    /// Runs the render loop until the host stops handing out frames.
    ///
    /// Each iteration applies pending reloads, renders all roots into the
    /// host's surface and presents it.
    ///
    /// # Errors
    ///
    /// Stops at the first paint or presentation failure.
    pub fn run<H: Host>(&mut self, host: &mut H) -> Result<(), Error> {
        info!(widgets = self.widget_count(), "render loop started");
        let mut frames = 0_u64;
        loop {
            self.process_reloads();
            let Some(surface) = host.next_frame() else {
                break;
            };
            self.render(surface)?;
            host.present()?;
            frames += 1;
        }
        info!(frames, "render loop stopped");
        Ok(())
    }

    fn install(&mut self, roots: Vec<Box<dyn Widget>>) {
        self.roots = roots;
        self.generation += 1;
        info!(
            generation = self.generation,
            roots = self.roots.len(),
            widgets = self.widget_count(),
            "installed user interface"
        );
    }

    fn record_reload(&mut self, result: Result<(), Error>) -> Result<(), &Error> {
        match result {
            Ok(()) => {
                self.last_reload_error = None;
                Ok(())
            }
            Err(failure) => {
                error!(
                    error = %failure,
                    generation = self.generation,
                    "reload failed, keeping the running interface"
                );
                Err(self.last_reload_error.insert(failure))
            }
        }
    }
}
