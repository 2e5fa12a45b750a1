//! Ordered media-file search.

use std::path::{Path, PathBuf};

use crate::error::MediaError;

/// Locates media files across the conventional sample-project layout.
///
/// [`resolve`](MediaResolver::resolve) tries, in order:
///
/// 1. a fixed list of candidate roots: the base (working) directory, its
///    parent and grandparent, the executable's directory with its parent and
///    grandparent, directories named after the executable one and two levels
///    above it, and finally the configured media search path;
/// 2. the same roots again with the filename under a `media/` subdirectory;
/// 3. a walk from the base directory up to the filesystem root, then the
///    same walk from the executable's directory, testing both the bare and
///    the `media/`-prefixed name at every level.
///
/// The first existing file wins. The order is fixed: a file in the base
/// directory always shadows a same-named file further out.
///
/// Results are never cached. Every call re-probes the filesystem, so assets
/// dropped into a media directory between calls are picked up.
pub struct MediaResolver {
    base_dir: PathBuf,
    exe_path: PathBuf,
    media_search_path: Option<PathBuf>,
}

impl MediaResolver {
    /// Create a resolver rooted at the process working directory and the
    /// running executable.
    pub fn new() -> Result<Self, MediaError> {
        let base_dir = std::env::current_dir()?;
        let exe_path = std::env::current_exe()?;
        Ok(Self::with_roots(base_dir, exe_path))
    }

    /// Create a resolver with explicit roots.
    ///
    /// `exe_path` is the executable file itself, not its directory; the
    /// resolver derives candidate directories from both the file's location
    /// and its name. The file does not have to exist, only the directories
    /// probed during resolution do.
    pub fn with_roots(base_dir: impl Into<PathBuf>, exe_path: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            exe_path: exe_path.into(),
            media_search_path: None,
        }
    }

    /// Set the media search path, used as the last fixed candidate root.
    ///
    /// Stored as given; existence is only checked when resolving.
    pub fn set_media_search_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        log::debug!("media search path set to {}", path.display());
        self.media_search_path = Some(path);
    }

    /// The configured media search path, if any.
    pub fn media_search_path(&self) -> Option<&Path> {
        self.media_search_path.as_deref()
    }

    /// The base directory candidates are derived from.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Locate `filename`, returning the first existing candidate path.
    ///
    /// Fails with [`MediaError::InvalidFilename`] for an empty name (before
    /// touching the filesystem) and [`MediaError::NotFound`] echoing the
    /// original filename once every candidate has been probed.
    pub fn resolve(&self, filename: &str) -> Result<PathBuf, MediaError> {
        if filename.is_empty() {
            return Err(MediaError::InvalidFilename("empty filename".into()));
        }

        match self.find(filename) {
            Some(path) => {
                log::debug!("resolved {filename} -> {}", path.display());
                Ok(path)
            }
            None => Err(MediaError::NotFound(filename.to_string())),
        }
    }

    fn find(&self, filename: &str) -> Option<PathBuf> {
        let media_name = Path::new("media").join(filename);
        let roots = self.candidate_roots();

        for root in &roots {
            let candidate = root.join(filename);
            if probe(&candidate) {
                return Some(candidate);
            }
        }
        for root in &roots {
            let candidate = root.join(&media_name);
            if probe(&candidate) {
                return Some(candidate);
            }
        }

        if let Some(found) = walk_up(&self.base_dir, filename, &media_name) {
            return Some(found);
        }
        if let Some(exe_dir) = self.exe_path.parent() {
            if let Some(found) = walk_up(exe_dir, filename, &media_name) {
                return Some(found);
            }
        }

        None
    }

    /// The fixed candidate roots, most specific first.
    fn candidate_roots(&self) -> Vec<PathBuf> {
        let mut roots = Vec::with_capacity(9);

        roots.push(self.base_dir.clone());
        if let Some(parent) = self.base_dir.parent() {
            roots.push(parent.to_path_buf());
            if let Some(grandparent) = parent.parent() {
                roots.push(grandparent.to_path_buf());
            }
        }

        if let Some(exe_dir) = self.exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
            if let Some(parent) = exe_dir.parent() {
                roots.push(parent.to_path_buf());
                if let Some(grandparent) = parent.parent() {
                    roots.push(grandparent.to_path_buf());
                }
            }
            // Sample layouts keep the binary in bin/ beside a project
            // directory named after it, sometimes one level further out.
            if let Some(stem) = self.exe_path.file_stem() {
                if let Some(parent) = exe_dir.parent() {
                    roots.push(parent.join(stem));
                    if let Some(grandparent) = parent.parent() {
                        roots.push(grandparent.join(stem));
                    }
                }
            }
        }

        if let Some(search_path) = &self.media_search_path {
            roots.push(search_path.clone());
        }

        roots
    }
}

impl std::fmt::Debug for MediaResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaResolver")
            .field("base_dir", &self.base_dir)
            .field("exe_path", &self.exe_path)
            .field("media_search_path", &self.media_search_path)
            .finish()
    }
}

fn walk_up(start: &Path, filename: &str, media_name: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(filename);
        if probe(&candidate) {
            return Some(candidate);
        }
        let candidate = dir.join(media_name);
        if probe(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn probe(candidate: &Path) -> bool {
    let found = candidate.is_file();
    log::trace!(
        "probe {} -> {}",
        candidate.display(),
        if found { "hit" } else { "miss" }
    );
    found
}
