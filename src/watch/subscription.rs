// src/watch/subscription.rs

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use futures::StreamExt;
use inotify::{EventMask, EventStream, Inotify, WatchDescriptor, WatchMask, Watches};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::{Result, WatcherdError};
use crate::watch::event::{describe_mask, EventKind, FileEvent};
use crate::watch::exclude::ExcludeFilter;

/// A live inotify subscription for one watch.
///
/// Owns its own `Inotify` instance, so events from different watches can
/// never mix. The kernel only watches single directories, so recursion and
/// auto-add are layered on top here: every (non-excluded) subdirectory gets
/// its own watch descriptor, and the descriptor→directory map resolves event
/// names back to absolute paths.
///
/// Dropping the subscription closes the inotify fd, which releases every
/// kernel watch it holds.
pub struct Subscription {
    root: PathBuf,
    stream: EventStream<Vec<u8>>,
    watches: Watches,
    dirs: HashMap<WatchDescriptor, PathBuf>,
    kernel_mask: WatchMask,
    interest: WatchMask,
    recursive: bool,
    auto_add: bool,
    exclude: ExcludeFilter,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("root", &self.root)
            .field("dirs", &self.dirs.len())
            .finish_non_exhaustive()
    }
}

impl Subscription {
    /// Register kernel watches for `root` and return the live subscription.
    ///
    /// Fails if the path does not exist, is not a directory, the interest
    /// mask is empty (the kernel rejects a zero mask), or the kernel watch
    /// limit is exhausted while registering the directory tree.
    pub fn open(
        root: &Path,
        interest: WatchMask,
        recursive: bool,
        auto_add: bool,
        exclude: ExcludeFilter,
    ) -> Result<Self> {
        let subscription_err = |reason: String| WatcherdError::Subscription {
            path: root.to_path_buf(),
            reason,
        };

        if interest.is_empty() {
            return Err(subscription_err("empty event interest mask".into()));
        }

        let meta = std::fs::metadata(root)
            .map_err(|e| subscription_err(e.to_string()))?;
        if !meta.is_dir() {
            return Err(subscription_err("not a directory".into()));
        }

        // Auto-add needs directory-create events at the kernel level even
        // when the configured mask doesn't ask for them; the extra events
        // are filtered out again before dispatch.
        let mut kernel_mask = interest;
        if auto_add {
            kernel_mask |= WatchMask::CREATE | WatchMask::MOVED_TO;
        }

        let inotify = Inotify::init().map_err(|e| subscription_err(e.to_string()))?;
        let mut watches = inotify.watches();
        let mut dirs = HashMap::new();

        let wd = watches
            .add(root, kernel_mask)
            .map_err(|e| subscription_err(e.to_string()))?;
        dirs.insert(wd, root.to_path_buf());

        if recursive {
            add_subtree(&mut watches, &mut dirs, kernel_mask, &exclude, root)
                .map_err(|e| subscription_err(e.to_string()))?;
        }

        let stream = inotify
            .into_event_stream(vec![0u8; 4096])
            .map_err(|e| subscription_err(e.to_string()))?;

        debug!(
            root = %root.display(),
            watches = dirs.len(),
            mask = ?kernel_mask,
            "inotify subscription registered"
        );

        Ok(Self {
            root: root.to_path_buf(),
            stream,
            watches,
            dirs,
            kernel_mask,
            interest,
            recursive,
            auto_add,
            exclude,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of directories currently under watch.
    pub fn watch_count(&self) -> usize {
        self.dirs.len()
    }

    /// Wait for the next event matching this watch's interest mask.
    ///
    /// Administrative events are consumed internally: `IN_IGNORED` prunes
    /// the descriptor map, queue overflows are logged, and events that only
    /// exist because auto-add widened the kernel mask are dropped.
    ///
    /// Returns `None` when the event stream ends.
    pub async fn next_event(&mut self) -> Option<io::Result<FileEvent>> {
        loop {
            let raw = match self.stream.next().await? {
                Ok(raw) => raw,
                Err(e) => return Some(Err(e)),
            };

            if raw.mask.contains(EventMask::Q_OVERFLOW) {
                warn!(root = %self.root.display(), "inotify event queue overflowed");
                continue;
            }

            if raw.mask.contains(EventMask::IGNORED) {
                self.dirs.remove(&raw.wd);
                continue;
            }

            let Some(dir) = self.dirs.get(&raw.wd).cloned() else {
                // Event for a descriptor we already forgot about.
                continue;
            };

            let full_path = match &raw.name {
                Some(name) => dir.join(name),
                None => dir.clone(),
            };

            if self.auto_add
                && raw.mask.contains(EventMask::ISDIR)
                && (raw.mask.contains(EventMask::CREATE)
                    || raw.mask.contains(EventMask::MOVED_TO))
            {
                self.track_new_dir(&full_path);
            }

            let Some(kind) = EventKind::from_mask(raw.mask) else {
                continue;
            };

            // Drop events the configured mask never asked for (auto-add may
            // have widened the kernel mask beyond it).
            if !self.interest.contains(kind.watch_mask()) {
                continue;
            }

            return Some(Ok(FileEvent {
                watched_root: dir,
                full_path,
                kind,
                kind_name: describe_mask(raw.mask),
                kind_flags: raw.mask.bits(),
                move_cookie: raw.cookie,
            }));
        }
    }

    /// Subscribe a directory that appeared inside the watched tree.
    fn track_new_dir(&mut self, dir: &Path) {
        if self.exclude.matches(dir) {
            return;
        }

        if let Err(e) = add_single(&mut self.watches, &mut self.dirs, self.kernel_mask, dir) {
            warn!(dir = %dir.display(), error = %e, "failed to auto-add watch");
            return;
        }
        debug!(dir = %dir.display(), "auto-added watch for new directory");

        // The directory may already contain subdirectories created before
        // our watch landed.
        if self.recursive {
            if let Err(e) = add_subtree(
                &mut self.watches,
                &mut self.dirs,
                self.kernel_mask,
                &self.exclude,
                dir,
            ) {
                warn!(dir = %dir.display(), error = %e, "failed to auto-add subtree");
            }
        }
    }
}

fn add_single(
    watches: &mut Watches,
    dirs: &mut HashMap<WatchDescriptor, PathBuf>,
    mask: WatchMask,
    dir: &Path,
) -> io::Result<()> {
    let wd = watches.add(dir, mask)?;
    dirs.insert(wd, dir.to_path_buf());
    Ok(())
}

/// Watch every directory strictly below `root`, pruning excluded subtrees.
///
/// Hitting the kernel watch limit (ENOSPC) is fatal; other per-directory
/// failures (races with deletion, permissions) are logged and skipped.
fn add_subtree(
    watches: &mut Watches,
    dirs: &mut HashMap<WatchDescriptor, PathBuf>,
    mask: WatchMask,
    exclude: &ExcludeFilter,
    root: &Path,
) -> io::Result<()> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !exclude.matches(e.path()));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(root = %root.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        if let Err(e) = add_single(watches, dirs, mask, entry.path()) {
            if e.raw_os_error() == Some(libc::ENOSPC) {
                return Err(e);
            }
            warn!(dir = %entry.path().display(), error = %e, "skipping unwatchable directory");
        }
    }

    Ok(())
}
