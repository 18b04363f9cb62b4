//! Mounts: host attachment points and the process-wide named registry.
//!
//! A [`Mount`] stands in for "an element in the host UI". Animations
//! attach their surfaces to it; the embedder reads the attached surfaces
//! back in attach order and composites them however its UI presents
//! pixels. Mounts are cheap clonable handles over shared state.

use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::canvas::Canvas;
use crate::error::HaloError;

/// Shared handle to a surface, held by both the runtime and its mount.
pub(crate) type SharedCanvas = Arc<Mutex<Canvas>>;

/// A host attachment point holding zero or more animation surfaces.
#[derive(Clone, Default)]
pub struct Mount {
    surfaces: Arc<Mutex<Vec<SharedCanvas>>>,
}

impl Mount {
    /// A fresh, empty mount.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&self, surface: SharedCanvas) {
        self.lock().push(surface);
    }

    /// Remove a surface by identity. Returns whether it was attached.
    pub(crate) fn detach(&self, surface: &SharedCanvas) -> bool {
        let mut surfaces = self.lock();
        let before = surfaces.len();
        surfaces.retain(|s| !Arc::ptr_eq(s, surface));
        surfaces.len() != before
    }

    /// Number of attached surfaces.
    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run a closure over every attached surface in attach order. This is
    /// the embedder's read path for presenting pixels.
    pub fn with_frames<F>(&self, mut f: F)
    where
        F: FnMut(&Canvas),
    {
        for surface in self.lock().iter() {
            let canvas = surface.lock().unwrap_or_else(PoisonError::into_inner);
            f(&canvas);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SharedCanvas>> {
        self.surfaces.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mount")
            .field("surfaces", &self.surface_count())
            .finish()
    }
}

/// Factory-facing mount selector: a registered name or a direct handle.
#[derive(Debug, Clone)]
pub enum MountSel {
    /// Look the mount up in the registry at construction time.
    Name(String),
    /// Use this mount directly.
    Handle(Mount),
}

impl MountSel {
    pub(crate) fn resolve(&self) -> Result<Mount, HaloError> {
        match self {
            Self::Name(name) => resolve(name),
            Self::Handle(mount) => Ok(mount.clone()),
        }
    }
}

impl From<&str> for MountSel {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for MountSel {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&Mount> for MountSel {
    fn from(mount: &Mount) -> Self {
        Self::Handle(mount.clone())
    }
}

impl From<Mount> for MountSel {
    fn from(mount: Mount) -> Self {
        Self::Handle(mount)
    }
}

// ── Named registry ──────────────────────────────────────────────────────

fn registry() -> &'static RwLock<FxHashMap<String, Mount>> {
    static REGISTRY: OnceLock<RwLock<FxHashMap<String, Mount>>> =
        OnceLock::new();
    REGISTRY.get_or_init(|| RwLock::new(FxHashMap::default()))
}

/// Register (or replace) a mount under a name.
pub fn register(name: impl Into<String>, mount: &Mount) {
    let name = name.into();
    log::debug!("registering mount {name:?}");
    let mut map = registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    let _ = map.insert(name, mount.clone());
}

/// Look up a registered mount by name.
///
/// # Errors
/// `HaloError::MountNotFound` when no mount is registered under `name`.
pub fn resolve(name: &str) -> Result<Mount, HaloError> {
    registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .cloned()
        .ok_or_else(|| HaloError::MountNotFound(name.to_owned()))
}

/// Remove a registration. Returns whether the name was present.
pub fn unregister(name: &str) -> bool {
    registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(name)
        .is_some()
}

/// Drop every registration. Teardown hook for embedders and test
/// harnesses that own the whole process.
pub fn clear_registry() {
    registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared(width: u32, height: u32) -> SharedCanvas {
        Arc::new(Mutex::new(Canvas::new(width, height).unwrap()))
    }

    #[test]
    fn attach_detach_by_identity() {
        let mount = Mount::new();
        let a = shared(8, 8);
        let b = shared(8, 8);
        mount.attach(Arc::clone(&a));
        mount.attach(Arc::clone(&b));
        assert_eq!(mount.surface_count(), 2);

        assert!(mount.detach(&a));
        assert_eq!(mount.surface_count(), 1);
        // Detaching again is a no-op.
        assert!(!mount.detach(&a));
        assert!(mount.detach(&b));
        assert!(mount.is_empty());
    }

    #[test]
    fn with_frames_visits_in_attach_order() {
        let mount = Mount::new();
        mount.attach(shared(4, 4));
        mount.attach(shared(9, 4));

        let mut widths = Vec::new();
        mount.with_frames(|canvas| widths.push(canvas.width()));
        assert_eq!(widths, vec![4, 9]);
    }

    #[test]
    fn registry_resolves_registered_names() {
        let mount = Mount::new();
        register("mount-registry-test", &mount);

        let resolved = resolve("mount-registry-test").unwrap();
        mount.attach(shared(4, 4));
        // Same underlying mount, not a copy.
        assert_eq!(resolved.surface_count(), 1);

        assert!(unregister("mount-registry-test"));
        assert!(!unregister("mount-registry-test"));
    }

    #[test]
    fn resolve_reports_missing_names() {
        let err = resolve("mount-that-never-was").unwrap_err();
        assert!(matches!(err, HaloError::MountNotFound(name) if name == "mount-that-never-was"));
    }

    #[test]
    fn selector_converts_from_names_and_handles() {
        let mount = Mount::new();
        let by_handle = MountSel::from(&mount).resolve().unwrap();
        mount.attach(shared(4, 4));
        assert_eq!(by_handle.surface_count(), 1);

        register("mount-sel-test", &mount);
        let by_name = MountSel::from("mount-sel-test").resolve().unwrap();
        assert_eq!(by_name.surface_count(), 1);
        assert!(unregister("mount-sel-test"));
    }
}
