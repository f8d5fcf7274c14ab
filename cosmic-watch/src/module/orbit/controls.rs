///! Scene toggles shared between the console and the animation loop.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug)]
pub struct SceneControls {
    animating: AtomicBool,
    show_orbits: AtomicBool,
    show_labels: AtomicBool,
    camera_reset: AtomicU64,
}

impl Default for SceneControls {
    fn default() -> Self {
        Self {
            animating: AtomicBool::new(true),
            show_orbits: AtomicBool::new(true),
            show_labels: AtomicBool::new(false),
            camera_reset: AtomicU64::new(0),
        }
    }
}

impl SceneControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.animating.load(Ordering::SeqCst)
    }

    pub fn set_animating(&self, animating: bool) {
        self.animating.store(animating, Ordering::SeqCst);
    }

    /// Returns the new value
    pub fn toggle_animating(&self) -> bool {
        !self.animating.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn show_orbits(&self) -> bool {
        self.show_orbits.load(Ordering::SeqCst)
    }

    pub fn toggle_orbits(&self) -> bool {
        !self.show_orbits.fetch_xor(true, Ordering::SeqCst)
    }

    pub fn show_labels(&self) -> bool {
        self.show_labels.load(Ordering::SeqCst)
    }

    pub fn toggle_labels(&self) -> bool {
        !self.show_labels.fetch_xor(true, Ordering::SeqCst)
    }

    /// Bump the reset counter; returns the new value
    pub fn request_camera_reset(&self) -> u64 {
        self.camera_reset.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn camera_reset_count(&self) -> u64 {
        self.camera_reset.load(Ordering::SeqCst)
    }
}

/// Consumer side of the camera reset signal. Each request is seen once.
#[derive(Debug, Default)]
pub struct CameraResetWatcher {
    seen: u64,
}

impl CameraResetWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a reset was requested since the last call
    pub fn take(&mut self, controls: &SceneControls) -> bool {
        let current = controls.camera_reset_count();
        if current != self.seen {
            self.seen = current;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let controls = SceneControls::new();
        assert!(controls.is_animating());
        assert!(controls.show_orbits());
        assert!(!controls.show_labels());
        assert_eq!(controls.camera_reset_count(), 0);
    }

    #[test]
    fn test_toggles() {
        let controls = SceneControls::new();
        assert!(!controls.toggle_animating());
        assert!(!controls.is_animating());
        assert!(controls.toggle_animating());

        assert!(!controls.toggle_orbits());
        assert!(controls.toggle_labels());
        assert!(controls.show_labels());
    }

    #[test]
    fn test_camera_reset_is_one_shot() {
        let controls = SceneControls::new();
        let mut watcher = CameraResetWatcher::new();
        assert!(!watcher.take(&controls));

        assert_eq!(controls.request_camera_reset(), 1);
        assert_eq!(controls.request_camera_reset(), 2);
        assert!(watcher.take(&controls));
        assert!(!watcher.take(&controls));

        controls.request_camera_reset();
        assert!(watcher.take(&controls));
    }
}
