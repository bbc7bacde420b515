//! Gizmo registry
//!
//! Interactive transform handles that callers acquire and release explicitly.
//! Unlike pooled primitives they survive across frames, and a released index
//! is handed out again by the next `add`, so external references such as
//! "gizmo #3" stay meaningful.

use crate::foundation::math::{CallerPose, HostPose};
use crate::render::coordinates::{pose_from_host, pose_to_host};
use crate::render::host::{HostEngine, HostHandle, PrimitiveKind, PrimitiveParams};

/// One transform handle slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GizmoSlot {
    handle: HostHandle,
    active: bool,
}

impl GizmoSlot {
    /// Host object backing this gizmo
    pub const fn handle(&self) -> HostHandle {
        self.handle
    }

    /// Whether the caller currently holds this index
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

/// Registry of caller-managed transform handles
///
/// Reuse is a linear scan for the first released slot; live gizmo counts are
/// expected to be small.
#[derive(Debug, Default)]
pub struct GizmoRegistry {
    slots: Vec<GizmoSlot>,
    params: PrimitiveParams,
}

impl GizmoRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a gizmo at `pose`, reusing the lowest released index if any
    pub fn add<H: HostEngine + ?Sized>(&mut self, host: &mut H, pose: &CallerPose) -> usize {
        let index = if let Some(index) = self.slots.iter().position(|slot| !slot.active) {
            log::trace!("Reusing gizmo slot {}", index);
            index
        } else {
            let handle = host.create_primitive(PrimitiveKind::TransformHandle, &self.params);
            host.add_to_scene(handle);
            self.slots.push(GizmoSlot { handle, active: false });
            log::debug!("Created gizmo slot {}", self.slots.len() - 1);
            self.slots.len() - 1
        };

        let slot = &mut self.slots[index];
        slot.active = true;
        Self::apply_pose(host, slot.handle, pose);
        host.set_visible(slot.handle, true);
        index
    }

    /// Release a gizmo; its index becomes eligible for reuse
    ///
    /// # Panics
    ///
    /// Panics if `index` was never returned by [`Self::add`].
    pub fn remove<H: HostEngine + ?Sized>(&mut self, host: &mut H, index: usize) {
        let slot = &mut self.slots[index];
        if slot.active {
            slot.active = false;
            host.set_visible(slot.handle, false);
        }
    }

    /// Current caller-space pose, including any direct manipulation in the host
    ///
    /// # Panics
    ///
    /// Panics if `index` was never returned by [`Self::add`].
    pub fn get_world_pose<H: HostEngine + ?Sized>(&self, host: &H, index: usize) -> CallerPose {
        let (position, orientation) = host.transform(self.slots[index].handle);
        pose_from_host(&HostPose::new(position, orientation))
    }

    /// Move a gizmo programmatically
    ///
    /// # Panics
    ///
    /// Panics if `index` was never returned by [`Self::add`].
    pub fn set_pose<H: HostEngine + ?Sized>(
        &mut self,
        host: &mut H,
        index: usize,
        pose: &CallerPose,
    ) {
        Self::apply_pose(host, self.slots[index].handle, pose);
    }

    fn apply_pose<H: HostEngine + ?Sized>(host: &mut H, handle: HostHandle, pose: &CallerPose) {
        let host_pose = pose_to_host(pose);
        host.set_position(handle, host_pose.position);
        host.set_rotation(handle, host_pose.orientation);
    }

    /// Whether `index` is currently held; `false` for unknown indices
    pub fn is_active(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.active)
    }

    /// Number of held gizmos
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    /// Number of slots ever created
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot was ever created
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots in index order
    pub fn slots(&self) -> &[GizmoSlot] {
        &self.slots
    }
}
