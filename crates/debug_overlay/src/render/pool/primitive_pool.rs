//! Per-kind primitive pool
//!
//! An append-only arena of host objects plus a per-frame cursor. Each draw
//! call takes the slot under the cursor and advances it; when the cursor
//! reaches the end, a whole batch of hidden host objects is created at once.
//! At frame end every slot the cursor did not reach is hidden, not freed.
//!
//! ```text
//!  slots:  [0][1][2][3][4][5] ... [capacity-1]
//!           ^^^^^^^^^  ^
//!           drawn      used_this_frame
//!                      |------ hidden at end_frame ------|
//! ```

use crate::foundation::math::{HostQuat, HostVec3, Vec3};
use crate::render::color::Color;
use crate::render::host::{HostEngine, HostHandle, PrimitiveKind, PrimitiveParams};
use crate::render::pool::placement::Placement;

/// Index of a slot within one pool
pub type SlotIndex = usize;

/// Full configuration applied to a slot by one draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotConfig {
    /// Host-space position
    pub position: HostVec3,
    /// Host-space orientation, left untouched when `None`
    pub rotation: Option<HostQuat>,
    /// Per-axis scale
    pub scale: Vec3,
    /// Material color
    pub color: Color,
    /// Material opacity
    pub opacity: f32,
    /// Whether the material is depth tested
    pub depth_test: bool,
}

impl SlotConfig {
    /// Combine a placement with material settings
    pub const fn new(placement: Placement, color: Color, opacity: f32, depth_test: bool) -> Self {
        Self {
            position: placement.position,
            rotation: placement.rotation,
            scale: placement.scale,
            color,
            opacity,
            depth_test,
        }
    }
}

/// One reusable host object
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSlot {
    handle: HostHandle,
    visible: bool,
    config: Option<SlotConfig>,
}

impl PoolSlot {
    /// Host object backing this slot
    pub const fn handle(&self) -> HostHandle {
        self.handle
    }

    /// Whether the overlay last made this slot visible
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Configuration from the last draw call that used this slot
    pub const fn config(&self) -> Option<&SlotConfig> {
        self.config.as_ref()
    }
}

/// Usage statistics for one pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Kind of primitive pooled
    pub kind: PrimitiveKind,
    /// Allocated slots
    pub capacity: usize,
    /// Slots drawn in the last completed frame
    pub used_last_frame: usize,
    /// Most slots ever drawn in one frame
    pub peak_used: usize,
    /// Number of batch growths performed
    pub growth_count: usize,
}

/// Pool of reusable host objects for one primitive kind
#[derive(Debug)]
pub struct PrimitivePool {
    kind: PrimitiveKind,
    params: PrimitiveParams,
    slots: Vec<PoolSlot>,
    used_this_frame: usize,
    /// Upper bound of the slots that may still be visible from earlier frames
    shown_last_frame: usize,
    used_last_frame: usize,
    growth_batch_size: usize,
    peak_used: usize,
    growth_count: usize,
}

impl PrimitivePool {
    /// Create an empty pool; nothing is allocated until the first acquire
    pub fn new(kind: PrimitiveKind, growth_batch_size: usize, params: PrimitiveParams) -> Self {
        if growth_batch_size == 0 {
            log::warn!("Growth batch size 0 for {} pool, using 1", kind);
        }
        Self {
            kind,
            params,
            slots: Vec::new(),
            used_this_frame: 0,
            shown_last_frame: 0,
            used_last_frame: 0,
            growth_batch_size: growth_batch_size.max(1),
            peak_used: 0,
            growth_count: 0,
        }
    }

    /// Kind of primitive pooled
    pub const fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    /// Number of allocated slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots handed out since the frame began
    pub const fn used_this_frame(&self) -> usize {
        self.used_this_frame
    }

    /// Slots allocated per growth
    pub const fn growth_batch_size(&self) -> usize {
        self.growth_batch_size
    }

    /// All slots in index order
    pub fn slots(&self) -> &[PoolSlot] {
        &self.slots
    }

    /// One slot
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn slot(&self, index: SlotIndex) -> &PoolSlot {
        &self.slots[index]
    }

    /// Hand out the next slot for this frame, growing by one batch if full
    pub fn acquire<H: HostEngine + ?Sized>(&mut self, host: &mut H) -> SlotIndex {
        if self.used_this_frame == self.slots.len() {
            self.grow(host);
        }
        let index = self.used_this_frame;
        self.used_this_frame += 1;
        index
    }

    fn grow<H: HostEngine + ?Sized>(&mut self, host: &mut H) {
        let start = self.slots.len();
        self.slots.reserve(self.growth_batch_size);
        for _ in 0..self.growth_batch_size {
            let handle = host.create_primitive(self.kind, &self.params);
            host.set_visible(handle, false);
            host.add_to_scene(handle);
            self.slots.push(PoolSlot { handle, visible: false, config: None });
        }
        self.growth_count += 1;
        log::debug!(
            "Grew {} pool from {} to {} slots",
            self.kind,
            start,
            self.slots.len()
        );
    }

    /// Apply a draw call's configuration to a slot and show it
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn configure<H: HostEngine + ?Sized>(
        &mut self,
        host: &mut H,
        index: SlotIndex,
        config: SlotConfig,
    ) {
        let slot = &mut self.slots[index];
        let handle = slot.handle;

        host.set_position(handle, config.position);
        if let Some(rotation) = config.rotation {
            host.set_rotation(handle, rotation);
        }
        host.set_scale(handle, config.scale);
        host.set_color(handle, config.color);
        host.set_opacity(handle, config.opacity);
        host.set_depth_test(handle, config.depth_test);
        if !slot.visible {
            host.set_visible(handle, true);
            slot.visible = true;
        }
        slot.config = Some(config);
        self.shown_last_frame = self.shown_last_frame.max(index + 1);
    }

    /// Rewrite a slot's vertex buffer in place
    ///
    /// Writes as many corners as the host buffer holds.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn write_vertices<H: HostEngine + ?Sized, const N: usize>(
        &mut self,
        host: &mut H,
        index: SlotIndex,
        corners: &[HostVec3; N],
    ) {
        let handle = self.slots[index].handle;
        let packed: [[f32; 3]; N] = (*corners).map(|corner| corner.to_array());
        let floats: &[f32] = bytemuck::cast_slice(&packed[..]);

        let buffer = host.vertex_buffer_mut(handle);
        let len = buffer.len().min(floats.len());
        buffer[..len].copy_from_slice(&floats[..len]);
        host.commit_vertices(handle);
    }

    /// Start a frame: the cursor returns to slot 0
    pub fn begin_frame(&mut self) {
        self.used_this_frame = 0;
    }

    /// Finish a frame: hide every slot not drawn this frame, reset the cursor
    pub fn end_frame<H: HostEngine + ?Sized>(&mut self, host: &mut H) {
        let used = self.used_this_frame;
        self.hide_range(host, used, self.shown_last_frame);

        self.shown_last_frame = used;
        self.used_last_frame = used;
        self.peak_used = self.peak_used.max(used);
        self.used_this_frame = 0;
    }

    /// Hide every slot, including those drawn this frame
    pub fn hide_all<H: HostEngine + ?Sized>(&mut self, host: &mut H) {
        let end = self.shown_last_frame.max(self.used_this_frame);
        self.hide_range(host, 0, end);
        self.shown_last_frame = 0;
    }

    fn hide_range<H: HostEngine + ?Sized>(&mut self, host: &mut H, start: usize, end: usize) {
        let end = end.min(self.slots.len());
        if start >= end {
            return;
        }
        for slot in &mut self.slots[start..end] {
            if slot.visible {
                host.set_visible(slot.handle, false);
                slot.visible = false;
            }
        }
    }

    /// Usage statistics
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            kind: self.kind,
            capacity: self.slots.len(),
            used_last_frame: self.used_last_frame,
            peak_used: self.peak_used,
            growth_count: self.growth_count,
        }
    }
}
