//! Debug drawing primitives and system
//!
//! [`DebugOverlay`] is the context object callers draw through. It owns the
//! host engine, one pool per primitive kind and the gizmo registry, so two
//! overlays never share state.
//!
//! All geometry passed in is caller space (Z-up). Every `draw_*` call is only
//! valid for the frame it is issued in: whatever is not drawn again next
//! frame is hidden when that frame ends.

use crate::core::config::{DrawDefaults, OverlayConfig};
use crate::foundation::math::{CallerPose, CallerVec3};
use crate::render::color::Color;
use crate::render::gizmo::GizmoRegistry;
use crate::render::host::{HostEngine, PrimitiveKind};
use crate::render::options::{DrawOptions, GridOptions, NumberLineOptions, VectorOptions};
use crate::render::pool::placement::{
    cone_placement, line_placement, plane_corners, sphere_placement, Placement,
};
use crate::render::pool::{PoolSet, PoolStats, SlotConfig, SlotIndex};

const DIRECTION_EPSILON: f32 = 1e-9;

/// Slots used by one vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorSlots {
    /// Line pool slot of the shaft
    pub shaft: SlotIndex,
    /// Cone pool slot of the arrowhead
    pub head: SlotIndex,
}

/// Debug overlay drawing context
pub struct DebugOverlay<H: HostEngine> {
    host: H,
    pools: PoolSet,
    gizmos: GizmoRegistry,
    defaults: DrawDefaults,

    /// Master enable/disable flag for draw calls
    enabled: bool,
}

impl<H: HostEngine> DebugOverlay<H> {
    /// Create an overlay on top of `host`
    ///
    /// No host objects are created until the first draw call.
    pub fn new(host: H, config: &OverlayConfig) -> Self {
        log::info!(
            "Created debug overlay (batch sizes line={} sphere={} cone={} plane={})",
            config.pools.line_batch_size,
            config.pools.sphere_batch_size,
            config.pools.cone_batch_size,
            config.pools.plane_batch_size,
        );
        Self {
            host,
            pools: PoolSet::new(&config.pools),
            gizmos: GizmoRegistry::new(),
            defaults: config.defaults,
            enabled: true,
        }
    }

    /// Create an overlay with the default configuration
    pub fn with_default_config(host: H) -> Self {
        Self::new(host, &OverlayConfig::default())
    }

    /// Host engine
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host engine
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Give the host back
    pub fn into_host(self) -> H {
        self.host
    }

    /// Primitive pools
    pub const fn pools(&self) -> &PoolSet {
        &self.pools
    }

    /// Gizmo registry
    pub const fn gizmos(&self) -> &GizmoRegistry {
        &self.gizmos
    }

    /// Default draw options from the config
    pub const fn default_options(&self) -> DrawOptions {
        self.defaults.options
    }

    /// Whether draw calls are honored
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable draw calls
    ///
    /// Disabling hides everything immediately; gizmos are unaffected.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.hide_all();
        }
        self.enabled = enabled;
    }

    /// Start a frame: every pool cursor returns to slot 0
    pub fn begin_frame(&mut self) {
        self.pools.begin_frame_all();
    }

    /// Finish a frame: hide every slot not drawn since `begin_frame`
    pub fn end_frame(&mut self) {
        self.pools.end_frame_all(&mut self.host);
    }

    /// Hide every pooled primitive, including those drawn this frame
    pub fn hide_all(&mut self) {
        self.pools.hide_all(&mut self.host);
    }

    /// Per-pool statistics
    pub fn stats(&self) -> [PoolStats; 4] {
        self.pools.stats()
    }

    fn place(
        &mut self,
        kind: PrimitiveKind,
        placement: Placement,
        options: &DrawOptions,
    ) -> SlotIndex {
        let pool = self.pools.pool_mut(kind);
        let index = pool.acquire(&mut self.host);
        let config = SlotConfig::new(
            placement,
            options.color,
            options.opacity,
            options.depth_test(),
        );
        pool.configure(&mut self.host, index, config);
        index
    }

    /// Draw a line segment from `start` to `end`
    ///
    /// Coincident endpoints produce an effectively zero-length tube.
    pub fn draw_line(
        &mut self,
        start: CallerVec3,
        end: CallerVec3,
        options: &DrawOptions,
    ) -> Option<SlotIndex> {
        if !self.enabled {
            return None;
        }
        let placement = line_placement(start, end, options.thickness);
        Some(self.place(PrimitiveKind::Line, placement, options))
    }

    /// Draw a sphere
    pub fn draw_sphere(
        &mut self,
        center: CallerVec3,
        radius: f32,
        options: &DrawOptions,
    ) -> Option<SlotIndex> {
        if !self.enabled {
            return None;
        }
        Some(self.place(PrimitiveKind::Sphere, sphere_placement(center, radius), options))
    }

    /// Draw a cone with its base at `start` and apex at `end`
    pub fn draw_cone(
        &mut self,
        start: CallerVec3,
        end: CallerVec3,
        radius: f32,
        options: &DrawOptions,
    ) -> Option<SlotIndex> {
        if !self.enabled {
            return None;
        }
        Some(self.place(PrimitiveKind::Cone, cone_placement(start, end, radius), options))
    }

    /// Draw an arrow from `start` to `end` with the configured arrowhead
    pub fn draw_vector(
        &mut self,
        start: CallerVec3,
        end: CallerVec3,
        options: &DrawOptions,
    ) -> Option<VectorSlots> {
        let vector = self.defaults.vector;
        self.draw_vector_with(start, end, options, &vector)
    }

    /// Draw an arrow with explicit arrowhead proportions
    ///
    /// The head is clamped to the vector length, so short vectors are all head.
    pub fn draw_vector_with(
        &mut self,
        start: CallerVec3,
        end: CallerVec3,
        options: &DrawOptions,
        vector: &VectorOptions,
    ) -> Option<VectorSlots> {
        if !self.enabled {
            return None;
        }
        let delta = end - start;
        let length = delta.norm();
        let head_length = vector.head_length.max(0.0).min(length);
        let head_start = delta
            .try_normalize(DIRECTION_EPSILON)
            .map_or(end, |dir| end - dir * head_length);

        let shaft = self.place(
            PrimitiveKind::Line,
            line_placement(start, head_start, options.thickness),
            options,
        );
        let head = self.place(
            PrimitiveKind::Cone,
            cone_placement(head_start, end, vector.head_radius),
            options,
        );
        Some(VectorSlots { shaft, head })
    }

    /// Draw a quad centered at `center` spanning `width` along `span_a` and
    /// `height` along `span_b`
    pub fn draw_plane(
        &mut self,
        center: CallerVec3,
        span_a: CallerVec3,
        span_b: CallerVec3,
        width: f32,
        height: f32,
        options: &DrawOptions,
    ) -> Option<SlotIndex> {
        if !self.enabled {
            return None;
        }
        let index = self.place(PrimitiveKind::Plane, Placement::identity(), options);
        let corners = plane_corners(center, span_a, span_b, width, height);
        self.pools
            .pool_mut(PrimitiveKind::Plane)
            .write_vertices(&mut self.host, index, &corners);
        Some(index)
    }

    /// Draw a grid over a quad using the configured layout
    ///
    /// Returns the number of grid lines drawn.
    pub fn draw_grid_plane(
        &mut self,
        center: CallerVec3,
        span_a: CallerVec3,
        span_b: CallerVec3,
        width: f32,
        height: f32,
        options: &DrawOptions,
    ) -> usize {
        let grid = self.defaults.grid;
        self.draw_grid_plane_with(center, span_a, span_b, width, height, options, &grid)
    }

    /// Draw a grid with an explicit layout
    pub fn draw_grid_plane_with(
        &mut self,
        center: CallerVec3,
        span_a: CallerVec3,
        span_b: CallerVec3,
        width: f32,
        height: f32,
        options: &DrawOptions,
        grid: &GridOptions,
    ) -> usize {
        if !self.enabled {
            return 0;
        }
        let a = span_a.try_normalize(DIRECTION_EPSILON).unwrap_or(span_a);
        let b = span_b.try_normalize(DIRECTION_EPSILON).unwrap_or(span_b);
        let divisions = grid.divisions.max(1);
        let corner = center - a * (width * 0.5) - b * (height * 0.5);

        let mut drawn = 0;
        for i in 0..=divisions {
            let t = i as f32 / divisions as f32;
            // Line parallel to span_b at fraction t of the width
            let along_a = corner + a * (width * t);
            self.draw_line(along_a, along_a + b * height, options);
            // Line parallel to span_a at fraction t of the height
            let along_b = corner + b * (height * t);
            self.draw_line(along_b, along_b + a * width, options);
            drawn += 2;
        }

        if grid.fill_opacity > 0.0 {
            let fill = options.with_opacity(grid.fill_opacity * options.opacity);
            self.draw_plane(center, a, b, width, height, &fill);
        }
        drawn
    }

    /// Draw a number line from `start` to `end` with the configured ticks
    ///
    /// Returns the number of tick marks drawn.
    pub fn draw_number_line(
        &mut self,
        start: CallerVec3,
        end: CallerVec3,
        options: &DrawOptions,
    ) -> usize {
        let number_line = self.defaults.number_line;
        self.draw_number_line_with(start, end, options, &number_line)
    }

    /// Draw a number line with an explicit tick layout
    ///
    /// Ticks sit at every multiple of `tick_spacing` from `start`, perpendicular
    /// to the line and lying in the plane containing caller +Z where possible.
    pub fn draw_number_line_with(
        &mut self,
        start: CallerVec3,
        end: CallerVec3,
        options: &DrawOptions,
        number_line: &NumberLineOptions,
    ) -> usize {
        if !self.enabled {
            return 0;
        }
        self.draw_line(start, end, options);

        let delta = end - start;
        let length = delta.norm();
        let Some(dir) = delta.try_normalize(DIRECTION_EPSILON) else {
            return 0;
        };
        if number_line.tick_spacing <= 0.0 {
            return 0;
        }

        let across = dir
            .cross(&CallerVec3::new(0.0, 0.0, 1.0))
            .try_normalize(DIRECTION_EPSILON)
            .or_else(|| {
                dir.cross(&CallerVec3::new(1.0, 0.0, 0.0))
                    .try_normalize(DIRECTION_EPSILON)
            })
            .unwrap_or_else(CallerVec3::zeros);
        let half_tick = across * (number_line.tick_size * 0.5);

        // Tolerance keeps a tick on `end` when length is an exact multiple
        let spans = ((length / number_line.tick_spacing) + 1e-4).floor();
        let ticks = (spans as u64)
            .saturating_add(1)
            .min(u64::from(number_line.max_ticks));
        for k in 0..ticks {
            let point = start + dir * (k as f32 * number_line.tick_spacing);
            self.draw_line(point - half_tick, point + half_tick, options);
        }
        usize::try_from(ticks).unwrap_or(usize::MAX)
    }

    /// Draw the axes of a caller-space pose as red/green/blue vectors
    pub fn draw_axes(&mut self, pose: &CallerPose, length: f32, options: &DrawOptions) {
        let axes = [
            (CallerVec3::new(1.0, 0.0, 0.0), Color::RED),
            (CallerVec3::new(0.0, 1.0, 0.0), Color::GREEN),
            (CallerVec3::new(0.0, 0.0, 1.0), Color::BLUE),
        ];
        for (axis, color) in axes {
            let tip = pose.position + pose.orientation.rotate(axis) * length;
            let axis_options = DrawOptions { color, ..*options };
            self.draw_vector(pose.position, tip, &axis_options);
        }
    }

    /// Create an interactive transform handle, returning its stable index
    pub fn add_gizmo(&mut self, pose: &CallerPose) -> usize {
        self.gizmos.add(&mut self.host, pose)
    }

    /// Release a transform handle; the index will be reused
    ///
    /// # Panics
    ///
    /// Panics if `index` was never returned by [`Self::add_gizmo`].
    pub fn remove_gizmo(&mut self, index: usize) {
        self.gizmos.remove(&mut self.host, index);
    }

    /// Current caller-space pose of a transform handle
    ///
    /// # Panics
    ///
    /// Panics if `index` was never returned by [`Self::add_gizmo`].
    pub fn get_gizmo_pose(&self, index: usize) -> CallerPose {
        self.gizmos.get_world_pose(&self.host, index)
    }

    /// Move a transform handle
    ///
    /// # Panics
    ///
    /// Panics if `index` was never returned by [`Self::add_gizmo`].
    pub fn set_gizmo_pose(&mut self, index: usize, pose: &CallerPose) {
        self.gizmos.set_pose(&mut self.host, index, pose);
    }
}

impl<H: HostEngine + Default> Default for DebugOverlay<H> {
    fn default() -> Self {
        Self::with_default_config(H::default())
    }
}
