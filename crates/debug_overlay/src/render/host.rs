//! Host engine abstraction
//!
//! The overlay never renders anything itself. It drives a scene-graph engine
//! through the [`HostEngine`] trait: objects are created once, added to the
//! scene once, and from then on only their transform, material and visibility
//! are mutated. Nothing is ever removed from the scene.
//!
//! [`RecordingHost`] is an in-memory implementation that keeps every object's
//! last written state. Tests and the demo binary run against it.

use crate::foundation::math::{HostQuat, HostVec3, Vec3};
use crate::render::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an object owned by the host engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostHandle(pub u64);

/// Kinds of host objects the overlay creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// Unit-height cylinder along local +Y, centered at the origin
    Line,
    /// Unit-radius sphere
    Sphere,
    /// Unit-height cone along local +Y with its apex at +Y, centered at the origin
    Cone,
    /// Four-vertex quad with a writable vertex buffer
    Plane,
    /// Interactive transform handle
    TransformHandle,
}

impl PrimitiveKind {
    /// Kinds managed by per-frame pools
    pub const POOLED: [Self; 4] = [Self::Line, Self::Sphere, Self::Cone, Self::Plane];

    /// Number of floats in a freshly created vertex buffer
    pub const fn vertex_floats(self) -> usize {
        match self {
            Self::Plane => 12,
            _ => 0,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Line => "line",
            Self::Sphere => "sphere",
            Self::Cone => "cone",
            Self::Plane => "plane",
            Self::TransformHandle => "transform-handle",
        };
        f.pad(name)
    }
}

/// Creation parameters for a host primitive
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveParams {
    /// Initial material color
    pub color: Color,
    /// Initial opacity
    pub opacity: f32,
    /// Whether the material is depth tested
    pub depth_test: bool,
    /// Tessellation hint for curved primitives
    pub segments: u32,
}

impl Default for PrimitiveParams {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            opacity: 1.0,
            depth_test: true,
            segments: 16,
        }
    }
}

/// Operations the overlay needs from a scene-graph engine
pub trait HostEngine {
    /// Create a new object. The overlay never destroys it.
    fn create_primitive(&mut self, kind: PrimitiveKind, params: &PrimitiveParams) -> HostHandle;

    /// Attach an object to the rendered scene
    fn add_to_scene(&mut self, handle: HostHandle);

    /// Set object position
    fn set_position(&mut self, handle: HostHandle, position: HostVec3);

    /// Set object orientation
    fn set_rotation(&mut self, handle: HostHandle, rotation: HostQuat);

    /// Set per-axis object scale
    fn set_scale(&mut self, handle: HostHandle, scale: Vec3);

    /// Show or hide an object
    fn set_visible(&mut self, handle: HostHandle, visible: bool);

    /// Set material color
    fn set_color(&mut self, handle: HostHandle, color: Color);

    /// Set material opacity
    fn set_opacity(&mut self, handle: HostHandle, opacity: f32);

    /// Enable or disable depth testing for the object's material
    fn set_depth_test(&mut self, handle: HostHandle, depth_test: bool);

    /// Direct access to the object's position attribute, packed `xyz` floats
    fn vertex_buffer_mut(&mut self, handle: HostHandle) -> &mut [f32];

    /// Flag the vertex buffer as modified after a direct write
    fn commit_vertices(&mut self, handle: HostHandle);

    /// Current world transform of an object
    fn transform(&self, handle: HostHandle) -> (HostVec3, HostQuat);
}

/// Last written state of one object in a [`RecordingHost`]
#[derive(Debug, Clone, PartialEq)]
pub struct HostObject {
    /// Kind it was created as
    pub kind: PrimitiveKind,
    /// Position
    pub position: HostVec3,
    /// Orientation
    pub rotation: HostQuat,
    /// Scale
    pub scale: Vec3,
    /// Visibility
    pub visible: bool,
    /// Material color
    pub color: Color,
    /// Material opacity
    pub opacity: f32,
    /// Material depth test
    pub depth_test: bool,
    /// Packed vertex positions
    pub vertices: Vec<f32>,
    /// Number of vertex buffer commits
    pub vertex_commits: usize,
    /// Whether the object was added to the scene
    pub in_scene: bool,
}

/// Counters for host calls, used to check allocation behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostCallStats {
    /// Objects created
    pub created: usize,
    /// Visibility writes
    pub visibility_writes: usize,
    /// Transform writes (position, rotation or scale)
    pub transform_writes: usize,
}

/// In-memory host that records every mutation
#[derive(Debug, Default)]
pub struct RecordingHost {
    objects: Vec<HostObject>,
    stats: HostCallStats,
}

impl RecordingHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// State of one object
    ///
    /// # Panics
    ///
    /// Panics if `handle` was not created by this host.
    pub fn object(&self, handle: HostHandle) -> &HostObject {
        &self.objects[Self::slot(handle)]
    }

    /// All objects in creation order
    pub fn objects(&self) -> &[HostObject] {
        &self.objects
    }

    /// Number of objects of one kind
    pub fn count_of(&self, kind: PrimitiveKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }

    /// Number of visible objects of one kind
    pub fn visible_count_of(&self, kind: PrimitiveKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind && o.visible).count()
    }

    /// Call counters
    pub const fn stats(&self) -> HostCallStats {
        self.stats
    }

    /// Move an object as a user dragging it in the viewport would
    pub fn manipulate(&mut self, handle: HostHandle, position: HostVec3, rotation: HostQuat) {
        let object = self.object_mut(handle);
        object.position = position;
        object.rotation = rotation;
    }

    fn slot(handle: HostHandle) -> usize {
        usize::try_from(handle.0).unwrap_or(usize::MAX)
    }

    fn object_mut(&mut self, handle: HostHandle) -> &mut HostObject {
        &mut self.objects[Self::slot(handle)]
    }
}

impl HostEngine for RecordingHost {
    fn create_primitive(&mut self, kind: PrimitiveKind, params: &PrimitiveParams) -> HostHandle {
        let handle = HostHandle(self.objects.len() as u64);
        self.objects.push(HostObject {
            kind,
            position: HostVec3::zeros(),
            rotation: HostQuat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            // Scene-graph engines create objects visible
            visible: true,
            color: params.color,
            opacity: params.opacity,
            depth_test: params.depth_test,
            vertices: vec![0.0; kind.vertex_floats()],
            vertex_commits: 0,
            in_scene: false,
        });
        self.stats.created += 1;
        handle
    }

    fn add_to_scene(&mut self, handle: HostHandle) {
        self.object_mut(handle).in_scene = true;
    }

    fn set_position(&mut self, handle: HostHandle, position: HostVec3) {
        self.stats.transform_writes += 1;
        self.object_mut(handle).position = position;
    }

    fn set_rotation(&mut self, handle: HostHandle, rotation: HostQuat) {
        self.stats.transform_writes += 1;
        self.object_mut(handle).rotation = rotation;
    }

    fn set_scale(&mut self, handle: HostHandle, scale: Vec3) {
        self.stats.transform_writes += 1;
        self.object_mut(handle).scale = scale;
    }

    fn set_visible(&mut self, handle: HostHandle, visible: bool) {
        self.stats.visibility_writes += 1;
        self.object_mut(handle).visible = visible;
    }

    fn set_color(&mut self, handle: HostHandle, color: Color) {
        self.object_mut(handle).color = color;
    }

    fn set_opacity(&mut self, handle: HostHandle, opacity: f32) {
        self.object_mut(handle).opacity = opacity;
    }

    fn set_depth_test(&mut self, handle: HostHandle, depth_test: bool) {
        self.object_mut(handle).depth_test = depth_test;
    }

    fn vertex_buffer_mut(&mut self, handle: HostHandle) -> &mut [f32] {
        &mut self.object_mut(handle).vertices
    }

    fn commit_vertices(&mut self, handle: HostHandle) {
        self.object_mut(handle).vertex_commits += 1;
    }

    fn transform(&self, handle: HostHandle) -> (HostVec3, HostQuat) {
        let object = self.object(handle);
        (object.position, object.rotation)
    }
}
