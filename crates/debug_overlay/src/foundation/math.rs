//! Math utilities and types
//!
//! Provides the nalgebra aliases used throughout the overlay, plus geometry
//! types tagged with the coordinate space they are expressed in. Caller space
//! is Z-up right-handed; host space is Y-up right-handed. Mixing the two is a
//! type error, conversions go through [`crate::render::coordinates`].

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Mul, Neg, Sub};

pub use nalgebra::{Matrix3, Quaternion, Unit, UnitQuaternion, Vector3};

use crate::render::coordinates::CoordinateSystem;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Marker for a coordinate convention
pub trait Space: Copy + Default + fmt::Debug + PartialEq + 'static {
    /// Convention this marker stands for
    const SYSTEM: CoordinateSystem;
}

/// Z-up right-handed convention used by calling code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallerSpace;

/// Y-up right-handed convention used by the host engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostSpace;

impl Space for CallerSpace {
    const SYSTEM: CoordinateSystem = CoordinateSystem::ZUpRightHanded;
}

impl Space for HostSpace {
    const SYSTEM: CoordinateSystem = CoordinateSystem::YUpRightHanded;
}

/// A 3D vector tagged with the space it lives in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceVec3<S: Space> {
    raw: Vec3,
    space: PhantomData<S>,
}

/// Vector in caller space (Z-up)
pub type CallerVec3 = SpaceVec3<CallerSpace>;

/// Vector in host space (Y-up)
pub type HostVec3 = SpaceVec3<HostSpace>;

impl<S: Space> SpaceVec3<S> {
    /// Create from components
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self::from_raw(Vec3::new(x, y, z))
    }

    /// Wrap an untagged vector
    pub const fn from_raw(raw: Vec3) -> Self {
        Self { raw, space: PhantomData }
    }

    /// The zero vector
    pub fn zeros() -> Self {
        Self::from_raw(Vec3::zeros())
    }

    /// Untagged components
    pub const fn raw(&self) -> Vec3 {
        self.raw
    }

    /// Components as an array
    pub fn to_array(&self) -> [f32; 3] {
        [self.raw.x, self.raw.y, self.raw.z]
    }

    /// X component
    pub fn x(&self) -> f32 {
        self.raw.x
    }

    /// Y component
    pub fn y(&self) -> f32 {
        self.raw.y
    }

    /// Z component
    pub fn z(&self) -> f32 {
        self.raw.z
    }

    /// Euclidean length
    pub fn norm(&self) -> f32 {
        self.raw.norm()
    }

    /// Distance to another point in the same space
    pub fn distance(&self, other: &Self) -> f32 {
        (other.raw - self.raw).norm()
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f32 {
        self.raw.dot(&other.raw)
    }

    /// Cross product
    pub fn cross(&self, other: &Self) -> Self {
        Self::from_raw(self.raw.cross(&other.raw))
    }

    /// Point halfway to `other`
    pub fn midpoint(&self, other: &Self) -> Self {
        Self::from_raw((self.raw + other.raw) * 0.5)
    }

    /// Unit vector in the same direction, or `None` for a (near) zero vector
    pub fn try_normalize(&self, min_norm: f32) -> Option<Self> {
        self.raw.try_normalize(min_norm).map(Self::from_raw)
    }
}

impl<S: Space> Default for SpaceVec3<S> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<S: Space> From<[f32; 3]> for SpaceVec3<S> {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl<S: Space> Add for SpaceVec3<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_raw(self.raw + rhs.raw)
    }
}

impl<S: Space> Sub for SpaceVec3<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_raw(self.raw - rhs.raw)
    }
}

impl<S: Space> Mul<f32> for SpaceVec3<S> {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::from_raw(self.raw * rhs)
    }
}

impl<S: Space> Neg for SpaceVec3<S> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_raw(-self.raw)
    }
}

/// A rotation quaternion tagged with the space it lives in
///
/// Components are scalar-first `(w, x, y, z)`. Norm is not validated; a
/// non-unit quaternion is carried through unchanged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaceQuat<S: Space> {
    raw: Quat,
    space: PhantomData<S>,
}

/// Orientation in caller space
pub type CallerQuat = SpaceQuat<CallerSpace>;

/// Orientation in host space
pub type HostQuat = SpaceQuat<HostSpace>;

impl<S: Space> SpaceQuat<S> {
    /// Create from scalar-first components without renormalizing
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self::from_raw(Unit::new_unchecked(Quaternion::new(w, x, y, z)))
    }

    /// Wrap an untagged rotation
    pub const fn from_raw(raw: Quat) -> Self {
        Self { raw, space: PhantomData }
    }

    /// The identity rotation
    pub fn identity() -> Self {
        Self::from_raw(Quat::identity())
    }

    /// Rotation of `angle` radians about `axis` (normalized internally)
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self::from_raw(Quat::from_axis_angle(&Unit::new_normalize(axis), angle))
    }

    /// Untagged rotation
    pub const fn raw(&self) -> Quat {
        self.raw
    }

    /// Components as `[w, x, y, z]`
    pub fn to_array(&self) -> [f32; 4] {
        let q = self.raw.quaternion();
        [q.w, q.i, q.j, q.k]
    }

    /// Norm of the underlying quaternion
    pub fn norm(&self) -> f32 {
        self.raw.quaternion().norm()
    }

    /// Rotate a vector of the same space
    pub fn rotate(&self, v: SpaceVec3<S>) -> SpaceVec3<S> {
        SpaceVec3::from_raw(self.raw * v.raw)
    }
}

impl<S: Space> Default for SpaceQuat<S> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<S: Space> Mul for SpaceQuat<S> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(self.raw * rhs.raw)
    }
}

/// Position plus orientation in one space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose<S: Space> {
    /// Origin of the posed frame
    pub position: SpaceVec3<S>,
    /// Orientation of the posed frame
    pub orientation: SpaceQuat<S>,
}

/// Pose in caller space
pub type CallerPose = Pose<CallerSpace>;

/// Pose in host space
pub type HostPose = Pose<HostSpace>;

impl<S: Space> Pose<S> {
    /// Create a pose
    pub const fn new(position: SpaceVec3<S>, orientation: SpaceQuat<S>) -> Self {
        Self { position, orientation }
    }

    /// Pose at `position` with identity orientation
    pub fn from_position(position: SpaceVec3<S>) -> Self {
        Self { position, orientation: SpaceQuat::identity() }
    }
}

/// Math constants
pub mod constants {
    /// Pi / 2
    pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_space_vec_arithmetic() {
        let a = CallerVec3::new(1.0, 2.0, 3.0);
        let b = CallerVec3::new(3.0, 2.0, 1.0);

        assert_eq!((a + b).to_array(), [4.0, 4.0, 4.0]);
        assert_eq!((a - b).to_array(), [-2.0, 0.0, 2.0]);
        assert_eq!((a * 2.0).to_array(), [2.0, 4.0, 6.0]);
        assert_eq!(a.midpoint(&b).to_array(), [2.0, 2.0, 2.0]);
        assert_relative_eq!(a.distance(&b), 8.0_f32.sqrt(), epsilon = EPSILON);
    }

    #[test]
    fn test_try_normalize_rejects_zero() {
        assert!(CallerVec3::zeros().try_normalize(1e-9).is_none());
        let unit = CallerVec3::new(0.0, 3.0, 4.0).try_normalize(1e-9).unwrap();
        assert_relative_eq!(unit.norm(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_quat_components_are_scalar_first() {
        let q = CallerQuat::new(0.5, 0.5, 0.5, 0.5);
        assert_eq!(q.to_array(), [0.5, 0.5, 0.5, 0.5]);

        let half_turn = CallerQuat::from_axis_angle(Vec3::z(), std::f32::consts::PI);
        let [w, x, y, z] = half_turn.to_array();
        assert_relative_eq!(w, 0.0, epsilon = EPSILON);
        assert_relative_eq!(x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(z, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_non_unit_quaternion_passes_through() {
        let q = HostQuat::new(2.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(q.norm(), 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_rotate_about_up_axis() {
        let quarter = CallerQuat::from_axis_angle(Vec3::z(), constants::HALF_PI);
        let rotated = quarter.rotate(CallerVec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated.raw(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
    }
}
