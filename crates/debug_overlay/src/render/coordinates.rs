//! Coordinate system conversion utilities
//!
//! Calling code works in a Z-up right-handed convention; the host engine is
//! Y-up right-handed. Every caller-space value crosses into host space through
//! this module, and host read-backs (gizmos) cross back the same way.
//!
//! The vector mapping is a -90° rotation about X:
//!
//! ```text
//! caller (x, y, z)  ->  host (x, z, -y)
//! host   (x, y, z)  ->  caller (x, -z, y)
//! ```
//!
//! Orientations are pre-multiplied by the matching rotation about X, so
//! `quat_from_host(quat_to_host(q)) == q` for any quaternion.

use crate::foundation::math::{
    constants::HALF_PI, CallerPose, CallerQuat, CallerVec3, HostPose, HostQuat, HostVec3, Mat3,
    Quat, Vec3,
};
use nalgebra::Rotation3;

/// Coordinate system conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSystem {
    /// Y-up, right-handed (host engine convention)
    YUpRightHanded,
    /// Z-up, right-handed (caller convention, common in robotics and CAD)
    ZUpRightHanded,
}

fn x_rotation(angle: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::x_axis(), angle)
}

/// Map a caller-space vector into host space: `(x, y, z) -> (x, z, -y)`
pub fn vector_to_host(v: CallerVec3) -> HostVec3 {
    HostVec3::new(v.x(), v.z(), -v.y())
}

/// Map a host-space vector into caller space: `(x, y, z) -> (x, -z, y)`
pub fn vector_from_host(v: HostVec3) -> CallerVec3 {
    CallerVec3::new(v.x(), -v.z(), v.y())
}

/// Map a caller-space orientation into host space
///
/// Pre-multiplies by a -90° rotation about the host X axis.
pub fn quat_to_host(q: CallerQuat) -> HostQuat {
    HostQuat::from_raw(x_rotation(-HALF_PI) * q.raw())
}

/// Map a host-space orientation into caller space
///
/// Pre-multiplies by a +90° rotation about the X axis.
pub fn quat_from_host(q: HostQuat) -> CallerQuat {
    CallerQuat::from_raw(x_rotation(HALF_PI) * q.raw())
}

/// Map a caller-space pose into host space
pub fn pose_to_host(pose: &CallerPose) -> HostPose {
    HostPose::new(vector_to_host(pose.position), quat_to_host(pose.orientation))
}

/// Map a host-space pose into caller space
pub fn pose_from_host(pose: &HostPose) -> CallerPose {
    CallerPose::new(vector_from_host(pose.position), quat_from_host(pose.orientation))
}

/// Convert a rotation matrix into a unit quaternion
///
/// The matrix is assumed orthonormal; no re-orthogonalization is done.
pub fn matrix3_to_quaternion(m: &Mat3) -> Quat {
    Quat::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*m))
}

/// Convert a quaternion into its rotation matrix
pub fn quaternion_to_matrix3(q: &Quat) -> Mat3 {
    q.to_rotation_matrix().into_inner()
}

/// Converter between two conventions, for untagged data
///
/// Useful when geometry arrives as raw arrays (vertex data, serialized poses)
/// and the convention is only known at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateConverter {
    from: CoordinateSystem,
    to: CoordinateSystem,
}

impl CoordinateConverter {
    /// Create a new coordinate converter
    pub const fn new(from: CoordinateSystem, to: CoordinateSystem) -> Self {
        Self { from, to }
    }

    /// Source convention
    pub const fn from(&self) -> CoordinateSystem {
        self.from
    }

    /// Target convention
    pub const fn to(&self) -> CoordinateSystem {
        self.to
    }

    /// Convert a position or free vector
    pub fn convert_vector(&self, v: Vec3) -> Vec3 {
        match (self.from, self.to) {
            (CoordinateSystem::ZUpRightHanded, CoordinateSystem::YUpRightHanded) => {
                vector_to_host(CallerVec3::from_raw(v)).raw()
            }
            (CoordinateSystem::YUpRightHanded, CoordinateSystem::ZUpRightHanded) => {
                vector_from_host(HostVec3::from_raw(v)).raw()
            }
            _ => v,
        }
    }

    /// Convert an orientation
    pub fn convert_rotation(&self, q: Quat) -> Quat {
        match (self.from, self.to) {
            (CoordinateSystem::ZUpRightHanded, CoordinateSystem::YUpRightHanded) => {
                quat_to_host(CallerQuat::from_raw(q)).raw()
            }
            (CoordinateSystem::YUpRightHanded, CoordinateSystem::ZUpRightHanded) => {
                quat_from_host(HostQuat::from_raw(q)).raw()
            }
            _ => q,
        }
    }

    /// Convert a batch of positions in place
    pub fn convert_points(&self, points: &mut [[f32; 3]]) {
        if self.from == self.to {
            return;
        }
        for point in points {
            let converted = self.convert_vector(Vec3::from(*point));
            *point = [converted.x, converted.y, converted.z];
        }
    }
}

impl Default for CoordinateConverter {
    /// Default converter: caller Z-up to host Y-up
    fn default() -> Self {
        Self::new(CoordinateSystem::ZUpRightHanded, CoordinateSystem::YUpRightHanded)
    }
}
