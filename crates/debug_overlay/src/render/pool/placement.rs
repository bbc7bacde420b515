//! Per-kind placement of pooled primitives
//!
//! Host primitives are unit-sized and axis-aligned. Each function here takes
//! caller-space geometry and produces the host-space transform that stretches
//! and turns the unit primitive onto it. Degenerate input (coincident points,
//! zero radius) yields a near-zero scale instead of an error.

use crate::foundation::math::{constants::HALF_PI, CallerVec3, HostQuat, HostVec3, Quat, Unit, Vec3};
use crate::render::coordinates::vector_to_host;

/// Smallest scale written to the host; some engines cannot invert a zero scale
pub const MIN_SCALE: f32 = 1e-6;

const DIRECTION_EPSILON: f32 = 1e-9;

/// Host-space transform for one pooled primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Object position
    pub position: HostVec3,
    /// Object orientation, `None` when irrelevant to the kind
    pub rotation: Option<HostQuat>,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Placement {
    /// Identity placement, used for primitives positioned through their vertices
    pub fn identity() -> Self {
        Self {
            position: HostVec3::zeros(),
            rotation: Some(HostQuat::identity()),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

fn any_perpendicular(v: &Vec3) -> Unit<Vec3> {
    let helper = if v.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
    Unit::new_normalize(v.cross(&helper))
}

/// Rotation that turns `axis` onto `direction`
///
/// Returns identity for a zero `direction`; a half turn about a perpendicular
/// axis when the two are opposite.
pub fn aim_rotation(axis: &Vec3, direction: &Vec3) -> Quat {
    let Some(dir) = direction.try_normalize(DIRECTION_EPSILON) else {
        return Quat::identity();
    };
    let axis = axis.normalize();
    if axis.dot(&dir) < -1.0 + 1e-6 {
        return Quat::from_axis_angle(&any_perpendicular(&axis), std::f32::consts::PI);
    }
    Quat::rotation_between(&axis, &dir).unwrap_or_else(Quat::identity)
}

/// Look-at rotation mapping local +Z onto `direction`, keeping +Y up where possible
pub fn look_rotation(direction: &Vec3) -> Quat {
    let Some(dir) = direction.try_normalize(DIRECTION_EPSILON) else {
        return Quat::identity();
    };
    let up = if dir.dot(&Vec3::y()).abs() > 0.999 { Vec3::z() } else { Vec3::y() };
    Quat::face_towards(&dir, &up)
}

/// Thin tube from `start` to `end` with radius `thickness`
pub fn line_placement(start: CallerVec3, end: CallerVec3, thickness: f32) -> Placement {
    let (a, b) = (vector_to_host(start), vector_to_host(end));
    let delta = (b - a).raw();
    let length = delta.norm();
    let radius = thickness.abs().max(MIN_SCALE);

    Placement {
        position: a.midpoint(&b),
        rotation: Some(HostQuat::from_raw(aim_rotation(&Vec3::y(), &delta))),
        scale: Vec3::new(radius, length.max(MIN_SCALE), radius),
    }
}

/// Sphere at `center`; orientation is left untouched
pub fn sphere_placement(center: CallerVec3, radius: f32) -> Placement {
    let radius = radius.abs().max(MIN_SCALE);
    Placement {
        position: vector_to_host(center),
        rotation: None,
        scale: Vec3::new(radius, radius, radius),
    }
}

/// Cone whose base sits at `start` and apex at `end`
///
/// The look-at rotation aims local +Z at the end point; the cone geometry
/// points along +Y, so a fixed +90° turn about local X is applied first.
pub fn cone_placement(start: CallerVec3, end: CallerVec3, radius: f32) -> Placement {
    let (a, b) = (vector_to_host(start), vector_to_host(end));
    let delta = (b - a).raw();
    let length = delta.norm();
    let radius = radius.abs().max(MIN_SCALE);
    let forward_to_up = Quat::from_axis_angle(&Vec3::x_axis(), HALF_PI);

    Placement {
        position: a.midpoint(&b),
        rotation: Some(HostQuat::from_raw(look_rotation(&delta) * forward_to_up)),
        scale: Vec3::new(radius, length.max(MIN_SCALE), radius),
    }
}

/// Host-space corners of a quad, counter-clockwise seen from `span_a × span_b`
///
/// Spans are normalized when non-zero, so `width` and `height` are the
/// final edge lengths.
pub fn plane_corners(
    center: CallerVec3,
    span_a: CallerVec3,
    span_b: CallerVec3,
    width: f32,
    height: f32,
) -> [HostVec3; 4] {
    let a = span_a.try_normalize(DIRECTION_EPSILON).unwrap_or(span_a) * (width * 0.5);
    let b = span_b.try_normalize(DIRECTION_EPSILON).unwrap_or(span_b) * (height * 0.5);

    [
        vector_to_host(center - a - b),
        vector_to_host(center + a - b),
        vector_to_host(center + a + b),
        vector_to_host(center - a + b),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::HostVec3;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_line_spans_endpoints() {
        let start = CallerVec3::new(0.0, 0.0, 0.0);
        let end = CallerVec3::new(0.0, 0.0, 2.0);
        let placement = line_placement(start, end, 0.01);

        // Caller +Z is host +Y, the tube's own axis
        assert_relative_eq!(placement.position.raw(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(placement.scale.y, 2.0, epsilon = EPSILON);
        let rotation = placement.rotation.unwrap();
        assert_relative_eq!(rotation.raw(), Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_line_axis_aims_at_end() {
        let start = CallerVec3::new(1.0, 1.0, 1.0);
        let end = CallerVec3::new(4.0, -3.0, 1.0);
        let placement = line_placement(start, end, 0.02);

        let axis = placement.rotation.unwrap().rotate(HostVec3::new(0.0, 1.0, 0.0));
        let expected = (vector_to_host(end) - vector_to_host(start)).raw().normalize();
        assert_relative_eq!(axis.raw(), expected, epsilon = EPSILON);
        assert_relative_eq!(placement.scale.y, 5.0, epsilon = EPSILON);
        assert_relative_eq!(placement.scale.x, 0.02, epsilon = EPSILON);
    }

    #[test]
    fn test_line_pointing_down_is_half_turn() {
        let placement = line_placement(CallerVec3::new(0.0, 0.0, 1.0), CallerVec3::zeros(), 0.1);
        let axis = placement.rotation.unwrap().rotate(HostVec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(axis.raw(), Vec3::new(0.0, -1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_coincident_line_is_effectively_zero_length() {
        let a = CallerVec3::new(3.0, 2.0, 1.0);
        let placement = line_placement(a, a, 0.05);

        assert!(placement.scale.y <= MIN_SCALE);
        assert!(placement.scale.iter().all(|s| s.is_finite()));
        assert_relative_eq!(placement.rotation.unwrap().raw(), Quat::identity(), epsilon = EPSILON);
        assert_eq!(placement.position, vector_to_host(a));
    }

    #[test]
    fn test_sphere_has_no_rotation() {
        let placement = sphere_placement(CallerVec3::new(1.0, 2.0, 3.0), 0.5);
        assert!(placement.rotation.is_none());
        assert_eq!(placement.position.to_array(), [1.0, 3.0, -2.0]);
        assert_eq!(placement.scale, Vec3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_cone_apex_aims_at_end() {
        let directions = [
            CallerVec3::new(1.0, 0.0, 0.0),
            CallerVec3::new(0.0, 0.0, 1.0),
            CallerVec3::new(0.0, 0.0, -1.0),
            CallerVec3::new(-1.0, 2.0, 0.5),
        ];
        for dir in directions {
            let start = CallerVec3::new(0.5, 0.5, 0.5);
            let end = start + dir;
            let placement = cone_placement(start, end, 0.1);

            let apex_axis = placement.rotation.unwrap().rotate(HostVec3::new(0.0, 1.0, 0.0));
            let expected = vector_to_host(dir).raw().normalize();
            assert_relative_eq!(apex_axis.raw(), expected, epsilon = 1e-4);
            assert_relative_eq!(placement.scale.y, dir.norm(), epsilon = EPSILON);
            assert_eq!(placement.position, vector_to_host(start.midpoint(&end)));
        }
    }

    #[test]
    fn test_plane_corners_in_host_space() {
        let corners = plane_corners(
            CallerVec3::zeros(),
            CallerVec3::new(2.0, 0.0, 0.0),
            CallerVec3::new(0.0, 1.0, 0.0),
            2.0,
            4.0,
        );
        // Ground plane in caller space (z = 0) lands on host y = 0
        assert_eq!(corners[0].to_array(), [-1.0, 0.0, 2.0]);
        assert_eq!(corners[1].to_array(), [1.0, 0.0, 2.0]);
        assert_eq!(corners[2].to_array(), [1.0, 0.0, -2.0]);
        assert_eq!(corners[3].to_array(), [-1.0, 0.0, -2.0]);
    }
}
