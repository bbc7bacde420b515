//! End-to-end tests: overlay, scheduler and recording host together

use super::*;
use crate::core::config::{OverlayConfig, PoolConfig};
use crate::foundation::math::{CallerPose, CallerQuat, CallerVec3, HostVec3, Vec3};
use crate::render::coordinates::{quat_from_host, quat_to_host, vector_from_host, vector_to_host};
use approx::assert_relative_eq;

const EPSILON: f32 = 1e-5;

fn overlay() -> DebugOverlay<RecordingHost> {
    let config = OverlayConfig::default().with_pools(PoolConfig::uniform(500));
    DebugOverlay::new(RecordingHost::new(), &config)
}

fn spheres(overlay: &mut DebugOverlay<RecordingHost>, count: usize) {
    for i in 0..count {
        overlay.draw_sphere(CallerVec3::new(i as f32, 0.0, 0.0), 0.2, &DrawOptions::default());
    }
}

fn visible_spheres(overlay: &DebugOverlay<RecordingHost>) -> Vec<usize> {
    let pool = overlay.pools().pool(PrimitiveKind::Sphere);
    (0..pool.capacity()).filter(|&i| pool.slot(i).is_visible()).collect()
}

#[test]
fn test_first_frame_grows_one_batch() {
    let mut overlay = overlay();
    let mut scheduler = FrameScheduler::new();
    scheduler
        .tick(&mut overlay, |o, _| {
            spheres(o, 3);
            Ok::<(), ()>(())
        })
        .unwrap();

    let pool = overlay.pools().pool(PrimitiveKind::Sphere);
    assert_eq!(pool.capacity(), 500);
    assert_eq!(visible_spheres(&overlay), vec![0, 1, 2]);
    assert_eq!(overlay.host().count_of(PrimitiveKind::Sphere), 500);
    assert_eq!(overlay.host().visible_count_of(PrimitiveKind::Sphere), 3);
}

#[test]
fn test_second_frame_reuses_batch() {
    let mut overlay = overlay();
    let mut counts = [3, 5].into_iter();
    run_per_frame(&mut overlay, &mut StepDriver::new(1), |o, _| {
        spheres(o, counts.next().unwrap_or(0));
        Ok::<(), ()>(())
    })
    .unwrap();
    let created = overlay.host().stats().created;

    run_per_frame(&mut overlay, &mut StepDriver::new(1), |o, _| {
        spheres(o, counts.next().unwrap_or(0));
        Ok::<(), ()>(())
    })
    .unwrap();

    assert_eq!(overlay.pools().pool(PrimitiveKind::Sphere).capacity(), 500);
    assert_eq!(visible_spheres(&overlay), vec![0, 1, 2, 3, 4]);
    assert_eq!(overlay.host().stats().created, created);
}

#[test]
fn test_bridge_known_values() {
    let host = vector_to_host(CallerVec3::new(1.0, 2.0, 3.0));
    assert_eq!(host.to_array(), [1.0, 3.0, -2.0]);
    assert_eq!(vector_from_host(HostVec3::new(1.0, 3.0, -2.0)).to_array(), [1.0, 2.0, 3.0]);
}

#[test]
fn test_gizmo_slot_reused() {
    let mut overlay = overlay();
    let pose_a = CallerPose::from_position(CallerVec3::new(1.0, 0.0, 0.0));
    let pose_b = CallerPose::new(
        CallerVec3::new(0.0, 2.0, 0.0),
        CallerQuat::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), 0.3),
    );

    assert_eq!(overlay.add_gizmo(&pose_a), 0);
    overlay.remove_gizmo(0);
    assert_eq!(overlay.add_gizmo(&pose_b), 0);
    assert_eq!(overlay.host().count_of(PrimitiveKind::TransformHandle), 1);

    let read = overlay.get_gizmo_pose(0);
    assert_relative_eq!(read.position.raw(), pose_b.position.raw(), epsilon = EPSILON);
    assert_relative_eq!(read.orientation.raw(), pose_b.orientation.raw(), epsilon = EPSILON);
}

#[test]
fn test_coincident_line_in_frame() {
    let mut overlay = overlay();
    let a = CallerVec3::new(1.0, 1.0, 1.0);
    let frames = run_per_frame(&mut overlay, &mut StepDriver::new(1), |o, _| {
        o.draw_line(a, a, &DrawOptions::default());
        Ok::<(), ()>(())
    });

    assert_eq!(frames, Ok(1));
    let slot = overlay.pools().pool(PrimitiveKind::Line).slot(0);
    assert!(slot.is_visible());
    let scale = overlay.host().object(slot.handle()).scale;
    assert!(scale.y < 1e-5);
    assert!(scale.iter().all(|s| s.is_finite()));
}

#[test]
fn test_round_trip_many_values() {
    let samples = [
        CallerVec3::new(0.0, 0.0, 0.0),
        CallerVec3::new(-3.5, 0.25, 9.0),
        CallerVec3::new(1e4, -1e-3, 42.0),
    ];
    for v in samples {
        assert_relative_eq!(vector_from_host(vector_to_host(v)).raw(), v.raw(), epsilon = EPSILON);
    }

    let axes = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.3, -0.4, 0.8), Vec3::new(0.0, 0.0, 1.0)];
    for (i, axis) in axes.into_iter().enumerate() {
        let q = CallerQuat::from_axis_angle(axis, 0.7 * (i as f32 + 1.0));
        assert_relative_eq!(quat_from_host(quat_to_host(q)).raw(), q.raw(), epsilon = EPSILON);
    }
}

#[test]
fn test_exact_batch_growth_through_overlay() {
    let config = OverlayConfig::default().with_pools(PoolConfig::uniform(16));
    let mut overlay = DebugOverlay::new(RecordingHost::new(), &config);
    let mut counts = [16, 17].into_iter();

    run_per_frame(&mut overlay, &mut StepDriver::new(2), |o, _| {
        spheres(o, counts.next().unwrap_or(0));
        Ok::<(), ()>(())
    })
    .unwrap();

    assert_eq!(overlay.pools().pool(PrimitiveKind::Sphere).capacity(), 32);
    assert_eq!(visible_spheres(&overlay), (0..17).collect::<Vec<_>>());
}

#[test]
fn test_monotonic_growth_and_hide_on_drop() {
    let config = OverlayConfig::default().with_pools(PoolConfig::uniform(4));
    let mut overlay = DebugOverlay::new(RecordingHost::new(), &config);
    let plan = [6, 2, 9, 0, 3, 3];
    let mut capacities = Vec::new();
    let mut visible = Vec::new();

    for count in plan {
        run_per_frame(&mut overlay, &mut StepDriver::new(1), |o, _| {
            spheres(o, count);
            Ok::<(), ()>(())
        })
        .unwrap();
        capacities.push(overlay.pools().pool(PrimitiveKind::Sphere).capacity());
        visible.push(visible_spheres(&overlay));
    }

    assert!(capacities.windows(2).all(|w| w[0] <= w[1]));
    for (count, shown) in plan.into_iter().zip(visible) {
        assert_eq!(shown, (0..count).collect::<Vec<_>>());
    }
    assert_eq!(overlay.stats()[1].used_last_frame, 3);
    assert_eq!(overlay.stats()[1].peak_used, 9);
}

#[test]
fn test_composites_share_pools() {
    let mut overlay = overlay();
    run_per_frame(&mut overlay, &mut StepDriver::new(1), |o, _| {
        o.draw_vector(CallerVec3::zeros(), CallerVec3::new(0.0, 0.0, 1.0), &DrawOptions::default());
        o.draw_axes(&CallerPose::default(), 0.5, &DrawOptions::default());
        o.draw_line(CallerVec3::zeros(), CallerVec3::new(1.0, 1.0, 0.0), &DrawOptions::default());
        Ok::<(), ()>(())
    })
    .unwrap();

    let stats = overlay.stats();
    assert_eq!(stats[0].kind, PrimitiveKind::Line);
    assert_eq!(stats[0].used_last_frame, 5);
    assert_eq!(stats[2].kind, PrimitiveKind::Cone);
    assert_eq!(stats[2].used_last_frame, 4);
}

#[test]
fn test_independent_overlays_do_not_share_state() {
    let mut first = overlay();
    let mut second = overlay();
    spheres(&mut first, 3);
    first.end_frame();
    second.end_frame();

    assert_eq!(first.host().count_of(PrimitiveKind::Sphere), 500);
    assert_eq!(second.host().objects().len(), 0);
    assert_eq!(second.pools().total_capacity(), 0);
}
