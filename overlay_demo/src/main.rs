//! Debug overlay demo
//!
//! Drives a recording host through a fixed number of frames: a random point
//! cloud that shrinks and grows, a grid, a number line, vectors and two
//! gizmos. Pool statistics are logged at the end, so the effect of batch
//! growth and frame-end hiding is visible in the output.
//!
//! Set `OVERLAY_CONFIG` to a `.toml` or `.ron` file to override pool sizes
//! and draw defaults.

use debug_overlay::foundation::logging;
use debug_overlay::prelude::*;
use rand::Rng;

const FRAMES: u64 = 120;

fn load_config() -> Result<OverlayConfig, ConfigError> {
    let config = match std::env::var("OVERLAY_CONFIG") {
        Ok(path) => {
            log::info!("Loading overlay config from {}", path);
            OverlayConfig::load_from_file(&path)?
        }
        Err(_) => OverlayConfig::default().with_pools(PoolConfig::uniform(64)),
    };
    config.validate()?;
    Ok(config)
}

fn random_point(rng: &mut impl Rng, extent: f32) -> CallerVec3 {
    CallerVec3::new(
        rng.gen_range(-extent..extent),
        rng.gen_range(-extent..extent),
        rng.gen_range(0.0..extent),
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default_filter("info");
    log::info!("Starting debug overlay demo");

    let config = load_config()?;
    let mut overlay = DebugOverlay::new(RecordingHost::new(), &config);
    let mut rng = rand::thread_rng();

    let left = overlay.add_gizmo(&CallerPose::from_position(CallerVec3::new(-2.0, 0.0, 1.0)));
    let right = overlay.add_gizmo(&CallerPose::from_position(CallerVec3::new(2.0, 0.0, 1.0)));

    let highlight = DrawOptions::color(Color::YELLOW).through_occluders();
    let faint = DrawOptions::color(Color::GREY).with_opacity(0.5);

    let frames = run_per_frame(&mut overlay, &mut StepDriver::new(FRAMES), |overlay, frame| {
        let phase = frame as f32 / FRAMES as f32;

        // Point count swings between 10 and 200 so pools grow and then idle
        let points = 10 + ((phase * std::f32::consts::TAU).sin().abs() * 190.0) as usize;
        for _ in 0..points {
            let p = random_point(&mut rng, 3.0);
            overlay.draw_sphere(p, 0.03, &faint);
        }

        overlay.draw_grid_plane(
            CallerVec3::zeros(),
            CallerVec3::new(1.0, 0.0, 0.0),
            CallerVec3::new(0.0, 1.0, 0.0),
            6.0,
            6.0,
            &faint,
        );
        overlay.draw_number_line(
            CallerVec3::new(-3.0, -3.5, 0.0),
            CallerVec3::new(3.0, -3.5, 0.0),
            &faint,
        );

        let a = overlay.get_gizmo_pose(left).position;
        let b = overlay.get_gizmo_pose(right).position;
        overlay.draw_vector(a, b, &highlight);
        overlay.draw_sphere(a.midpoint(&b), 0.1, &highlight);

        let spin = CallerQuat::from_axis_angle(Vec3::z(), phase * std::f32::consts::TAU);
        let axes_pose = CallerPose::new(CallerVec3::new(0.0, 2.0, 1.0), spin);
        overlay.draw_axes(&axes_pose, 0.5, &DrawOptions::default());

        // Move a gizmo programmatically, as a user drag would
        let drift = CallerVec3::new(2.0, phase.sin(), 1.0 + 0.5 * phase);
        overlay.set_gizmo_pose(right, &CallerPose::from_position(drift));

        if frame % 30 == 0 {
            log::debug!("Frame {}: {} points", frame, points);
        }
        Ok::<(), ConfigError>(())
    })?;

    log::info!("Ran {} frames", frames);
    for stats in overlay.stats() {
        log::info!(
            "{:>6} pool: capacity {:4}, last frame {:4}, peak {:4}, growths {}",
            stats.kind,
            stats.capacity,
            stats.used_last_frame,
            stats.peak_used,
            stats.growth_count
        );
    }
    let host = overlay.host().stats();
    log::info!(
        "Host calls: {} objects created, {} visibility writes, {} transform writes",
        host.created,
        host.visibility_writes,
        host.transform_writes
    );

    Ok(())
}
