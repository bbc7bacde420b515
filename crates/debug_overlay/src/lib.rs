//! # Debug Overlay
//!
//! Immediate-mode debug drawing (lines, spheres, cones, vectors, planes,
//! grids, number lines) and interactive transform handles for a retained
//! scene-graph engine.
//!
//! ## Features
//!
//! - **Pooled Primitives**: host objects are created in batches and recycled
//!   every frame, never destroyed
//! - **Coordinate Bridge**: callers work in Z-up space, the host in Y-up space
//! - **Frame Scheduling**: anything not redrawn in a frame is hidden at its end
//! - **Gizmos**: stable-index transform handles readable after user manipulation
//!
//! ## Quick Start
//!
//! ```rust
//! use debug_overlay::prelude::*;
//!
//! let mut overlay = DebugOverlay::with_default_config(RecordingHost::new());
//! let frames = run_per_frame(&mut overlay, &mut StepDriver::new(3), |overlay, frame| {
//!     let x = frame as f32;
//!     overlay.draw_sphere(CallerVec3::new(x, 0.0, 1.0), 0.25, &DrawOptions::default());
//!     Ok::<(), std::convert::Infallible>(())
//! });
//! assert_eq!(frames, Ok(3));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod foundation;
pub mod render;

pub use crate::core::config::{Config, ConfigError, OverlayConfig};
pub use render::draw::DebugOverlay;

/// Common imports for overlay users
pub mod prelude {
    pub use crate::{
        core::config::{Config, ConfigError, DrawDefaults, OverlayConfig, PoolConfig},
        foundation::math::{
            CallerPose, CallerQuat, CallerVec3, HostPose, HostQuat, HostVec3, Vec3,
        },
        render::{
            run_per_frame, Color, DebugOverlay, DrawOptions, FrameScheduler, GridOptions,
            HostEngine, HostHandle, NumberLineOptions, PoolStats, PrimitiveKind, RecordingHost,
            StepDriver, TickDriver, VectorOptions,
        },
    };
}
