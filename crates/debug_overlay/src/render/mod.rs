//! # Debug Overlay Rendering
//!
//! Immediate-mode debug drawing on top of a retained scene-graph engine.
//!
//! ## Architecture
//!
//! - **Coordinates**: bridge between the caller's Z-up space and the host's Y-up space
//! - **Pools**: per-kind host objects recycled every frame instead of recreated
//! - **Draw**: [`DebugOverlay`], the context every draw call goes through
//! - **Gizmos**: caller-managed transform handles with stable indices
//! - **Scheduler**: per-frame loop that hides whatever was not redrawn
//!
//! The host engine is reached only through [`HostEngine`].

pub mod color;
pub mod coordinates;
pub mod draw;
pub mod gizmo;
pub mod host;
pub mod options;
pub mod pool;
pub mod scheduler;

#[cfg(test)]
mod overlay_tests;

pub use color::Color;
pub use coordinates::{CoordinateConverter, CoordinateSystem};
pub use draw::{DebugOverlay, VectorSlots};
pub use gizmo::GizmoRegistry;
pub use host::{HostEngine, HostHandle, PrimitiveKind, PrimitiveParams, RecordingHost};
pub use options::{DrawOptions, GridOptions, NumberLineOptions, VectorOptions};
pub use pool::{PoolSet, PoolStats, SlotIndex};
pub use scheduler::{run_per_frame, FrameScheduler, FrameState, StepDriver, TickDriver};
