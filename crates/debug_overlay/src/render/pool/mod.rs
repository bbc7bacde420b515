//! Per-frame primitive pooling
//!
//! Debug primitives are redrawn from scratch every frame. Instead of creating
//! host objects per draw call, each primitive kind owns a [`PrimitivePool`]
//! whose host objects are created in batches and recycled frame after frame.

pub mod placement;
pub mod primitive_pool;
pub mod pool_set;

pub use placement::{Placement, MIN_SCALE};
pub use primitive_pool::{PoolSlot, PoolStats, PrimitivePool, SlotConfig, SlotIndex};
pub use pool_set::PoolSet;
