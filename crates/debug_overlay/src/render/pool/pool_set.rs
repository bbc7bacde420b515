//! Pool set
//!
//! Owns one [`PrimitivePool`] per pooled primitive kind and fans the frame
//! lifecycle out to all of them.

use crate::core::config::PoolConfig;
use crate::render::host::{HostEngine, PrimitiveKind, PrimitiveParams};
use crate::render::pool::{PoolStats, PrimitivePool};

/// One pool per pooled kind, in [`PrimitiveKind::POOLED`] order
#[derive(Debug)]
pub struct PoolSet {
    pools: [PrimitivePool; 4],
}

impl PoolSet {
    /// Create empty pools sized by `config`
    pub fn new(config: &PoolConfig) -> Self {
        let make = |kind: PrimitiveKind| {
            let params = PrimitiveParams {
                segments: config.segments,
                ..PrimitiveParams::default()
            };
            PrimitivePool::new(kind, config.batch_size(kind), params)
        };
        Self {
            pools: PrimitiveKind::POOLED.map(make),
        }
    }

    const fn position(kind: PrimitiveKind) -> usize {
        match kind {
            PrimitiveKind::Line => 0,
            PrimitiveKind::Sphere => 1,
            PrimitiveKind::Cone => 2,
            PrimitiveKind::Plane => 3,
            PrimitiveKind::TransformHandle => {
                panic!("transform handles are managed by the gizmo registry, not a pool")
            }
        }
    }

    /// Pool for one kind
    ///
    /// # Panics
    ///
    /// Panics for [`PrimitiveKind::TransformHandle`], which is not pooled.
    pub fn pool(&self, kind: PrimitiveKind) -> &PrimitivePool {
        &self.pools[Self::position(kind)]
    }

    /// Mutable pool for one kind
    ///
    /// # Panics
    ///
    /// Panics for [`PrimitiveKind::TransformHandle`], which is not pooled.
    pub fn pool_mut(&mut self, kind: PrimitiveKind) -> &mut PrimitivePool {
        &mut self.pools[Self::position(kind)]
    }

    /// Reset every pool's cursor
    pub fn begin_frame_all(&mut self) {
        for pool in &mut self.pools {
            pool.begin_frame();
        }
    }

    /// Hide undrawn slots in every pool
    pub fn end_frame_all<H: HostEngine + ?Sized>(&mut self, host: &mut H) {
        for pool in &mut self.pools {
            pool.end_frame(host);
        }
    }

    /// Hide every slot of every pool
    pub fn hide_all<H: HostEngine + ?Sized>(&mut self, host: &mut H) {
        for pool in &mut self.pools {
            pool.hide_all(host);
        }
    }

    /// Statistics for every pool
    pub fn stats(&self) -> [PoolStats; 4] {
        [
            self.pools[0].stats(),
            self.pools[1].stats(),
            self.pools[2].stats(),
            self.pools[3].stats(),
        ]
    }

    /// Host objects allocated across all pools
    pub fn total_capacity(&self) -> usize {
        self.pools.iter().map(PrimitivePool::capacity).sum()
    }
}
