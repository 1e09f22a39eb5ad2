//! The compute context.
//!
//! `ComputeDevice` is the seam between the engine and whatever executes the
//! step kernel. The shipped implementation runs it on a dedicated rayon pool.

use tracing::{debug, warn};

use crate::automaton::{step_into, Grid, RandomField};
use crate::error::{DispatchError, InitError};

pub trait ComputeDevice {
    /// Human-readable device name for diagnostics.
    fn name(&self) -> &str;

    /// Run one step of the kernel: read `front` and `random`, write `back`.
    fn dispatch_step(
        &self,
        front: &Grid,
        random: &RandomField,
        back: &mut Grid,
    ) -> Result<(), DispatchError>;

    /// Block until every submitted operation has completed.
    fn finish(&self) -> Result<(), DispatchError>;
}

/// Check that all kernel operands describe the same world.
pub fn check_shape(front: &Grid, random: &RandomField, back: &Grid) -> Result<(), DispatchError> {
    let expected = front.len();
    if front.width() != back.width() || back.len() != expected {
        return Err(DispatchError::ShapeMismatch {
            expected,
            found: back.len(),
        });
    }
    if random.width != front.width() || random.len() != expected {
        return Err(DispatchError::ShapeMismatch {
            expected,
            found: random.len(),
        });
    }
    Ok(())
}

/// Compute context backed by a rayon thread pool.
pub struct ThreadPoolDevice {
    pool: rayon::ThreadPool,
    name: String,
}

impl ThreadPoolDevice {
    /// Build a pool with `num_threads` workers; 0 lets rayon pick.
    ///
    /// If the requested size cannot be built, falls back to a single worker.
    pub fn new(num_threads: usize) -> Result<Self, InitError> {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("rps-compute-{i}"))
            .build()
        {
            Ok(pool) => pool,
            Err(err) => {
                warn!(%err, num_threads, "falling back to a single compute worker");
                rayon::ThreadPoolBuilder::new()
                    .num_threads(1)
                    .build()
                    .map_err(|e| InitError::Device(e.to_string()))?
            }
        };
        let name = format!("rayon pool ({} workers)", pool.current_num_threads());
        debug!(device = %name, "compute context ready");
        Ok(ThreadPoolDevice { pool, name })
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl ComputeDevice for ThreadPoolDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn dispatch_step(
        &self,
        front: &Grid,
        random: &RandomField,
        back: &mut Grid,
    ) -> Result<(), DispatchError> {
        check_shape(front, random, back)?;
        self.pool.install(|| step_into(front, random, back));
        Ok(())
    }

    fn finish(&self) -> Result<(), DispatchError> {
        // `install` returns only after the kernel has run on every row.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_runs_kernel() {
        let device = ThreadPoolDevice::new(2).unwrap();
        assert_eq!(device.num_threads(), 2);
        assert!(device.name().contains("2 workers"));

        let mut front = Grid::new(8, 8);
        front.set(3, 3, 19);
        front.set(3, 4, 29);
        let random = RandomField::zeroed(8, 8);
        let mut back = Grid::new(8, 8);

        device.dispatch_step(&front, &random, &mut back).unwrap();
        device.finish().unwrap();
        assert_eq!(back.get(3, 4), Some(19));
    }

    #[test]
    fn test_shape_mismatch_is_reported() {
        let device = ThreadPoolDevice::new(1).unwrap();
        let front = Grid::new(8, 8);
        let mut back = Grid::new(4, 4);
        let random = RandomField::zeroed(8, 8);

        assert_eq!(
            device.dispatch_step(&front, &random, &mut back),
            Err(DispatchError::ShapeMismatch {
                expected: 64,
                found: 16
            })
        );

        let mut back = Grid::new(8, 8);
        let random = RandomField::zeroed(4, 4);
        assert_eq!(
            device.dispatch_step(&front, &random, &mut back),
            Err(DispatchError::ShapeMismatch {
                expected: 64,
                found: 16
            })
        );
        // Back untouched
        assert!(back.cells().iter().all(|&c| c == 0));
    }
}
