//! The automaton engine.
//!
//! Owns the shared surfaces, the compute device and the RNG behind the
//! randomness field. Every compute-side access (step, paint, clear, reseed)
//! runs inside a [`ComputeLease`](crate::interop::ComputeLease).

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::automaton::{BufferId, DoubleBuffer, Grid, RandomField, Species, EMPTY};
use crate::config::Config;
use crate::device::{ComputeDevice, ThreadPoolDevice};
use crate::error::{EngineError, InitError};
use crate::interop::{Owner, SharedSurfaces, Surfaces};

pub struct Engine<D: ComputeDevice = ThreadPoolDevice> {
    shared: SharedSurfaces,
    device: D,
    rng: SmallRng,
    generation: u64,
}

impl Engine<ThreadPoolDevice> {
    /// Validate `config`, build the compute pool, allocate and seed the surfaces.
    pub fn new(config: &Config) -> Result<Self, InitError> {
        config.validate()?;
        let device = ThreadPoolDevice::new(config.worker_threads)?;
        Engine::with_device(config, device)
    }
}

impl<D: ComputeDevice> Engine<D> {
    /// Build an engine on an existing compute device.
    pub fn with_device(config: &Config, device: D) -> Result<Self, InitError> {
        config.validate()?;
        let (width, height) = (config.width as usize, config.height as usize);
        let cells = config.cell_count();

        let grids = DoubleBuffer::try_new(width, height).map_err(|_| InitError::Allocation {
            what: "species grids",
            cells,
        })?;
        let random = RandomField::try_zeroed(width, height).map_err(|_| InitError::Allocation {
            what: "randomness field",
            cells,
        })?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut engine = Engine {
            shared: SharedSurfaces::new(Surfaces { grids, random }),
            device,
            rng: SmallRng::seed_from_u64(seed),
            generation: 0,
        };

        engine.reseed().map_err(|err| match err {
            EngineError::Starved { cells } => InitError::Allocation {
                what: "randomness seed",
                cells,
            },
            other => InitError::Device(other.to_string()),
        })?;

        info!(
            width,
            height,
            seed,
            device = engine.device.name(),
            "engine ready"
        );
        Ok(engine)
    }

    pub fn width(&self) -> usize {
        self.shared.surfaces().grids.front().width()
    }

    pub fn height(&self) -> usize {
        self.shared.surfaces().grids.front().height()
    }

    /// Completed steps since startup.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn owner(&self) -> Owner {
        self.shared.owner()
    }

    /// (acquire, release) counts of the interop protocol.
    pub fn transfers(&self) -> (u64, u64) {
        self.shared.transfers()
    }

    /// The grid to display. Fails only if compute still owns the surfaces.
    pub fn current_grid(&self) -> Result<&Grid, EngineError> {
        Ok(self.shared.graphics_view()?)
    }

    /// Identity of the buffer currently playing FRONT.
    pub fn current_id(&self) -> BufferId {
        self.shared.surfaces().grids.front_id()
    }

    pub fn random_field(&self) -> &RandomField {
        &self.shared.surfaces().random
    }

    /// Cell counts per species, indexed like `Species::ALL`.
    pub fn population(&self) -> [usize; 4] {
        self.shared.surfaces().grids.front().population()
    }

    /// Compute the next generation into BACK and swap roles.
    ///
    /// A failed dispatch leaves FRONT as it was and does not swap.
    pub fn step(&mut self) -> Result<(), EngineError> {
        let device = &self.device;
        let mut lease = self.shared.acquire(device)?;
        let surfaces = &mut *lease;

        {
            let (front, back) = surfaces.grids.split_mut();
            device.dispatch_step(front, &surfaces.random, back)?;
        }
        surfaces.grids.swap();

        if let Err(err) = lease.release() {
            // Output is not trustworthy; keep showing the old FRONT.
            let mut lease = self.shared.acquire(&self.device)?;
            lease.grids.swap();
            drop(lease);
            return Err(err.into());
        }

        self.generation += 1;
        Ok(())
    }

    /// Zero every cell of the current grid. BACK is left as it is.
    pub fn clear(&mut self) -> Result<(), EngineError> {
        let mut lease = self.shared.acquire(&self.device)?;
        lease.grids.front_mut().fill(EMPTY);
        lease.release()?;
        debug!("cleared current grid");
        Ok(())
    }

    /// Overwrite a single cell of the current grid.
    pub fn paint(&mut self, row: usize, col: usize, species: Species) -> Result<(), EngineError> {
        let mut lease = self.shared.acquire(&self.device)?;
        if !lease.grids.front_mut().set(row, col, species.code()) {
            return Err(EngineError::OutOfBounds { row, col });
        }
        lease.release()?;
        Ok(())
    }

    /// Regenerate the randomness field with fresh uniform rolls.
    ///
    /// On allocation failure the old field stays in place.
    pub fn reseed(&mut self) -> Result<(), EngineError> {
        let mut lease = self.shared.acquire(&self.device)?;
        let cells = lease.random.len();
        lease
            .random
            .reseed(&mut self.rng)
            .map_err(|_| EngineError::Starved { cells })?;
        lease.release()?;
        debug!(cells, "reseeded randomness field");
        Ok(())
    }

    /// Overwrite every roll with `value`. Used to pin the field in tests and tooling.
    pub fn fill_random(&mut self, value: f32) -> Result<(), EngineError> {
        let mut lease = self.shared.acquire(&self.device)?;
        lease.random.fill(value);
        lease.release()?;
        Ok(())
    }
}
