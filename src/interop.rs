//! Ownership of the surfaces shared between the graphics and compute contexts.
//!
//! The grid pair and the randomness field have exactly one owner at a time.
//! Graphics owns them between frames and may only read FRONT for display.
//! Compute takes them through [`SharedSurfaces::acquire`], which hands out a
//! [`ComputeLease`]. Dropping or releasing the lease gives ownership back to
//! graphics and then drains the device, so every acquire is paired with a
//! release on every exit path.

use std::ops::{Deref, DerefMut};

use tracing::{trace, warn};

use crate::automaton::{DoubleBuffer, Grid, RandomField};
use crate::device::ComputeDevice;
use crate::error::{DispatchError, InteropError};

/// Which context currently owns the shared surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    Graphics,
    Compute,
}

/// The resources both contexts touch.
pub struct Surfaces {
    pub grids: DoubleBuffer,
    pub random: RandomField,
}

pub struct SharedSurfaces {
    surfaces: Surfaces,
    owner: Owner,
    acquisitions: u64,
    releases: u64,
}

impl SharedSurfaces {
    /// Wrap freshly allocated surfaces. Graphics owns them initially.
    pub fn new(surfaces: Surfaces) -> Self {
        SharedSurfaces {
            surfaces,
            owner: Owner::Graphics,
            acquisitions: 0,
            releases: 0,
        }
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Completed (acquire, release) counters.
    pub fn transfers(&self) -> (u64, u64) {
        (self.acquisitions, self.releases)
    }

    /// Hand the surfaces from graphics to compute.
    ///
    /// Graphics use is synchronous in this process, so by the time this is
    /// called no display is in flight.
    pub fn acquire<'a, D>(&'a mut self, device: &'a D) -> Result<ComputeLease<'a, D>, InteropError>
    where
        D: ComputeDevice + ?Sized,
    {
        if self.owner != Owner::Graphics {
            return Err(InteropError::AlreadyAcquired);
        }
        self.owner = Owner::Compute;
        self.acquisitions += 1;
        trace!(acquisitions = self.acquisitions, "compute acquired shared surfaces");
        Ok(ComputeLease {
            shared: self,
            device,
            released: false,
        })
    }

    /// FRONT, as the graphics context sees it.
    pub fn graphics_view(&self) -> Result<&Grid, InteropError> {
        match self.owner {
            Owner::Graphics => Ok(self.surfaces.grids.front()),
            Owner::Compute => Err(InteropError::HeldByCompute),
        }
    }

    /// Host-side read of the surfaces that does not involve either context.
    pub(crate) fn surfaces(&self) -> &Surfaces {
        &self.surfaces
    }

    fn give_back(&mut self) {
        self.owner = Owner::Graphics;
        self.releases += 1;
        trace!(releases = self.releases, "compute released shared surfaces");
    }
}

/// Scoped compute ownership of the shared surfaces.
pub struct ComputeLease<'a, D: ComputeDevice + ?Sized> {
    shared: &'a mut SharedSurfaces,
    device: &'a D,
    released: bool,
}

impl<'a, D: ComputeDevice + ?Sized> ComputeLease<'a, D> {
    /// Release to graphics, then block until the device has drained.
    pub fn release(mut self) -> Result<(), DispatchError> {
        self.released = true;
        self.shared.give_back();
        self.device.finish()
    }
}

impl<D: ComputeDevice + ?Sized> Deref for ComputeLease<'_, D> {
    type Target = Surfaces;

    fn deref(&self) -> &Surfaces {
        &self.shared.surfaces
    }
}

impl<D: ComputeDevice + ?Sized> DerefMut for ComputeLease<'_, D> {
    fn deref_mut(&mut self) -> &mut Surfaces {
        &mut self.shared.surfaces
    }
}

impl<D: ComputeDevice + ?Sized> Drop for ComputeLease<'_, D> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.shared.give_back();
        if let Err(err) = self.device.finish() {
            warn!(%err, "device failed to drain after release");
        }
    }
}
