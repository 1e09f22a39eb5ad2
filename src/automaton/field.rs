//! Per-cell randomness field.
//!
//! One uniform value in `[0, 1)` per cell, read by the step kernel as a static
//! tie-breaker and acceptance roll. Values only change on an explicit reseed,
//! so consecutive steps over the same grid produce the same result.

use std::collections::TryReserveError;

use rand::Rng;

/// A 2D field of f32 rolls with the same dimensions as the species grid.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomField {
    pub width: usize,
    pub height: usize,
    values: Vec<f32>,
}

impl RandomField {
    /// A field with every roll set to zero (always accept).
    pub fn zeroed(width: usize, height: usize) -> Self {
        RandomField {
            width,
            height,
            values: vec![0.0; width * height],
        }
    }

    pub fn try_zeroed(width: usize, height: usize) -> Result<Self, TryReserveError> {
        let mut values = Vec::new();
        values.try_reserve_exact(width * height)?;
        values.resize(width * height, 0.0);
        Ok(RandomField {
            width,
            height,
            values,
        })
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Roll for the cell at `(row, col)`.
    #[inline]
    pub fn roll(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.width + col]
    }

    /// Set every roll to `value`, clamped into `[0, 1)`.
    pub fn fill(&mut self, value: f32) {
        let value = value.clamp(0.0, f32::from_bits(1.0f32.to_bits() - 1));
        self.values.fill(value);
    }

    /// Replace the whole field with fresh uniform rolls.
    ///
    /// The new values are generated into a separate allocation first, so an
    /// allocation failure leaves the current field untouched.
    pub fn reseed<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), TryReserveError> {
        let size = self.width * self.height;
        let mut fresh = Vec::new();
        fresh.try_reserve_exact(size)?;
        fresh.extend((0..size).map(|_| rng.random::<f32>()));
        self.values = fresh;
        Ok(())
    }
}
