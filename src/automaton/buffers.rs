//! FRONT/BACK grid pair with O(1) role exchange.
//!
//! Callers never hold "the" buffer, only the role it currently plays. After a
//! swap the previous BACK is displayed and the previous FRONT becomes the next
//! write target.

use std::collections::TryReserveError;

use super::grid::Grid;

/// Identity of one of the two physical buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(usize);

pub struct DoubleBuffer {
    grids: [Grid; 2],
    front: usize,
}

impl DoubleBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        DoubleBuffer {
            grids: [Grid::new(width, height), Grid::new(width, height)],
            front: 0,
        }
    }

    pub fn try_new(width: usize, height: usize) -> Result<Self, TryReserveError> {
        Ok(DoubleBuffer {
            grids: [Grid::try_new(width, height)?, Grid::try_new(width, height)?],
            front: 0,
        })
    }

    /// The grid currently displayed and read as step input.
    #[inline]
    pub fn front(&self) -> &Grid {
        &self.grids[self.front]
    }

    #[inline]
    pub fn front_mut(&mut self) -> &mut Grid {
        &mut self.grids[self.front]
    }

    /// The write target of the next step. Its content is unspecified.
    #[inline]
    pub fn back(&self) -> &Grid {
        &self.grids[1 - self.front]
    }

    #[inline]
    pub fn front_id(&self) -> BufferId {
        BufferId(self.front)
    }

    #[inline]
    pub fn back_id(&self) -> BufferId {
        BufferId(1 - self.front)
    }

    /// Borrow FRONT for reading and BACK for writing at the same time.
    pub fn split_mut(&mut self) -> (&Grid, &mut Grid) {
        let (first, second) = self.grids.split_at_mut(1);
        if self.front == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }

    /// Exchange roles. No cell data moves.
    #[inline]
    pub fn swap(&mut self) {
        self.front = 1 - self.front;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_exchanges_identities() {
        let mut buffers = DoubleBuffer::new(4, 4);
        let front = buffers.front_id();
        let back = buffers.back_id();
        assert_ne!(front, back);

        buffers.swap();
        assert_eq!(buffers.front_id(), back);
        assert_eq!(buffers.back_id(), front);

        buffers.swap();
        assert_eq!(buffers.front_id(), front);
    }

    #[test]
    fn test_split_writes_land_in_back() {
        let mut buffers = DoubleBuffer::new(4, 4);
        buffers.front_mut().set(0, 0, 19);

        {
            let (front, back) = buffers.split_mut();
            assert_eq!(front.get(0, 0), Some(19));
            back.set(1, 1, 29);
        }
        assert_eq!(buffers.front().get(1, 1), Some(0));
        assert_eq!(buffers.back().get(1, 1), Some(29));

        buffers.swap();
        assert_eq!(buffers.front().get(1, 1), Some(29));
        assert_eq!(buffers.back().get(0, 0), Some(19));

        // Split follows the roles after a swap
        let (front, back) = buffers.split_mut();
        assert_eq!(front.get(1, 1), Some(29));
        assert_eq!(back.get(0, 0), Some(19));
    }
}
