//! Direct grid mutation and readback.

use super::lifecycle::RpsHandle;
use crate::automaton::Species;

/// Paints one cell of the current grid with a species code (0, 19, 29 or 39).
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// 0 on success, 1 if the code is unknown, the cell is off the world, or the
/// write failed; -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn rps_paint(ptr: *mut RpsHandle, row: u32, col: u32, code: u8) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    let Some(species) = Species::from_code(code) else {
        return 1;
    };

    let handle = &mut *ptr;
    match handle
        .session
        .engine_mut()
        .paint(row as usize, col as usize, species)
    {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Zeroes the current grid.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// 0 on success, 1 if the write was dropped, -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn rps_clear(ptr: *mut RpsHandle) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    match (*ptr).session.engine_mut().clear() {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Regenerates the randomness field.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// 0 on success, 1 if the reseed was dropped, -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn rps_reseed(ptr: *mut RpsHandle) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    match (*ptr).session.engine_mut().reseed() {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Selects the tool used by pointer painting.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// 0 on success, 1 if the code is not a species, -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn rps_set_tool(ptr: *mut RpsHandle, code: u8) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    match Species::from_code(code) {
        Some(species) => {
            (*ptr).session.set_tool(species);
            0
        }
        None => 1,
    }
}

/// Gets the code of one cell of the current grid.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// The species code, or 0 if out of bounds, null pointer, or not displayable.
#[no_mangle]
pub unsafe extern "C" fn rps_get_cell(ptr: *const RpsHandle, row: u32, col: u32) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr)
        .session
        .engine()
        .current_grid()
        .ok()
        .and_then(|grid| grid.get(row as usize, col as usize))
        .unwrap_or(0)
}

/// Copies the current grid, row-major, into `out_buf`.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
/// - `out_buf` must point to at least `len` writable bytes, or be null
///
/// # Returns
/// Number of bytes written, or 0 on error (null pointers, buffer too small).
#[no_mangle]
pub unsafe extern "C" fn rps_copy_current(ptr: *const RpsHandle, out_buf: *mut u8, len: u64) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }
    let Ok(grid) = (*ptr).session.engine().current_grid() else {
        return 0;
    };
    let cells = grid.cells();
    if (len as usize) < cells.len() {
        return 0;
    }

    let out = std::slice::from_raw_parts_mut(out_buf, cells.len());
    out.copy_from_slice(cells);
    cells.len() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::lifecycle::{rps_create, rps_destroy};
    use std::ptr;

    #[test]
    fn test_paint_and_get_cell() {
        unsafe {
            let handle = rps_create(8, 8, 120, 9);

            assert_eq!(rps_paint(handle, 2, 3, 29), 0);
            assert_eq!(rps_get_cell(handle, 2, 3), 29);
            assert_eq!(rps_get_cell(handle, 3, 2), 0);

            rps_destroy(handle);
        }
    }

    #[test]
    fn test_paint_rejects_bad_input() {
        unsafe {
            let handle = rps_create(8, 8, 120, 9);

            assert_eq!(rps_paint(handle, 2, 3, 7), 1);
            assert_eq!(rps_paint(handle, 8, 0, 19), 1);
            assert_eq!(rps_get_cell(handle, 8, 0), 0);

            rps_destroy(handle);
        }
    }

    #[test]
    fn test_clear() {
        unsafe {
            let handle = rps_create(8, 8, 120, 9);
            rps_paint(handle, 0, 0, 19);
            rps_paint(handle, 7, 7, 39);

            assert_eq!(rps_clear(handle), 0);
            assert_eq!(rps_get_cell(handle, 0, 0), 0);
            assert_eq!(rps_get_cell(handle, 7, 7), 0);

            rps_destroy(handle);
        }
    }

    #[test]
    fn test_set_tool_and_reseed() {
        unsafe {
            let handle = rps_create(8, 8, 120, 9);
            assert_eq!(rps_set_tool(handle, 39), 0);
            assert_eq!((*handle).session.tool(), Species::C);
            assert_eq!(rps_set_tool(handle, 40), 1);
            assert_eq!(rps_reseed(handle), 0);
            rps_destroy(handle);
        }
    }

    #[test]
    fn test_copy_current() {
        unsafe {
            let handle = rps_create(4, 2, 120, 9);
            rps_paint(handle, 1, 2, 19);

            let mut buf = vec![0xFFu8; 8];
            assert_eq!(rps_copy_current(handle, buf.as_mut_ptr(), 8), 8);
            assert_eq!(buf, vec![0, 0, 0, 0, 0, 0, 19, 0]);

            // Buffer too small
            let mut small = vec![0u8; 4];
            assert_eq!(rps_copy_current(handle, small.as_mut_ptr(), 4), 0);

            rps_destroy(handle);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            assert_eq!(rps_paint(ptr::null_mut(), 0, 0, 19), -1);
            assert_eq!(rps_clear(ptr::null_mut()), -1);
            assert_eq!(rps_reseed(ptr::null_mut()), -1);
            assert_eq!(rps_set_tool(ptr::null_mut(), 19), -1);
            assert_eq!(rps_get_cell(ptr::null(), 0, 0), 0);
            assert_eq!(rps_copy_current(ptr::null(), ptr::null_mut(), 0), 0);
        }
    }
}
