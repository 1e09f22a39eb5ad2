//! Input events and frame ticks driven by the host.
//!
//! Events pushed here are queued on the handle and dispatched at the next
//! `rps_tick`, between display and step.

use std::ffi::c_void;
use std::time::Duration;

use super::lifecycle::RpsHandle;
use crate::automaton::Grid;
use crate::input::{InputEvent, Key, MouseButton};
use crate::scheduler::Renderer;

pub const RPS_KEY_OTHER: u32 = 0;
pub const RPS_KEY_ESCAPE: u32 = 1;
pub const RPS_KEY_SPACE: u32 = 2;

pub const RPS_BUTTON_PRIMARY: u32 = 0;
pub const RPS_BUTTON_SECONDARY: u32 = 1;
pub const RPS_BUTTON_MIDDLE: u32 = 2;

/// Host display callback: row-major cells of the current grid, its size, and the frame counter.
pub type DisplayFn = Option<
    unsafe extern "C" fn(cells: *const u8, width: u32, height: u32, frame: u64, user_data: *mut c_void),
>;

struct CallbackRenderer {
    callback: DisplayFn,
    user_data: *mut c_void,
}

impl Renderer for CallbackRenderer {
    fn display(&mut self, grid: &Grid, frame: u64) {
        if let Some(callback) = self.callback {
            unsafe {
                callback(
                    grid.cells().as_ptr(),
                    grid.width() as u32,
                    grid.height() as u32,
                    frame,
                    self.user_data,
                );
            }
        }
    }
}

unsafe fn push(ptr: *mut RpsHandle, event: InputEvent) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    (*ptr).events.push_back(event);
    0
}

/// Queues a key press (`RPS_KEY_*`).
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// 0 on success, -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn rps_push_key(ptr: *mut RpsHandle, key: u32) -> i32 {
    let key = match key {
        RPS_KEY_ESCAPE => Key::Escape,
        RPS_KEY_SPACE => Key::Space,
        _ => Key::Other,
    };
    push(ptr, InputEvent::KeyPressed(key))
}

/// Queues a character press, given as a Unicode scalar value.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// 0 on success, 1 if `ch` is not a valid scalar value, -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn rps_push_char(ptr: *mut RpsHandle, ch: u32) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    match char::from_u32(ch) {
        Some(ch) => push(ptr, InputEvent::CharPressed(ch)),
        None => 1,
    }
}

/// Queues a mouse button press (`pressed != 0`) or release.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// 0 on success, 1 for an unknown button, -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn rps_push_button(ptr: *mut RpsHandle, button: u32, pressed: u8) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    let button = match button {
        RPS_BUTTON_PRIMARY => MouseButton::Primary,
        RPS_BUTTON_SECONDARY => MouseButton::Secondary,
        RPS_BUTTON_MIDDLE => MouseButton::Middle,
        _ => return 1,
    };
    let event = if pressed != 0 {
        InputEvent::ButtonPressed(button)
    } else {
        InputEvent::ButtonReleased(button)
    };
    push(ptr, event)
}

/// Queues a pointer move, in window pixels with a top-left origin.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
#[no_mangle]
pub unsafe extern "C" fn rps_push_pointer(ptr: *mut RpsHandle, x: i32, y: i32) -> i32 {
    push(ptr, InputEvent::PointerMoved { x, y })
}

/// Queues scroll wheel steps.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
#[no_mangle]
pub unsafe extern "C" fn rps_push_scroll(ptr: *mut RpsHandle, steps: i32) -> i32 {
    push(ptr, InputEvent::Scrolled(steps))
}

/// Queues a window resize.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
#[no_mangle]
pub unsafe extern "C" fn rps_push_resize(ptr: *mut RpsHandle, width: u32, height: u32) -> i32 {
    push(ptr, InputEvent::Resized { width, height })
}

/// Queues a window close request.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
#[no_mangle]
pub unsafe extern "C" fn rps_push_close(ptr: *mut RpsHandle) -> i32 {
    push(ptr, InputEvent::CloseRequested)
}

/// Runs one display → input → step → sleep tick.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
/// - `display`, if set, must be safe to call with `user_data` for the duration of the tick
/// - the `cells` pointer handed to `display` is only valid during the callback
///
/// # Returns
/// 1 if a tick ran, 0 if the loop has stopped, -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn rps_tick(ptr: *mut RpsHandle, display: DisplayFn, user_data: *mut c_void) -> i32 {
    if ptr.is_null() {
        return -1;
    }

    let handle = &mut *ptr;
    let mut renderer = CallbackRenderer {
        callback: display,
        user_data,
    };
    let mut sleep = std::thread::sleep;
    let report = handle.scheduler.tick(
        &mut handle.session,
        &mut renderer,
        &mut handle.events,
        &mut sleep,
    );
    if report.is_some() {
        1
    } else {
        0
    }
}

/// Sets or clears the pause flag directly.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
#[no_mangle]
pub unsafe extern "C" fn rps_set_paused(ptr: *mut RpsHandle, paused: u8) {
    if ptr.is_null() {
        return;
    }
    (*ptr).session.set_paused(paused != 0);
}

/// Gets the current view transform so the host draws what pointer resolution assumes.
///
/// `pan_x`/`pan_y` are in base-cell pixels, `cell_size` is the on-screen cell
/// size in pixels and `scale` is `cell_size / BASE_CELL_SIZE`. Call after each
/// tick; scroll and pan events change these values.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
/// - each out pointer must be valid for a write
///
/// # Returns
/// 0 on success, -1 if any pointer is null.
#[no_mangle]
pub unsafe extern "C" fn rps_get_view(
    ptr: *const RpsHandle,
    pan_x: *mut f32,
    pan_y: *mut f32,
    cell_size: *mut u32,
    scale: *mut f32,
) -> i32 {
    if ptr.is_null() || pan_x.is_null() || pan_y.is_null() || cell_size.is_null() || scale.is_null() {
        return -1;
    }

    let view = (*ptr).session.viewport();
    *pan_x = view.pan_x;
    *pan_y = view.pan_y;
    *cell_size = view.cell_size;
    *scale = view.scale();
    0
}

/// Frame budget in microseconds, for hosts that pace themselves.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
#[no_mangle]
pub unsafe extern "C" fn rps_frame_budget_us(ptr: *const RpsHandle) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    let budget: Duration = (*ptr).scheduler.pacer().budget();
    budget.as_micros() as u64
}
