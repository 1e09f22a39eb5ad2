//! Handle creation, destruction and run-state queries.

use std::collections::VecDeque;

use tracing::error;

use crate::config::Config;
use crate::input::InputEvent;
use crate::scheduler::FrameScheduler;
use crate::state::Session;

/// Opaque handle owned by the host: the session, its scheduler and the
/// queue of input events waiting for the next tick.
pub struct RpsHandle {
    pub(crate) session: Session,
    pub(crate) scheduler: FrameScheduler,
    pub(crate) events: VecDeque<InputEvent>,
}

/// Creates a world of `width` × `height` cells paced at `target_fps`.
///
/// A `seed` of 0 draws the randomness seed from the OS.
///
/// # Returns
/// A pointer to a new handle, or null if the arguments are invalid or the
/// engine could not be initialised.
///
/// # Safety
/// The returned pointer must eventually be freed with `rps_destroy()`.
#[no_mangle]
pub extern "C" fn rps_create(width: u32, height: u32, target_fps: u32, seed: u64) -> *mut RpsHandle {
    let config = Config {
        width,
        height,
        target_fps,
        seed: if seed == 0 { None } else { Some(seed) },
        ..Config::default()
    };

    match Session::new(&config) {
        Ok(session) => Box::into_raw(Box::new(RpsHandle {
            session,
            scheduler: FrameScheduler::new(target_fps),
            events: VecDeque::new(),
        })),
        Err(err) => {
            error!(%err, "engine initialisation failed");
            std::ptr::null_mut()
        }
    }
}

/// Destroys a handle and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `rps_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn rps_destroy(ptr: *mut RpsHandle) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the number of completed steps.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn rps_get_generation(ptr: *const RpsHandle) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).session.engine().generation()
}

/// Gets the number of frames displayed so far.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
#[no_mangle]
pub unsafe extern "C" fn rps_get_frame(ptr: *const RpsHandle) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).session.frame()
}

/// Whether the loop should keep ticking.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// 1 if running, 0 if exit was requested or the loop stopped, -1 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn rps_is_running(ptr: *const RpsHandle) -> i32 {
    if ptr.is_null() {
        return -1;
    }
    let handle = &*ptr;
    let stopped = handle.session.exit_requested()
        || handle.scheduler.phase() == crate::scheduler::Phase::Stopped;
    if stopped {
        0
    } else {
        1
    }
}

/// Asks the loop to stop at the top of the next tick. Safe to call from a signal path.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
#[no_mangle]
pub unsafe extern "C" fn rps_request_exit(ptr: *const RpsHandle) {
    if ptr.is_null() {
        return;
    }
    (*ptr).session.request_exit();
}
