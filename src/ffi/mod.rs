//! C FFI layer for host windows and graphics runtimes.
//!
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic lives in `state`, `engine` and `scheduler`. These
//! functions are thin wrappers that handle null checks, pointer safety, and
//! C-to-Rust conversions. Return codes: 0 ok, 1 rejected, -1 null handle.

pub mod grid;
pub mod lifecycle;
pub mod session;

pub use grid::{rps_clear, rps_copy_current, rps_get_cell, rps_paint, rps_reseed, rps_set_tool};
pub use lifecycle::{
    rps_create, rps_destroy, rps_get_frame, rps_get_generation, rps_is_running, rps_request_exit,
    RpsHandle,
};
pub use session::{
    rps_frame_budget_us, rps_get_view, rps_push_button, rps_push_char, rps_push_close,
    rps_push_key, rps_push_pointer, rps_push_resize, rps_push_scroll, rps_set_paused, rps_tick,
    DisplayFn,
};
