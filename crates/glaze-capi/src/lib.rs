//! C ABI for the Glaze shader compilation gateway.
//!
//! Exposes a single-shot [`glaze_compile`] that accepts WGSL source, an
//! entry-point name, a diagnostic path label, and a stage identifier, and
//! returns a caller-owned SPIR-V buffer plus a 0/-1 status. The richer error
//! taxonomy of `glaze-core` is collapsed to that single status here; callers
//! that want distinguishable failures use the Rust API directly.

mod transfer;

pub use transfer::materialize;

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};

use glaze_core::{CompileRequest, ShaderStage, compile};

/// Status written through `out_status` on success.
pub const GLAZE_OK: c_int = 0;
/// Status written through `out_status` on any failure.
pub const GLAZE_ERR: c_int = -1;

/// Read a C string argument as UTF-8, or `None` if the pointer is null or
/// the bytes are not valid UTF-8.
///
/// # Safety
/// `ptr` must be null or a valid nul-terminated string.
unsafe fn read_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    // SAFETY: checked non-null; caller guarantees nul termination.
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Compile shader source to SPIR-V.
///
/// On success, writes the byte length through `out_len`, writes 0 through
/// `out_status`, and returns a buffer owned by the caller; release it with
/// [`glaze_free`]. On failure, writes -1 through `out_status` and returns
/// null; `out_len` is left untouched and must not be read.
///
/// `path_label` only attributes diagnostics; it does not affect the output.
/// Stage identifiers: 0 = vertex, 1 = fragment, 2 = compute.
///
/// # Safety
/// The three string arguments must each be null or valid nul-terminated
/// strings; `out_len` and `out_status` must be valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glaze_compile(
    path_label: *const c_char,
    entry_point: *const c_char,
    source: *const c_char,
    stage: u32,
    out_len: *mut usize,
    out_status: *mut c_int,
) -> *mut u8 {
    // SAFETY: caller guarantees out_status is writable.
    let fail = |status: *mut c_int| {
        unsafe { *status = GLAZE_ERR };
        std::ptr::null_mut()
    };

    if out_len.is_null() || out_status.is_null() {
        tracing::error!("glaze_compile called with null output parameters");
        return std::ptr::null_mut();
    }

    // SAFETY: caller guarantees the string arguments are null or valid.
    let (Some(path_label), Some(entry_point), Some(source)) = (
        unsafe { read_arg(path_label) },
        unsafe { read_arg(entry_point) },
        unsafe { read_arg(source) },
    ) else {
        tracing::error!("glaze_compile called with null or non-UTF-8 string arguments");
        return fail(out_status);
    };

    let stage = match ShaderStage::from_raw(stage) {
        Ok(stage) => stage,
        Err(err) => {
            tracing::debug!("{err}");
            return fail(out_status);
        }
    };

    let request = CompileRequest::new(path_label, entry_point, source, stage);
    let blob = match compile(&request) {
        Ok(blob) => blob,
        Err(err) => {
            tracing::debug!("compilation failed: {err}");
            return fail(out_status);
        }
    };

    match materialize(&blob) {
        Ok((buffer, len)) => {
            // SAFETY: checked non-null above; caller guarantees writability.
            unsafe {
                *out_len = len;
                *out_status = GLAZE_OK;
            }
            buffer
        }
        Err(err) => {
            tracing::error!("{err}");
            fail(out_status)
        }
    }
}

/// Release a buffer returned by [`glaze_compile`]. Null is a no-op.
///
/// # Safety
/// `ptr` must be null or a pointer previously returned by [`glaze_compile`]
/// that has not already been freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn glaze_free(ptr: *mut u8) {
    if !ptr.is_null() {
        // SAFETY: the buffer was allocated with libc::malloc in materialize.
        unsafe { libc::free(ptr as *mut libc::c_void) };
    }
}
