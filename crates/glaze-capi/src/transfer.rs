//! Ownership transfer of a generated blob across the call boundary.

use glaze_core::{Error, Result, SpirvBlob};

/// Copy `blob` into a freshly `malloc`ed buffer the caller becomes
/// responsible for releasing via [`crate::glaze_free`].
///
/// Allocation failure is reported as [`Error::Allocation`] instead of
/// handing back a null or partially-copied pointer.
pub fn materialize(blob: &SpirvBlob) -> Result<(*mut u8, usize)> {
    let bytes = blob.to_bytes();
    let len = bytes.len();

    // SAFETY: malloc with a non-zero size; the result is checked for null
    // before anything is written through it.
    let buffer = unsafe { libc::malloc(len) } as *mut u8;
    if buffer.is_null() {
        return Err(Error::Allocation { size: len });
    }

    // SAFETY: `buffer` is a valid allocation of exactly `len` bytes and
    // does not overlap the source vector.
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), buffer, len);
    }

    Ok((buffer, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glaze_core::{CompileRequest, ShaderStage, compile};

    #[test]
    fn test_materialize_copies_all_bytes() {
        let request = CompileRequest::new(
            "noop.wgsl",
            "main",
            "@compute @workgroup_size(1) fn main() { }",
            ShaderStage::Compute,
        );
        let blob = compile(&request).unwrap();

        let (buffer, len) = materialize(&blob).unwrap();
        assert_eq!(len, blob.len_bytes());

        // SAFETY: materialize just produced a buffer of exactly `len` bytes.
        let copied = unsafe { std::slice::from_raw_parts(buffer, len) };
        assert_eq!(copied, blob.to_bytes().as_slice());

        // SAFETY: buffer came from libc::malloc and is released exactly once.
        unsafe { libc::free(buffer as *mut libc::c_void) };
    }
}
