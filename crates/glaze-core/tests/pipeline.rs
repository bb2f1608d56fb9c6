//! Integration tests for the full compilation pipeline.
//!
//! Exercises the end-to-end path: request → session → module → entry point →
//! composed program → SPIR-V blob, plus the observable properties of the
//! gateway (determinism, failure shapes, concurrency isolation).

use glaze_core::{CompileRequest, Error, SPIRV_MAGIC, ShaderStage, compile};

// =============================================================================
// Test Sources
// =============================================================================

const VERTEX_SRC: &str = "
@vertex
fn main() -> @builtin(position) vec4<f32> {
    return vec4<f32>(0.0, 0.0, 0.0, 1.0);
}
";

const FRAGMENT_SRC: &str = "
@fragment
fn main() -> @location(0) vec4<f32> {
    return vec4<f32>(0.25, 0.5, 0.75, 1.0);
}
";

const COMPUTE_SRC: &str = "
@group(0) @binding(0) var<storage, read_write> data: array<u32>;

@compute @workgroup_size(64)
fn main(@builtin(global_invocation_id) id: vec3<u32>) {
    data[id.x] = data[id.x] * 2u;
}
";

const BAD_SYNTAX_SRC: &str = "@vertex fn main( -> { this is not wgsl";

fn request(source: &str, entry: &str, stage: ShaderStage) -> CompileRequest {
    CompileRequest::new("shaders/test.wgsl", entry, source, stage)
}

// =============================================================================
// Success Shape
// =============================================================================

#[test]
fn test_vertex_success_shape() {
    let blob = compile(&request(VERTEX_SRC, "main", ShaderStage::Vertex)).unwrap();
    let bytes = blob.to_bytes();
    assert!(!bytes.is_empty());
    assert_eq!(bytes[..4], SPIRV_MAGIC.to_le_bytes());
}

#[test]
fn test_fragment_success_shape() {
    let blob = compile(&request(FRAGMENT_SRC, "main", ShaderStage::Fragment)).unwrap();
    assert_eq!(blob.as_words()[0], SPIRV_MAGIC);
    assert!(blob.len_bytes() > 0);
}

#[test]
fn test_compute_success_shape() {
    let blob = compile(&request(COMPUTE_SRC, "main", ShaderStage::Compute)).unwrap();
    assert_eq!(blob.as_words()[0], SPIRV_MAGIC);
}

#[test]
fn test_spirv_version_word_matches_profile() {
    // Word 1 of a SPIR-V module encodes the version as 0x00MMmm00.
    let blob = compile(&request(COMPUTE_SRC, "main", ShaderStage::Compute)).unwrap();
    assert_eq!(blob.as_words()[1], 0x0001_0500);
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_repeated_compilation_is_byte_identical() {
    let req = request(FRAGMENT_SRC, "main", ShaderStage::Fragment);
    let first = compile(&req).unwrap();
    let second = compile(&req).unwrap();
    assert_eq!(first.to_bytes(), second.to_bytes());
}

// =============================================================================
// Failure Shapes
// =============================================================================

#[test]
fn test_bad_syntax_fails_for_every_stage() {
    for stage in [ShaderStage::Vertex, ShaderStage::Fragment, ShaderStage::Compute] {
        let err = compile(&request(BAD_SYNTAX_SRC, "main", stage)).unwrap_err();
        assert!(
            matches!(err, Error::ModuleLoad { .. }),
            "stage {stage:?}: expected ModuleLoad, got {err:?}"
        );
    }
}

#[test]
fn test_unknown_entry_point_fails() {
    let err = compile(&request(VERTEX_SRC, "mian", ShaderStage::Vertex)).unwrap_err();
    assert!(matches!(err, Error::EntryPointNotFound(name) if name == "mian"));
}

#[test]
fn test_stage_sensitivity() {
    // The same source and entry point succeed under the declared stage and
    // fail with an explicit mismatch under an incompatible one.
    assert!(compile(&request(VERTEX_SRC, "main", ShaderStage::Vertex)).is_ok());

    let err = compile(&request(VERTEX_SRC, "main", ShaderStage::Compute)).unwrap_err();
    match err {
        Error::StageMismatch {
            declared,
            requested,
            ..
        } => {
            assert_eq!(declared, ShaderStage::Vertex);
            assert_eq!(requested, ShaderStage::Compute);
        }
        other => panic!("expected StageMismatch, got {other:?}"),
    }
}

#[test]
fn test_module_load_error_carries_label_and_message() {
    let err = compile(&CompileRequest::new(
        "shaders/broken.wgsl",
        "main",
        BAD_SYNTAX_SRC,
        ShaderStage::Vertex,
    ))
    .unwrap_err();

    match err {
        Error::ModuleLoad { label, message } => {
            assert_eq!(label, "shaders/broken.wgsl");
            assert!(!message.is_empty());
        }
        other => panic!("expected ModuleLoad, got {other:?}"),
    }
}

// =============================================================================
// Label Independence
// =============================================================================

#[test]
fn test_label_does_not_change_output() {
    let a = compile(&CompileRequest::new(
        "a.wgsl",
        "main",
        FRAGMENT_SRC,
        ShaderStage::Fragment,
    ))
    .unwrap();
    let b = compile(&CompileRequest::new(
        "deeply/nested/b.wgsl",
        "main",
        FRAGMENT_SRC,
        ShaderStage::Fragment,
    ))
    .unwrap();
    assert_eq!(a.to_bytes(), b.to_bytes());
}

// =============================================================================
// Concurrency Isolation
// =============================================================================

#[test]
fn test_concurrent_invocations_match_serial_results() {
    let cases = [
        (VERTEX_SRC, ShaderStage::Vertex),
        (FRAGMENT_SRC, ShaderStage::Fragment),
        (COMPUTE_SRC, ShaderStage::Compute),
    ];

    let serial: Vec<Vec<u8>> = cases
        .iter()
        .map(|(src, stage)| compile(&request(src, "main", *stage)).unwrap().to_bytes())
        .collect();

    let handles: Vec<_> = cases
        .iter()
        .map(|(src, stage)| {
            let req = request(src, "main", *stage);
            std::thread::spawn(move || compile(&req).unwrap().to_bytes())
        })
        .collect();

    for (handle, expected) in handles.into_iter().zip(serial) {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
