//! Error types for glaze-core.

use thiserror::Error;

use crate::compile::ShaderStage;

/// Result type for glaze-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in glaze-core.
///
/// Every pipeline stage maps its failure onto a distinct variant so callers
/// can tell a parse error from a missing entry point, even though the C ABI
/// collapses all of them to a single status code.
#[derive(Debug, Error)]
pub enum Error {
    /// The front end rejected the source text (syntax or semantic error).
    #[error("failed to load module `{label}`: {message}")]
    ModuleLoad { label: String, message: String },

    /// No entry point with the requested name exists in the module.
    #[error("entry point not found: `{0}`")]
    EntryPointNotFound(String),

    /// The entry point exists but is declared for a different stage than
    /// the target configuration requests.
    #[error(
        "entry point `{name}` is declared for stage {declared:?}, but {requested:?} was requested"
    )]
    StageMismatch {
        name: String,
        declared: ShaderStage,
        requested: ShaderStage,
    },

    /// Linking the module and entry point into one program failed.
    #[error("program composition failed: {0}")]
    Composition(String),

    /// The backend could not lower the composed program to SPIR-V.
    #[error("code generation failed: {0}")]
    CodeGen(String),

    /// The instruction profile identifier could not be parsed.
    #[error("unsupported instruction profile: `{0}`")]
    UnsupportedProfile(String),

    /// The target configuration is internally inconsistent.
    #[error("invalid target configuration: {0}")]
    InvalidConfiguration(String),

    /// A stage identifier from the call boundary has no known mapping.
    #[error("unknown shader stage identifier: {0}")]
    UnknownStage(u32),

    /// Allocating the caller-owned output buffer failed.
    #[error("failed to allocate output buffer of {size} bytes")]
    Allocation { size: usize },
}
