//! Compilation pipeline for Glaze.
//!
//! This module provides:
//! - Option value construction (tagged int/string compiler options)
//! - Target configuration (SPIR-V format, instruction profile, policy bits)
//! - Session establishment against the process-wide environment
//! - Module loading (parse + validate), entry-point resolution
//! - Program composition and SPIR-V code generation
//!
//! The stages run strictly in order; the first failure short-circuits the
//! rest and is reported through the [`crate::error::Error`] taxonomy.

mod codegen;
mod module;
mod options;
mod program;
mod session;
mod target;

pub use codegen::{SPIRV_MAGIC, SpirvBlob, generate};
pub use module::{EntryPoint, Module};
pub use options::{OptionEntry, OptionKind, OptionName, OptionValue};
pub use program::ComposedProgram;
pub use session::{GlobalEnvironment, Session};
pub use target::{
    BinaryFormat, InstructionProfile, PROFILE_NAME, ShaderStage, TargetConfig, TargetFlags,
};

use crate::error::Result;

/// One compilation request: immutable input, valid for a single invocation.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    /// Logical path used for diagnostic attribution only.
    pub path_label: String,

    /// Name of the function to compile as the program entry.
    pub entry_point: String,

    /// WGSL source text.
    pub source: String,

    /// Stage the entry point must execute in.
    pub stage: ShaderStage,
}

impl CompileRequest {
    pub fn new(
        path_label: impl Into<String>,
        entry_point: impl Into<String>,
        source: impl Into<String>,
        stage: ShaderStage,
    ) -> Self {
        Self {
            path_label: path_label.into(),
            entry_point: entry_point.into(),
            source: source.into(),
            stage,
        }
    }
}

/// Run the full pipeline for one request.
///
/// Builds a fresh target configuration, establishes a session, loads and
/// validates the module, resolves the entry point, composes the program, and
/// lowers it to SPIR-V. The session and all intermediate objects are torn
/// down when this returns, on success and failure alike.
pub fn compile(request: &CompileRequest) -> Result<SpirvBlob> {
    tracing::debug!(
        "compiling `{}` entry `{}` for {:?}",
        request.path_label,
        request.entry_point,
        request.stage
    );

    let env = GlobalEnvironment::acquire();
    let config = TargetConfig::for_stage(request.stage)?;
    let mut session = Session::new(env, config);

    let module = session.load_module(&request.path_label, &request.source)?;
    let entry = module.find_entry_point(&request.entry_point)?;
    let program = ComposedProgram::compose(&module, entry, session.config())?;

    generate(&program, 0, 0, session.config())
}
