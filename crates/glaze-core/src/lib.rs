//! Core pipeline for the Glaze shader compilation gateway.
//!
//! Turns a `(source, entry point, stage)` triple into an owned SPIR-V blob:
//!
//! ```text
//! CompileRequest
//!     │
//!     ├── TargetConfig ───► Session ───► Module ───► EntryPoint
//!     │                                      │            │
//!     │                                      └────┬───────┘
//!     │                                           ▼
//!     └──────────────────────────────────► ComposedProgram ───► SpirvBlob
//! ```
//!
//! The WGSL front end and the SPIR-V backend come from `naga`; this crate
//! only orchestrates them and maps every failure point onto a single
//! distinguishable error taxonomy.

pub mod compile;
pub mod error;

pub use compile::{
    BinaryFormat, CompileRequest, ComposedProgram, EntryPoint, GlobalEnvironment,
    InstructionProfile, Module, OptionEntry, OptionKind, OptionName, OptionValue, PROFILE_NAME,
    SPIRV_MAGIC, Session, ShaderStage, SpirvBlob, TargetConfig, TargetFlags, compile, generate,
};
pub use error::{Error, Result};
