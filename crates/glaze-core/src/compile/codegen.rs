//! SPIR-V code generation for a composed program.

use naga::back::spv;

use crate::error::{Error, Result};

use super::program::ComposedProgram;
use super::target::TargetConfig;

/// First word of every SPIR-V module.
pub const SPIRV_MAGIC: u32 = 0x0723_0203;

/// A generated SPIR-V artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpirvBlob {
    words: Vec<u32>,
}

impl SpirvBlob {
    /// The blob as SPIR-V words.
    pub fn as_words(&self) -> &[u32] {
        &self.words
    }

    /// Size of the blob in bytes.
    pub fn len_bytes(&self) -> usize {
        self.words.len() * 4
    }

    /// The blob as little-endian bytes, the layout consumed by graphics
    /// runtimes and by the foreign call boundary.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len_bytes());
        for word in &self.words {
            bytes.extend_from_slice(&word.to_le_bytes());
        }
        bytes
    }
}

/// Lower the composed program's single entry point against the single
/// configured target.
///
/// This pipeline compiles exactly one entry point per call and binds one
/// target per session, so `entry_index` and `target_index` only accept 0;
/// anything else is a scope violation, not a lookup.
pub fn generate(
    program: &ComposedProgram<'_>,
    entry_index: usize,
    target_index: usize,
    config: &TargetConfig,
) -> Result<SpirvBlob> {
    if entry_index != 0 {
        return Err(Error::CodeGen(format!(
            "entry index {entry_index} out of range: one entry point per call"
        )));
    }
    if target_index != 0 {
        return Err(Error::CodeGen(format!(
            "target index {target_index} out of range: one target per session"
        )));
    }

    let flags = config.flags();
    if !flags.generate_binary_directly {
        return Err(Error::CodeGen(
            "textual assembly output is not supported; enable direct binary generation"
                .to_string(),
        ));
    }

    let mut options = spv::Options::default();
    options.lang_version = config.profile().lang_version();

    let entry = program.entry_point();
    let pipeline_options = spv::PipelineOptions {
        shader_stage: entry.stage().to_naga(),
        entry_point: entry.name().to_string(),
    };

    let module = program.module();
    let words = spv::write_vec(&module.inner, &module.info, &options, Some(&pipeline_options))
        .map_err(|err| Error::CodeGen(err.to_string()))?;

    tracing::debug!(
        "generated {} bytes of SPIR-V for `{}`",
        words.len() * 4,
        entry.name()
    );

    Ok(SpirvBlob { words })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::{GlobalEnvironment, Session, ShaderStage, TargetConfig};

    const FRAGMENT_SRC: &str = "@fragment fn main() -> @location(0) vec4<f32> {
        return vec4<f32>(1.0, 0.0, 0.0, 1.0);
    }";

    fn generate_fragment() -> SpirvBlob {
        let env = GlobalEnvironment::acquire();
        let config = TargetConfig::for_stage(ShaderStage::Fragment).unwrap();
        let mut session = Session::new(env, config.clone());
        let module = session.load_module("frag.wgsl", FRAGMENT_SRC).unwrap();
        let entry = module.find_entry_point("main").unwrap();
        let program = ComposedProgram::compose(&module, entry, &config).unwrap();
        generate(&program, 0, 0, &config).unwrap()
    }

    #[test]
    fn test_blob_starts_with_magic() {
        let blob = generate_fragment();
        assert!(blob.len_bytes() > 0);
        assert_eq!(blob.as_words()[0], SPIRV_MAGIC);
        assert_eq!(blob.to_bytes()[..4], SPIRV_MAGIC.to_le_bytes());
    }

    #[test]
    fn test_byte_view_matches_word_view() {
        let blob = generate_fragment();
        assert_eq!(blob.to_bytes().len(), blob.len_bytes());
        assert_eq!(blob.len_bytes(), blob.as_words().len() * 4);
    }

    #[test]
    fn test_nonzero_indices_rejected() {
        let env = GlobalEnvironment::acquire();
        let config = TargetConfig::for_stage(ShaderStage::Fragment).unwrap();
        let mut session = Session::new(env, config.clone());
        let module = session.load_module("frag.wgsl", FRAGMENT_SRC).unwrap();
        let entry = module.find_entry_point("main").unwrap();
        let program = ComposedProgram::compose(&module, entry, &config).unwrap();

        assert!(matches!(
            generate(&program, 1, 0, &config),
            Err(Error::CodeGen(_))
        ));
        assert!(matches!(
            generate(&program, 0, 1, &config),
            Err(Error::CodeGen(_))
        ));
    }
}
