//! Target configuration for code generation.
//!
//! A [`TargetConfig`] describes the output format, instruction profile,
//! feature policy bits, and option entries for one compilation. It is built
//! fresh for every request; nothing here is cached across calls.

use crate::error::{Error, Result};

use super::options::{OptionEntry, OptionName, OptionValue};

/// The instruction profile every request is compiled against.
///
/// Changing this constant changes the SPIR-V version stamped into every
/// generated blob, so treat any edit as a compatibility break for consumers.
pub const PROFILE_NAME: &str = "spirv_1_5";

/// Execution stage an entry point runs in.
///
/// The discriminants are the stable identifiers used across the C ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ShaderStage {
    Vertex = 0,
    Fragment = 1,
    Compute = 2,
}

impl ShaderStage {
    /// Map a raw stage identifier from the call boundary.
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            0 => Ok(Self::Vertex),
            1 => Ok(Self::Fragment),
            2 => Ok(Self::Compute),
            other => Err(Error::UnknownStage(other)),
        }
    }

    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            Self::Vertex => naga::ShaderStage::Vertex,
            Self::Fragment => naga::ShaderStage::Fragment,
            Self::Compute => naga::ShaderStage::Compute,
        }
    }

    pub(crate) fn from_naga(stage: naga::ShaderStage) -> Option<Self> {
        match stage {
            naga::ShaderStage::Vertex => Some(Self::Vertex),
            naga::ShaderStage::Fragment => Some(Self::Fragment),
            naga::ShaderStage::Compute => Some(Self::Compute),
            _ => None,
        }
    }
}

/// Output format of the code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryFormat {
    /// Portable SPIR-V bytecode.
    Spirv,
}

/// An instruction-set profile, parsed from an identifier like `spirv_1_5`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionProfile {
    name: String,
    version: (u8, u8),
}

impl InstructionProfile {
    /// Parse a profile identifier of the form `spirv_<major>_<minor>`.
    pub fn parse(name: &str) -> Result<Self> {
        let unsupported = || Error::UnsupportedProfile(name.to_string());

        let version = name.strip_prefix("spirv_").ok_or_else(unsupported)?;
        let (major, minor) = version.split_once('_').ok_or_else(unsupported)?;
        let major: u8 = major.parse().map_err(|_| unsupported())?;
        let minor: u8 = minor.parse().map_err(|_| unsupported())?;

        Ok(Self {
            name: name.to_string(),
            version: (major, minor),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The SPIR-V language version this profile targets.
    pub fn lang_version(&self) -> (u8, u8) {
        self.version
    }
}

/// Feature policy bits for code generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetFlags {
    /// Emit binary words in-process instead of going through a textual
    /// assembly round trip.
    pub generate_binary_directly: bool,
    /// Require scalar layout for buffer members. The WGSL layouter emits
    /// explicit member offsets that already satisfy this, so the bit is a
    /// declared policy rather than extra backend work.
    pub force_scalar_buffer_layout: bool,
}

/// The full description of what one compilation should produce.
#[derive(Debug, Clone)]
pub struct TargetConfig {
    format: BinaryFormat,
    profile: InstructionProfile,
    flags: TargetFlags,
    options: Vec<OptionEntry>,
}

impl TargetConfig {
    /// Build the fixed per-request configuration for one stage: SPIR-V
    /// output, the [`PROFILE_NAME`] profile, both policy bits enabled, and a
    /// single option entry asserting the stage.
    pub fn for_stage(stage: ShaderStage) -> Result<Self> {
        let profile = InstructionProfile::parse(PROFILE_NAME)?;

        let options = vec![OptionEntry::new(
            OptionName::Stage,
            OptionValue::int0(stage as i32),
        )];

        Ok(Self {
            format: BinaryFormat::Spirv,
            profile,
            flags: TargetFlags {
                generate_binary_directly: true,
                force_scalar_buffer_layout: true,
            },
            options,
        })
    }

    pub fn format(&self) -> BinaryFormat {
        self.format
    }

    pub fn profile(&self) -> &InstructionProfile {
        &self.profile
    }

    pub fn flags(&self) -> TargetFlags {
        self.flags
    }

    pub fn options(&self) -> &[OptionEntry] {
        &self.options
    }

    /// Append an option entry. Entries with a name already present override
    /// the earlier entry when the configuration is consumed.
    pub fn push_option(&mut self, entry: OptionEntry) {
        self.options.push(entry);
    }

    /// The stage asserted by the option entries (last `Stage` entry wins).
    pub fn stage(&self) -> Result<ShaderStage> {
        let entry = self
            .options
            .iter()
            .rev()
            .find(|entry| entry.name == OptionName::Stage)
            .ok_or_else(|| {
                Error::InvalidConfiguration("no stage option entry present".to_string())
            })?;

        let (int0, _) = entry.value.as_ints().ok_or_else(|| {
            Error::InvalidConfiguration("stage option entry is not integer-valued".to_string())
        })?;

        ShaderStage::from_raw(int0 as u32)
    }
}
