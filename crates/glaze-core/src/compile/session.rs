//! Compiler environment and per-request sessions.

use std::sync::OnceLock;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::target::TargetConfig;

/// Process-wide compiler environment.
///
/// Holds the validation flags and capability set every session is created
/// with. Initialized once behind a thread-safe accessor and then only read,
/// so concurrent invocations on separate threads can share it freely.
#[derive(Debug)]
pub struct GlobalEnvironment {
    validation_flags: ValidationFlags,
    capabilities: Capabilities,
}

static ENVIRONMENT: OnceLock<GlobalEnvironment> = OnceLock::new();

impl GlobalEnvironment {
    /// Get the process-wide environment, initializing it on first use.
    pub fn acquire() -> &'static Self {
        ENVIRONMENT.get_or_init(|| {
            tracing::debug!("initializing global compiler environment");
            Self {
                validation_flags: ValidationFlags::all(),
                capabilities: Capabilities::all(),
            }
        })
    }

    pub fn validation_flags(&self) -> ValidationFlags {
        self.validation_flags
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

/// An ephemeral compilation session bound to one target configuration.
///
/// A session owns the validator used to check modules it loads and lives for
/// exactly one pipeline invocation; dropping it releases everything except
/// the modules it produced.
pub struct Session {
    config: TargetConfig,
    pub(super) validator: Validator,
}

impl Session {
    /// Establish a session for one request.
    pub fn new(env: &GlobalEnvironment, config: TargetConfig) -> Self {
        let validator = Validator::new(env.validation_flags(), env.capabilities());
        Self { config, validator }
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }
}
