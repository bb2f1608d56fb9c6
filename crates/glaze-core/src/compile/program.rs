//! Program composition: linking a module and an entry point.

use crate::error::{Error, Result};

use super::module::{EntryPoint, Module};
use super::target::TargetConfig;

/// A module and one resolved entry point, linked into a unit that is
/// eligible for code generation.
#[derive(Debug)]
pub struct ComposedProgram<'m> {
    pub(super) module: &'m Module,
    pub(super) entry: EntryPoint<'m>,
}

impl<'m> ComposedProgram<'m> {
    /// Link exactly two components: the module and its resolved entry point.
    ///
    /// Fails when the entry point does not belong to `module`, or when its
    /// declared stage is incompatible with the stage asserted by the target
    /// configuration.
    pub fn compose(
        module: &'m Module,
        entry: EntryPoint<'m>,
        config: &TargetConfig,
    ) -> Result<Self> {
        if !std::ptr::eq(module, entry.module) {
            return Err(Error::Composition(format!(
                "entry point `{}` was resolved against a different module than `{}`",
                entry.name(),
                module.label()
            )));
        }

        let requested = config.stage()?;
        if entry.stage() != requested {
            return Err(Error::StageMismatch {
                name: entry.name().to_string(),
                declared: entry.stage(),
                requested,
            });
        }

        tracing::debug!(
            "composed program for `{}` ({:?}) from module `{}`",
            entry.name(),
            requested,
            module.label()
        );

        Ok(Self { module, entry })
    }

    pub fn module(&self) -> &Module {
        self.module
    }

    pub fn entry_point(&self) -> &EntryPoint<'m> {
        &self.entry
    }
}
