//! Module loading and entry-point resolution.

use naga::front::wgsl;
use naga::valid::ModuleInfo;

use crate::error::{Error, Result};

use super::session::Session;
use super::target::ShaderStage;

/// A parsed and validated translation unit.
///
/// Produced by [`Session::load_module`]; the label is used purely for
/// diagnostic attribution and need not name a real file.
#[derive(Debug)]
pub struct Module {
    label: String,
    pub(super) inner: naga::Module,
    pub(super) info: ModuleInfo,
}

impl Session {
    /// Parse and validate `source` as a single module.
    ///
    /// `label` attributes diagnostics to a logical path; it does not change
    /// what is compiled.
    pub fn load_module(&mut self, label: &str, source: &str) -> Result<Module> {
        let inner = wgsl::parse_str(source).map_err(|err| {
            tracing::debug!("parse failed for `{label}`");
            Error::ModuleLoad {
                label: label.to_string(),
                message: err.emit_to_string(source),
            }
        })?;

        self.validator.reset();
        let info = self.validator.validate(&inner).map_err(|err| {
            tracing::debug!("validation failed for `{label}`");
            Error::ModuleLoad {
                label: label.to_string(),
                message: err.into_inner().to_string(),
            }
        })?;

        tracing::debug!(
            "loaded module `{label}` with {} entry points",
            inner.entry_points.len()
        );

        Ok(Module {
            label: label.to_string(),
            inner,
            info,
        })
    }
}

impl Module {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Locate the named function to serve as the program's execution entry.
    ///
    /// Absence is reported here as [`Error::EntryPointNotFound`] rather than
    /// surfacing later as a generic code-generation failure; stage
    /// compatibility is checked separately at composition time.
    pub fn find_entry_point(&self, name: &str) -> Result<EntryPoint<'_>> {
        let (index, entry) = self
            .inner
            .entry_points
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.name == name)
            .ok_or_else(|| Error::EntryPointNotFound(name.to_string()))?;

        let stage = ShaderStage::from_naga(entry.stage).ok_or_else(|| {
            Error::Composition(format!(
                "entry point `{name}` uses a stage this target cannot generate code for"
            ))
        })?;

        Ok(EntryPoint {
            module: self,
            index,
            name: name.to_string(),
            stage,
        })
    }

    /// Names of all entry points declared in the module.
    pub fn entry_point_names(&self) -> impl Iterator<Item = &str> {
        self.inner.entry_points.iter().map(|entry| entry.name.as_str())
    }
}

/// A reference to one function in a [`Module`] chosen as the execution entry.
///
/// Borrows its module, so it cannot outlive it.
#[derive(Debug)]
pub struct EntryPoint<'m> {
    pub(super) module: &'m Module,
    pub(super) index: usize,
    name: String,
    stage: ShaderStage,
}

impl EntryPoint<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the entry point in the module's entry-point list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The stage the entry point is declared for in the source.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}
