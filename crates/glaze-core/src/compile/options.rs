//! Tagged option values for parameterizing the compiler.
//!
//! An [`OptionValue`] is a small tagged union with two integer slots and two
//! string slots. Single-valued integer options use slot 0, boolean options
//! mirror into both integer slots, and paired string options (such as a
//! macro define with a name and a replacement) use both string slots at once.
//! Exactly one kind is active per value; accessors for the inactive kind
//! return `None`.

/// Which family of slots an [`OptionValue`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Int,
    String,
}

/// A tagged configuration value, inert until consumed by the target
/// configurator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionValue {
    kind: OptionKind,
    int0: i32,
    int1: i32,
    string0: Option<String>,
    string1: Option<String>,
}

impl OptionValue {
    /// An integer value in slot 0.
    pub fn int0(value: i32) -> Self {
        Self {
            kind: OptionKind::Int,
            int0: value,
            int1: 0,
            string0: None,
            string1: None,
        }
    }

    /// An integer value in slot 1.
    pub fn int1(value: i32) -> Self {
        Self {
            kind: OptionKind::Int,
            int0: 0,
            int1: value,
            string0: None,
            string1: None,
        }
    }

    /// A boolean, mirrored into both integer slots as 0/1.
    pub fn boolean(value: bool) -> Self {
        let bit = if value { 1 } else { 0 };
        Self {
            kind: OptionKind::Int,
            int0: bit,
            int1: bit,
            string0: None,
            string1: None,
        }
    }

    /// A string value in slot 0.
    pub fn string0(value: impl Into<String>) -> Self {
        Self {
            kind: OptionKind::String,
            int0: 0,
            int1: 0,
            string0: Some(value.into()),
            string1: None,
        }
    }

    /// A string value in slot 1.
    pub fn string1(value: impl Into<String>) -> Self {
        Self {
            kind: OptionKind::String,
            int0: 0,
            int1: 0,
            string0: None,
            string1: Some(value.into()),
        }
    }

    /// A string pair filling both slots, e.g. a rename-from/rename-to pair.
    pub fn string_pair(value0: impl Into<String>, value1: impl Into<String>) -> Self {
        Self {
            kind: OptionKind::String,
            int0: 0,
            int1: 0,
            string0: Some(value0.into()),
            string1: Some(value1.into()),
        }
    }

    /// The active kind of this value.
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Both integer slots, if the integer kind is active.
    pub fn as_ints(&self) -> Option<(i32, i32)> {
        match self.kind {
            OptionKind::Int => Some((self.int0, self.int1)),
            OptionKind::String => None,
        }
    }

    /// Both string slots, if the string kind is active.
    pub fn as_strings(&self) -> Option<(Option<&str>, Option<&str>)> {
        match self.kind {
            OptionKind::Int => None,
            OptionKind::String => Some((self.string0.as_deref(), self.string1.as_deref())),
        }
    }
}

/// Names for compiler options.
///
/// Only [`OptionName::Stage`] is consumed by this pipeline; the remaining
/// names are accepted configuration surface for callers that build their own
/// option lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionName {
    /// The execution stage the entry point is compiled for.
    Stage,
    /// Backend optimization level (0-3).
    OptimizationLevel,
    /// A preprocessor-style macro definition (string pair: name, body).
    MacroDefine,
    /// Whether to emit debug information.
    DebugInformation,
}

/// A named option in a target configuration.
///
/// Entries are kept in insertion order; when the same name appears more than
/// once, consumers apply the last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub name: OptionName,
    pub value: OptionValue,
}

impl OptionEntry {
    pub fn new(name: OptionName, value: OptionValue) -> Self {
        Self { name, value }
    }
}
