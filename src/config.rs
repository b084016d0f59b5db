//! Resolver configuration.
//!
//! Every knob has a default matching the documented resolution contract, so
//! `ResolverConfig::default()` is what most callers want. The policies that
//! deviate from it reproduce the behavior of older generator versions and
//! are opt-in.

#[cfg(feature = "interchange")]
use serde::{Deserialize, Serialize};

use crate::base::constants::DEFAULT_GLOBAL_FLAGS;

/// What to do with a software instance whose active view has no builder of
/// the stack's reference file type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "snake_case"))]
pub enum SoftwareBuilderPolicy {
    /// Prune the instance from its stack.
    #[default]
    Require,
    /// Keep the instance; its files compile with the hardware builder.
    FallBackToHardware,
}

/// Identity key used to group objects when looking for conflicts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "snake_case"))]
pub enum ConflictIdentity {
    /// Bare file name. Two `util.c` files collide on the object file name.
    #[default]
    FileName,
    /// File name plus resolved absolute path, where one is known.
    FileNameAndPath,
}

/// How flag strings of same-identity objects are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "interchange", serde(rename_all = "snake_case"))]
pub enum FlagComparison {
    /// Byte-for-byte equality of the resolved flag string.
    #[default]
    Exact,
    /// Equality of the whitespace-separated tokens, ignoring order.
    TokenSet,
}

/// Configuration of one resolution pass.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "interchange", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "interchange", serde(default))]
pub struct ResolverConfig {
    /// First segment of every resolved flag string.
    pub global_flags: String,
    /// File type the hardware builder is chosen by. `None` takes the first
    /// default builder of the hardware instantiation.
    pub reference_file_type: Option<String>,
    pub software_builder: SoftwareBuilderPolicy,
    pub conflict_identity: ConflictIdentity,
    pub flag_comparison: FlagComparison,
    /// Resolve stacks on the rayon pool. Output order does not change.
    pub parallel: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            global_flags: DEFAULT_GLOBAL_FLAGS.to_string(),
            reference_file_type: None,
            software_builder: SoftwareBuilderPolicy::default(),
            conflict_identity: ConflictIdentity::default(),
            flag_comparison: FlagComparison::default(),
            parallel: false,
        }
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global_flags(mut self, flags: impl Into<String>) -> Self {
        self.global_flags = flags.into();
        self
    }

    pub fn with_reference_file_type(mut self, file_type: impl Into<String>) -> Self {
        self.reference_file_type = Some(file_type.into());
        self
    }

    pub fn with_software_builder(mut self, policy: SoftwareBuilderPolicy) -> Self {
        self.software_builder = policy;
        self
    }

    pub fn with_conflict_identity(mut self, identity: ConflictIdentity) -> Self {
        self.conflict_identity = identity;
        self
    }

    pub fn with_flag_comparison(mut self, comparison: FlagComparison) -> Self {
        self.flag_comparison = comparison;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
