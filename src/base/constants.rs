//! Domain constants shared across the crate.

/// Global flag placeholders that open every resolved flag string.
///
/// The emission layer defines these variables in the generated build file.
pub const DEFAULT_GLOBAL_FLAGS: &str = "$(INCLUDES) $(DEBUG_FLAGS) $(PROFILE_FLAGS)";

/// Suffix of the per-instance header file set name (`<instance>_headers`).
pub const HEADER_SET_SUFFIX: &str = "_headers";
