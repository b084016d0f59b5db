//! Conflict detection within one stack.
//!
//! Objects are grouped by identity in production order. A group with more
//! than one member is a conflict only if some pair disagrees on
//! `(compiler, flags, included_in_build)`; a file pulled in twice with the
//! same configuration is harmless.

use indexmap::IndexMap;

use super::types::{ConflictGroup, ConflictKey, ObjectRecord, Stack};
use crate::config::{ConflictIdentity, FlagComparison, ResolverConfig};

/// Identity key of an object under the configured identity rule.
pub fn identity_of(object: &ObjectRecord, identity: ConflictIdentity) -> ConflictKey {
    let path = match identity {
        ConflictIdentity::FileName => None,
        ConflictIdentity::FileNameAndPath => object.path.clone(),
    };
    ConflictKey {
        file_name: object.file_name.clone(),
        path,
    }
}

fn flags_equal(a: &str, b: &str, comparison: FlagComparison) -> bool {
    match comparison {
        FlagComparison::Exact => a == b,
        FlagComparison::TokenSet => {
            let mut left: Vec<&str> = a.split_whitespace().collect();
            let mut right: Vec<&str> = b.split_whitespace().collect();
            left.sort_unstable();
            left.dedup();
            right.sort_unstable();
            right.dedup();
            left == right
        }
    }
}

/// True if two objects would be built the same way.
pub fn same_configuration(a: &ObjectRecord, b: &ObjectRecord, comparison: FlagComparison) -> bool {
    a.compiler == b.compiler
        && a.included_in_build == b.included_in_build
        && flags_equal(&a.flags, &b.flags, comparison)
}

/// Find every conflict group of a stack.
///
/// Groups are ordered by the first occurrence of their key; members keep
/// the order of [`Stack::objects`].
pub fn find_conflicts(stack: &Stack, config: &ResolverConfig) -> Vec<ConflictGroup> {
    let mut groups: IndexMap<ConflictKey, Vec<usize>> = IndexMap::new();
    for (index, object) in stack.objects.iter().enumerate() {
        groups
            .entry(identity_of(object, config.conflict_identity))
            .or_default()
            .push(index);
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .filter(|(_, members)| {
            members.iter().enumerate().any(|(i, &a)| {
                members[i + 1..].iter().any(|&b| {
                    !same_configuration(
                        &stack.objects[a],
                        &stack.objects[b],
                        config.flag_comparison,
                    )
                })
            })
        })
        .map(|(key, members)| ConflictGroup { key, members })
        .collect()
}
