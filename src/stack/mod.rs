//! Software stack resolution.
//!
//! A stack starts at a software instance that provides no service, follows
//! requester→provider connections depth first, and ends at the hardware
//! instance the root is mapped on. Every file of every part becomes an
//! [`ObjectRecord`] with a resolved compiler and flag string, and same-named
//! objects that disagree become [`ConflictGroup`]s.
//!
//! ```rust,ignore
//! let registry = StackResolver::new(&design, ResolverConfig::default()).resolve();
//! for stack in registry.iter() {
//!     println!("{}: {}", stack.name, stack.executable_builder());
//! }
//! ```

mod conflicts;
mod discover;
mod objects;
mod resolver;
mod types;

pub use conflicts::{find_conflicts, identity_of, same_configuration};
pub use discover::{is_top_of_stack, providers_of};
pub use objects::merge_flags;
pub use resolver::{StackResolver, resolve_design};
pub use types::{ConflictGroup, ConflictKey, ObjectRecord, Stack, StackPart, StackRegistry};
