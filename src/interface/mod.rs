//! Interface descriptors.
//!
//! A declaration (`declaration`) is normalized into a canonical `Interface`
//! (`descriptor`) whose values are always the `"function"` marker
//! (`identity`). `Methodical` wraps that canonical form with the operations
//! callers run against live objects: `check`, `complete`, and
//! `try_call`/`try_apply`.

pub mod declaration;
pub mod descriptor;
pub mod identity;
pub mod methodical;

pub use declaration::{Block, Declaration};
pub use descriptor::{Interface, Members};
pub use identity::{FUNCTION, MemberKind};
pub use methodical::Methodical;
