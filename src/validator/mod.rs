//! Validator capability and built-in validator implementations.
//!
//! A validator answers whether the current user/environment may use a
//! cluster. The contract is deliberately small: anything constructible from
//! a [`ComponentConfig`](crate::config::ComponentConfig) that can report
//! `validate() -> Result<bool>` qualifies. A `false` means "configuration
//! says no"; an `Err` means the check itself broke and is surfaced as a
//! `ValidatorRuntime` error rather than being conflated with `false`.

pub mod acl;
pub mod file;
pub mod groups;

use crate::error::Result;

// Re-exports for convenience
pub use acl::{AclRules, HostValidator, UserValidator};
pub use file::FileValidator;
pub use groups::GroupValidator;

/// Trait for cluster access validators.
///
/// Implementations may perform blocking I/O (filesystem stats, group
/// lookups); callers must not assume `validate` is cheap.
pub trait Validator: Send + Sync {
    /// Returns the type tag of this validator.
    fn kind(&self) -> &'static str;

    /// Checks whether the current environment satisfies this validator.
    fn validate(&self) -> Result<bool>;
}
