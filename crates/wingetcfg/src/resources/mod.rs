//! Typed resource builders.
//!
//! One builder per resource kind. Each is created from its required field,
//! configured with `with_*` setters and finished by a named operation that
//! validates the input and returns a [`Resource`](crate::Resource). Builders
//! never perform I/O.

pub mod group;
pub mod msi;
pub mod package;
pub mod registry;
pub mod script;
pub mod user;

pub use group::{GroupMembers, LocalGroup};
pub use msi::MsiPackage;
pub use package::WinGetPackage;
pub use registry::RegistryEntry;
pub use script::PowerShellScript;
pub use user::LocalUser;

use crate::error::{Error, Result};

/// Fail with [`Error::EmptyField`] when `value` is empty.
pub(crate) fn require(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::empty(field));
    }
    Ok(())
}
