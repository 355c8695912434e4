//! Validation and normalization helpers shared by the builders.

use log::trace;

use crate::types::{Ensure, RegistryValueType};

/// Whether `value_type` is one of the six registry value type literals.
///
/// The comparison is case-sensitive: `"MultiString"` is valid,
/// `"Multistring"` is not.
pub fn is_valid_registry_value_type(value_type: &str) -> bool {
    value_type.parse::<RegistryValueType>().is_ok()
}

/// Return `"Present"` or `"Absent"` unchanged, and `"Present"` for anything
/// else.
pub fn normalize_ensure(value: &str) -> &'static str {
    Ensure::normalize(value).as_str()
}

/// Split a semicolon-delimited member list into trimmed names.
///
/// Every segment is kept, so leading, trailing or doubled separators yield
/// empty names.
pub fn split_members(members: &str) -> Vec<String> {
    members.split(';').map(|m| m.trim().to_string()).collect()
}

/// Split a member list and prefix local account names with
/// `lowercase(hostname)\`.
///
/// Names containing a backslash, an `@`, or `dc` (in any case) are treated as
/// already qualified and passed through. Empty segments stay empty.
pub fn qualify_members(members: &str, hostname: &str) -> Vec<String> {
    let host = hostname.to_lowercase();
    split_members(members)
        .into_iter()
        .map(|member| {
            if member.is_empty() || is_qualified(&member) {
                member
            } else {
                trace!("qualifying member {member} with host {host}");
                format!("{host}\\{member}")
            }
        })
        .collect()
}

/// Split a member list, qualifying names only when a hostname is given.
pub fn member_list(members: &str, hostname: Option<&str>) -> Vec<String> {
    match hostname {
        Some(host) => qualify_members(members, host),
        None => split_members(members),
    }
}

fn is_qualified(member: &str) -> bool {
    member.contains('\\') || member.contains('@') || member.to_lowercase().contains("dc")
}
