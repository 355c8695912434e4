//! Local group resource (xGroup)
//!
//! Member lists are semicolon-delimited strings. With a hostname configured
//! through `qualify_with_hostname`, bare account names are prefixed with
//! `host\`; without one the list is split as-is.

use log::debug;

use super::require;
use crate::error::Result;
use crate::types::{Ensure, Resource, ResourceKind};
use crate::validate::member_list;

const INCLUDE_DESCRIPTION: &str = "Include members to group";
const EXCLUDE_DESCRIPTION: &str = "Exclude members from group";

/// A local group whose full membership is managed.
#[derive(Debug, Clone, Default)]
pub struct LocalGroup {
    pub id: String,
    pub group_name: String,
    pub description: String,
    /// Semicolon-delimited members; replaces the current membership
    pub members: String,
    /// Hostname used to qualify local account names
    pub hostname: Option<String>,
}

impl LocalGroup {
    pub fn new(group_name: &str) -> Self {
        Self {
            group_name: group_name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_members(mut self, members: &str) -> Self {
        self.members = members.to_string();
        self
    }

    /// Prefix unqualified member names with `lowercase(hostname)\`.
    pub fn qualify_with_hostname(mut self, hostname: &str) -> Self {
        self.hostname = Some(hostname.to_string());
        self
    }

    /// Create the group, or replace its description and membership.
    pub fn add_or_modify(&self) -> Result<Resource> {
        self.build(Ensure::Present)
    }

    /// Delete the group. Description and members are not carried over.
    pub fn remove(&self) -> Result<Resource> {
        LocalGroup::new(&self.group_name)
            .with_id(&self.id)
            .build(Ensure::Absent)
    }

    fn build(&self, ensure: Ensure) -> Result<Resource> {
        require("groupName", &self.group_name)?;

        let mut r = Resource::new(ResourceKind::LocalGroup, &self.id, &self.description);
        let settings = r.settings_mut();

        settings.set("GroupName", self.group_name.as_str());
        settings.set("Description", self.description.as_str());
        if !self.members.is_empty() {
            settings.set(
                "Members",
                member_list(&self.members, self.hostname.as_deref()),
            );
        }
        settings.set("Ensure", ensure);

        debug!("built {} resource for group {}", r.kind(), self.group_name);
        Ok(r)
    }
}

/// Members added to or removed from a group without touching the rest of
/// its membership.
#[derive(Debug, Clone, Default)]
pub struct GroupMembers {
    pub id: String,
    pub group_name: String,
    /// Semicolon-delimited members
    pub members: String,
    pub hostname: Option<String>,
}

impl GroupMembers {
    pub fn new(group_name: &str, members: &str) -> Self {
        Self {
            group_name: group_name.to_string(),
            members: members.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn qualify_with_hostname(mut self, hostname: &str) -> Self {
        self.hostname = Some(hostname.to_string());
        self
    }

    /// Ensure the members belong to the group.
    pub fn include(&self) -> Result<Resource> {
        self.build(INCLUDE_DESCRIPTION, "MembersToInclude", "membersToInclude")
    }

    /// Ensure the members do not belong to the group.
    pub fn exclude(&self) -> Result<Resource> {
        self.build(EXCLUDE_DESCRIPTION, "MembersToExclude", "membersToExclude")
    }

    fn build(&self, description: &str, key: &str, field: &'static str) -> Result<Resource> {
        require("groupName", &self.group_name)?;
        require(field, &self.members)?;

        let mut r = Resource::new(ResourceKind::LocalGroup, &self.id, description);
        let settings = r.settings_mut();

        settings.set("GroupName", self.group_name.as_str());
        settings.set(key, member_list(&self.members, self.hostname.as_deref()));
        settings.set("Ensure", Ensure::Present);

        debug!("built {} {} resource for group {}", r.kind(), key, self.group_name);
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SettingValue;

    fn list(items: &[&str]) -> SettingValue {
        SettingValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_add_group_with_qualified_members() {
        let r = LocalGroup::new("Remote Desktop Users")
            .with_description("RDP access")
            .with_members("alice;CORP\\bob")
            .qualify_with_hostname("WS01")
            .add_or_modify()
            .unwrap();

        assert_eq!(r.kind(), ResourceKind::LocalGroup);
        assert_eq!(r.setting("Members"), Some(&list(&["ws01\\alice", "CORP\\bob"])));
        assert_eq!(r.setting("Ensure").and_then(|v| v.as_str()), Some("Present"));
    }

    #[test]
    fn test_add_group_plain_split() {
        let r = LocalGroup::new("Operators")
            .with_members("alice;bob")
            .add_or_modify()
            .unwrap();
        assert_eq!(r.setting("Members"), Some(&list(&["alice", "bob"])));
    }

    #[test]
    fn test_members_omitted_when_empty() {
        let r = LocalGroup::new("Operators").add_or_modify().unwrap();
        let keys: Vec<_> = r.settings().keys().collect();
        assert_eq!(keys, vec!["GroupName", "Description", "Ensure"]);
    }

    #[test]
    fn test_remove_group() {
        let r = LocalGroup::new("Operators")
            .with_id("ops")
            .with_members("alice")
            .remove()
            .unwrap();
        assert_eq!(r.id(), Some("ops"));
        assert!(!r.settings().contains_key("Members"));
        assert_eq!(r.setting("Ensure").and_then(|v| v.as_str()), Some("Absent"));
    }

    #[test]
    fn test_include_members() {
        let r = GroupMembers::new("Administrators", "helpdesk;admin@corp.example")
            .qualify_with_hostname("PC-42")
            .include()
            .unwrap();

        assert_eq!(r.directives().description, "Include members to group");
        assert_eq!(
            r.setting("MembersToInclude"),
            Some(&list(&["pc-42\\helpdesk", "admin@corp.example"]))
        );
        assert_eq!(r.setting("Ensure").and_then(|v| v.as_str()), Some("Present"));
    }

    #[test]
    fn test_exclude_members_still_present() {
        let r = GroupMembers::new("Administrators", "guest")
            .exclude()
            .unwrap();

        assert_eq!(r.directives().description, "Exclude members from group");
        assert_eq!(r.setting("MembersToExclude"), Some(&list(&["guest"])));
        assert!(!r.settings().contains_key("MembersToInclude"));
        assert_eq!(r.setting("Ensure").and_then(|v| v.as_str()), Some("Present"));
    }

    #[test]
    fn test_trailing_separator_yields_empty_member() {
        let r = GroupMembers::new("Users", "alice;")
            .qualify_with_hostname("HOST")
            .include()
            .unwrap();
        assert_eq!(r.setting("MembersToInclude"), Some(&list(&["host\\alice", ""])));
    }

    #[test]
    fn test_required_fields() {
        let err = LocalGroup::new("").add_or_modify().unwrap_err();
        assert_eq!(err.to_string(), "groupName cannot be empty");

        let err = GroupMembers::new("", "alice").include().unwrap_err();
        assert_eq!(err.to_string(), "groupName cannot be empty");

        let err = GroupMembers::new("Users", "").include().unwrap_err();
        assert_eq!(err.to_string(), "membersToInclude cannot be empty");

        let err = GroupMembers::new("Users", "").exclude().unwrap_err();
        assert_eq!(err.to_string(), "membersToExclude cannot be empty");
    }
}
