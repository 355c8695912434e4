//! Local user account resource (xUser)

use log::debug;

use super::require;
use crate::error::Result;
use crate::types::{Ensure, Resource, ResourceKind};

/// A local user account.
///
/// The account description doubles as the resource description.
#[derive(Debug, Clone, Default)]
pub struct LocalUser {
    pub id: String,
    pub username: String,
    pub description: String,
    pub disabled: bool,
    pub full_name: String,
    /// Emitted only when non-empty
    pub password: String,
    /// Prevent the user from changing their password
    pub password_change_not_allowed: bool,
    /// Force a password change at next sign-in
    pub password_change_required: bool,
    pub password_never_expires: bool,
}

impl LocalUser {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
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

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_full_name(mut self, full_name: &str) -> Self {
        self.full_name = full_name.to_string();
        self
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    pub fn with_password_change_not_allowed(mut self, value: bool) -> Self {
        self.password_change_not_allowed = value;
        self
    }

    pub fn with_password_change_required(mut self, value: bool) -> Self {
        self.password_change_required = value;
        self
    }

    pub fn with_password_never_expires(mut self, value: bool) -> Self {
        self.password_never_expires = value;
        self
    }

    /// Create the account, or bring an existing one in line with these settings.
    pub fn add_or_modify(&self) -> Result<Resource> {
        self.build(Ensure::Present)
    }

    /// Delete the account. Only the id and username are carried over.
    pub fn remove(&self) -> Result<Resource> {
        LocalUser::new(&self.username)
            .with_id(&self.id)
            .build(Ensure::Absent)
    }

    fn build(&self, ensure: Ensure) -> Result<Resource> {
        require("username", &self.username)?;

        let mut r = Resource::new(ResourceKind::LocalUser, &self.id, &self.description);
        let settings = r.settings_mut();

        settings.set("UserName", self.username.as_str());
        settings.set("Description", self.description.as_str());
        settings.set("Disabled", self.disabled);
        settings.set("FullName", self.full_name.as_str());
        settings.set_non_empty("Password", &self.password);
        settings.set("PasswordChangeNotAllowed", self.password_change_not_allowed);
        settings.set("PasswordChangeRequired", self.password_change_required);
        settings.set("PasswordNeverExpires", self.password_never_expires);
        settings.set("Ensure", ensure);

        debug!("built {} resource for {}", r.kind(), self.username);
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SettingValue;

    #[test]
    fn test_add_user() {
        let r = LocalUser::new("kiosk")
            .with_id("kiosk-user")
            .with_description("Kiosk account")
            .with_full_name("Kiosk")
            .with_password("P@ssw0rd")
            .with_password_never_expires(true)
            .add_or_modify()
            .unwrap();

        assert_eq!(r.kind(), ResourceKind::LocalUser);
        assert_eq!(r.directives().description, "Kiosk account");
        let keys: Vec<_> = r.settings().keys().collect();
        assert_eq!(
            keys,
            vec![
                "UserName",
                "Description",
                "Disabled",
                "FullName",
                "Password",
                "PasswordChangeNotAllowed",
                "PasswordChangeRequired",
                "PasswordNeverExpires",
                "Ensure"
            ]
        );
        assert_eq!(
            r.setting("PasswordNeverExpires"),
            Some(&SettingValue::Bool(true))
        );
    }

    #[test]
    fn test_password_omitted_when_empty() {
        let r = LocalUser::new("guest").add_or_modify().unwrap();
        assert!(!r.settings().contains_key("Password"));
    }

    #[test]
    fn test_remove_resets_optional_fields() {
        let r = LocalUser::new("kiosk")
            .with_id("kiosk-user")
            .with_description("Kiosk account")
            .with_password("P@ssw0rd")
            .with_disabled(true)
            .remove()
            .unwrap();

        assert_eq!(r.id(), Some("kiosk-user"));
        assert_eq!(r.directives().description, "");
        assert!(!r.settings().contains_key("Password"));
        assert_eq!(r.setting("Disabled"), Some(&SettingValue::Bool(false)));
        assert_eq!(r.setting("Ensure").and_then(|v| v.as_str()), Some("Absent"));
    }

    #[test]
    fn test_empty_username_fails() {
        assert!(LocalUser::new("").add_or_modify().is_err());
        assert!(LocalUser::new("").remove().is_err());
    }
}
