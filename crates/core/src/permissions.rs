//! Command permission rules edited by guild staff from the dashboard.
//!
//! Each guild keeps a list of bot commands, each with a description and the
//! role ids allowed to run it. Storage lives in `rpgdash-db`; this module
//! holds the records and the input rules.

use serde::{Deserialize, Serialize};

/// Longest accepted command name.
pub const MAX_COMMAND_NAME_LEN: usize = 32;

/// Longest accepted command description.
pub const MAX_DESCRIPTION_LEN: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPermission {
    pub command_name: String,
    pub description: String,
    /// Role ids in the order they were granted.
    pub allowed_roles: Vec<String>,
}

impl CommandPermission {
    pub fn new(command_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            description: description.into(),
            allowed_roles: Vec::new(),
        }
    }

    /// Grant `role_id`. Returns `false` when it was already granted.
    pub fn grant(&mut self, role_id: &str) -> bool {
        if self.allows(role_id) {
            return false;
        }
        self.allowed_roles.push(role_id.to_string());
        true
    }

    /// Revoke `role_id`. Returns `false` when it was not granted.
    pub fn revoke(&mut self, role_id: &str) -> bool {
        let before = self.allowed_roles.len();
        self.allowed_roles.retain(|r| r != role_id);
        self.allowed_roles.len() != before
    }

    pub fn allows(&self, role_id: &str) -> bool {
        self.allowed_roles.iter().any(|r| r == role_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildPermissions {
    pub guild_id: String,
    pub permissions: Vec<CommandPermission>,
}

// ---------------------------------------------------------------------------
// Input rules
// ---------------------------------------------------------------------------

/// Trim and lower-case a command name as typed by staff.
pub fn normalize_command_name(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Validate a normalized command name: 1 to 32 chars of `[a-z0-9_-]`.
pub fn validate_command_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Command name must not be empty".to_string());
    }
    if name.len() > MAX_COMMAND_NAME_LEN {
        return Err(format!(
            "Command name must be at most {MAX_COMMAND_NAME_LEN} characters"
        ));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(format!(
            "Command name '{name}' may only contain a-z, 0-9, '_' and '-'"
        ));
    }
    Ok(())
}

pub fn validate_role_id(role_id: &str) -> Result<(), String> {
    if role_id.trim().is_empty() {
        return Err("Role id must not be empty".to_string());
    }
    Ok(())
}

pub fn validate_guild_id(guild_id: &str) -> Result<(), String> {
    if guild_id.trim().is_empty() {
        return Err("Guild id must not be empty".to_string());
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), String> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(format!(
            "Description must be at most {MAX_DESCRIPTION_LEN} characters"
        ));
    }
    Ok(())
}

/// Constant-time comparison of a supplied admin password against the
/// configured one. No configured password means nobody matches.
pub fn admin_password_matches(configured: Option<&str>, supplied: &str) -> bool {
    use subtle::ConstantTimeEq;

    let Some(configured) = configured.filter(|p| !p.is_empty()) else {
        return false;
    };
    if configured.len() != supplied.len() {
        return false;
    }
    configured.as_bytes().ct_eq(supplied.as_bytes()).into()
}
