use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Account roles, highest privilege first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
    Premium,
    User,
    Guest,
}

/// What a role may do. Informational only: nothing in the store enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub can_manage_users: bool,
    pub can_manage_roles: bool,
    pub can_delete_any_dream: bool,
    pub can_view_all_stats: bool,
    pub can_export_data: bool,
    pub can_manage_settings: bool,
    pub can_create_dreams: bool,
    pub can_edit_own_dreams: bool,
    pub can_share_dreams: bool,
    pub can_view_advanced_stats: bool,
    pub can_use_premium_features: bool,
    /// `None` means unlimited.
    pub max_dreams_per_month: Option<u32>,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Moderator,
        Role::Premium,
        Role::User,
        Role::Guest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::Premium => "premium",
            Role::User => "user",
            Role::Guest => "guest",
        }
    }

    /// Position in the hierarchy; higher outranks lower.
    pub fn rank(&self) -> u8 {
        match self {
            Role::Admin => 5,
            Role::Moderator => 4,
            Role::Premium => 3,
            Role::User => 2,
            Role::Guest => 1,
        }
    }

    pub fn outranks(&self, other: Role) -> bool {
        self.rank() > other.rank()
    }

    pub fn permissions(&self) -> Permissions {
        match self {
            Role::Admin => Permissions {
                can_manage_users: true,
                can_manage_roles: true,
                can_delete_any_dream: true,
                can_view_all_stats: true,
                can_export_data: true,
                can_manage_settings: true,
                can_create_dreams: true,
                can_edit_own_dreams: true,
                can_share_dreams: true,
                can_view_advanced_stats: true,
                can_use_premium_features: true,
                max_dreams_per_month: None,
            },
            Role::Moderator => Permissions {
                can_manage_users: false,
                can_manage_roles: false,
                can_delete_any_dream: true,
                can_view_all_stats: true,
                can_export_data: true,
                can_manage_settings: false,
                can_create_dreams: true,
                can_edit_own_dreams: true,
                can_share_dreams: true,
                can_view_advanced_stats: true,
                can_use_premium_features: true,
                max_dreams_per_month: Some(500),
            },
            Role::Premium => Permissions {
                can_manage_users: false,
                can_manage_roles: false,
                can_delete_any_dream: false,
                can_view_all_stats: false,
                can_export_data: true,
                can_manage_settings: false,
                can_create_dreams: true,
                can_edit_own_dreams: true,
                can_share_dreams: true,
                can_view_advanced_stats: true,
                can_use_premium_features: true,
                max_dreams_per_month: Some(100),
            },
            Role::User => Permissions {
                can_manage_users: false,
                can_manage_roles: false,
                can_delete_any_dream: false,
                can_view_all_stats: false,
                can_export_data: false,
                can_manage_settings: false,
                can_create_dreams: true,
                can_edit_own_dreams: true,
                can_share_dreams: true,
                can_view_advanced_stats: false,
                can_use_premium_features: false,
                max_dreams_per_month: Some(30),
            },
            Role::Guest => Permissions {
                can_manage_users: false,
                can_manage_roles: false,
                can_delete_any_dream: false,
                can_view_all_stats: false,
                can_export_data: false,
                can_manage_settings: false,
                can_create_dreams: false,
                can_edit_own_dreams: false,
                can_share_dreams: false,
                can_view_advanced_stats: false,
                can_use_premium_features: false,
                max_dreams_per_month: Some(0),
            },
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Config(format!("unknown role '{s}'")))
    }
}
