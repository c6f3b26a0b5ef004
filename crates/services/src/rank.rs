use dutydesk_config::RoleSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Staff rank ladder, ascending privilege. Access is cumulative: a level
/// grants everything every lower level grants, so all checks are plain
/// `>=` comparisons on the discriminant.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AdminLevel {
    #[default]
    None = 0,
    TraineeMod = 1,
    Moderator = 2,
    Administrator = 3,
    InternalAffairs = 4,
    Management = 5,
    DirectionBoard = 6,
}

impl AdminLevel {
    pub fn name(self) -> &'static str {
        match self {
            AdminLevel::None => "No Access",
            AdminLevel::TraineeMod => "Trainee Mod",
            AdminLevel::Moderator => "Moderator",
            AdminLevel::Administrator => "Administrator",
            AdminLevel::InternalAffairs => "Internal Affairs",
            AdminLevel::Management => "Management",
            AdminLevel::DirectionBoard => "Direction Board",
        }
    }
}

/// `level` may do anything `required` gates.
pub fn can_access(level: AdminLevel, required: AdminLevel) -> bool {
    level >= required
}

/// Immutable map from Discord role id to admin level, built once from
/// settings at startup.
#[derive(Debug, Clone, Default)]
pub struct RankPolicy {
    map: HashMap<String, AdminLevel>,
}

impl RankPolicy {
    pub fn from_settings(roles: &RoleSettings) -> Self {
        let mut map = HashMap::new();
        let groups = [
            (&roles.trainee_mod, AdminLevel::TraineeMod),
            (&roles.moderator, AdminLevel::Moderator),
            (&roles.administrator, AdminLevel::Administrator),
            (&roles.internal_affairs, AdminLevel::InternalAffairs),
            (&roles.management, AdminLevel::Management),
            (&roles.direction_board, AdminLevel::DirectionBoard),
        ];
        for (ids, level) in groups {
            for id in ids {
                map.insert(id.clone(), level);
            }
        }
        Self { map }
    }

    /// Highest level any held role maps to; unmapped roles contribute
    /// nothing and an empty set resolves to `None`.
    pub fn resolve_level<S: AsRef<str>>(&self, held_roles: &[S]) -> AdminLevel {
        held_roles
            .iter()
            .filter_map(|id| self.map.get(id.as_ref()).copied())
            .max()
            .unwrap_or(AdminLevel::None)
    }
}
