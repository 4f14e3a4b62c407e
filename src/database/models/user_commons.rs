use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Membership of a user in a commons, with the user's accrued state there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserCommons {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub user_id: i64,
    #[serde(default)]
    pub commons_id: i64,
    #[serde(default)]
    pub total_wealth: f64,
    #[serde(default)]
    pub avg_cow_health: f64,
}

impl UserCommons {
    /// Entity-type name used in not-found messages
    pub const ENTITY: &'static str = "UserCommons";
}
