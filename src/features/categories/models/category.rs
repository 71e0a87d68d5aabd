use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Category projection: the only category fields ever read or exposed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
}
