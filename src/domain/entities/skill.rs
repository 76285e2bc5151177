use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "skill_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SkillKind {
    Technical,
    Soft,
}

/// A skill as referenced from an experience or a user-skill row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillReference {
    pub id: Uuid,
    pub name: String,
    pub kind: SkillKind,
    pub family: Option<String>,
}
