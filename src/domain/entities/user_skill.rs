use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::skill::SkillReference;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSkillRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill: SkillReference,
    pub level: i16,
    pub comment: Option<String>,
    pub has_certification: bool,
    pub has_training: bool,
    pub trainings: Vec<TrainingRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CertificationRecord {
    pub user_skill_id: Uuid,
    pub name: String,
    pub obtained_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrainingRecord {
    pub user_skill_id: Uuid,
    pub name: String,
    pub date: Option<NaiveDate>,
    pub provider: Option<String>,
}
