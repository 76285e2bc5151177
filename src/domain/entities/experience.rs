use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::skill::SkillReference;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub job_title: String,
    pub description: String,
    pub start_date: NaiveDate,
    /// None means the position is ongoing.
    pub end_date: Option<NaiveDate>,
    pub skills: Vec<SkillReference>,
}

impl ExperienceRecord {
    pub fn effective_end(&self, today: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(today)
    }
}
