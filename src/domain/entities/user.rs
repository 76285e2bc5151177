use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::FALLBACK_CV_FILENAME;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Attachment filename for the generated document, e.g. "cv_Jane_Doe.docx".
    pub fn cv_filename(&self) -> String {
        let name = self.full_name.trim();
        if name.is_empty() {
            FALLBACK_CV_FILENAME.to_string()
        } else {
            format!("cv_{}.docx", name.replace(' ', "_"))
        }
    }
}
