use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    entities::{
        experience::ExperienceRecord,
        skill::{SkillKind, SkillReference},
        user::UserRecord,
        user_skill::{CertificationRecord, TrainingRecord, UserSkillRecord},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxCvRepo,
};

/// The four reads behind one CV generation. All read-only; any failure is
/// surfaced as `AppError::UpstreamRead` with the failing query's name and is
/// never retried.
#[async_trait]
pub trait CvRepository: Send + Sync {
    /// Read 1: the user record itself.
    async fn get_user(&self, user_id: Uuid) -> Result<UserRecord, AppError>;

    /// Read 2: experiences joined to their skills and skill families,
    /// ordered by start date descending.
    async fn experiences_with_skills(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ExperienceRecord>, AppError>;

    /// Read 3: user-skill rows joined to skill and nested trainings.
    async fn user_skills_with_trainings(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserSkillRecord>, AppError>;

    /// Read 4: certifications for a set of user-skill ids. Must return
    /// empty without touching the store when the set is empty.
    async fn certifications_for_user_skills(
        &self,
        user_skill_ids: &[Uuid],
    ) -> Result<Vec<CertificationRecord>, AppError>;

    /// Liveness probe for the health endpoint.
    async fn check_connection(&self) -> Result<(), AppError>;
}

impl SqlxCvRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxCvRepo { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ExperienceSkillRow {
    id: Uuid,
    user_id: Uuid,
    company: String,
    job_title: String,
    description: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    skill_id: Option<Uuid>,
    skill_name: Option<String>,
    skill_kind: Option<SkillKind>,
    skill_family: Option<String>,
}

#[derive(sqlx::FromRow)]
struct UserSkillRow {
    id: Uuid,
    user_id: Uuid,
    level: i16,
    comment: Option<String>,
    has_certification: bool,
    has_training: bool,
    skill_id: Uuid,
    skill_name: String,
    skill_kind: SkillKind,
    skill_family: Option<String>,
    training_name: Option<String>,
    training_date: Option<NaiveDate>,
    training_provider: Option<String>,
}

#[async_trait]
impl CvRepository for SqlxCvRepo {
    async fn get_user(&self, user_id: Uuid) -> Result<UserRecord, AppError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, full_name, role, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::upstream("user_by_id", e))?;

        user.ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))
    }

    async fn experiences_with_skills(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ExperienceRecord>, AppError> {
        let rows = sqlx::query_as::<_, ExperienceSkillRow>(
            r#"
            SELECT
                e.id, e.user_id, e.company, e.job_title, e.description,
                e.start_date, e.end_date,
                s.id AS skill_id, s.name AS skill_name, s.kind AS skill_kind,
                f.name AS skill_family
            FROM experiences e
            LEFT JOIN experience_skills es ON es.experience_id = e.id
            LEFT JOIN skills s ON s.id = es.skill_id
            LEFT JOIN skill_families f ON f.id = s.family_id
            WHERE e.user_id = $1
            ORDER BY e.start_date DESC, e.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::upstream("experiences_with_skills", e))?;

        // Fold the join rows back into one record per experience, keeping
        // the start-date-descending order from the query.
        let mut order: Vec<Uuid> = Vec::new();
        let mut by_id: HashMap<Uuid, ExperienceRecord> = HashMap::new();

        for row in rows {
            let entry = by_id.entry(row.id).or_insert_with(|| {
                order.push(row.id);
                ExperienceRecord {
                    id: row.id,
                    user_id: row.user_id,
                    company: row.company.clone(),
                    job_title: row.job_title.clone(),
                    description: row.description.clone(),
                    start_date: row.start_date,
                    end_date: row.end_date,
                    skills: Vec::new(),
                }
            });

            if let (Some(id), Some(name), Some(kind)) =
                (row.skill_id, row.skill_name, row.skill_kind)
            {
                entry.skills.push(SkillReference {
                    id,
                    name,
                    kind,
                    family: row.skill_family,
                });
            }
        }

        Ok(order
            .into_iter()
            .filter_map(|id| by_id.remove(&id))
            .collect())
    }

    async fn user_skills_with_trainings(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserSkillRecord>, AppError> {
        let rows = sqlx::query_as::<_, UserSkillRow>(
            r#"
            SELECT
                us.id, us.user_id, us.level, us.comment,
                us.has_certification, us.has_training,
                s.id AS skill_id, s.name AS skill_name, s.kind AS skill_kind,
                f.name AS skill_family,
                t.name AS training_name, t.date AS training_date,
                t.provider AS training_provider
            FROM user_skills us
            JOIN skills s ON s.id = us.skill_id
            LEFT JOIN skill_families f ON f.id = s.family_id
            LEFT JOIN trainings t ON t.user_skill_id = us.id
            WHERE us.user_id = $1
            ORDER BY us.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::upstream("user_skills_with_trainings", e))?;

        let mut order: Vec<Uuid> = Vec::new();
        let mut by_id: HashMap<Uuid, UserSkillRecord> = HashMap::new();

        for row in rows {
            let entry = by_id.entry(row.id).or_insert_with(|| {
                order.push(row.id);
                UserSkillRecord {
                    id: row.id,
                    user_id: row.user_id,
                    skill: SkillReference {
                        id: row.skill_id,
                        name: row.skill_name.clone(),
                        kind: row.skill_kind,
                        family: row.skill_family.clone(),
                    },
                    level: row.level,
                    comment: row.comment.clone(),
                    has_certification: row.has_certification,
                    has_training: row.has_training,
                    trainings: Vec::new(),
                }
            });

            if let Some(name) = row.training_name {
                entry.trainings.push(TrainingRecord {
                    user_skill_id: row.id,
                    name,
                    date: row.training_date,
                    provider: row.training_provider,
                });
            }
        }

        Ok(order
            .into_iter()
            .filter_map(|id| by_id.remove(&id))
            .collect())
    }

    async fn certifications_for_user_skills(
        &self,
        user_skill_ids: &[Uuid],
    ) -> Result<Vec<CertificationRecord>, AppError> {
        // An empty id set would make an invalid IN () query; it also means
        // there is nothing to find.
        if user_skill_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, CertificationRecord>(
            r#"
            SELECT user_skill_id, name, obtained_date, expiry_date
            FROM certifications
            WHERE user_skill_id = ANY($1)
            "#,
        )
        .bind(user_skill_ids.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::upstream("certifications_by_user_skill", e))
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }
}
