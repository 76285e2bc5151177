use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    constants::CV_DATE_FORMAT,
    domain::tenure::{total_tenure, Locale, Tenure},
    entities::{
        cv::{
            ActivityKind, CvViewModel, DomainExpertiseRow, EmploymentHistoryItem,
            ProfessionalActivityRow, TechnicalExpertiseRow,
        },
        experience::ExperienceRecord,
        skill::SkillKind,
        user::UserRecord,
        user_skill::{CertificationRecord, UserSkillRecord},
    },
    errors::AppError,
    infrastructure::render::docx::DocumentRenderer,
    interfaces::repositories::cv::CvRepository,
};

#[derive(Debug)]
pub struct GeneratedCv {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct CvHandler<R, D>
where
    R: CvRepository,
    D: DocumentRenderer,
{
    pub cv_repo: R,
    pub renderer: D,
    pub locale: Locale,
    fixed_today: Option<NaiveDate>,
}

impl<R, D> CvHandler<R, D>
where
    R: CvRepository,
    D: DocumentRenderer,
{
    pub fn new(cv_repo: R, renderer: D, locale: Locale) -> Self {
        CvHandler {
            cv_repo,
            renderer,
            locale,
            fixed_today: None,
        }
    }

    /// Pins "now" for open-ended tenure computations. Test hook.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Runs the whole fetch -> aggregate -> render pipeline for one user.
    /// Any failed stage short-circuits the rest; no partial document is
    /// ever produced.
    pub async fn generate(&self, user_id: Uuid) -> Result<GeneratedCv, AppError> {
        let user = self.cv_repo.get_user(user_id).await?;

        // Reads 2 and 3 are independent of each other; read 4 needs the
        // user-skill ids from read 3.
        let (experiences, user_skills) = tokio::try_join!(
            self.cv_repo.experiences_with_skills(user_id),
            self.cv_repo.user_skills_with_trainings(user_id),
        )?;

        let user_skill_ids: Vec<Uuid> = user_skills.iter().map(|us| us.id).collect();
        let certifications = self
            .cv_repo
            .certifications_for_user_skills(&user_skill_ids)
            .await?;

        let view_model = build_view_model(
            &user,
            &experiences,
            &user_skills,
            &certifications,
            self.locale,
            self.today(),
        );

        tracing::debug!(
            user_id = %user_id,
            experiences = experiences.len(),
            user_skills = user_skills.len(),
            certifications = certifications.len(),
            "assembled CV view model"
        );

        let bytes = self.renderer.render(&view_model).await?;

        Ok(GeneratedCv {
            filename: user.cv_filename(),
            bytes,
        })
    }
}

/// Projects the four raw result sets into the flat payload the renderer
/// expects. Pure and synchronous so it can be exercised without any I/O.
///
/// `experiences` must already be ordered by start date descending; the
/// per-table write-wins rules below are defined against that order.
pub fn build_view_model(
    user: &UserRecord,
    experiences: &[ExperienceRecord],
    user_skills: &[UserSkillRecord],
    certifications: &[CertificationRecord],
    locale: Locale,
    today: NaiveDate,
) -> CvViewModel {
    let role_in_company = experiences
        .first()
        .map(|e| e.job_title.clone())
        .unwrap_or_else(|| locale.not_applicable().to_string());

    let total_experience = total_tenure(experiences, today).render(locale);

    CvViewModel {
        full_name: user.full_name.clone(),
        email: user.email.clone(),
        role_in_company,
        total_experience,
        domain_expertise_rows: domain_expertise_rows(experiences, locale, today),
        technical_expertise_rows: technical_expertise_rows(experiences, locale, today),
        professional_activities_rows: professional_activities_rows(user_skills, certifications),
        employment_history_items: employment_history_items(experiences, locale),
        education_background_rows: Vec::new(),
    }
}

/// One row per distinct (family, skill) pair. When several experiences use
/// the same pair, the last one iterated wins the tenure cell. The
/// technical-expertise table below is first-write-wins instead; the
/// asymmetry is kept on purpose, pending product sign-off.
fn domain_expertise_rows(
    experiences: &[ExperienceRecord],
    locale: Locale,
    today: NaiveDate,
) -> Vec<DomainExpertiseRow> {
    let mut by_domain: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

    for experience in experiences {
        let tenure = Tenure::since(experience.start_date, experience.end_date, today);
        for skill in &experience.skills {
            let Some(family) = &skill.family else {
                // Unclassified skill, contributes nothing to this table.
                continue;
            };
            by_domain
                .entry(family.clone())
                .or_default()
                .insert(skill.name.clone(), tenure.render(locale));
        }
    }

    by_domain
        .into_iter()
        .flat_map(|(domain, skills)| {
            skills
                .into_iter()
                .map(move |(skill, tenure)| DomainExpertiseRow {
                    domain: domain.clone(),
                    skill,
                    tenure,
                })
        })
        .collect()
}

/// Every technical skill seen across the experiences, with the tenure of
/// the first experience (in iteration order) that references it.
fn technical_expertise_rows(
    experiences: &[ExperienceRecord],
    locale: Locale,
    today: NaiveDate,
) -> Vec<TechnicalExpertiseRow> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows = Vec::new();

    for experience in experiences {
        let tenure = Tenure::since(experience.start_date, experience.end_date, today);
        for skill in &experience.skills {
            if skill.kind != SkillKind::Technical {
                continue;
            }
            if seen.insert(skill.name.as_str()) {
                rows.push(TechnicalExpertiseRow {
                    skill: skill.name.clone(),
                    tenure: tenure.render(locale),
                });
            }
        }
    }

    rows
}

/// Certifications, trainings, and synthetic certification rows for
/// user-skills flagged as certified without a structured record behind the
/// flag. Sorted by year descending; rows with no usable year sort last.
fn professional_activities_rows(
    user_skills: &[UserSkillRecord],
    certifications: &[CertificationRecord],
) -> Vec<ProfessionalActivityRow> {
    let known_user_skills: HashSet<Uuid> = user_skills.iter().map(|us| us.id).collect();

    let mut entries: Vec<(i32, ActivityKind, String, Option<i32>)> = Vec::new();

    for cert in certifications {
        // A certification whose user-skill vanished between reads is a torn
        // snapshot; skip it rather than fail.
        if !known_user_skills.contains(&cert.user_skill_id) {
            tracing::debug!(name = %cert.name, "dropping certification with unknown user-skill");
            continue;
        }
        let year = cert.obtained_date.map(|d| d.year());
        entries.push((
            year.unwrap_or(0),
            ActivityKind::Certification,
            cert.name.clone(),
            year,
        ));
    }

    for user_skill in user_skills {
        for training in &user_skill.trainings {
            let year = training.date.map(|d| d.year());
            entries.push((
                year.unwrap_or(0),
                ActivityKind::Training,
                training.name.clone(),
                year,
            ));
        }

        let has_structured_cert = certifications
            .iter()
            .any(|c| c.user_skill_id == user_skill.id);
        if user_skill.has_certification && !has_structured_cert {
            // The flag is trusted even without a backing record; the skill
            // name stands in for the certification name.
            entries.push((
                0,
                ActivityKind::Certification,
                user_skill.skill.name.clone(),
                None,
            ));
        }
    }

    entries.sort_by(|a, b| b.0.cmp(&a.0));

    entries
        .into_iter()
        .map(|(_, kind, name, year)| ProfessionalActivityRow {
            kind,
            name,
            year: year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "N/A".to_string()),
        })
        .collect()
}

fn employment_history_items(
    experiences: &[ExperienceRecord],
    locale: Locale,
) -> Vec<EmploymentHistoryItem> {
    experiences
        .iter()
        .map(|experience| EmploymentHistoryItem {
            company: experience.company.clone(),
            job_title: experience.job_title.clone(),
            start_date: experience.start_date.format(CV_DATE_FORMAT).to_string(),
            end_date: experience
                .end_date
                .map(|d| d.format(CV_DATE_FORMAT).to_string())
                .unwrap_or_else(|| locale.ongoing().to_string()),
            responsibilities: split_responsibilities(&experience.description),
        })
        .collect()
}

/// One bullet per non-empty line, with any leading "- " marker stripped.
fn split_responsibilities(description: &str) -> Vec<String> {
    description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.strip_prefix("- ").unwrap_or(line).to_string())
        .collect()
}
