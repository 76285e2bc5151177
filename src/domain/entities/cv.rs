use serde::{Deserialize, Serialize};

/// Flat, renderer-ready projection of one user's profile data. Built fresh
/// for every generation request and discarded once the response is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvViewModel {
    pub full_name: String,
    pub email: String,
    pub role_in_company: String,
    pub total_experience: String,
    pub domain_expertise_rows: Vec<DomainExpertiseRow>,
    pub technical_expertise_rows: Vec<TechnicalExpertiseRow>,
    pub professional_activities_rows: Vec<ProfessionalActivityRow>,
    pub employment_history_items: Vec<EmploymentHistoryItem>,
    pub education_background_rows: Vec<EducationBackgroundRow>,
}

/// One row per distinct (family, skill) pair seen across the experiences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainExpertiseRow {
    pub domain: String,
    pub skill: String,
    pub tenure: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalExpertiseRow {
    pub skill: String,
    pub tenure: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Certification,
    Training,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalActivityRow {
    pub kind: ActivityKind,
    pub name: String,
    /// Four-digit year, or "N/A" when the source date is missing.
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmploymentHistoryItem {
    pub company: String,
    pub job_title: String,
    /// dd/mm/yyyy
    pub start_date: String,
    /// dd/mm/yyyy, or "Présent" for an ongoing position.
    pub end_date: String,
    pub responsibilities: Vec<String>,
}

/// No backing data source yet; emitted empty so templates keep a stable shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationBackgroundRow {
    pub institution: String,
    pub degree: String,
    pub year: String,
}
