use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::entities::experience::ExperienceRecord;

/// Rendering locale for tenure phrases and date labels, threaded explicitly
/// through the aggregation instead of living in process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Fr,
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Fr
    }
}

impl Locale {
    pub fn not_applicable(&self) -> &'static str {
        "N/A"
    }

    pub fn ongoing(&self) -> &'static str {
        match self {
            Locale::Fr => "Présent",
            Locale::En => "Present",
        }
    }

    fn less_than_a_month(&self) -> &'static str {
        match self {
            Locale::Fr => "Moins d'un mois",
            Locale::En => "Less than a month",
        }
    }

    fn years_phrase(&self, years: u32) -> String {
        match self {
            Locale::Fr if years > 1 => format!("{years} ans"),
            Locale::Fr => format!("{years} an"),
            Locale::En if years > 1 => format!("{years} years"),
            Locale::En => format!("{years} year"),
        }
    }

    fn months_phrase(&self, months: u32) -> String {
        match self {
            Locale::Fr => format!("{months} mois"),
            Locale::En if months > 1 => format!("{months} months"),
            Locale::En => format!("{months} month"),
        }
    }
}

/// Elapsed duration of one or more experiences, in whole years plus
/// remaining months. `NotApplicable` is deliberately distinct from a
/// zero-length span: it means there was nothing to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tenure {
    Span { years: u32, months: u32 },
    NotApplicable,
}

impl Tenure {
    /// Calendar-month difference between two dates, not elapsed days. The
    /// final month only counts once the day-of-month is reached.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Tenure {
        let mut years = end.year() - start.year();
        let mut months = end.month() as i32 - start.month() as i32;
        if end.day() < start.day() {
            months -= 1;
        }
        if months < 0 {
            years -= 1;
            months += 12;
        }
        if years < 0 {
            // Inverted interval, treat as empty.
            return Tenure::Span { years: 0, months: 0 };
        }
        Tenure::Span {
            years: years as u32,
            months: months as u32,
        }
    }

    /// `end = None` means the position is ongoing as of `today`.
    pub fn since(start: NaiveDate, end: Option<NaiveDate>, today: NaiveDate) -> Tenure {
        Tenure::between(start, end.unwrap_or(today))
    }

    pub fn render(&self, locale: Locale) -> String {
        match *self {
            Tenure::NotApplicable => locale.not_applicable().to_string(),
            Tenure::Span { years: 0, months: 0 } => locale.less_than_a_month().to_string(),
            Tenure::Span { years, months } => {
                let mut parts = Vec::with_capacity(2);
                if years > 0 {
                    parts.push(locale.years_phrase(years));
                }
                if months > 0 {
                    parts.push(locale.months_phrase(months));
                }
                parts.join(" ")
            }
        }
    }
}

/// Earliest start and latest effective end across a set of experiences.
/// Overlapping or adjacent stints merge into one continuous interval, so the
/// result never double-counts concurrent positions.
pub fn envelope(
    experiences: &[ExperienceRecord],
    today: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let start = experiences.iter().map(|e| e.start_date).min()?;
    let end = experiences.iter().map(|e| e.effective_end(today)).max()?;
    Some((start, end))
}

pub fn total_tenure(experiences: &[ExperienceRecord], today: NaiveDate) -> Tenure {
    match envelope(experiences, today) {
        Some((start, end)) => Tenure::between(start, end),
        None => Tenure::NotApplicable,
    }
}

/// Tenure across every experience at `company` (case-insensitive exact
/// match), merged into one envelope. `NotApplicable` when the user never
/// worked there.
pub fn company_tenure(
    experiences: &[ExperienceRecord],
    company: &str,
    today: NaiveDate,
) -> Tenure {
    let matching: Vec<&ExperienceRecord> = experiences
        .iter()
        .filter(|e| e.company.eq_ignore_ascii_case(company))
        .collect();

    if matching.is_empty() {
        return Tenure::NotApplicable;
    }

    let start = matching.iter().map(|e| e.start_date).min();
    let end = matching.iter().map(|e| e.effective_end(today)).max();
    match (start, end) {
        (Some(start), Some(end)) => Tenure::between(start, end),
        _ => Tenure::NotApplicable,
    }
}
