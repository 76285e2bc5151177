use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub const FALLBACK_CV_FILENAME: &str = "Generated_CV.docx";

pub const CV_DATE_FORMAT: &str = "%d/%m/%Y";
