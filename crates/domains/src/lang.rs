//! # Bilingual values
//!
//! Every public-facing text field on Hromada entities exists in Ukrainian and
//! English. Display-time resolution is a pure field selection: no fallback to
//! the other language, no merging.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The active display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Uk,
    En,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Uk => "uk",
            Lang::En => "en",
        }
    }
}

impl std::str::FromStr for Lang {
    type Err = crate::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "uk" => Ok(Lang::Uk),
            "en" => Ok(Lang::En),
            other => Err(crate::DomainError::Validation(format!(
                "unknown language: {other}"
            ))),
        }
    }
}

/// A parallel uk/en pair for one semantic value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bilingual {
    pub uk: String,
    pub en: String,
}

impl Bilingual {
    pub fn new(uk: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            uk: uk.into(),
            en: en.into(),
        }
    }

    /// Pure selection. Calling this twice with the same language yields the
    /// same value; there is no side effect and no cross-language fallback.
    pub fn pick(&self, lang: Lang) -> &str {
        match lang {
            Lang::Uk => &self.uk,
            Lang::En => &self.en,
        }
    }

    /// True when both sides are empty, used by validation.
    pub fn is_empty(&self) -> bool {
        self.uk.trim().is_empty() && self.en.trim().is_empty()
    }
}

const MONTHS_UK: [&str; 12] = [
    "січня",
    "лютого",
    "березня",
    "квітня",
    "травня",
    "червня",
    "липня",
    "серпня",
    "вересня",
    "жовтня",
    "листопада",
    "грудня",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Locale-aware date rendering: "21 серпня 2026" / "August 21, 2026".
pub fn format_date(date: NaiveDate, lang: Lang) -> String {
    let month = (date.month0()) as usize;
    match lang {
        Lang::Uk => format!("{} {} {}", date.day(), MONTHS_UK[month], date.year()),
        Lang::En => format!("{} {}, {}", MONTHS_EN[month], date.day(), date.year()),
    }
}

/// Timestamp rendering used by the forum and chat views.
pub fn format_datetime(ts: DateTime<Utc>, lang: Lang) -> String {
    format!("{}, {}", format_date(ts.date_naive(), lang), ts.format("%H:%M"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_is_pure_and_idempotent() {
        let title = Bilingual::new("Громада", "Community");
        assert_eq!(title.pick(Lang::Uk), "Громада");
        assert_eq!(title.pick(Lang::En), "Community");
        // Re-selecting the same language changes nothing.
        assert_eq!(title.pick(Lang::En), title.pick(Lang::En));
    }

    #[test]
    fn no_fallback_for_empty_side() {
        let title = Bilingual::new("Лише українською", "");
        assert_eq!(title.pick(Lang::En), "");
    }

    #[test]
    fn date_formatting_per_locale() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 21).unwrap();
        assert_eq!(format_date(date, Lang::Uk), "21 серпня 2026");
        assert_eq!(format_date(date, Lang::En), "August 21, 2026");
    }

    #[test]
    fn lang_parses_from_str() {
        assert_eq!("uk".parse::<Lang>().unwrap(), Lang::Uk);
        assert_eq!("en".parse::<Lang>().unwrap(), Lang::En);
        assert!("de".parse::<Lang>().is_err());
    }
}
