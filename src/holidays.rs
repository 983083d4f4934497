use chrono::{Datelike, NaiveDate};
use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HolidayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid holiday file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize, Default)]
struct HolidayFile {
    #[serde(default)]
    holidays: HashMap<String, String>,
    #[serde(default)]
    anniversaries: HashMap<String, String>,
}

/// Labels for recurring dates, keyed `"MM-DD"`. Holidays and anniversaries
/// share the table; holidays additionally color the day number.
#[derive(Debug, Default)]
pub struct HolidayTable {
    holidays: HashMap<String, String>,
    anniversaries: HashMap<String, String>,
}

impl HolidayTable {
    /// Loads a JSON file of the form
    /// `{"holidays": {"12-25": "Christmas"}, "anniversaries": {"03-14": "Emma"}}`.
    pub fn from_file(path: &Path) -> Result<Self, HolidayError> {
        let data = std::fs::read_to_string(path)?;
        let file: HolidayFile = serde_json::from_str(&data)?;
        info!(
            "Loaded {} holidays and {} anniversaries from {}",
            file.holidays.len(),
            file.anniversaries.len(),
            path.display()
        );
        Ok(HolidayTable {
            holidays: file.holidays,
            anniversaries: file.anniversaries,
        })
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&key(date))
    }

    /// Label to print beneath a day, holidays taking precedence.
    pub fn label(&self, date: NaiveDate) -> Option<&str> {
        let key = key(date);
        self.holidays
            .get(&key)
            .or_else(|| self.anniversaries.get(&key))
            .map(String::as_str)
    }
}

fn key(date: NaiveDate) -> String {
    format!("{:02}-{:02}", date.month(), date.day())
}
