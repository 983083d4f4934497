use chrono::{Datelike, NaiveDate, Utc};
use std::env;

/// How photos found in a flat directory are split into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingMode {
    /// One page per sorted subfolder of the photo directory.
    Subfolders,
    /// Near-equal groups over a fixed page count.
    Equal,
    /// One page per calendar week relative to the start date.
    Weekly,
}

impl GroupingMode {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "subfolders" => Ok(GroupingMode::Subfolders),
            "equal" => Ok(GroupingMode::Equal),
            "weekly" => Ok(GroupingMode::Weekly),
            other => Err(format!("Unknown grouping mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub photo_path: String,
    pub output_path: String,
    pub font_path: String,
    pub holidays_path: Option<String>,
    pub width: u32,
    pub height: u32,
    pub spacing: u32,
    pub calendar_height: u32,
    pub font_size_large: f32,
    pub font_size_small: f32,
    pub jpg_quality: u8,
    pub background_color: [u8; 3],
    pub text_color: [u8; 3],
    pub secondary_text_color: [u8; 3],
    pub holiday_color: [u8; 3],
    pub start_date: NaiveDate,
    pub composition_title: Option<String>,
    pub use_calendar: bool,
    pub use_descriptions: bool,
    pub grouping: GroupingMode,
    pub page_count: usize,
    pub max_photos_per_page: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let start_date = match env::var("SNAP_COLLAGE_START_DATE") {
            Ok(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")?,
            Err(_) => monday_of_current_week(),
        };

        Ok(Config {
            photo_path: env::var("SNAP_COLLAGE_PHOTO_PATH").unwrap_or_else(|_| "./photos".to_string()),
            output_path: env::var("SNAP_COLLAGE_OUTPUT_PATH")
                .unwrap_or_else(|_| "./collages".to_string()),
            font_path: env::var("SNAP_COLLAGE_FONT_PATH")
                .unwrap_or_else(|_| "./fonts/DejaVuSans.ttf".to_string()),
            holidays_path: env::var("SNAP_COLLAGE_HOLIDAYS_PATH").ok(),
            width: env::var("SNAP_COLLAGE_WIDTH")
                .unwrap_or_else(|_| "1276".to_string())
                .parse()?,
            height: env::var("SNAP_COLLAGE_HEIGHT")
                .unwrap_or_else(|_| "910".to_string())
                .parse()?,
            spacing: env::var("SNAP_COLLAGE_SPACING")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            calendar_height: env::var("SNAP_COLLAGE_CALENDAR_HEIGHT")
                .unwrap_or_else(|_| "110".to_string())
                .parse()?,
            font_size_large: env::var("SNAP_COLLAGE_FONT_SIZE_LARGE")
                .unwrap_or_else(|_| "42".to_string())
                .parse()?,
            font_size_small: env::var("SNAP_COLLAGE_FONT_SIZE_SMALL")
                .unwrap_or_else(|_| "18".to_string())
                .parse()?,
            jpg_quality: env::var("SNAP_COLLAGE_JPG_QUALITY")
                .unwrap_or_else(|_| "90".to_string())
                .parse()?,
            background_color: parse_color(
                &env::var("SNAP_COLLAGE_BACKGROUND_COLOR").unwrap_or_else(|_| "#141414".to_string()),
            )?,
            text_color: parse_color(
                &env::var("SNAP_COLLAGE_TEXT_COLOR").unwrap_or_else(|_| "#ffffff".to_string()),
            )?,
            secondary_text_color: parse_color(
                &env::var("SNAP_COLLAGE_SECONDARY_TEXT_COLOR")
                    .unwrap_or_else(|_| "#969696".to_string()),
            )?,
            holiday_color: parse_color(
                &env::var("SNAP_COLLAGE_HOLIDAY_COLOR").unwrap_or_else(|_| "#ff0000".to_string()),
            )?,
            start_date,
            composition_title: env::var("SNAP_COLLAGE_TITLE").ok().filter(|t| !t.is_empty()),
            use_calendar: env::var("SNAP_COLLAGE_USE_CALENDAR")
                .unwrap_or_else(|_| "true".to_string())
                .parse()?,
            use_descriptions: env::var("SNAP_COLLAGE_USE_DESCRIPTIONS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()?,
            grouping: GroupingMode::parse(
                &env::var("SNAP_COLLAGE_GROUPING").unwrap_or_else(|_| "subfolders".to_string()),
            )?,
            page_count: parse_page_count(
                &env::var("SNAP_COLLAGE_PAGE_COUNT").unwrap_or_else(|_| "12".to_string()),
            )?,
            max_photos_per_page: env::var("SNAP_COLLAGE_MAX_PHOTOS_PER_PAGE")
                .unwrap_or_else(|_| "36".to_string())
                .parse()?,
        })
    }
}

/// Parses `#rrggbb` (leading `#` optional) into an RGB triple.
pub fn parse_color(value: &str) -> Result<[u8; 3], String> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("Invalid color value: {}", value));
    }
    let parse = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|e| e.to_string())
    };
    Ok([parse(0..2)?, parse(2..4)?, parse(4..6)?])
}

/// Parses the page count for equal grouping; zero pages cannot hold photos.
fn parse_page_count(value: &str) -> Result<usize, String> {
    let count: usize = value
        .trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| e.to_string())?;
    if count == 0 {
        return Err("Page count must be at least 1".to_string());
    }
    Ok(count)
}

fn monday_of_current_week() -> NaiveDate {
    let today = Utc::now().date_naive();
    today - chrono::Duration::days(today.weekday().num_days_from_monday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#141414").unwrap(), [20, 20, 20]);
        assert_eq!(parse_color("ffffff").unwrap(), [255, 255, 255]);
        assert_eq!(parse_color("#FF0000").unwrap(), [255, 0, 0]);
        assert!(parse_color("#fff").is_err());
        assert!(parse_color("nothex").is_err());
    }

    #[test]
    fn test_grouping_mode_parse() {
        assert_eq!(
            GroupingMode::parse("subfolders").unwrap(),
            GroupingMode::Subfolders
        );
        assert_eq!(GroupingMode::parse("equal").unwrap(), GroupingMode::Equal);
        assert_eq!(GroupingMode::parse("weekly").unwrap(), GroupingMode::Weekly);
        assert!(GroupingMode::parse("daily").is_err());
    }

    #[test]
    fn test_parse_page_count_rejects_zero() {
        assert_eq!(parse_page_count("12").unwrap(), 12);
        assert_eq!(parse_page_count(" 4 ").unwrap(), 4);
        assert!(parse_page_count("0").is_err());
        assert!(parse_page_count("many").is_err());
    }

    #[test]
    fn test_monday_of_current_week() {
        let monday = monday_of_current_week();
        assert_eq!(monday.weekday(), Weekday::Mon);
    }
}
