use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use exif::{In, Reader, Tag};
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Extracts the capture date of a photo.
///
/// Preference order: EXIF (DateTimeOriginal, then DateTimeDigitized, then
/// DateTime), a date embedded in the file name, and finally the file
/// modification time.
pub fn taken_at(path: &Path) -> Option<NaiveDateTime> {
    if let Some(datetime) = exif_date(path) {
        return Some(datetime);
    }

    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        if let Some(datetime) = parse_filename_date(name) {
            debug!("Using filename date for {}: {}", path.display(), datetime);
            return Some(datetime);
        }
    }

    // Prefer modification time over creation time: on Linux the creation
    // time shows when the file reached this filesystem, not when the photo
    // was taken
    std::fs::metadata(path)
        .ok()
        .and_then(|m| m.modified().ok())
        .map(|t| DateTime::<Utc>::from(t).naive_utc())
}

fn exif_date(path: &Path) -> Option<NaiveDateTime> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif_reader = match Reader::new().read_from_container(&mut reader) {
        Ok(r) => r,
        Err(e) => {
            debug!("Failed to read EXIF data for {}: {}", path.display(), e);
            return None;
        }
    };

    [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime]
        .iter()
        .filter_map(|tag| exif_reader.get_field(*tag, In::PRIMARY))
        .filter_map(|field| parse_exif_datetime(&field.display_value().to_string()))
        .next()
}

/// Parses EXIF datetime values in their two common spellings.
pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    let cleaned = value.replace('"', "");

    // EXIF format per specification: "2023:01:15 10:30:00"
    if let Ok(datetime) = NaiveDateTime::parse_from_str(&cleaned, "%Y:%m:%d %H:%M:%S") {
        return Some(datetime);
    }
    // ISO 8601, used by software that normalizes dates: "2023-01-15 10:30:00"
    NaiveDateTime::parse_from_str(&cleaned, "%F %T").ok()
}

/// Looks for `YYYYMMDDHHMMSS` or `YYYYMMDD` digit sequences in a file name,
/// with optional `-` or `_` between the components. A date without a time is
/// placed at noon.
pub fn parse_filename_date(name: &str) -> Option<NaiveDateTime> {
    let chars: Vec<char> = name.chars().collect();

    for start in 0..chars.len() {
        if !chars[start].is_ascii_digit() {
            continue;
        }
        let mut digits = String::new();
        let mut i = start;
        while i < chars.len() && digits.len() < 14 {
            let c = chars[i];
            if c.is_ascii_digit() {
                digits.push(c);
                i += 1;
            } else if c == '-' || c == '_' {
                i += 1;
            } else {
                break;
            }
        }

        if digits.len() >= 14 {
            if let Some(datetime) = digits_to_datetime(&digits[..14]) {
                return Some(datetime);
            }
        }
        if digits.len() >= 8 {
            if let Some(date) = digits_to_date(&digits[..8]) {
                return date.and_hms_opt(12, 0, 0);
            }
        }
    }
    None
}

fn digits_to_date(digits: &str) -> Option<NaiveDate> {
    let year: i32 = digits[0..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..8].parse().ok()?;
    if !(1970..=2100).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn digits_to_datetime(digits: &str) -> Option<NaiveDateTime> {
    let date = digits_to_date(&digits[..8])?;
    let hour: u32 = digits[8..10].parse().ok()?;
    let minute: u32 = digits[10..12].parse().ok()?;
    let second: u32 = digits[12..14].parse().ok()?;
    date.and_hms_opt(hour, minute, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exif_datetime() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(parse_exif_datetime("2023:01:15 10:30:00"), Some(expected));
        assert_eq!(parse_exif_datetime("2023-01-15 10:30:00"), Some(expected));
        assert_eq!(parse_exif_datetime("\"2023:01:15 10:30:00\""), Some(expected));
        assert_eq!(parse_exif_datetime("not a date"), None);
    }

    #[test]
    fn test_parse_filename_date_full() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(12, 34, 56)
            .unwrap();
        assert_eq!(parse_filename_date("IMG_20240131_123456.jpg"), Some(expected));
        assert_eq!(parse_filename_date("2024-01-31_12-34-56.jpg"), Some(expected));
    }

    #[test]
    fn test_parse_filename_date_only_defaults_to_noon() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(parse_filename_date("20240131.jpg"), Some(expected));
        assert_eq!(parse_filename_date("vacation_2024-01-31.png"), Some(expected));
    }

    #[test]
    fn test_parse_filename_rejects_noise() {
        assert_eq!(parse_filename_date("DSC1234.jpg"), None);
        assert_eq!(parse_filename_date("99999999.jpg"), None);
        assert_eq!(parse_filename_date("photo.jpg"), None);
    }

    #[test]
    fn test_parse_filename_skips_invalid_prefix() {
        // "12345678" is not a plausible date, but the later sequence is
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(parse_filename_date("12345678_20240601.jpg"), Some(expected));
    }
}
