use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

use crate::metadata_extractor;
use crate::photo::Photo;

/// A photo paired with its extracted capture date.
#[derive(Debug, Clone)]
pub struct DatedPhoto {
    pub photo: Photo,
    pub taken_at: Option<NaiveDateTime>,
}

impl DatedPhoto {
    pub fn from_photo(photo: Photo) -> Self {
        let taken_at = metadata_extractor::taken_at(photo.path());
        DatedPhoto { photo, taken_at }
    }
}

/// Sorts photos chronologically; photos without a date go last, keeping
/// their scan order.
pub fn sort_by_date(photos: &mut [DatedPhoto]) {
    photos.sort_by_key(|p| (p.taken_at.is_none(), p.taken_at));
}

/// Splits date-sorted photos into `groups` near-equal chronological groups.
/// When the count does not divide evenly, the leading groups take one photo
/// more. A zero group count yields no groups.
pub fn distribute_equally(mut photos: Vec<DatedPhoto>, groups: usize) -> Vec<Vec<DatedPhoto>> {
    if groups == 0 {
        return Vec::new();
    }
    sort_by_date(&mut photos);

    let base = photos.len() / groups;
    let extra = photos.len() % groups;

    let mut result = Vec::with_capacity(groups);
    let mut iter = photos.into_iter();
    for i in 0..groups {
        let size = base + usize::from(i < extra);
        result.push(iter.by_ref().take(size).collect());
    }
    debug!(
        "Distributed photos into {} groups of sizes {:?}",
        groups,
        result.iter().map(Vec::len).collect::<Vec<_>>()
    );
    result
}

/// Groups photos by the calendar week they fall in, relative to
/// `start_date`. Photos taken before the start (or without any date) land in
/// the first week. Returns one entry per week index up to the latest photo.
pub fn distribute_by_week(
    mut photos: Vec<DatedPhoto>,
    start_date: NaiveDate,
) -> Vec<Vec<DatedPhoto>> {
    sort_by_date(&mut photos);

    let mut weeks: Vec<Vec<DatedPhoto>> = Vec::new();
    for photo in photos {
        let index = match photo.taken_at {
            Some(taken) => {
                let days = (taken.date() - start_date).num_days();
                if days < 0 {
                    0
                } else {
                    (days / 7) as usize
                }
            }
            None => 0,
        };
        if weeks.len() <= index {
            weeks.resize_with(index + 1, Vec::new);
        }
        weeks[index].push(photo);
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn dated(name: &str, date: Option<(i32, u32, u32)>) -> DatedPhoto {
        DatedPhoto {
            photo: Photo::new(PathBuf::from(name)),
            taken_at: date.map(|(y, m, d)| {
                NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap()
            }),
        }
    }

    fn sample(count: usize) -> Vec<DatedPhoto> {
        (0..count)
            .map(|i| {
                dated(
                    &format!("p{}.jpg", i),
                    Some((2024, 1 + (i / 28) as u32, 1 + (i % 28) as u32)),
                )
            })
            .collect()
    }

    #[test]
    fn test_distribute_equally_exact() {
        let groups = distribute_equally(sample(30), 6);
        assert_eq!(groups.len(), 6);
        for group in &groups {
            assert_eq!(group.len(), 5);
        }
    }

    #[test]
    fn test_distribute_equally_remainder_goes_first() {
        let groups = distribute_equally(sample(30), 4);
        let sizes: Vec<_> = groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![8, 8, 7, 7]);
    }

    #[test]
    fn test_distribute_equally_more_groups_than_photos() {
        let groups = distribute_equally(sample(2), 5);
        let sizes: Vec<_> = groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_distribute_equally_is_chronological() {
        let photos = vec![
            dated("late.jpg", Some((2024, 3, 1))),
            dated("early.jpg", Some((2024, 1, 1))),
            dated("undated.jpg", None),
            dated("middle.jpg", Some((2024, 2, 1))),
        ];
        let groups = distribute_equally(photos, 2);
        let first: Vec<_> = groups[0]
            .iter()
            .map(|p| p.photo.path().to_str().unwrap().to_string())
            .collect();
        assert_eq!(first, vec!["early.jpg", "middle.jpg"]);
        // undated photos sort last
        assert_eq!(groups[1][1].photo.path().to_str().unwrap(), "undated.jpg");
    }

    #[test]
    fn test_distribute_equally_zero_groups_is_empty() {
        let groups = distribute_equally(sample(3), 0);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_distribute_by_week() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let photos = vec![
            dated("w0a.jpg", Some((2024, 1, 1))),
            dated("w0b.jpg", Some((2024, 1, 7))),
            dated("w1.jpg", Some((2024, 1, 8))),
            dated("w3.jpg", Some((2024, 1, 24))),
            dated("before.jpg", Some((2023, 12, 20))),
        ];
        let weeks = distribute_by_week(photos, start);
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0].len(), 3); // two in week 0 plus the early photo
        assert_eq!(weeks[1].len(), 1);
        assert_eq!(weeks[2].len(), 0);
        assert_eq!(weeks[3].len(), 1);
    }
}
