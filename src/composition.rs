//! Page orchestration: builds full composition pages (collage area,
//! optional description band, calendarium or title strip), groups photos
//! into pages and writes the finished JPEGs.

use chrono::{Duration, NaiveDate};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, ImageBuffer, Rgba, RgbaImage};
use log::{info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calendar_renderer::CalendarRenderer;
use crate::collage_engine::{self, CollageError};
use crate::config::{Config, GroupingMode};
use crate::description_renderer::DescriptionRenderer;
use crate::file_scanner;
use crate::holidays::{HolidayError, HolidayTable};
use crate::image_distributor::{self, DatedPhoto};
use crate::photo::Photo;
use crate::text_renderer::{TextError, TextRenderer};

#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Text(#[from] TextError),
    #[error(transparent)]
    Holidays(#[from] HolidayError),
    #[error(transparent)]
    Collage(#[from] CollageError),
}

/// One page to be generated: its photos, the week it covers and where the
/// result goes.
struct PageJob {
    photos: Vec<Photo>,
    week_start: NaiveDate,
    description: String,
    title: Option<String>,
    output_path: PathBuf,
}

pub struct CompositionDesigner {
    config: Config,
    text: TextRenderer,
    holidays: HolidayTable,
}

impl CompositionDesigner {
    pub fn new(config: Config) -> Result<Self, CompositionError> {
        let text = TextRenderer::from_file(Path::new(&config.font_path))?;
        let holidays = match &config.holidays_path {
            Some(path) => HolidayTable::from_file(Path::new(path))?,
            None => HolidayTable::default(),
        };
        Ok(CompositionDesigner {
            config,
            text,
            holidays,
        })
    }

    /// Generates all pages according to the configured grouping mode.
    /// Returns the number of pages written.
    pub fn run(&self) -> Result<usize, CompositionError> {
        std::fs::create_dir_all(&self.config.output_path)?;

        let jobs = plan_jobs(&self.config);

        if jobs.is_empty() {
            warn!("No photos found in {}", self.config.photo_path);
            return Ok(0);
        }

        // Pages are independent of each other, each owns its canvas
        jobs.par_iter()
            .map(|job| self.generate_page(job))
            .collect::<Result<Vec<()>, CompositionError>>()?;

        info!("Generated {} composition pages", jobs.len());
        Ok(jobs.len())
    }

    fn generate_page(&self, job: &PageJob) -> Result<(), CompositionError> {
        let cfg = &self.config;
        let [r, g, b] = cfg.background_color;
        let mut page: RgbaImage =
            ImageBuffer::from_pixel(cfg.width, cfg.height, Rgba([r, g, b, 255]));

        let calendar = CalendarRenderer::new(cfg, &self.text, &self.holidays);
        let mut bottom = cfg.height;

        if let Some(title) = &job.title {
            let strip = calendar.render_title(title, cfg.width, cfg.calendar_height);
            bottom = bottom.saturating_sub(cfg.calendar_height);
            imageops::overlay(&mut page, &strip, 0, bottom as i64);
        } else if cfg.use_calendar {
            let strip = calendar.render_week(job.week_start, cfg.width, cfg.calendar_height);
            bottom = bottom.saturating_sub(cfg.calendar_height);
            imageops::overlay(&mut page, &strip, 0, bottom as i64);
        }

        if cfg.use_descriptions && !job.description.is_empty() {
            let renderer = DescriptionRenderer::new(cfg, &self.text);
            let strip = renderer.render(&job.description, cfg.width);
            bottom = bottom.saturating_sub(renderer.height());
            imageops::overlay(&mut page, &strip, 0, bottom as i64);
        }

        let collage =
            collage_engine::arrange(&job.photos, cfg.width, bottom, cfg.spacing, cfg.background_color)?;
        imageops::overlay(&mut page, &collage, 0, 0);

        save_jpeg(&page, &job.output_path, cfg.jpg_quality)?;
        info!(
            "Composition saved: {} ({} photos)",
            job.output_path.display(),
            job.photos.len()
        );
        Ok(())
    }
}

/// Builds the page jobs for the configured grouping mode.
fn plan_jobs(config: &Config) -> Vec<PageJob> {
    match config.grouping {
        GroupingMode::Subfolders => subfolder_jobs(config),
        GroupingMode::Equal => flat_jobs(config, false),
        GroupingMode::Weekly => flat_jobs(config, true),
    }
}

/// One page per sorted subfolder of the photo directory. A `.txt` file
/// inside a folder overrides the per-week line of a `.txt` file next to
/// the folders.
fn subfolder_jobs(config: &Config) -> Vec<PageJob> {
    let root = PathBuf::from(&config.photo_path);
    let week_descriptions = read_description_lines(&root);

    let mut jobs = Vec::new();
    for (index, folder) in file_scanner::week_folders(&root).iter().enumerate() {
        let photos = file_scanner::folder_images(folder);
        if photos.is_empty() {
            info!("No images found in {}, skipping", folder.display());
            continue;
        }

        let folder_description = read_description_lines(folder).into_iter().next();
        let description = folder_description
            .or_else(|| week_descriptions.get(index).cloned())
            .unwrap_or_default();

        let folder_name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("week{}", index + 1));

        push_paged(
            config,
            &mut jobs,
            photos,
            shifted_week_start(config, index),
            description,
            &folder_name,
        );
    }
    jobs
}

/// Flat directory: scan everything, order by capture date and split into
/// pages, either near-equally or by calendar week.
fn flat_jobs(config: &Config, weekly: bool) -> Vec<PageJob> {
    let root = PathBuf::from(&config.photo_path);
    let dated: Vec<DatedPhoto> = file_scanner::scan(&root)
        .into_iter()
        .map(DatedPhoto::from_photo)
        .collect();
    if dated.is_empty() {
        return Vec::new();
    }

    let groups = if weekly {
        image_distributor::distribute_by_week(dated, config.start_date)
    } else {
        image_distributor::distribute_equally(dated, config.page_count)
    };

    let mut jobs = Vec::new();
    for (index, group) in groups.into_iter().enumerate() {
        if group.is_empty() {
            continue;
        }
        let photos: Vec<Photo> = group.into_iter().map(|d| d.photo).collect();
        // Weekly groups are already bound to their calendar week by the
        // distributor, so the title shift must not move their labels.
        let week_start = if weekly {
            config.start_date + Duration::weeks(index as i64)
        } else {
            shifted_week_start(config, index)
        };
        let name = week_start.format("%Y-%m-%d").to_string();
        push_paged(config, &mut jobs, photos, week_start, String::new(), &name);
    }
    jobs
}

/// Splits an oversized photo set into `_part_N` pages and attaches the
/// title strip to the very first page when one is configured.
fn push_paged(
    config: &Config,
    jobs: &mut Vec<PageJob>,
    photos: Vec<Photo>,
    week_start: NaiveDate,
    description: String,
    name: &str,
) {
    let chunks: Vec<&[Photo]> = photos.chunks(config.max_photos_per_page.max(1)).collect();
    let multi_part = chunks.len() > 1;

    for (part, chunk) in chunks.iter().enumerate() {
        let file_name = if multi_part {
            format!("collage_{}_part_{}.jpg", name, part + 1)
        } else {
            format!("collage_{}.jpg", name)
        };
        let title = if jobs.is_empty() && part == 0 {
            config.composition_title.clone()
        } else {
            None
        };
        jobs.push(PageJob {
            photos: chunk.to_vec(),
            week_start,
            description: description.clone(),
            title,
            output_path: Path::new(&config.output_path).join(file_name),
        });
    }
}

/// With a title strip on the first page, the calendar weeks start one page
/// later.
fn shifted_week_start(config: &Config, index: usize) -> NaiveDate {
    let offset = if config.composition_title.is_some() {
        index as i64 - 1
    } else {
        index as i64
    };
    config.start_date + Duration::weeks(offset)
}

fn save_jpeg(page: &RgbaImage, path: &Path, quality: u8) -> Result<(), CompositionError> {
    let rgb = DynamicImage::ImageRgba8(page.clone()).to_rgb8();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    rgb.write_with_encoder(encoder)?;
    Ok(())
}

/// Reads the first `.txt` file in `dir` and returns its non-empty lines with
/// any `label:` prefix stripped.
fn read_description_lines(dir: &Path) -> Vec<String> {
    let mut text_files: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .map(|e| e.eq_ignore_ascii_case("txt"))
                        .unwrap_or(false)
            })
            .collect(),
        Err(_) => return Vec::new(),
    };
    text_files.sort();

    let Some(file) = text_files.first() else {
        return Vec::new();
    };
    match std::fs::read_to_string(file) {
        Ok(content) => content
            .lines()
            .map(strip_label)
            .filter(|line| !line.is_empty())
            .collect(),
        Err(e) => {
            warn!("Cannot read description file {}: {}", file.display(), e);
            Vec::new()
        }
    }
}

/// Removes everything up to and including the first colon.
fn strip_label(line: &str) -> String {
    match line.split_once(':') {
        Some((_, rest)) => rest.trim().to_string(),
        None => line.trim().to_string(),
    }
}
