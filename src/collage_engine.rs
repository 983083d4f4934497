//! The collage layout engine.
//!
//! `arrange` classifies photos by orientation, sorts them by aspect ratio,
//! picks a slot template from the catalog (or the grid fallback), cover-fits
//! each photo into its slot and composites the results onto a fixed-size
//! canvas. Unreadable photos are filtered out and the arrangement retried
//! once; the engine either returns a fully composed canvas or an error, never
//! a partial result.

use image::imageops;
use image::{ImageBuffer, Rgba, RgbaImage};
use log::{info, warn};
use std::path::PathBuf;
use thiserror::Error;

use crate::cover_fit::crop_and_resize;
use crate::layout_catalog::{slots_for, Frame, Slot};
use crate::photo::{self, Photo, PhotoError};

#[derive(Error, Debug)]
pub enum CollageError {
    #[error("No valid photos left after filtering unreadable files")]
    NoValidPhotos,
    #[error("Arrangement failed again after filtering, last offending photo: {path}")]
    RetryExhausted {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Creates the background-filled output canvas.
fn blank_canvas(width: u32, height: u32, background: [u8; 3]) -> RgbaImage {
    let [r, g, b] = background;
    ImageBuffer::from_pixel(width, height, Rgba([r, g, b, 255]))
}

/// Arranges `photos` onto a `width` x `height` canvas.
///
/// An empty input returns the background-filled canvas unchanged. Otherwise
/// every photo (or its readable survivors) appears exactly once, fully
/// covering its assigned slot. The output is deterministic: identical inputs
/// yield byte-identical canvases, and the input order is irrelevant because
/// photos are re-sorted by aspect ratio before slot assignment.
pub fn arrange(
    photos: &[Photo],
    width: u32,
    height: u32,
    spacing: u32,
    background: [u8; 3],
) -> Result<RgbaImage, CollageError> {
    if photos.is_empty() {
        info!("Nothing to arrange, returning background canvas");
        return Ok(blank_canvas(width, height, background));
    }

    let frame = Frame {
        width,
        height,
        spacing,
    };

    match try_arrange(photos, frame, background) {
        Ok(canvas) => Ok(canvas),
        Err(first_failure) => {
            warn!(
                "Arrangement failed ({}), filtering unreadable photos and retrying",
                first_failure
            );
            let survivors = filter_unreadable(photos);
            if survivors.is_empty() {
                return Err(CollageError::NoValidPhotos);
            }
            try_arrange(&survivors, frame, background).map_err(|e| match e {
                PhotoError::Unreadable { path, source } => {
                    CollageError::RetryExhausted { path, source }
                }
            })
        }
    }
}

/// Single arrangement attempt: sort, classify, select slots, composite.
fn try_arrange(
    photos: &[Photo],
    frame: Frame,
    background: [u8; 3],
) -> Result<RgbaImage, PhotoError> {
    let mut sorted: Vec<Photo> = photos.to_vec();
    photo::sort_by_aspect_ratio(&mut sorted)?;
    let portraits = photo::portrait_count(&sorted)?;

    let slots = slots_for(sorted.len(), portraits, frame);
    debug_assert_eq!(slots.len(), sorted.len());

    let mut canvas = blank_canvas(frame.width, frame.height, background);
    for (slot, photo) in slots.iter().zip(sorted.iter()) {
        paste_into_slot(&mut canvas, slot, photo)?;
    }
    Ok(canvas)
}

/// Cover-fits one photo and pastes it at its slot offset.
fn paste_into_slot(canvas: &mut RgbaImage, slot: &Slot, photo: &Photo) -> Result<(), PhotoError> {
    let decoded = photo.decode()?;
    let fitted = crop_and_resize(&decoded, slot.width, slot.height);
    imageops::overlay(canvas, &fitted.to_rgba8(), slot.x as i64, slot.y as i64);
    Ok(())
}

/// Probes every photo with a full decode and keeps the readable ones.
fn filter_unreadable(photos: &[Photo]) -> Vec<Photo> {
    photos
        .iter()
        .filter(|photo| match photo.probe() {
            Ok(()) => true,
            Err(e) => {
                warn!("Invalid photo skipped: {}", e);
                false
            }
        })
        .cloned()
        .collect()
}
