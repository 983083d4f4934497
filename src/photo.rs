use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PhotoError {
    pub fn path(&self) -> &Path {
        match self {
            PhotoError::Unreadable { path, .. } => path,
        }
    }
}

/// Orientation classification based on pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Portrait iff height > width.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// One source image participating in a collage.
///
/// Dimensions are read lazily from the file header and cached; full pixel
/// data is only decoded when a slot needs it.
#[derive(Debug, Clone)]
pub struct Photo {
    path: PathBuf,
    dimensions: OnceLock<(u32, u32)>,
}

impl Photo {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Photo {
            path: path.into(),
            dimensions: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dimensions(&self) -> Result<(u32, u32), PhotoError> {
        if let Some(&dims) = self.dimensions.get() {
            return Ok(dims);
        }
        let dims = image::image_dimensions(&self.path).map_err(|e| PhotoError::Unreadable {
            path: self.path.clone(),
            source: e,
        })?;
        let _ = self.dimensions.set(dims);
        Ok(dims)
    }

    pub fn orientation(&self) -> Result<Orientation, PhotoError> {
        let (width, height) = self.dimensions()?;
        Ok(Orientation::from_dimensions(width, height))
    }

    pub fn aspect_ratio(&self) -> Result<f64, PhotoError> {
        let (width, height) = self.dimensions()?;
        Ok(width as f64 / height as f64)
    }

    /// Decodes the full pixel data.
    pub fn decode(&self) -> Result<DynamicImage, PhotoError> {
        image::open(&self.path).map_err(|e| PhotoError::Unreadable {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Readability probe used by the recovery loop: a header-only check is
    /// not enough, corrupt files often carry an intact header.
    pub fn probe(&self) -> Result<(), PhotoError> {
        self.decode().map(|_| ())
    }
}

/// Re-orders photos ascending by width/height ratio: tallest portrait first,
/// widest landscape last. The sort is stable, so equal ratios keep their
/// input order.
pub fn sort_by_aspect_ratio(photos: &mut [Photo]) -> Result<(), PhotoError> {
    let mut ratios = Vec::with_capacity(photos.len());
    for photo in photos.iter() {
        ratios.push(photo.aspect_ratio()?);
    }
    let mut order: Vec<usize> = (0..photos.len()).collect();
    order.sort_by(|&a, &b| ratios[a].partial_cmp(&ratios[b]).unwrap_or(std::cmp::Ordering::Equal));

    let mut sorted: Vec<Photo> = order.iter().map(|&i| photos[i].clone()).collect();
    photos.swap_with_slice(&mut sorted);
    Ok(())
}

/// Counts the portrait-oriented photos in a collection.
pub fn portrait_count(photos: &[Photo]) -> Result<usize, PhotoError> {
    let mut count = 0;
    for photo in photos {
        if photo.orientation()? == Orientation::Portrait {
            count += 1;
        }
    }
    Ok(count)
}
