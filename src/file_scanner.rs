use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::photo::Photo;

const SUPPORTED_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "tiff", "tif", "bmp", "webp"];

/// Recursively collects all supported image files below `root`, sorted by
/// path so repeated runs see the same order.
pub fn scan(root: &Path) -> Vec<Photo> {
    let mut paths = Vec::new();

    if !root.exists() {
        warn!("Photo directory does not exist: {}", root.display());
        return Vec::new();
    }

    info!("Scanning directory: {}", root.display());
    walk_directory(root, &mut paths);
    paths.sort();

    info!("Found {} photos", paths.len());
    paths.into_iter().map(Photo::new).collect()
}

/// Lists the immediate subdirectories of `root`, sorted by name. Each one is
/// treated as one week of photos in subfolder mode.
pub fn week_folders(root: &Path) -> Vec<PathBuf> {
    let mut folders: Vec<PathBuf> = match fs::read_dir(root) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect(),
        Err(e) => {
            warn!("Cannot read directory {}: {}", root.display(), e);
            Vec::new()
        }
    };
    folders.sort();
    folders
}

/// Collects supported image files directly inside `dir` (non-recursive),
/// sorted by name.
pub fn folder_images(dir: &Path) -> Vec<Photo> {
    let mut paths: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_supported_file(p))
            .collect(),
        Err(e) => {
            warn!("Cannot read directory {}: {}", dir.display(), e);
            Vec::new()
        }
    };
    paths.sort();
    paths.into_iter().map(Photo::new).collect()
}

fn walk_directory(dir: &Path, paths: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() {
                walk_directory(&path, paths);
            } else if path.is_file() && is_supported_file(&path) {
                paths.push(path);
            }
        }
    }
}

fn is_supported_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
