pub mod calendar_renderer;
pub mod collage_engine;
pub mod composition;
pub mod config;
pub mod cover_fit;
pub mod description_renderer;
pub mod file_scanner;
pub mod holidays;
pub mod image_distributor;
pub mod layout_catalog;
pub mod metadata_extractor;
pub mod photo;
pub mod text_renderer;
