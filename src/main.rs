use log::info;

use snap_collage::composition::CompositionDesigner;
use snap_collage::config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    info!("Photo path: {}", config.photo_path);
    info!("Output path: {}", config.output_path);
    info!(
        "Page size: {}x{}, spacing {}, start date {}",
        config.width, config.height, config.spacing, config.start_date
    );

    let designer = CompositionDesigner::new(config)?;
    let pages = designer.run()?;
    info!("Done, {} pages written", pages);

    Ok(())
}
