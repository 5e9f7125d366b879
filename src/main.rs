use std::path::PathBuf;
use std::time::Instant;

use log::LevelFilter;

use whitted::common::logging::setup_logging;
use whitted::common::progress::LogProgress;
use whitted::cpu::{CpuRenderer, RenderSettings};
use whitted::{demos, images};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging(LevelFilter::Debug)?;

    let output = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "ignored".to_owned()));
    std::fs::create_dir_all(&output)?;

    let world = demos::showcase_world()?;
    let camera = demos::showcase_camera(1920 / 2, 1080 / 2)?;

    let renderer = CpuRenderer::new(RenderSettings::default(), LogProgress);
    let image = renderer.render(&world, &camera)?;

    let start = Instant::now();
    images::save_png(image.as_ref(), output.join("showcase.png"))?;
    images::save_exr(image.as_ref(), output.join("showcase.exr"))?;
    std::fs::write(output.join("showcase.ppm"), images::to_ppm(image.as_ref()))?;
    log::info!("Saving to {:?} took {:?}", output, start.elapsed());

    Ok(())
}
