use std::cmp::min;
use std::time::Instant;

use imgref::ImgVec;
use rand::prelude::SliceRandom;
use rand::thread_rng;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};

use crate::common::progress::{Block, ProgressHandler};
use crate::common::scene::{BLACK, Color, World};
use crate::cpu::camera::Camera;
use crate::cpu::renderer::DEFAULT_DEPTH;

#[derive(Debug, Copy, Clone)]
pub struct RenderSettings {
    /// Reflection and refraction bounces followed for each primary ray
    pub max_depth: u32,
    /// Side length of the square blocks handed to worker threads
    pub block_size: u32,
    pub threads: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            max_depth: DEFAULT_DEPTH,
            block_size: 16,
            threads: num_cpus::get(),
        }
    }
}

/// Renders on a thread pool, one block of pixels at a time.
///
/// The output is identical to [Camera::render] with the same depth.
pub struct CpuRenderer<P: ProgressHandler> {
    pub settings: RenderSettings,
    pub progress_handler: P,
}

fn split_into_blocks(width: u32, height: u32, block_size: u32) -> Vec<Block> {
    let mut result = Vec::new();
    for x in (0..width).step_by(block_size as usize) {
        for y in (0..height).step_by(block_size as usize) {
            result.push(Block {
                x,
                y,
                width: min(block_size, width - x),
                height: min(block_size, height - y),
            })
        }
    }

    result
}

impl<P: ProgressHandler> CpuRenderer<P> {
    pub fn new(settings: RenderSettings, progress_handler: P) -> Self {
        CpuRenderer { settings, progress_handler }
    }

    pub fn render(self, world: &World, camera: &Camera) -> Result<ImgVec<Color>, ThreadPoolBuildError> {
        let settings = self.settings;
        let width = camera.hsize();
        let height = camera.vsize();

        log::debug!(
            "Rendering {} objects at {}x{} on {} threads, max depth {}",
            world.objects.len(), width, height, settings.threads, settings.max_depth
        );
        let start = Instant::now();

        let pool = ThreadPoolBuilder::new()
            .num_threads(settings.threads)
            .thread_name(|index| format!("render-{}", index))
            .build()?;

        let mut progress_handler = self.progress_handler.init(width, height);

        // channel to send results back to this thread
        let (sender, receiver) =
            crossbeam::channel::unbounded::<(Block, Vec<Color>)>();

        // start the collector thread responsible for assembling the final output and reporting progress
        let builder = std::thread::Builder::new().name("collector".to_owned());
        let collector_handle = builder.spawn(move || {
            let target_buf = vec![BLACK; (width as usize) * (height as usize)];
            let mut target = ImgVec::new(target_buf, width as usize, height as usize);

            for (block, pixels) in receiver {
                for dy in 0..block.height {
                    for dx in 0..block.width {
                        target[(block.x + dx, block.y + dy)] = pixels[(dy * block.width + dx) as usize];
                    }
                }

                P::update(&mut progress_handler, block, &pixels);
            }

            target
        }).expect("Failed to spawn collector thread");

        let mut blocks = split_into_blocks(width, height, settings.block_size.max(1));
        blocks.shuffle(&mut thread_rng());
        log::debug!("Split into {} blocks", blocks.len());

        // render everything on the thread pool, send data to the channel
        pool.install(|| {
            blocks.par_iter().panic_fuse().for_each(|block: &Block| {
                let mut data = Vec::with_capacity(block.pixel_count() as usize);
                for y in block.y_range() {
                    for x in block.x_range() {
                        let ray = camera.ray_for_pixel(x, y);
                        data.push(world.color_at(ray, settings.max_depth));
                    }
                }

                sender.send((*block, data)).expect("Failed to send block result over channel");
            });
        });

        drop(sender);

        let result = collector_handle.join()
            .expect("Joining collector thread failed");

        log::info!("Render took {:.03}s", start.elapsed().as_secs_f64());
        Ok(result)
    }
}
