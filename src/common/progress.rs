use std::ops::Range;
use std::time::{Duration, Instant};

use crate::common::scene::Color;

/// A rectangular range of pixels rendered as one unit of work.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Block {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Block {
    pub fn x_range(self) -> Range<u32> {
        self.x..(self.x + self.width)
    }

    pub fn y_range(self) -> Range<u32> {
        self.y..(self.y + self.height)
    }

    pub fn pixel_count(self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }
}

/// Receives every finished block, on a single thread and in completion order.
pub trait ProgressHandler: Send {
    type State: Send + 'static;
    fn init(self, width: u32, height: u32) -> Self::State;
    fn update(state: &mut Self::State, block: Block, pixels: &[Color]);
}

pub struct NoProgress;

impl ProgressHandler for NoProgress {
    type State = ();
    fn init(self, _: u32, _: u32) {}
    fn update(_: &mut Self::State, _: Block, _: &[Color]) {}
}

/// Logs the fraction of finished pixels and an estimate of the remaining time,
/// at most once per percent.
pub struct LogProgress;

pub struct LogProgressState {
    total_pixels: u64,
    finished_pixels: u64,
    prev_logged: f64,
    prev_time: Instant,
}

impl ProgressHandler for LogProgress {
    type State = LogProgressState;

    fn init(self, width: u32, height: u32) -> Self::State {
        log::info!("Progress {:.03}", 0.0);

        LogProgressState {
            total_pixels: (width as u64) * (height as u64),
            finished_pixels: 0,
            prev_logged: 0.0,
            prev_time: Instant::now(),
        }
    }

    fn update(state: &mut Self::State, block: Block, _: &[Color]) {
        state.finished_pixels += block.pixel_count();
        let progress = (state.finished_pixels as f64) / (state.total_pixels as f64);
        let delta = progress - state.prev_logged;

        if delta >= 0.01 || state.finished_pixels == state.total_pixels {
            let now = Instant::now();
            let elapsed = now - state.prev_time;
            let eta = if delta > 0.0 {
                Duration::try_from_secs_f64(elapsed.as_secs_f64() * (1.0 - progress) / delta).ok()
            } else {
                None
            };

            log::info!("Progress {:.03}, eta {:.01?}", progress, eta);

            state.prev_logged = progress;
            state.prev_time = now;
        }
    }
}
