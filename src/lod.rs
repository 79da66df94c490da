//! Frame-rate driven level of detail.
//!
//! Level 0 is the finest geometry and [`MAX_LEVEL`] the coarsest. Each level
//! has separate thresholds for stepping up and stepping down, leaving a gap in
//! which the level holds, so a frame rate hovering around one threshold does
//! not make the level flicker.
//!
//! | level | step up (coarser) when | step down (finer) when |
//! |-------|------------------------|------------------------|
//! | 0     | 0 < fps < 30           | never                  |
//! | 1     | 0 < fps < 30           | fps > 70               |
//! | 2     | fps < 15               | fps > 70               |
//! | 3     | never                  | fps > 140              |

use std::collections::VecDeque;
use std::time::Duration;

use log::info;

/// Coarsest detail level.
pub const MAX_LEVEL: u8 = 3;

/// Number of frames averaged by [`FpsCounter`].
pub const FPS_WINDOW: usize = 10;

/// Picks a detail level from the measured frame rate.
#[derive(Debug, Clone, Default)]
pub struct LodController {
    level: u8,
    fps: f32,
}

impl LodController {
    /// Starts at `level`, clamped to [`MAX_LEVEL`].
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(MAX_LEVEL),
            fps: 0.0,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Frame rate passed to the most recent [`LodController::update`].
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Feeds one frame-rate sample and moves at most one level.
    ///
    /// Returns `true` when the level changed, in which case any geometry
    /// built for the old level is stale.
    pub fn update(&mut self, fps: f32) -> bool {
        self.fps = fps;
        let previous = self.level;

        let too_slow = match self.level {
            2 => fps < 15.0,
            0 | 1 => fps > 0.0 && fps < 30.0,
            _ => false,
        };
        let fast_enough = match self.level {
            0 => false,
            MAX_LEVEL => fps > 140.0,
            _ => fps > 70.0,
        };

        if too_slow {
            self.level += 1;
        } else if fast_enough {
            self.level -= 1;
        }

        if self.level != previous {
            info!("detail level {previous} -> {} at {fps:.1} fps", self.level);
            true
        } else {
            false
        }
    }
}

/// Frames per second over a sliding window of frame durations.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: VecDeque<Duration>,
    total: Duration,
    window: usize,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(FPS_WINDOW)
    }
}

impl FpsCounter {
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            frames: VecDeque::with_capacity(window),
            total: Duration::ZERO,
            window,
        }
    }

    /// Records how long the last frame took.
    pub fn tick(&mut self, frame_time: Duration) {
        if self.frames.len() == self.window {
            if let Some(oldest) = self.frames.pop_front() {
                self.total -= oldest;
            }
        }
        self.frames.push_back(frame_time);
        self.total += frame_time;
    }

    /// Average frame rate over the window, or 0 before any time has passed.
    pub fn fps(&self) -> f32 {
        let seconds = self.total.as_secs_f32();
        if self.frames.is_empty() || seconds <= 0.0 {
            0.0
        } else {
            self.frames.len() as f32 / seconds
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn levels(start: u8, samples: &[f32]) -> Vec<u8> {
        let mut lod = LodController::new(start);
        samples
            .iter()
            .map(|&fps| {
                lod.update(fps);
                lod.level()
            })
            .collect()
    }

    #[test]
    fn slow_frames_step_up_one_level_per_tick() {
        assert_eq!(levels(0, &[10.0, 10.0, 10.0]), vec![1, 2, 3]);
    }

    #[test]
    fn fast_frames_step_down_one_level_per_tick() {
        assert_eq!(levels(3, &[200.0, 200.0, 200.0]), vec![2, 1, 0]);
    }

    #[test]
    fn hovering_around_twenty_does_not_oscillate() {
        let samples = [18.0, 22.0, 19.0, 21.0, 20.0, 18.0, 22.0];
        let trace = levels(1, &samples);
        assert_eq!(trace[0], 2);
        assert!(trace.iter().all(|&level| level == 2));
    }

    #[test]
    fn zero_fps_never_coarsens_fine_levels() {
        assert_eq!(levels(0, &[0.0, 0.0]), vec![0, 0]);
        assert_eq!(levels(1, &[0.0]), vec![1]);
    }

    #[test]
    fn level_three_needs_very_high_fps() {
        assert_eq!(levels(3, &[100.0, 139.0]), vec![3, 3]);
        assert_eq!(levels(3, &[141.0]), vec![2]);
    }

    #[test]
    fn update_reports_change() {
        let mut lod = LodController::default();
        assert!(!lod.update(50.0));
        assert!(lod.update(20.0));
        assert!(!lod.update(50.0));
        assert_relative_eq!(lod.fps(), 50.0);
    }

    #[test]
    fn new_clamps_level() {
        assert_eq!(LodController::new(9).level(), MAX_LEVEL);
    }

    #[test]
    fn fps_counter_averages_window() {
        let mut counter = FpsCounter::new(4);
        assert_eq!(counter.fps(), 0.0);
        for _ in 0..4 {
            counter.tick(Duration::from_millis(20));
        }
        assert_relative_eq!(counter.fps(), 50.0, epsilon = 1e-3);

        for _ in 0..4 {
            counter.tick(Duration::from_millis(10));
        }
        assert_relative_eq!(counter.fps(), 100.0, epsilon = 1e-3);
    }
}
