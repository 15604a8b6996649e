//! Trailing-window score smoothing.
//!
//! Detector jitter makes per-frame raw scores oscillate. Averaging over a
//! short trailing window steadies the displayed number; a longer window is
//! steadier but slower to follow real changes in form.

use std::collections::VecDeque;

/// Default number of recent raw scores averaged together
pub const DEFAULT_WINDOW: usize = 6;

/// Bounded FIFO of recent raw scores with an integer (floor) average
#[derive(Debug, Clone)]
pub struct ScoreSmoother {
    window_size: usize,
    buffer: VecDeque<u8>,
    sum: u32,
}

impl ScoreSmoother {
    /// Create a smoother over the last `window_size` scores (minimum 1)
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            window_size,
            buffer: VecDeque::with_capacity(window_size + 1),
            sum: 0,
        }
    }

    /// Record a raw score and return the smoothed score
    pub fn push(&mut self, raw_score: u8) -> u8 {
        self.buffer.push_back(raw_score);
        self.sum += raw_score as u32;

        if self.buffer.len() > self.window_size {
            if let Some(evicted) = self.buffer.pop_front() {
                self.sum -= evicted as u32;
            }
        }

        self.current()
    }

    /// Smoothed score of the current buffer, 0 when empty
    pub fn current(&self) -> u8 {
        if self.buffer.is_empty() {
            return 0;
        }
        (self.sum / self.buffer.len() as u32) as u8
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.sum = 0;
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for ScoreSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternating_scores_average_to_half() {
        let mut smoother = ScoreSmoother::new(6);
        let mut last = 0;
        for score in [0, 100, 0, 100, 0, 100] {
            last = smoother.push(score);
        }
        assert_eq!(last, 50);
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut smoother = ScoreSmoother::new(6);
        for score in [0, 100, 100, 100, 100, 100] {
            smoother.push(score);
        }
        assert_eq!(smoother.current(), 83);

        // Pushing a 0 evicts the leading 0, so the sum is unchanged.
        assert_eq!(smoother.push(0), 83);
        assert_eq!(smoother.len(), 6);

        assert_eq!(smoother.push(100), 83);
        assert_eq!(smoother.push(100), 83);
    }

    #[test]
    fn test_seventh_push_drops_first() {
        let mut smoother = ScoreSmoother::new(6);
        for score in [90, 10, 10, 10, 10, 10] {
            smoother.push(score);
        }
        assert_eq!(smoother.current(), 23);
        assert_eq!(smoother.push(10), 10);
    }

    #[test]
    fn test_average_floors() {
        let mut smoother = ScoreSmoother::new(6);
        smoother.push(100);
        smoother.push(33);
        assert_eq!(smoother.current(), 66);
        assert_eq!(smoother.push(0), 44);
    }

    #[test]
    fn test_reset_empties_buffer() {
        let mut smoother = ScoreSmoother::default();
        smoother.push(100);
        smoother.push(100);
        smoother.reset();

        assert!(smoother.is_empty());
        assert_eq!(smoother.current(), 0);
        assert_eq!(smoother.push(40), 40);
    }

    #[test]
    fn test_zero_window_clamped() {
        let mut smoother = ScoreSmoother::new(0);
        assert_eq!(smoother.window_size(), 1);
        smoother.push(100);
        assert_eq!(smoother.push(20), 20);
    }
}
