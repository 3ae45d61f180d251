//! Render progress and cooperative cancellation.
//!
//! The frame driver only bumps an atomic counter after each finished
//! scanline and checks a flag before starting the next one. Whoever owns
//! the terminal polls the counter from another thread.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Shared progress counter and cancellation flag for one frame.
#[derive(Debug)]
pub struct RenderProgress {
    completed: AtomicUsize,
    total: usize,
    cancelled: AtomicBool,
}

impl RenderProgress {
    /// Create a tracker for a frame of `total` scanlines.
    pub fn new(total: usize) -> Self {
        Self {
            completed: AtomicUsize::new(0),
            total,
            cancelled: AtomicBool::new(false),
        }
    }

    /// Scanlines finished so far.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Completed fraction in [0, 1]. An empty frame counts as done.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 1.0;
        }
        (self.completed() as f32 / self.total as f32).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.completed() >= self.total
    }

    /// Record one finished scanline, returning the new count.
    pub fn complete_scanline(&self) -> usize {
        self.completed.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Ask the render to stop before its next scanline.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_progress_counts() {
        let progress = RenderProgress::new(4);
        assert_eq!(progress.fraction(), 0.0);
        assert!(!progress.is_finished());

        assert_eq!(progress.complete_scanline(), 1);
        assert_eq!(progress.complete_scanline(), 2);
        assert_eq!(progress.fraction(), 0.5);

        progress.complete_scanline();
        progress.complete_scanline();
        assert!(progress.is_finished());
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn test_empty_frame_is_done() {
        let progress = RenderProgress::new(0);
        assert!(progress.is_finished());
        assert_eq!(progress.fraction(), 1.0);
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let progress = Arc::new(RenderProgress::new(10));
        let remote = Arc::clone(&progress);

        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(progress.is_cancelled());
    }

    #[test]
    fn test_concurrent_increments() {
        let progress = Arc::new(RenderProgress::new(800));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let p = Arc::clone(&progress);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        p.complete_scanline();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(progress.completed(), 800);
    }
}
