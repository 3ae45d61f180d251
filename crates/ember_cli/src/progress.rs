//! Terminal progress reporting for a running render.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use ember_renderer::RenderProgress;
use indicatif::{ProgressBar, ProgressStyle};

const TICK: Duration = Duration::from_millis(50);

/// Polls a render's scanline counter from a background thread.
pub struct ProgressReporter {
    done: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl ProgressReporter {
    /// Start drawing a progress bar for `progress`. With a `time_limit`,
    /// the render is cancelled once that much wall time has passed.
    pub fn spawn(
        progress: Arc<RenderProgress>,
        time_limit: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let bar = ProgressBar::new(progress.total() as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} scanlines ({eta})",
            )?
            .progress_chars("#>-"),
        );

        let done = Arc::new(AtomicBool::new(false));
        let thread_done = Arc::clone(&done);
        let start = Instant::now();

        let handle = thread::spawn(move || {
            while !thread_done.load(Ordering::Relaxed) {
                bar.set_position(progress.completed() as u64);

                if let Some(limit) = time_limit {
                    if !progress.is_cancelled() && start.elapsed() >= limit {
                        log::warn!("Time limit of {:.1?} reached, stopping render", limit);
                        progress.cancel();
                    }
                }
                thread::sleep(TICK);
            }

            bar.set_position(progress.completed() as u64);
            if progress.is_finished() {
                bar.finish();
            } else {
                bar.abandon();
            }
        });

        Ok(Self { done, handle })
    }

    /// Stop polling and wait for the bar to draw its final state.
    pub fn finish(self) {
        self.done.store(true, Ordering::Relaxed);
        if self.handle.join().is_err() {
            log::error!("Progress reporter thread panicked");
        }
    }
}
