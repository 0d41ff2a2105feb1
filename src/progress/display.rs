//! Progress bar display management and coordination.
//!
//! [`ProgressDisplay`] turns the byte counters emitted by the
//! [`RangedDownloader`](crate::download::RangedDownloader) into bars: a main
//! bar counting finished files and one child bar per running transfer.
//!
//! ```rust
//! use campdown::download::Progress;
//! use campdown::progress::{ProgressDisplay, StyleOptions};
//!
//! let display = ProgressDisplay::new(StyleOptions::default(), 3, false);
//! let bar = display.create_child_progress(0, 0);
//! let observer = ProgressDisplay::observer(bar.clone());
//! observer(Progress::new(512, 1024));
//! assert_eq!(bar.position(), 512);
//! display.finish_child(bar);
//! ```

use crate::download::Progress;
use crate::progress::StyleOptions;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::sync::Arc;

/// Progress display manager that coordinates multiple progress bars.
pub struct ProgressDisplay {
    /// The multi-progress instance for coordinating multiple progress bars.
    multi: Arc<MultiProgress>,
    /// The main progress bar for overall progress.
    main: Arc<ProgressBar>,
    /// Style options for progress bars.
    style_options: StyleOptions,
    /// Whether to show the main progress bar.
    show_main_progress: bool,
}

impl ProgressDisplay {
    /// Create a new progress display manager.
    ///
    /// # Arguments
    /// * `style_options` - Style configuration for progress bars
    /// * `total_files` - Number of files for the main progress bar
    /// * `single_file_progress` - Whether to hide the main bar for a single file
    pub fn new(style_options: StyleOptions, total_files: usize, single_file_progress: bool) -> Self {
        let multi = match style_options.is_enabled() {
            true => Arc::new(MultiProgress::new()),
            false => Arc::new(MultiProgress::with_draw_target(ProgressDrawTarget::hidden())),
        };

        let show_main_progress = !single_file_progress || total_files > 1;

        let main = if show_main_progress {
            Arc::new(
                multi.add(
                    style_options
                        .main()
                        .clone()
                        .to_progress_bar(total_files as u64),
                ),
            )
        } else {
            // Create a completely hidden progress bar that's not added to MultiProgress
            Arc::new(ProgressBar::hidden())
        };

        if show_main_progress {
            main.tick();
        }

        Self {
            multi,
            main,
            style_options,
            show_main_progress,
        }
    }

    /// Get the multi-progress instance for adding child progress bars.
    pub fn multi(&self) -> Arc<MultiProgress> {
        self.multi.clone()
    }

    /// Get the main progress bar.
    pub fn main(&self) -> Arc<ProgressBar> {
        self.main.clone()
    }

    /// Create a child progress bar for a single transfer.
    ///
    /// # Arguments
    /// * `size` - Total size for the progress bar
    /// * `position` - Starting position
    pub fn create_child_progress(&self, size: u64, position: u64) -> ProgressBar {
        self.multi.add(
            self.style_options
                .child()
                .clone()
                .to_progress_bar(size)
                .with_position(position),
        )
    }

    /// Build a progress observer that drives `bar` from transfer counters.
    pub fn observer(bar: ProgressBar) -> impl Fn(Progress) + Send + Sync {
        move |progress: Progress| {
            if progress.total > 0 && bar.length() != Some(progress.total) {
                bar.set_length(progress.total);
            }
            bar.set_position(progress.downloaded);
            bar.set_message(progress.to_string());
        }
    }

    /// Increment the main progress bar by one.
    pub fn increment_main(&self) {
        self.main.inc(1);
    }

    /// Finish the progress display, clearing or keeping bars based on configuration.
    pub fn finish(self) {
        if self.show_main_progress {
            if self.style_options.main().clear {
                self.main.finish_and_clear();
            } else {
                self.main.finish();
            }
        }
    }

    /// Finish a child progress bar based on configuration.
    pub fn finish_child(&self, pb: ProgressBar) {
        if self.style_options.child().clear {
            pb.finish_and_clear();
        } else {
            pb.finish();
        }
    }
}
