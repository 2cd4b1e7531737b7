use std::time::{Duration, Instant};

/// How long a load-failure notice stays up before dismissing itself.
pub const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(5);

const TITLE_BASE: &str = "Avatar Viewer";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Loading(u32),
    Ready,
}

/// The window-title state machine standing in for the page's loading and
/// error elements: a loading indicator that tracks progress, then Ready,
/// plus a transient error notice that auto-dismisses.
pub struct StatusLine {
    phase: LoadPhase,
    notice: Option<Notice>,
    dirty: bool,
}

struct Notice {
    message: String,
    shown_at: Instant,
}

impl StatusLine {
    pub fn new() -> StatusLine {
        StatusLine {
            phase: LoadPhase::Loading(0),
            notice: None,
            dirty: true,
        }
    }

    /// Update the loading indicator. Ignored once loading has finished.
    pub fn set_progress(&mut self, percent: u32) {
        match self.phase {
            LoadPhase::Loading(current) if current != percent => {
                self.phase = LoadPhase::Loading(percent);
                self.dirty = true;
            }
            _ => {}
        }
    }

    /// Hide the loading indicator. Runs on both the success and the
    /// fallback path.
    pub fn finish_loading(&mut self) {
        if self.phase != LoadPhase::Ready {
            self.phase = LoadPhase::Ready;
            self.dirty = true;
        }
    }

    pub fn show_error(&mut self, message: String) {
        self.show_error_at(message, Instant::now());
    }

    pub fn show_error_at(&mut self, message: String, now: Instant) {
        self.notice = Some(Notice {
            message,
            shown_at: now,
        });
        self.dirty = true;
    }

    /// Dismiss an expired notice. Called once per frame.
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if let Some(notice) = &self.notice {
            if now.saturating_duration_since(notice.shown_at) >= ERROR_DISPLAY_DURATION {
                self.notice = None;
                self.dirty = true;
            }
        }
    }

    pub fn error_visible(&self) -> bool {
        self.notice.is_some()
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// True once since the last change; the caller only touches the window
    /// title when something actually changed.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn title(&self) -> String {
        if let Some(notice) = &self.notice {
            return format!("{} - {}", TITLE_BASE, notice.message);
        }

        match self.phase {
            LoadPhase::Loading(percent) => {
                format!("{} - Loading Avatar... {}%", TITLE_BASE, percent)
            }
            LoadPhase::Ready => TITLE_BASE.to_string(),
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_updates_title_only_on_change() {
        let mut status = StatusLine::new();
        assert!(status.take_dirty());

        status.set_progress(0);
        assert!(!status.take_dirty());

        status.set_progress(42);
        assert!(status.take_dirty());
        assert!(status.title().contains("42%"));
    }

    #[test]
    fn test_progress_is_ignored_after_ready() {
        let mut status = StatusLine::new();
        status.finish_loading();
        status.take_dirty();

        status.set_progress(50);
        assert!(!status.take_dirty());
        assert_eq!(status.phase(), LoadPhase::Ready);
    }

    #[test]
    fn test_error_notice_auto_dismisses_after_duration() {
        let mut status = StatusLine::new();
        let shown = Instant::now();

        status.show_error_at("Failed to load avatar. Using fallback model.".to_string(), shown);
        status.finish_loading();
        assert!(status.error_visible());
        assert!(status.title().contains("Failed to load avatar"));

        status.tick_at(shown + Duration::from_millis(4900));
        assert!(status.error_visible());

        status.tick_at(shown + ERROR_DISPLAY_DURATION);
        assert!(!status.error_visible());
        assert_eq!(status.title(), "Avatar Viewer");
    }

    #[test]
    fn test_error_notice_takes_precedence_over_loading_text() {
        let mut status = StatusLine::new();
        status.set_progress(70);
        status.show_error_at("boom".to_string(), Instant::now());

        assert!(status.title().contains("boom"));
        assert!(!status.title().contains("70%"));
    }
}
