//! Status renderer
//!
//! Bridges the monitor's two status lines onto a `DisplayBackend`.

use thermowatch_core::traits::StatusDisplay;

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::Screen;

/// Renders status lines onto a character display
///
/// Rows are rewritten only when their content changed. A row that fails to
/// write stays dirty and is retried on the next render.
pub struct ScreenRenderer<B: DisplayBackend> {
    backend: B,
    screen: Screen,
    failed_writes: u32,
}

impl<B: DisplayBackend> ScreenRenderer<B> {
    /// Wrap a backend, sizing the shadow screen to its geometry
    pub fn new(backend: B) -> Self {
        let (cols, rows) = backend.dimensions();
        Self {
            backend,
            screen: Screen::new(cols, rows),
            failed_writes: 0,
        }
    }

    /// Current shadow content
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Release the backend (for shutdown cleanup)
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Clear the glass and the shadow screen
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.screen.clear();
        self.backend.clear()?;
        for row in 0..self.screen.rows() {
            self.screen.mark_clean(row);
        }
        Ok(())
    }

    /// Write every dirty row to the backend
    pub fn refresh(&mut self) -> Result<(), DisplayError> {
        if !self.backend.is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        let mut result = Ok(());
        for row in 0..self.screen.rows() {
            if !self.screen.is_row_dirty(row) {
                continue;
            }
            let Some(text) = self.screen.get_line(row) else {
                continue;
            };
            match self.backend.draw_text(row as u8, 0, text) {
                Ok(()) => self.screen.mark_clean(row),
                Err(e) => {
                    self.failed_writes = self.failed_writes.saturating_add(1);
                    result = Err(e);
                }
            }
        }

        if let Err(e) = self.backend.flush() {
            self.failed_writes = self.failed_writes.saturating_add(1);
            self.screen.mark_dirty();
            return Err(e);
        }
        result
    }
}

impl<B: DisplayBackend> StatusDisplay for ScreenRenderer<B> {
    fn render(&mut self, line1: &str, line2: &str) {
        self.screen.set_line(0, line1);
        self.screen.set_line(1, line2);
        // Failures are counted; the next tick retries the dirty rows.
        let _ = self.refresh();
    }

    fn failed_writes(&self) -> u32 {
        self.failed_writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;
    use std::vec::Vec;

    struct RecordingBackend {
        writes: Vec<(u8, String)>,
        fail_writes: bool,
        ready: bool,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                fail_writes: false,
                ready: true,
            }
        }
    }

    impl DisplayBackend for RecordingBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.writes.clear();
            Ok(())
        }

        fn draw_text(&mut self, row: u8, _col: u8, text: &str) -> Result<(), DisplayError> {
            if self.fail_writes {
                return Err(DisplayError::Communication);
            }
            self.writes.push((row, String::from(text)));
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (16, 2)
        }

        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    #[test]
    fn test_render_writes_both_rows_padded() {
        let mut renderer = ScreenRenderer::new(RecordingBackend::new());
        renderer.render("Temp: 75.42 F", "    12:00:00");

        let writes = &renderer.backend().writes;
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[0], (0, String::from("Temp: 75.42 F   ")));
        assert_eq!(writes[1], (1, String::from("    12:00:00    ")));
    }

    #[test]
    fn test_only_changed_row_rewritten() {
        let mut renderer = ScreenRenderer::new(RecordingBackend::new());
        renderer.render("Temp: 75.42 F", "    12:00:00");
        renderer.render("Temp: 75.42 F", "    12:00:01");

        let writes = &renderer.backend().writes;
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[2].0, 1);
    }

    #[test]
    fn test_failed_write_counted_and_retried() {
        let mut renderer = ScreenRenderer::new(RecordingBackend::new());
        renderer.backend_mut().fail_writes = true;
        renderer.render("Temp: 75.42 F", "    12:00:00");
        assert_eq!(renderer.failed_writes(), 2);
        assert!(renderer.screen().is_dirty());

        renderer.backend_mut().fail_writes = false;
        renderer.render("Temp: 75.42 F", "    12:00:00");
        assert_eq!(renderer.backend().writes.len(), 2);
        assert!(!renderer.screen().is_dirty());
    }

    #[test]
    fn test_not_ready_backend_is_skipped() {
        let mut backend = RecordingBackend::new();
        backend.ready = false;
        let mut renderer = ScreenRenderer::new(backend);
        assert_eq!(renderer.refresh(), Err(DisplayError::NotInitialized));
        assert!(renderer.backend().writes.is_empty());
    }
}
