//! Mode Controller: edit/preview state machine.

use super::SourceEditor;
use crate::error::Error;
use crate::style::Theme;
use crate::typing::{RevealFrame, Tick, TypingConfig, TypingScheduler};
use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which side of the tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The source is directly editable.
    #[default]
    Editing,
    /// The typing animation plays over the source.
    Previewing,
}

/// Presentation scale of the preview. Never affects the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ZoomLevel {
    /// Normal size.
    #[default]
    X1,
    /// Double size.
    X2,
}

impl ZoomLevel {
    /// Nominal font size in pixels.
    pub const fn font_size(self) -> u16 {
        match self {
            Self::X1 => 16,
            Self::X2 => 20,
        }
    }

    /// Terminal rows taken by one line of code.
    pub const fn line_height(self) -> u16 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
        }
    }

    /// The other level.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::X1 => Self::X2,
            Self::X2 => Self::X1,
        }
    }
}

impl TryFrom<u8> for ZoomLevel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::X1),
            2 => Ok(Self::X2),
            other => Err(Error::InvalidZoom(other)),
        }
    }
}

impl From<ZoomLevel> for u8 {
    fn from(zoom: ZoomLevel) -> Self {
        match zoom {
            ZoomLevel::X1 => 1,
            ZoomLevel::X2 => 2,
        }
    }
}

impl std::fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", u8::from(*self))
    }
}

/// Owns the source buffer, the presentation settings and the scheduler.
///
/// Every transition into preview (or a source change while previewing)
/// restarts the animation from the first unit. Theme and zoom changes never
/// touch the run.
#[derive(Debug)]
pub struct ModeController {
    editor: SourceEditor,
    theme: Theme,
    zoom: ZoomLevel,
    mode: Mode,
    scheduler: TypingScheduler,
}

impl ModeController {
    /// Create a controller in edit mode.
    pub fn new(source: impl Into<String>, theme: Theme, zoom: ZoomLevel, typing: TypingConfig) -> Self {
        Self {
            editor: SourceEditor::new(source),
            theme,
            zoom,
            mode: Mode::Editing,
            scheduler: TypingScheduler::new(typing),
        }
    }

    /// Current mode.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Current theme.
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Current zoom level.
    pub const fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    /// The full source buffer.
    pub fn source(&self) -> &str {
        self.editor.content()
    }

    /// The editor (read-only).
    pub const fn editor(&self) -> &SourceEditor {
        &self.editor
    }

    /// The typing scheduler.
    pub const fn scheduler(&self) -> &TypingScheduler {
        &self.scheduler
    }

    /// Text to render: the whole buffer while editing, the revealed prefix
    /// while previewing.
    pub fn visible_text(&self) -> &str {
        match self.mode {
            Mode::Editing => self.editor.content(),
            Mode::Previewing => self.scheduler.revealed(),
        }
    }

    /// Switch mode. Returns the initial frame when preview was entered.
    pub fn toggle(&mut self) -> Option<RevealFrame> {
        match self.mode {
            Mode::Editing => Some(self.enter_preview()),
            Mode::Previewing => {
                self.exit_preview();
                None
            }
        }
    }

    /// Enter preview and replay the current buffer from the start.
    ///
    /// Restarts even when already previewing or when the buffer is unchanged.
    pub fn enter_preview(&mut self) -> RevealFrame {
        self.mode = Mode::Previewing;
        let snapshot: Arc<str> = Arc::from(self.editor.content());
        tracing::info!(units = snapshot.chars().count(), theme = %self.theme, "entering preview");
        self.scheduler.start(snapshot)
    }

    /// Leave preview. The buffer is left as it was.
    pub fn exit_preview(&mut self) {
        self.scheduler.stop();
        if self.mode == Mode::Previewing {
            tracing::info!("leaving preview");
        }
        self.mode = Mode::Editing;
    }

    /// Replace the whole buffer. Restarts the run while previewing.
    pub fn set_source(&mut self, source: impl Into<String>) -> Option<RevealFrame> {
        self.editor.set_content(source);
        match self.mode {
            Mode::Editing => None,
            Mode::Previewing => Some(self.enter_preview()),
        }
    }

    /// Apply an edit to the buffer. Only allowed in edit mode.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut SourceEditor) -> R) -> Option<R> {
        match self.mode {
            Mode::Editing => Some(f(&mut self.editor)),
            Mode::Previewing => None,
        }
    }

    /// Select a theme. The run, if any, keeps going.
    pub fn set_theme(&mut self, theme: Theme) {
        tracing::debug!(%theme, "theme selected");
        self.theme = theme;
    }

    /// Advance to the next theme in the catalog.
    pub fn cycle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.next());
        self.theme
    }

    /// Select a zoom level.
    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        tracing::debug!(%zoom, "zoom selected");
        self.zoom = zoom;
    }

    /// Flip between 1x and 2x.
    pub fn toggle_zoom(&mut self) -> ZoomLevel {
        self.set_zoom(self.zoom.toggled());
        self.zoom
    }

    /// Export control. Present in the chrome but has no effect.
    pub fn export(&self) {
        tracing::info!("export requested; no export target is available");
    }

    /// Forward a tick to the scheduler.
    pub fn on_tick(&mut self, tick: Tick) -> Option<RevealFrame> {
        self.scheduler.on_tick(tick)
    }

    /// Tick receiver of the live run.
    pub fn ticks(&self) -> Receiver<Tick> {
        self.scheduler.ticks()
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new(String::new(), Theme::default(), ZoomLevel::default(), TypingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typing::Clocking;
    use std::time::Duration;

    fn controller(source: &str) -> ModeController {
        ModeController::new(
            source,
            Theme::NightOwl,
            ZoomLevel::X1,
            TypingConfig {
                clocking: Clocking::External,
                ..TypingConfig::default()
            },
        )
    }

    fn tick(frame: &RevealFrame) -> Tick {
        Tick {
            run: frame.run,
            frame: 0,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_starts_in_editing() {
        let c = controller("abc");
        assert_eq!(c.mode(), Mode::Editing);
        assert!(!c.scheduler().is_running());
        assert_eq!(c.visible_text(), "abc");
    }

    #[test]
    fn test_edit_preview_edit_keeps_buffer() {
        let mut c = controller("let x = 1;");
        let frame = c.toggle().unwrap();
        assert_eq!(c.mode(), Mode::Previewing);
        c.on_tick(tick(&frame));
        assert_eq!(c.visible_text(), "l");

        assert!(c.toggle().is_none());
        assert_eq!(c.mode(), Mode::Editing);
        assert_eq!(c.source(), "let x = 1;");
        assert!(!c.scheduler().is_running());

        assert_eq!(c.edit(|e| e.insert_char('!')), Some(()));
        assert_eq!(c.source(), "let x = 1;!");
    }

    #[test]
    fn test_edit_rejected_while_previewing() {
        let mut c = controller("a");
        c.enter_preview();
        assert!(c.edit(|e| e.insert_char('b')).is_none());
        assert_eq!(c.source(), "a");
    }

    #[test]
    fn test_source_change_while_previewing_restarts() {
        let mut c = controller("hello");
        let first = c.enter_preview();
        c.on_tick(tick(&first));
        let second = c.set_source("xy").unwrap();
        assert!(second.run > first.run);
        assert_eq!(second.cursor, 0);
        // A tick from the first run is stale.
        assert!(c.on_tick(tick(&first)).is_none());
        assert_eq!(c.visible_text(), "");
    }

    #[test]
    fn test_reenter_unchanged_buffer_restarts() {
        let mut c = controller("ab");
        let first = c.enter_preview();
        c.on_tick(tick(&first));
        let again = c.enter_preview();
        assert_eq!(again.cursor, 0);
        assert_ne!(again.run, first.run);
    }

    #[test]
    fn test_theme_and_zoom_do_not_touch_run() {
        let mut c = controller("abc");
        let frame = c.enter_preview();
        c.on_tick(tick(&frame));
        c.cycle_theme();
        c.toggle_zoom();
        assert_eq!(c.theme(), Theme::NightOwl.next());
        assert_eq!(c.zoom(), ZoomLevel::X2);
        assert_eq!(c.scheduler().cursor(), 1);
        assert_eq!(c.scheduler().current_run(), Some(frame.run));
        assert!(c.scheduler().is_running());
    }

    #[test]
    fn test_zoom_level_conversions() {
        assert_eq!(ZoomLevel::try_from(2).unwrap(), ZoomLevel::X2);
        assert!(matches!(ZoomLevel::try_from(3), Err(Error::InvalidZoom(3))));
        assert_eq!(ZoomLevel::X2.font_size(), 20);
        assert_eq!(ZoomLevel::X1.to_string(), "1x");
        let parsed: ZoomLevel = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, ZoomLevel::X2);
        assert!(serde_json::from_str::<ZoomLevel>("5").is_err());
    }
}
