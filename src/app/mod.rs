//! Terminal front-end: actors, chrome and the main loop.
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐    RenderCommand    ┌───────────────┐
//! │ Input Thread │ ──────────────────▶ │              │ ──────────────────▶ │ Render Thread │
//! └──────────────┘                     │  Main Loop   │                     └───────────────┘
//! ┌──────────────┐        Tick         │    (App)     │
//! │ Ticker Thread│ ──────────────────▶ │              │
//! └──────────────┘                     └──────────────┘
//! ```
//!
//! All state lives in [`App`] on the main thread; the other threads only
//! produce events or consume finished frames.

mod chrome;
mod input;
mod keymap;
mod messages;
mod renderer;
mod terminal;

pub use chrome::{ChromeLayout, ChromeState, Hotspot, TAB_TITLE};
pub use input::InputActor;
pub use keymap::{action_for, Action, EditOp};
pub use messages::{InputEvent, KeyCode, KeyModifiers, RenderCommand};
pub use renderer::{RenderStats, Renderer, RendererActor};
pub use terminal::{EngineConfig, TerminalSession};

use crate::config::Config;
use crate::mode::{Mode, ModeController, SourceEditor};
use crate::render::{Caret, Grid, PreviewPane, Rect, RenderProjector};
use crate::typing::Tick;
use crossbeam_channel::{bounded, select, Receiver};
use std::time::Instant;

/// The application state driven by the main loop.
#[derive(Debug)]
pub struct App {
    controller: ModeController,
    projector: RenderProjector,
    pane: PreviewPane,
    layout: ChromeLayout,
    hotspots: Vec<Hotspot>,
    show_caret: bool,
    status: String,
    running: bool,
}

impl App {
    /// Create the app for a screen of `width` × `height` cells.
    pub fn new(controller: ModeController, projector: RenderProjector, show_caret: bool, width: u16, height: u16) -> Self {
        let mut app = Self {
            controller,
            projector,
            pane: PreviewPane::new(),
            layout: ChromeLayout::new(Rect::from_size(width, height)),
            hotspots: Vec::new(),
            show_caret,
            status: String::from("editing"),
            running: true,
        };
        app.relayout();
        app.reproject();
        app
    }

    /// Build the app from a loaded configuration.
    pub fn from_config(config: &Config, width: u16, height: u16) -> Self {
        let controller = ModeController::new(config.source.clone(), config.theme, config.zoom, config.typing_config());
        let projector = RenderProjector::with_language(config.language.clone());
        Self::new(controller, projector, config.show_caret, width, height)
    }

    /// The mode controller.
    pub const fn controller(&self) -> &ModeController {
        &self.controller
    }

    /// The code pane.
    pub const fn pane(&self) -> &PreviewPane {
        &self.pane
    }

    /// Current status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the main loop should keep going.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Tick receiver of the live run (never fires when idle).
    pub fn ticks(&self) -> Receiver<Tick> {
        self.controller.ticks()
    }

    /// Adapt to a new screen size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = ChromeLayout::new(Rect::from_size(width, height));
        self.relayout();
        self.follow();
    }

    /// Apply one input event. Returns whether a repaint is needed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Key { code, modifiers } => {
                let page = self.pane.viewport().visible_count().saturating_sub(1);
                action_for(code, modifiers, self.controller.mode(), page)
                    .is_some_and(|action| self.apply(action))
            }
            InputEvent::Click { x, y } => {
                let action = chrome::hit(&self.hotspots, x, y).cloned();
                action.is_some_and(|action| self.apply(action))
            }
            InputEvent::MouseScroll { delta } => {
                let rows = usize::from(delta.unsigned_abs()) * 3;
                self.apply(if delta > 0 { Action::ScrollUp(rows) } else { Action::ScrollDown(rows) })
            }
            InputEvent::Paste(text) => self.apply(Action::Edit(EditOp::Paste(text))),
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                true
            }
            InputEvent::Error(message) => {
                tracing::warn!(%message, "input error");
                false
            }
            InputEvent::Shutdown => {
                self.running = false;
                false
            }
        }
    }

    /// Perform an action. Returns whether a repaint is needed.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::ToggleMode => {
                self.controller.toggle();
                self.status = match self.controller.mode() {
                    Mode::Editing => String::from("editing"),
                    Mode::Previewing => String::from("preview"),
                };
                self.reproject();
                self.follow();
            }
            Action::CycleTheme => {
                let theme = self.controller.cycle_theme();
                self.status = format!("theme: {theme}");
                self.reproject();
            }
            Action::ToggleZoom => {
                let zoom = self.controller.toggle_zoom();
                self.status = format!("zoom: {zoom}");
                self.relayout();
                self.follow();
            }
            Action::SetZoom(zoom) => {
                self.controller.set_zoom(zoom);
                self.status = format!("zoom: {zoom}");
                self.relayout();
                self.follow();
            }
            Action::Export => {
                self.controller.export();
                self.status = String::from("export is not available");
            }
            Action::ScrollUp(rows) => self.pane.viewport_mut().scroll_up(rows),
            Action::ScrollDown(rows) => self.pane.viewport_mut().scroll_down(rows),
            Action::Edit(op) => {
                if self.controller.edit(|editor| apply_edit(editor, op)).is_none() {
                    return false;
                }
                self.reproject();
                self.follow();
            }
            Action::Quit => {
                tracing::info!("quit requested");
                self.running = false;
                return false;
            }
        }
        true
    }

    /// Apply a tick: advance the reveal, re-project, then pin the scroll to
    /// the bottom of the freshly laid out content.
    pub fn on_tick(&mut self, tick: Tick) -> bool {
        let Some(frame) = self.controller.on_tick(tick) else {
            return false;
        };
        self.pane
            .set_projection(self.projector.project(frame.text(), self.controller.theme()));
        self.pane.viewport_mut().scroll_to_bottom();
        if frame.is_finished() {
            self.status = String::from("preview finished");
        } else {
            self.status = format!("typing {}/{}", frame.cursor, frame.len);
        }
        true
    }

    /// Paint a complete frame.
    pub fn paint(&mut self) -> Grid {
        let screen = self.screen();
        let mut grid = Grid::new(screen.width, screen.height);
        let theme = self.controller.theme();
        grid.clear(theme.style_table().background);

        self.pane.paint(&mut grid, theme, self.caret());
        self.hotspots = chrome::paint(
            &mut grid,
            &self.layout,
            &ChromeState {
                theme,
                zoom: self.controller.zoom(),
                mode: self.controller.mode(),
                status: &self.status,
            },
        );
        grid
    }

    fn screen(&self) -> Rect {
        let toolbar = self.layout.toolbar;
        Rect::new(
            0,
            0,
            toolbar.width,
            self.layout.footer.bottom().max(toolbar.bottom()),
        )
    }

    fn caret(&self) -> Option<Caret> {
        match self.controller.mode() {
            Mode::Editing => {
                let (line, byte) = self.controller.editor().cursor_line_col();
                Some(Caret { line, byte })
            }
            Mode::Previewing => (self.show_caret && self.controller.scheduler().is_running())
                .then(|| Caret::at_end(self.controller.visible_text())),
        }
    }

    fn relayout(&mut self) {
        self.pane
            .layout(self.layout.pane, self.controller.zoom().line_height());
    }

    fn reproject(&mut self) {
        let projection = self
            .projector
            .project(self.controller.visible_text(), self.controller.theme());
        self.pane.set_projection(projection);
    }

    /// Keep the interesting part visible: the caret while editing, the
    /// bottom while previewing.
    fn follow(&mut self) {
        match self.controller.mode() {
            Mode::Previewing => self.pane.viewport_mut().scroll_to_bottom(),
            Mode::Editing => {
                let (line, byte) = self.controller.editor().cursor_line_col();
                let (row, _) = self.pane.viewport().locate(line, byte);
                self.pane.viewport_mut().scroll_into_view(row);
            }
        }
    }
}

fn apply_edit(editor: &mut SourceEditor, op: EditOp) {
    match op {
        EditOp::Insert(c) => editor.insert_char(c),
        EditOp::Paste(text) => editor.insert_str(&text),
        EditOp::Newline => editor.newline(),
        EditOp::Backspace => {
            editor.backspace();
        }
        EditOp::Delete => {
            editor.delete();
        }
        EditOp::Left => editor.cursor_left(),
        EditOp::Right => editor.cursor_right(),
        EditOp::Up => editor.cursor_up(),
        EditOp::Down => editor.cursor_down(),
        EditOp::Home => editor.cursor_home(),
        EditOp::End => editor.cursor_end(),
    }
}

/// Why the main loop woke up.
enum Wake {
    Input(InputEvent),
    Tick(Tick),
    InputClosed,
    Idle,
}

/// Run the interactive front-end until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or a thread cannot be
/// spawned. The terminal is restored on every exit path.
pub fn run(config: &Config) -> crate::Result<()> {
    let engine = config.engine_config();
    let frame_interval = engine.frame_interval();
    let session = TerminalSession::enter(engine.clone())?;
    let (width, height) = session.size();

    let (input_tx, input_rx) = bounded::<InputEvent>(64);
    let (render_tx, render_rx) = bounded::<RenderCommand>(4);
    let input = InputActor::spawn(input_tx, engine.input_poll_timeout)?;
    let renderer = RendererActor::spawn(render_rx, width, height)?;

    let mut app = App::from_config(config, width, height);
    tracing::info!(
        theme = %app.controller().theme(),
        zoom = %app.controller().zoom(),
        language = config.language.as_str(),
        "codereel started"
    );

    let mut dirty = true;
    let mut last_paint: Option<Instant> = None;

    while app.is_running() {
        let ticks = app.ticks();
        let wake = select! {
            recv(input_rx) -> event => event.map_or(Wake::InputClosed, Wake::Input),
            recv(ticks) -> tick => tick.map_or(Wake::Idle, Wake::Tick),
            default(frame_interval) => Wake::Idle,
        };

        match wake {
            Wake::Input(InputEvent::Resize { width, height }) => {
                if render_tx.send(RenderCommand::Resize { width, height }).is_err() {
                    tracing::error!("render thread is gone");
                    break;
                }
                dirty |= app.handle_input(InputEvent::Resize { width, height });
            }
            Wake::Input(event) => dirty |= app.handle_input(event),
            Wake::Tick(tick) => dirty |= app.on_tick(tick),
            Wake::InputClosed => {
                tracing::warn!("input channel closed");
                break;
            }
            Wake::Idle => {}
        }

        if dirty && last_paint.map_or(true, |at| at.elapsed() >= frame_interval) {
            if render_tx.send(RenderCommand::Frame(Box::new(app.paint()))).is_err() {
                tracing::error!("render thread is gone");
                break;
            }
            dirty = false;
            last_paint = Some(Instant::now());
        }
    }

    // The run's ticker is joined when the controller drops.
    drop(app);
    input.join();
    let _ = render_tx.send(RenderCommand::Shutdown);
    renderer.join();
    drop(session);
    tracing::info!("codereel exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Theme;
    use crate::typing::{Clocking, TypingConfig};
    use crate::mode::ZoomLevel;
    use std::time::Duration;

    fn app(source: &str) -> App {
        let controller = ModeController::new(
            source,
            Theme::NightOwl,
            ZoomLevel::X1,
            TypingConfig {
                clocking: Clocking::External,
                ..TypingConfig::default()
            },
        );
        App::new(controller, RenderProjector::default(), true, 60, 12)
    }

    fn tick_current(app: &mut App) -> bool {
        let run = app.controller().scheduler().current_run().unwrap();
        app.on_tick(Tick {
            run,
            frame: 0,
            elapsed: Duration::ZERO,
        })
    }

    #[test]
    fn test_preview_reveals_and_follows_bottom() {
        let source = (0..30).map(|i| format!("let v{i} = {i};")).collect::<Vec<_>>().join("\n");
        let mut app = app(&source);
        assert!(app.apply(Action::ToggleMode));
        assert_eq!(app.pane().viewport().scroll_height(), 0);

        while app.controller().scheduler().is_running() {
            assert!(tick_current(&mut app));
            assert!(app.pane().viewport().at_bottom());
        }
        assert_eq!(app.controller().visible_text(), source);
        assert_eq!(app.status(), "preview finished");
        assert!(app.pane().viewport().scroll_top() > 0);
    }

    #[test]
    fn test_typing_edits_only_in_edit_mode() {
        let mut app = app("");
        assert!(app.handle_input(InputEvent::key(KeyCode::Char('a'), KeyModifiers::NONE)));
        assert!(app.handle_input(InputEvent::Paste("b\r\nc".into())));
        assert_eq!(app.controller().source(), "ab\nc");

        app.apply(Action::ToggleMode);
        assert!(!app.handle_input(InputEvent::key(KeyCode::Char('z'), KeyModifiers::NONE)));
        assert_eq!(app.controller().source(), "ab\nc");
    }

    #[test]
    fn test_theme_switch_keeps_run() {
        let mut app = app("abcdef");
        app.apply(Action::ToggleMode);
        tick_current(&mut app);
        tick_current(&mut app);
        let run = app.controller().scheduler().current_run();
        app.apply(Action::CycleTheme);
        assert_eq!(app.controller().scheduler().cursor(), 2);
        assert_eq!(app.controller().scheduler().current_run(), run);
        assert_eq!(app.controller().theme(), Theme::NightOwl.next());
    }

    #[test]
    fn test_paint_and_click_toggle() {
        let mut app = app("const x = 1;");
        let grid = app.paint();
        assert_eq!(grid.width(), 60);
        assert_eq!(grid.height(), 12);
        assert!(grid.row_text(2).contains("const x = 1;"));

        // The footer's first button toggles the mode.
        assert!(app.handle_input(InputEvent::Click { x: 2, y: 11 }));
        assert_eq!(app.controller().mode(), Mode::Previewing);
    }

    #[test]
    fn test_quit_and_shutdown_stop_the_loop() {
        let mut a = app("");
        a.handle_input(InputEvent::key(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(!a.is_running());

        let mut b = app("");
        b.handle_input(InputEvent::Shutdown);
        assert!(!b.is_running());
    }
}
