//! Terminal session: raw mode, alternate screen and their teardown.

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use std::time::Duration;

/// Configuration for the terminal front-end.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Upper bound on repaints per second.
    pub target_fps: u32,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to capture the mouse (clickable controls, wheel scrolling).
    pub enable_mouse: bool,
    /// Whether to use the alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            input_poll_timeout: Duration::from_millis(10),
            enable_mouse: true,
            alternate_screen: true,
        }
    }
}

impl EngineConfig {
    /// Minimum time between two repaints.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}

/// An active terminal session. Dropping it restores the terminal.
#[derive(Debug)]
pub struct TerminalSession {
    config: EngineConfig,
    width: u16,
    height: u16,
}

impl TerminalSession {
    /// Enter raw mode and set up the screen as configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be queried or configured.
    /// Partial setup is undone before returning.
    pub fn enter(config: EngineConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;
        // From here on, Drop restores whatever was set up.
        let session = Self { config, width, height };

        let mut stdout = io::stdout();
        if session.config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if session.config.enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        execute!(stdout, EnableBracketedPaste, cursor::Hide)?;

        tracing::debug!(width, height, "terminal session started");
        Ok(session)
    }

    /// Terminal size at startup.
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// The configuration this session was opened with.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableBracketedPaste, cursor::Show);
        if self.config.enable_mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        tracing::debug!("terminal restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval() {
        let config = EngineConfig::default();
        assert_eq!(config.frame_interval(), Duration::from_secs(1) / 60);
        let zero = EngineConfig {
            target_fps: 0,
            ..EngineConfig::default()
        };
        assert_eq!(zero.frame_interval(), Duration::from_secs(1));
    }
}
