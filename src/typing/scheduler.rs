//! Typing Scheduler: reveals a buffer one unit per tick.

use super::ticker::{Tick, TickerActor};
use crate::error::Error;
use crossbeam_channel::Receiver;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

/// Identifier of one animation run. Strictly increasing per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(pub u64);

/// What one tick reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealUnit {
    /// One Unicode scalar value.
    #[default]
    Char,
    /// One extended grapheme cluster.
    Grapheme,
}

impl FromStr for RevealUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "char" => Ok(Self::Char),
            "grapheme" => Ok(Self::Grapheme),
            _ => Err(Error::InvalidRevealUnit(s.to_string())),
        }
    }
}

/// Where ticks come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clocking {
    /// A ticker thread per run.
    #[default]
    Threaded,
    /// The caller feeds ticks through [`TypingScheduler::on_tick`] itself.
    External,
}

/// Configuration for the typing scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingConfig {
    /// Time between two ticks.
    pub interval: Duration,
    /// Unit revealed per tick.
    pub unit: RevealUnit,
    /// Tick source.
    pub clocking: Clocking,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(20),
            unit: RevealUnit::Char,
            clocking: Clocking::Threaded,
        }
    }
}

/// One playback of the typing effect, bound to a single buffer.
#[derive(Debug, Clone)]
pub struct AnimationRun {
    id: RunId,
    buffer: Arc<str>,
    /// Byte offset just past each unit.
    ends: Vec<usize>,
    cursor: usize,
}

impl AnimationRun {
    fn new(id: RunId, buffer: Arc<str>, unit: RevealUnit) -> Self {
        let ends = match unit {
            RevealUnit::Char => buffer
                .char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .collect(),
            RevealUnit::Grapheme => buffer
                .grapheme_indices(true)
                .map(|(i, g)| i + g.len())
                .collect(),
        };
        Self {
            id,
            buffer,
            ends,
            cursor: 0,
        }
    }

    /// The run identifier.
    pub const fn id(&self) -> RunId {
        self.id
    }

    /// Number of revealed units.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of units in the bound buffer.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    /// Whether the bound buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Whether every unit has been revealed.
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.ends.len()
    }

    /// The full buffer this run is bound to.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    fn byte_end(&self) -> usize {
        self.cursor.checked_sub(1).map_or(0, |i| self.ends[i])
    }

    /// The revealed prefix.
    pub fn revealed(&self) -> &str {
        &self.buffer[..self.byte_end()]
    }

    fn advance(&mut self) {
        if !self.is_complete() {
            self.cursor += 1;
        }
    }

    fn frame(&self) -> RevealFrame {
        RevealFrame {
            run: self.id,
            cursor: self.cursor,
            len: self.ends.len(),
            buffer: Arc::clone(&self.buffer),
            end: self.byte_end(),
        }
    }
}

/// Immutable snapshot published after each state change of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealFrame {
    /// The run that produced this frame.
    pub run: RunId,
    /// Revealed units.
    pub cursor: usize,
    /// Total units in the run's buffer.
    pub len: usize,
    buffer: Arc<str>,
    end: usize,
}

impl RevealFrame {
    /// The revealed prefix.
    pub fn text(&self) -> &str {
        &self.buffer[..self.end]
    }

    /// Whether this frame reveals the whole buffer.
    pub const fn is_finished(&self) -> bool {
        self.cursor >= self.len
    }
}

/// Owner of the reveal cursor and the typing timer.
///
/// The timer is never exposed: callers see [`start`](Self::start),
/// [`stop`](Self::stop), a tick receiver and the frames returned by
/// [`on_tick`](Self::on_tick). Every `start` stops the previous run first, and
/// a tick belonging to any other run than the current one is discarded.
#[derive(Debug)]
pub struct TypingScheduler {
    config: TypingConfig,
    run: Option<AnimationRun>,
    ticker: Option<TickerActor>,
    active: bool,
    next_id: u64,
}

impl TypingScheduler {
    /// Create an idle scheduler.
    pub const fn new(config: TypingConfig) -> Self {
        Self {
            config,
            run: None,
            ticker: None,
            active: false,
            next_id: 0,
        }
    }

    /// Get the configuration.
    pub const fn config(&self) -> &TypingConfig {
        &self.config
    }

    /// Begin a new run over `buffer`, replacing any run in flight.
    ///
    /// Returns the initial frame (cursor 0). An empty buffer yields a frame
    /// that is already finished and no timer is started.
    pub fn start(&mut self, buffer: impl Into<Arc<str>>) -> RevealFrame {
        self.stop();

        self.next_id += 1;
        let id = RunId(self.next_id);
        let run = AnimationRun::new(id, buffer.into(), self.config.unit);
        let frame = run.frame();

        tracing::debug!(run = id.0, units = run.len(), "typing run started");

        if !run.is_complete() {
            self.active = true;
            if self.config.clocking == Clocking::Threaded {
                self.ticker = Some(TickerActor::spawn(id, self.config.interval));
            }
        }
        self.run = Some(run);
        frame
    }

    /// Cancel the timer of the current run, if any. Idempotent.
    ///
    /// The revealed prefix stays readable until the next `start`.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.join();
        }
        if self.active {
            self.active = false;
            if let Some(run) = &self.run {
                tracing::debug!(run = run.id.0, cursor = run.cursor, "typing run stopped");
            }
        }
    }

    /// Apply one tick.
    ///
    /// Returns the new frame, or `None` when the tick is stale (another run,
    /// or a run that already stopped) and nothing changed.
    pub fn on_tick(&mut self, tick: Tick) -> Option<RevealFrame> {
        if !self.active {
            tracing::trace!(run = tick.run.0, "tick after stop discarded");
            return None;
        }
        let run = self.run.as_mut()?;
        if tick.run != run.id {
            tracing::trace!(run = tick.run.0, current = run.id.0, "stale tick discarded");
            return None;
        }

        run.advance();
        let frame = run.frame();
        tracing::trace!(run = frame.run.0, cursor = frame.cursor, "tick");

        if frame.is_finished() {
            tracing::debug!(run = frame.run.0, units = frame.len, "typing run finished");
            self.stop();
        }
        Some(frame)
    }

    /// Receiver for the current run's ticks.
    ///
    /// When no threaded run is live this receiver never fires, so it can sit
    /// in a `select!` unconditionally.
    pub fn ticks(&self) -> Receiver<Tick> {
        self.ticker
            .as_ref()
            .map_or_else(crossbeam_channel::never, |t| t.receiver().clone())
    }

    /// Whether a run is in progress.
    pub const fn is_running(&self) -> bool {
        self.active
    }

    /// The current (or last) run.
    pub const fn run(&self) -> Option<&AnimationRun> {
        self.run.as_ref()
    }

    /// Identifier of the current (or last) run.
    pub fn current_run(&self) -> Option<RunId> {
        self.run.as_ref().map(AnimationRun::id)
    }

    /// Revealed units of the current run.
    pub fn cursor(&self) -> usize {
        self.run.as_ref().map_or(0, AnimationRun::cursor)
    }

    /// Revealed prefix of the current run.
    pub fn revealed(&self) -> &str {
        self.run.as_ref().map_or("", AnimationRun::revealed)
    }

    /// Snapshot of the current run.
    pub fn frame(&self) -> Option<RevealFrame> {
        self.run.as_ref().map(AnimationRun::frame)
    }
}

impl Default for TypingScheduler {
    fn default() -> Self {
        Self::new(TypingConfig::default())
    }
}

impl Drop for TypingScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn external() -> TypingScheduler {
        TypingScheduler::new(TypingConfig {
            clocking: Clocking::External,
            ..TypingConfig::default()
        })
    }

    fn tick(run: RunId, frame: u64) -> Tick {
        Tick {
            run,
            frame,
            elapsed: Duration::from_millis(20 * (frame + 1)),
        }
    }

    #[test]
    fn test_two_chars_then_self_terminates() {
        let mut scheduler = external();
        let first = scheduler.start("ab");
        let run = first.run;
        assert_eq!(first.text(), "");
        assert_eq!(first.cursor, 0);

        let f1 = scheduler.on_tick(tick(run, 0)).unwrap();
        assert_eq!(f1.text(), "a");
        assert!(!f1.is_finished());

        let f2 = scheduler.on_tick(tick(run, 1)).unwrap();
        assert_eq!(f2.text(), "ab");
        assert!(f2.is_finished());
        assert!(!scheduler.is_running());

        assert!(scheduler.on_tick(tick(run, 2)).is_none());
        assert_eq!(scheduler.revealed(), "ab");
        assert_eq!(scheduler.cursor(), 2);
    }

    #[test]
    fn test_empty_buffer_finishes_immediately() {
        let mut scheduler = TypingScheduler::default();
        let frame = scheduler.start("");
        assert!(frame.is_finished());
        assert_eq!(frame.text(), "");
        assert!(!scheduler.is_running());
        // No ticker thread was spawned.
        assert!(scheduler.ticks().try_recv().is_err());
    }

    #[test]
    fn test_restart_discards_stale_ticks() {
        let mut scheduler = external();
        let old = scheduler.start("hello").run;
        scheduler.on_tick(tick(old, 0));
        assert_eq!(scheduler.revealed(), "h");

        let new = scheduler.start("xy").run;
        assert_ne!(old, new);
        assert_eq!(scheduler.cursor(), 0);

        assert!(scheduler.on_tick(tick(old, 1)).is_none());
        assert_eq!(scheduler.revealed(), "");

        scheduler.on_tick(tick(new, 0));
        let last = scheduler.on_tick(tick(new, 1)).unwrap();
        assert_eq!(last.text(), "xy");
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scheduler = TypingScheduler::default();
        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());
        assert_eq!(scheduler.revealed(), "");

        scheduler.start("abc");
        assert!(scheduler.is_running());
        scheduler.stop();
        scheduler.stop();
        assert!(!scheduler.is_running());
    }

    #[test]
    fn test_tick_after_stop_is_ignored() {
        let mut scheduler = external();
        let run = scheduler.start("abc").run;
        scheduler.on_tick(tick(run, 0));
        scheduler.stop();
        assert!(scheduler.on_tick(tick(run, 1)).is_none());
        assert_eq!(scheduler.revealed(), "a");
    }

    #[test]
    fn test_multibyte_prefix_is_valid() {
        let mut scheduler = external();
        let run = scheduler.start("héllo").run;
        scheduler.on_tick(tick(run, 0));
        let frame = scheduler.on_tick(tick(run, 1)).unwrap();
        assert_eq!(frame.text(), "hé");
        assert_eq!(frame.len, 5);
    }

    #[test]
    fn test_grapheme_unit() {
        let mut scheduler = TypingScheduler::new(TypingConfig {
            unit: RevealUnit::Grapheme,
            clocking: Clocking::External,
            ..TypingConfig::default()
        });
        // "e" + combining acute accent is one grapheme, two chars.
        let frame = scheduler.start("e\u{301}x");
        assert_eq!(frame.len, 2);
        let frame = scheduler.on_tick(tick(frame.run, 0)).unwrap();
        assert_eq!(frame.text(), "e\u{301}");
    }

    #[test]
    fn test_run_ids_increase() {
        let mut scheduler = external();
        let a = scheduler.start("a").run;
        let b = scheduler.start("a").run;
        assert!(b > a);
        assert_eq!(scheduler.current_run(), Some(b));
    }

    #[test]
    fn test_reveal_unit_from_str() {
        assert_eq!("char".parse::<RevealUnit>().unwrap(), RevealUnit::Char);
        assert_eq!("Grapheme".parse::<RevealUnit>().unwrap(), RevealUnit::Grapheme);
        assert!("word".parse::<RevealUnit>().is_err());
    }
}
