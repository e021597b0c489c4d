//! # codereel
//!
//! A terminal code-screenshot editor. Source code is edited as plain text,
//! then replayed in a preview pane with a syntax-highlighted typing
//! animation: one character (or grapheme) per tick, re-tokenized and
//! re-styled on every tick, with the view pinned to the newest line.
//!
//! ## Core Concepts
//!
//! - **Typing scheduler**: one ticker thread per run, run ids on every tick,
//!   so a restarted animation never sees ticks of the previous one
//! - **Render projector**: revealed prefix + theme → styled lines, recomputed
//!   every frame
//! - **Mode controller**: edit/preview state machine owning the buffer
//! - **Actor model**: input, render and ticker threads around a single-owner
//!   main loop
//!
//! ## Example
//!
//! ```rust
//! use codereel::render::RenderProjector;
//! use codereel::typing::{Clocking, Tick, TypingConfig, TypingScheduler};
//! use codereel::Theme;
//! use std::time::Duration;
//!
//! let mut scheduler = TypingScheduler::new(TypingConfig {
//!     clocking: Clocking::External,
//!     ..TypingConfig::default()
//! });
//! let run = scheduler.start("let x = 1;").run;
//! scheduler.on_tick(Tick { run, frame: 0, elapsed: Duration::ZERO });
//!
//! let projector = RenderProjector::with_language("rs");
//! let projection = projector.project(scheduler.revealed(), Theme::Dracula);
//! assert_eq!(projection.lines.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod mode;
pub mod render;
pub mod style;
pub mod token;
pub mod typing;

pub use config::Config;
pub use error::{Error, Result};
pub use mode::{Mode, ModeController, SourceEditor, ZoomLevel};
pub use render::{Projection, RenderProjector, StyledToken};
pub use style::{Rgb, StyleTable, Theme, TokenStyle};
pub use token::{SyntectTokenizer, Token, TokenKind, Tokenizer};
pub use typing::{RevealFrame, RevealUnit, RunId, TypingConfig, TypingScheduler};
