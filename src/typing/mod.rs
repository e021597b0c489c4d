//! Typing animation: the reveal state machine and its timer.
//!
//! ```text
//! ┌──────────────┐   Tick { run, .. }   ┌────────────────┐   RevealFrame
//! │ Ticker Thread│ ───────────────────▶ │ TypingScheduler│ ─────────────▶ projector
//! └──────────────┘                      └────────────────┘
//!        ▲  spawn / join (one per run)          │
//!        └──────────────────────────────────────┘
//! ```
//!
//! The ticker only emits timing events. The scheduler applies them on the
//! receiving thread, checks the run id on every tick, and joins the ticker
//! before a new run starts or when it is stopped.

mod scheduler;
mod ticker;

pub use scheduler::{
    AnimationRun, Clocking, RevealFrame, RevealUnit, RunId, TypingConfig, TypingScheduler,
};
pub use ticker::{Tick, TickerActor};
