//! ttyr Library
//!
//! Replays NetHack ttyrec recordings frame by frame and recovers the game's
//! message line, popup windows and `--More--` pagination from the screens.
//!
//! - [`ttyrec`] decodes recordings into frames
//! - [`message`] parses a screen into message, popup and marker
//! - [`env`] exposes a recording as a steppable environment
//! - [`render`] writes recordings out as text

pub mod actions;
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod message;
pub mod render;
pub mod terminal;
pub mod ttyrec;

pub use config::Config;
pub use error::{ReplayError, Result};
pub use message::{MessageAligner, MessageState, PaginationAdvancer};
pub use ttyrec::{Frame, FrameView, ReplayOptions, ReplaySession, TtyrecVersion};
