//! Everything about the hitbox that doesn't touch the hardware directly: profiles, debouncing,
//! action dispatch, the session timer and the control loop state.
//!
//! Kept separate from main.rs (which is inherently hardware-related) so that it builds and runs
//! unit tests on the host: `cargo test`.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod debounce;
pub mod dispatch;
pub mod error;
pub mod hid;
pub mod indicator;
pub mod keycode;
pub mod layout;
pub mod pins;
pub mod profile;
pub mod session;

#[cfg(test)]
mod testing;

pub use control::Hitbox;
pub use error::{Error, HidError};
