//! Driver library for the Solomon Systech SSD1306 dot matrix OLED display driver.
//!
//! The controller is driven over I2C: every transmitted byte rides behind a control
//! byte marking it as either a command or display RAM data. The driver keeps a full
//! bit-packed framebuffer in memory, draws into it with transport-agnostic
//! primitives, and pushes it to the panel whole after a ready-poll handshake.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod interface;

// Re-exports for primary API.
pub use crate::command::consts;
pub use crate::config::Config;
pub use crate::display::Display;
pub use crate::error::Error;
pub use crate::framebuffer::{Color, Framebuffer};
pub use crate::interface::i2c::I2cInterface;
