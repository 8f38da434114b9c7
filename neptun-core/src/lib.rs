//! # neptun-core
//!
//! Core protocol implementation for Neptun leak protection controllers.
//!
//! This crate provides the low-level protocol primitives:
//! - Frame structure and encoding
//! - CRC16 checksum calculation
//! - Command definitions and response classification
//! - Fixed-layout status decoding
//! - Protocol constants

pub mod checksum;
pub mod command;
pub mod constants;
pub mod error;
pub mod frame;
pub mod state;

pub use command::Command;
pub use error::{Error, Result};
pub use frame::{CommandFrame, ResponseClass};
pub use state::decode;

/// Default device port
pub const DEFAULT_PORT: u16 = constants::defaults::PORT;
