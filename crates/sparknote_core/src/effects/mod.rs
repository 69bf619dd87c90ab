//! Decorative confetti effect.
//!
//! # Responsibility
//! - Spawn and advance short-lived particle bursts.
//! - Drive frames through an explicit step function instead of self-scheduling callbacks.

pub mod frame;
pub mod particles;
