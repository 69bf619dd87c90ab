//! Widget shell: owns session state and routes host input to the core.

pub mod controller;
pub mod keys;
