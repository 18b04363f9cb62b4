//! Shared utilities for the animation engine.

pub mod frame_pacing;
