//! Display sinks for the Chip-8 frame buffer.

pub use frame::{frame_to_rgb24, frame_to_text};

#[cfg(feature = "sdl")]
pub use display::Display;

#[cfg(feature = "sdl")]
mod display;
mod frame;
