use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use emu8_core::state::FrameBuffer;

use crate::frame::frame_to_rgb24;

/// # Display
/// The Chip-8 display is composed of 64x32 pixels black/white pixels.
/// Each frame is scaled up and drawn to an SDL2 window.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display window bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "Emu-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Display { canvas })
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = frame_to_rgb24(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (row, line) in pixels.chunks(DISPLAY_WIDTH * 3).enumerate() {
                buffer[row * pitch..row * pitch + line.len()].copy_from_slice(line);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
