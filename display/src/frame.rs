use emu8_core::state::FrameBuffer;

/// Formats a Chip-8 FrameBuffer as RGB24 pixel data.
///
/// An RGB24 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
///
/// This creates a black and white rendering by:
/// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
/// - Triplicating each element of that 1D array to represent the RGB values of each pixel
/// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
///
/// # Arguments
/// * `frame` a Chip-8 FrameBuffer
pub fn frame_to_rgb24(frame: &FrameBuffer) -> Vec<u8> {
    frame
        .iter()
        .flatten()
        .flat_map(|&pixel| [pixel * 255; 3])
        .collect()
}

/// Formats a Chip-8 FrameBuffer as one line of text per row, `█` for every lit pixel.
pub fn frame_to_text(frame: &FrameBuffer) -> String {
    frame
        .iter()
        .map(|row| {
            row.iter()
                .map(|&pixel| if pixel == 0 { ' ' } else { '█' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use emu8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

    use super::*;

    #[test]
    fn test_frame_to_rgb24() {
        let mut frame: FrameBuffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][0..2].copy_from_slice(&[0, 1]);
        frame[1][0..2].copy_from_slice(&[1, 0]);
        let texture = frame_to_rgb24(&frame);

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(texture, expected);
    }

    #[test]
    fn test_frame_to_text() {
        let mut frame: FrameBuffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][1] = 1;
        frame[31][63] = 1;
        let text = frame_to_text(&frame);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), DISPLAY_HEIGHT);
        assert!(lines[0].starts_with(" █ "));
        assert_eq!(lines[0].chars().count(), DISPLAY_WIDTH);
        assert!(lines[31].ends_with('█'));
    }
}
