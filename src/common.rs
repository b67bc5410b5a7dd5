use std::fmt::Display;

pub type ColorValue = u8; // Color channel value (0-255)
pub type PaletteIdx = u32; // Index into the 256-color palette (not range-checked on load)

// Transparency sentinel written into every emitted bitmap.
pub const ALPHA: u8 = 0x56;

// 24-bit color packed as red << 16 | green << 8 | blue.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub fn from_rgb(red: ColorValue, green: ColorValue, blue: ColorValue) -> Self {
        Self((red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    pub fn rgb(self) -> (ColorValue, ColorValue, ColorValue) {
        (
            (self.0 >> 16 & 0xFF) as ColorValue,
            (self.0 >> 8 & 0xFF) as ColorValue,
            (self.0 & 0xFF) as ColorValue,
        )
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_round_trip() {
        for (r, g, b) in [(0, 0, 0), (255, 255, 255), (1, 2, 3), (0xAB, 0x00, 0xCD), (0, 255, 0)] {
            let color = Color::from_rgb(r, g, b);
            assert_eq!(color.rgb(), (r, g, b));
        }
    }

    #[test]
    fn test_pack_layout() {
        assert_eq!(Color::from_rgb(0x12, 0x34, 0x56), Color(0x123456));
        assert_eq!(Color::from_rgb(0xFF, 0, 0).0, 0xFF0000);
        assert_eq!(Color::from_rgb(0, 0, 0xFF).0, 0x0000FF);
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Color(0xFF00FF).to_string(), "0xff00ff");
        assert_eq!(Color(0x0000AB).to_string(), "0xab");
        assert_eq!(Color(0).to_string(), "0x0");
    }
}
