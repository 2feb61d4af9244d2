//! Linear RGBA colour.

use bytemuck::{Pod, Zeroable};

/// An RGBA colour with f32 channels in the 0.0-1.0 range.
///
/// `#[repr(C)]` so that colours can be copied straight into vertex or
/// uniform data with `bytemuck`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const CORNFLOWER_BLUE: Self = Self::new(0.392, 0.584, 0.929, 1.0);

    /// Create a colour from its channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a colour from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Pack into 8-bit channels, clamping out-of-range values.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let pack = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [pack(self.r), pack(self.g), pack(self.b), pack(self.a)]
    }

    /// Channels as an array.
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Colour {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_round_trip() {
        let colour = Colour::from_rgba8(255, 128, 0, 255);
        assert_eq!(colour.to_rgba8(), [255, 128, 0, 255]);
    }

    #[test]
    fn packing_clamps() {
        let colour = Colour::new(2.0, -1.0, 0.5, 1.0);
        assert_eq!(colour.to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn pod_layout() {
        let bytes: &[u8] = bytemuck::bytes_of(&Colour::WHITE);
        assert_eq!(bytes.len(), 16);
    }
}
