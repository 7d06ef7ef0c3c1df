use crate::error::{LatebakeError, LatebakeResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Straight (non-premultiplied) RGBA color, each channel in `[0,1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// True when every channel of `other` is within `tolerance` of `self`.
    pub fn channels_within(self, other: Self, tolerance: f32) -> bool {
        (self.r - other.r).abs() <= tolerance
            && (self.g - other.g).abs() <= tolerance
            && (self.b - other.b).abs() <= tolerance
            && (self.a - other.a).abs() <= tolerance
    }
}

/// Interleaved RGBA float pixel storage, `data.len() == width * height * 4`.
///
/// Buffers are immutable once they enter the node graph; producers build
/// them with [`PixelBuffer::new`] or [`PixelBuffer::filled`] and hand them
/// off behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<f32>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> LatebakeResult<Self> {
        if width == 0 || height == 0 {
            return Err(LatebakeError::validation(
                "pixel buffer width/height must be > 0",
            ));
        }
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| LatebakeError::validation("pixel buffer size overflow"))?;
        if data.len() != expected_len {
            return Err(LatebakeError::validation(
                "pixel buffer expects data matching width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn filled(width: u32, height: u32, color: Color) -> LatebakeResult<Self> {
        let px = [color.r, color.g, color.b, color.a];
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| LatebakeError::validation("pixel buffer size overflow"))?;
        let mut data = Vec::with_capacity(expected_len);
        for _ in 0..expected_len / 4 {
            data.extend_from_slice(&px);
        }
        Self::new(width, height, data)
    }

    /// Read the pixel at `(x, y)`. Coordinates must be in range.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        debug_assert!(x < self.width && y < self.height);
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Color {
            r: self.data[idx],
            g: self.data[idx + 1],
            b: self.data[idx + 2],
            a: self.data[idx + 3],
        }
    }

    /// Write the pixel at `(x, y)`. Only valid before the buffer is shared.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        debug_assert!(x < self.width && y < self.height);
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[idx] = color.r;
        self.data[idx + 1] = color.g;
        self.data[idx + 2] = color.b;
        self.data[idx + 3] = color.a;
    }
}

/// Editable decomposition of a node transform.
///
/// Combined as translate(−pivot) → scale → rotate → translate(+pivot) →
/// translate(offset); the pivot is in source-image pixel units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransformParameters {
    pub offset_x: f64,
    pub offset_y: f64,
    pub angle_radians: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub pivot_x: f64,
    pub pivot_y: f64,
}

impl Default for TransformParameters {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            angle_radians: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            pivot_x: 0.0,
            pivot_y: 0.0,
        }
    }
}

impl TransformParameters {
    pub fn to_affine(self) -> Affine {
        crate::affine::create_pivot_transform(
            self.scale_x,
            self.scale_y,
            self.angle_radians,
            self.pivot_x,
            self.pivot_y,
            self.offset_x,
            self.offset_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_rejects_mismatched_length() {
        assert!(PixelBuffer::new(2, 2, vec![0.0; 16]).is_ok());
        assert!(PixelBuffer::new(2, 2, vec![0.0; 15]).is_err());
        assert!(PixelBuffer::new(0, 2, vec![]).is_err());
    }

    #[test]
    fn filled_buffer_reads_back_its_color() {
        let c = Color::new(0.25, 0.5, 0.75, 1.0);
        let buf = PixelBuffer::filled(3, 2, c).unwrap();
        assert_eq!(buf.data.len(), 24);
        assert_eq!(buf.pixel(2, 1), c);
    }

    #[test]
    fn set_pixel_roundtrip() {
        let mut buf = PixelBuffer::filled(4, 4, Color::TRANSPARENT).unwrap();
        let c = Color::opaque(1.0, 0.0, 0.0);
        buf.set_pixel(1, 3, c);
        assert_eq!(buf.pixel(1, 3), c);
        assert_eq!(buf.pixel(0, 0), Color::TRANSPARENT);
    }

    #[test]
    fn channels_within_uses_per_channel_tolerance() {
        let a = Color::new(0.5, 0.5, 0.5, 1.0);
        let b = Color::new(0.5 + 0.003, 0.5, 0.5, 1.0);
        assert!(a.channels_within(b, 1.0 / 255.0));
        let c = Color::new(0.5 + 0.01, 0.5, 0.5, 1.0);
        assert!(!a.channels_within(c, 1.0 / 255.0));
    }

    #[test]
    fn parameters_json_roundtrip() {
        let p = TransformParameters {
            offset_x: 10.0,
            angle_radians: 0.5,
            scale_x: 2.0,
            pivot_x: 32.0,
            pivot_y: 16.0,
            ..TransformParameters::default()
        };
        let s = serde_json::to_string(&p).unwrap();
        let de: TransformParameters = serde_json::from_str(&s).unwrap();
        assert_eq!(de, p);
    }

    #[test]
    fn default_parameters_are_identity() {
        let t = TransformParameters::default().to_affine();
        assert!(crate::affine::is_identity(t));
    }
}
