use image::RgbaImage;
use wgpu::TextureFormat;

/// CPU copy of a 2D texture.
#[derive(Debug, Clone)]
pub struct Texture {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub data: Vec<u8>,
}

impl Texture {
    /// Wraps a decoded RGBA image as an sRGB texture.
    #[must_use]
    pub fn from_image(name: impl Into<String>, image: &RgbaImage) -> Self {
        Self {
            name: name.into(),
            width: image.width(),
            height: image.height(),
            format: TextureFormat::Rgba8UnormSrgb,
            data: image.as_raw().clone(),
        }
    }

    #[inline]
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_from_image_copies_pixels() {
        let image = RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 255]));
        let texture = Texture::from_image("camera", &image);
        assert_eq!((texture.width, texture.height), (4, 2));
        assert_eq!(texture.byte_size(), 4 * 2 * 4);
        assert_eq!(texture.format, TextureFormat::Rgba8UnormSrgb);
    }
}
