//! Captured bitmaps and their PNG encoding

use image::{imageops, ImageFormat, RgbaImage};
use std::io::Cursor;

use super::error::CaptureError;
use super::geometry::CropRegion;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureKind {
    Fullscreen,
    Area,
}

impl CaptureKind {
    /// Label embedded in saved file names.
    pub fn label(&self) -> &'static str {
        match self {
            CaptureKind::Fullscreen => "fullscreen",
            CaptureKind::Area => "area_selection",
        }
    }
}

/// PNG bytes, the only format that crosses the bridge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage(Vec<u8>);

impl EncodedImage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// The result of a finished capture.
#[derive(Clone, Debug)]
pub struct CapturedImage {
    pub kind: CaptureKind,
    pub pixels: RgbaImage,
    pub encoded: EncodedImage,
}

impl CapturedImage {
    pub fn new(kind: CaptureKind, pixels: RgbaImage) -> Result<Self, CaptureError> {
        let encoded = encode_png(&pixels)?;
        Ok(Self {
            kind,
            pixels,
            encoded,
        })
    }
}

pub fn encode_png(image: &RgbaImage) -> Result<EncodedImage, CaptureError> {
    let mut png_bytes: Vec<u8> = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| CaptureError::Encoding(e.to_string()))?;
    Ok(EncodedImage(png_bytes))
}

/// Copy `region` of `frame` into a new bitmap of the region's size.
pub fn crop_frame(frame: &RgbaImage, region: CropRegion) -> Result<RgbaImage, CaptureError> {
    if region.width == 0 || region.height == 0 {
        return Err(CaptureError::Encoding(
            "Crop rectangle has zero width or height".to_string(),
        ));
    }
    if region.x + region.width > frame.width() || region.y + region.height > frame.height() {
        return Err(CaptureError::Encoding(format!(
            "Crop rectangle ({},{},{},{}) exceeds image bounds ({}x{})",
            region.x,
            region.y,
            region.width,
            region.height,
            frame.width(),
            frame.height()
        )));
    }

    Ok(imageops::crop_imm(frame, region.x, region.y, region.width, region.height).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn encoded_image_is_png() {
        let encoded = encode_png(&RgbaImage::new(4, 4)).unwrap();
        assert_eq!(&encoded.as_bytes()[..4], &[0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn crop_copies_the_requested_pixels() {
        let mut frame = RgbaImage::new(100, 80);
        frame.put_pixel(50, 30, Rgba([255, 0, 0, 255]));
        frame.put_pixel(30, 20, Rgba([0, 255, 0, 255]));

        let cropped = crop_frame(
            &frame,
            CropRegion {
                x: 30,
                y: 20,
                width: 20,
                height: 10,
            },
        )
        .unwrap();
        assert_eq!(cropped.dimensions(), (20, 10));
        assert_eq!(cropped.get_pixel(0, 0), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn crop_out_of_bounds_fails() {
        let frame = RgbaImage::new(100, 100);
        let result = crop_frame(
            &frame,
            CropRegion {
                x: 80,
                y: 80,
                width: 30,
                height: 30,
            },
        );
        assert!(matches!(result, Err(CaptureError::Encoding(_))));
    }

    #[test]
    fn kind_labels_match_file_names() {
        assert_eq!(CaptureKind::Fullscreen.label(), "fullscreen");
        assert_eq!(CaptureKind::Area.label(), "area_selection");
    }
}
