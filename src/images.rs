use std::path::Path;

use exr::image::{Image, Layer, SpecificChannels};
use exr::image::write::channels::GetPixel;
use exr::math::Vec2;
use exr::meta::attribute::{ChannelDescription, SampleType};
use exr::prelude::WritableImage;
use imgref::ImgRef;

use crate::common::scene::Color;

pub type DiscreteImage = image::ImageBuffer<image::Rgb<u8>, Vec<u8>>;

const PPM_MAX_LINE_LENGTH: usize = 70;

/// Clamp to `[0, 1]` and scale to `[0, 255]`, rounding to the nearest integer.
pub fn to_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert the given image to a format suitable for saving to a png file.
/// The first returned image is the image itself, the second one shows where values had to be clipped
/// to fit into the image format.
pub fn to_discrete_image(image: ImgRef<Color>) -> (DiscreteImage, DiscreteImage) {
    let mut result = DiscreteImage::new(image.width() as u32, image.height() as u32);
    let mut clipped = DiscreteImage::new(image.width() as u32, image.height() as u32);

    let clip = |v: f64| if (0.0..=1.0).contains(&v) { 0 } else { 255 };

    for (x, y, p) in result.enumerate_pixels_mut() {
        let color: Color = image[(x, y)];

        *p = image::Rgb([to_byte(color.red), to_byte(color.green), to_byte(color.blue)]);
        clipped[(x, y)] = image::Rgb([clip(color.red), clip(color.green), clip(color.blue)]);
    }

    (result, clipped)
}

pub fn save_png(image: ImgRef<Color>, path: impl AsRef<Path>) -> image::ImageResult<()> {
    let (discrete, _) = to_discrete_image(image);
    discrete.save(path)
}

pub struct ImageWrapper<'a>(ImgRef<'a, Color>);
pub type ChannelTuple = (ChannelDescription, ChannelDescription, ChannelDescription);

/// Convert the given image to the exr file format, keeping values outside of `[0, 1]`.
pub fn to_exr_image(image: ImgRef<Color>) -> Image<Layer<SpecificChannels<ImageWrapper, ChannelTuple>>> {
    impl GetPixel for ImageWrapper<'_> {
        type Pixel = (f32, f32, f32);

        fn get_pixel(&self, Vec2(x, y): Vec2<usize>) -> Self::Pixel {
            let color = self.0[(x, y)];
            (color.red as f32, color.green as f32, color.blue as f32)
        }
    }

    let channels = SpecificChannels {
        channels: (
            ChannelDescription::named("R", SampleType::F32),
            ChannelDescription::named("G", SampleType::F32),
            ChannelDescription::named("B", SampleType::F32),
        ),
        pixels: ImageWrapper(image),
    };

    Image::from_channels((image.width(), image.height()), channels)
}

pub fn save_exr(image: ImgRef<Color>, path: impl AsRef<Path>) -> exr::error::Result<()> {
    to_exr_image(image).write().to_file(path)
}

/// Encode as a plain-text PPM, every row starts on a new line and no line exceeds 70 characters.
pub fn to_ppm(image: ImgRef<Color>) -> String {
    let mut result = format!("P3\n{} {}\n255\n", image.width(), image.height());

    for row in image.rows() {
        let mut line = String::new();

        for color in row {
            for value in [color.red, color.green, color.blue] {
                let token = to_byte(value).to_string();

                if !line.is_empty() && line.len() + 1 + token.len() > PPM_MAX_LINE_LENGTH {
                    result.push_str(&line);
                    result.push('\n');
                    line.clear();
                }
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(&token);
            }
        }

        result.push_str(&line);
        result.push('\n');
    }

    result
}
