use super::EnvironmentMapError;
use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;
use half::f16;
use std::f32::consts::{FRAC_1_PI, PI};

/// Linear RGB panorama in equirectangular projection, row 0 at the zenith.
pub struct EquirectImage {
    width: u32,
    height: u32,
    texels: Vec<Vec3>,
}

impl EquirectImage {
    pub fn new(width: u32, height: u32, texels: Vec<Vec3>) -> Result<Self, EnvironmentMapError> {
        if width == 0 || height == 0 {
            return Err(EnvironmentMapError::EmptyImage);
        }
        let expected = (width * height) as usize;
        if texels.len() != expected {
            return Err(EnvironmentMapError::DataLengthMismatch {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Decode a float RGBA image as produced by Bevy's Radiance HDR loader.
    pub fn from_image(image: &Image) -> Result<Self, EnvironmentMapError> {
        let size = image.texture_descriptor.size;
        let format = image.texture_descriptor.format;
        let data = image
            .data
            .as_deref()
            .ok_or(EnvironmentMapError::MissingData)?;

        let channel_bytes = match format {
            TextureFormat::Rgba32Float => 4,
            TextureFormat::Rgba16Float => 2,
            other => return Err(EnvironmentMapError::UnsupportedFormat(other)),
        };

        // Only the first layer and mip are read; anything past it is ignored.
        let texel_count = (size.width * size.height) as usize;
        let expected = texel_count * channel_bytes * 4;
        if data.len() < expected {
            return Err(EnvironmentMapError::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        let texels = data[..expected]
            .chunks_exact(channel_bytes * 4)
            .map(|texel| {
                let channel = |i: usize| {
                    let bytes = &texel[i * channel_bytes..(i + 1) * channel_bytes];
                    match channel_bytes {
                        4 => f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
                        _ => f16::from_le_bytes([bytes[0], bytes[1]]).to_f32(),
                    }
                };
                Vec3::new(channel(0), channel(1), channel(2))
            })
            .collect();

        Self::new(size.width, size.height, texels)
    }

    /// Bilinear sample along a world direction. Wraps horizontally, clamps at the poles.
    pub fn sample(&self, direction: Vec3) -> Vec3 {
        let uv = direction_to_equirect_uv(direction);
        let x = uv.x * self.width as f32 - 0.5;
        let y = uv.y * self.height as f32 - 0.5;

        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let column = |offset: f32| (x0 + offset).rem_euclid(self.width as f32) as u32;
        let row = |offset: f32| (y0 + offset).clamp(0.0, (self.height - 1) as f32) as u32;

        let top = self
            .texel(column(0.0), row(0.0))
            .lerp(self.texel(column(1.0), row(0.0)), fx);
        let bottom = self
            .texel(column(0.0), row(1.0))
            .lerp(self.texel(column(1.0), row(1.0)), fx);
        top.lerp(bottom, fy)
    }

    fn texel(&self, x: u32, y: u32) -> Vec3 {
        let x = x.min(self.width - 1);
        self.texels[(y * self.width + x) as usize]
    }
}

/// Longitude from +X towards +Z maps to u (0.5 at +X), latitude to v with
/// v = 0 at +Y. Matches the panorama orientation three.js-style viewers use.
pub fn direction_to_equirect_uv(direction: Vec3) -> Vec2 {
    let direction = direction.normalize_or(Vec3::Y);
    let u = direction.z.atan2(direction.x) * (0.5 / PI) + 0.5;
    let v = 0.5 - direction.y.clamp(-1.0, 1.0).asin() * FRAC_1_PI;
    Vec2::new(u, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn zenith_and_nadir_map_to_top_and_bottom_rows() {
        assert_relative_eq!(direction_to_equirect_uv(Vec3::Y).y, 0.0);
        assert_relative_eq!(direction_to_equirect_uv(Vec3::NEG_Y).y, 1.0);
    }

    #[test]
    fn horizon_longitudes() {
        let east = direction_to_equirect_uv(Vec3::X);
        assert_relative_eq!(east.x, 0.5);
        assert_relative_eq!(east.y, 0.5);

        assert_relative_eq!(direction_to_equirect_uv(Vec3::Z).x, 0.75);
        assert_relative_eq!(direction_to_equirect_uv(Vec3::NEG_Z).x, 0.25);
    }

    #[test]
    fn sampling_wraps_across_the_seam() {
        // Two columns: left half red, right half blue. The -X direction sits
        // exactly on the seam, so it blends the outer edges of both columns.
        let image = EquirectImage::new(2, 1, vec![Vec3::X, Vec3::Z]).unwrap();
        let seam = image.sample(Vec3::NEG_X);

        assert_relative_eq!(seam.x, 0.5, epsilon = 1e-4);
        assert_relative_eq!(seam.z, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn rejects_mismatched_texel_count() {
        let result = EquirectImage::new(2, 2, vec![Vec3::ONE]);
        assert!(matches!(
            result,
            Err(EnvironmentMapError::DataLengthMismatch {
                expected: 4,
                actual: 1
            })
        ));
    }

    #[test]
    fn decodes_half_float_images() {
        use bevy::asset::RenderAssetUsages;
        use bevy::render::render_resource::{Extent3d, TextureDimension};

        let texel: Vec<u8> = [2.0_f32, 0.5, 0.25, 1.0]
            .iter()
            .flat_map(|channel| f16::from_f32(*channel).to_le_bytes())
            .collect();
        let image = Image::new_fill(
            Extent3d::default(),
            TextureDimension::D2,
            &texel,
            TextureFormat::Rgba16Float,
            RenderAssetUsages::MAIN_WORLD,
        );

        let decoded = EquirectImage::from_image(&image).unwrap();
        assert_eq!(decoded.sample(Vec3::X), Vec3::new(2.0, 0.5, 0.25));
    }
}
