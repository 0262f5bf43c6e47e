//! Image-based lighting built from an equirectangular HDRI.
//!
//! Bevy's `EnvironmentMapLight` expects prefiltered cubemaps, so the loaded
//! panorama is resampled on the CPU into a mipmapped specular cubemap and a
//! small diffuse irradiance cubemap.

/// Cube face orientation, mip chain and half-float packing.
pub mod cubemap;

/// Equirectangular panorama sampling.
pub mod equirect;

use crate::constants::render_settings::{DIFFUSE_FACE_SIZE, IRRADIANCE_SOURCE_SIZE};
use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;
use cubemap::{CubeMip, cube_image, irradiance, mip_chain};
use equirect::EquirectImage;

/// Errors raised while turning a loaded panorama into cubemaps.
#[derive(Debug, Clone, PartialEq)]
pub enum EnvironmentMapError {
    MissingData,
    EmptyImage,
    UnsupportedFormat(TextureFormat),
    DataLengthMismatch { expected: usize, actual: usize },
    InvalidFaceSize(u32),
}

impl std::fmt::Display for EnvironmentMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvironmentMapError::MissingData => {
                write!(f, "Environment image has no CPU-side pixel data")
            }
            EnvironmentMapError::EmptyImage => write!(f, "Environment image has zero size"),
            EnvironmentMapError::UnsupportedFormat(format) => {
                write!(f, "Unsupported environment image format: {:?}", format)
            }
            EnvironmentMapError::DataLengthMismatch { expected, actual } => write!(
                f,
                "Environment image data is {} bytes, expected {}",
                actual, expected
            ),
            EnvironmentMapError::InvalidFaceSize(size) => {
                write!(f, "Cubemap face size {} is not a power of two", size)
            }
        }
    }
}

impl std::error::Error for EnvironmentMapError {}

/// Diffuse and specular cubemaps ready to be added to `Assets<Image>`.
pub struct EnvironmentMaps {
    pub diffuse: Image,
    pub specular: Image,
}

/// Resample an equirectangular HDR image into the cubemap pair used for
/// image-based lighting.
pub fn build_environment_maps(
    panorama: &Image,
    face_size: u32,
) -> Result<EnvironmentMaps, EnvironmentMapError> {
    if !face_size.is_power_of_two() {
        return Err(EnvironmentMapError::InvalidFaceSize(face_size));
    }

    let source = EquirectImage::from_image(panorama)?;
    let specular_levels = mip_chain(CubeMip::from_equirect(&source, face_size));

    // Integrate over a coarse mip; the base level is far more detail than a
    // cosine lobe can resolve.
    let irradiance_source = specular_levels
        .iter()
        .find(|level| level.size <= IRRADIANCE_SOURCE_SIZE)
        .unwrap_or(&specular_levels[specular_levels.len() - 1]);
    let diffuse_level = irradiance(irradiance_source, DIFFUSE_FACE_SIZE.min(face_size));

    Ok(EnvironmentMaps {
        diffuse: cube_image(std::slice::from_ref(&diffuse_level)),
        specular: cube_image(&specular_levels),
    })
}
