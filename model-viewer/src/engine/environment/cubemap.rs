use super::equirect::EquirectImage;
use bevy::asset::RenderAssetUsages;
use bevy::image::{ImageFilterMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_resource::{
    Extent3d, TextureDimension, TextureFormat, TextureViewDescriptor, TextureViewDimension,
};
use half::f16;

/// Cube faces in the layer order wgpu expects for cube views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    /// Lookup direction for face coordinates `s`, `t` in [-1, 1], with `t`
    /// growing downwards in texel space. Not normalised.
    pub fn direction(self, s: f32, t: f32) -> Vec3 {
        match self {
            CubeFace::PositiveX => Vec3::new(1.0, -t, -s),
            CubeFace::NegativeX => Vec3::new(-1.0, -t, s),
            CubeFace::PositiveY => Vec3::new(s, 1.0, t),
            CubeFace::NegativeY => Vec3::new(s, -1.0, -t),
            CubeFace::PositiveZ => Vec3::new(s, -t, 1.0),
            CubeFace::NegativeZ => Vec3::new(-s, -t, -1.0),
        }
    }
}

/// Face coordinates of the centre of texel (`x`, `y`) on a face of `size` texels.
pub fn texel_face_coords(x: u32, y: u32, size: u32) -> Vec2 {
    Vec2::new(
        2.0 * (x as f32 + 0.5) / size as f32 - 1.0,
        2.0 * (y as f32 + 0.5) / size as f32 - 1.0,
    )
}

/// Normalised lookup direction through the centre of a texel.
pub fn texel_direction(face: CubeFace, x: u32, y: u32, size: u32) -> Vec3 {
    let coords = texel_face_coords(x, y, size);
    face.direction(coords.x, coords.y).normalize()
}

/// Bevy samples cubemaps in a left-handed frame, flipping Z relative to the world.
pub fn lookup_to_world(direction: Vec3) -> Vec3 {
    Vec3::new(direction.x, direction.y, -direction.z)
}

/// Mip levels for a power-of-two face down to 1x1.
pub fn mip_level_count(face_size: u32) -> u32 {
    face_size.max(1).ilog2() + 1
}

/// One mip level of a cubemap: six square faces of linear RGB texels.
#[derive(Debug, Clone)]
pub struct CubeMip {
    pub size: u32,
    pub faces: [Vec<Vec3>; 6],
}

impl CubeMip {
    pub fn from_fn(size: u32, mut texel: impl FnMut(CubeFace, u32, u32) -> Vec3) -> Self {
        let faces = CubeFace::ALL.map(|face| {
            (0..size * size)
                .map(|index| texel(face, index % size, index / size))
                .collect()
        });
        Self { size, faces }
    }

    pub fn from_equirect(source: &EquirectImage, size: u32) -> Self {
        Self::from_fn(size, |face, x, y| {
            source.sample(lookup_to_world(texel_direction(face, x, y, size)))
        })
    }

    pub fn texel(&self, face: usize, x: u32, y: u32) -> Vec3 {
        self.faces[face][(y * self.size + x) as usize]
    }

    /// 2x2 box filter into a level of half the size.
    pub fn downsample(&self) -> Self {
        let size = (self.size / 2).max(1);
        let mut faces: [Vec<Vec3>; 6] = Default::default();

        for (face_index, face) in faces.iter_mut().enumerate() {
            *face = (0..size * size)
                .map(|index| {
                    let (x, y) = (index % size, index / size);
                    let (sx, sy) = (x * 2, y * 2);
                    let right = (sx + 1).min(self.size - 1);
                    let below = (sy + 1).min(self.size - 1);
                    (self.texel(face_index, sx, sy)
                        + self.texel(face_index, right, sy)
                        + self.texel(face_index, sx, below)
                        + self.texel(face_index, right, below))
                        * 0.25
                })
                .collect();
        }

        Self { size, faces }
    }
}

/// Base level followed by successively halved levels down to 1x1.
pub fn mip_chain(base: CubeMip) -> Vec<CubeMip> {
    let count = mip_level_count(base.size) as usize;
    let mut levels = Vec::with_capacity(count);
    levels.push(base);
    for _ in 1..count {
        let next = levels[levels.len() - 1].downsample();
        levels.push(next);
    }
    levels
}

/// Cosine-weighted irradiance of `source`, normalised so a uniform
/// environment keeps its radiance.
pub fn irradiance(source: &CubeMip, size: u32) -> CubeMip {
    // (direction, radiance * solid angle, solid angle) for every source texel.
    let samples: Vec<(Vec3, Vec3, f32)> = CubeFace::ALL
        .iter()
        .enumerate()
        .flat_map(|(face_index, &face)| {
            (0..source.size * source.size).map(move |index| {
                let (x, y) = (index % source.size, index / source.size);
                let coords = texel_face_coords(x, y, source.size);
                let solid_angle = texel_solid_angle(coords, source.size);
                (
                    face.direction(coords.x, coords.y).normalize(),
                    source.texel(face_index, x, y) * solid_angle,
                    solid_angle,
                )
            })
        })
        .collect();

    CubeMip::from_fn(size, |face, x, y| {
        let normal = texel_direction(face, x, y, size);
        let mut radiance = Vec3::ZERO;
        let mut weight = 0.0;
        for (direction, weighted, solid_angle) in &samples {
            let cosine = normal.dot(*direction);
            if cosine > 0.0 {
                radiance += *weighted * cosine;
                weight += solid_angle * cosine;
            }
        }
        if weight > 0.0 { radiance / weight } else { Vec3::ZERO }
    })
}

/// Approximate solid angle subtended by a texel centred at `coords`.
fn texel_solid_angle(coords: Vec2, size: u32) -> f32 {
    let texel_area = (2.0 / size as f32).powi(2);
    let distance_sq = 1.0 + coords.length_squared();
    texel_area / (distance_sq * distance_sq.sqrt())
}

/// Pack levels as `Rgba16Float`, all mips of a face before the next face.
pub fn pack_rgba16f(levels: &[CubeMip]) -> Vec<u8> {
    let mut texels: Vec<f16> = Vec::new();
    for face in 0..6 {
        for level in levels {
            for texel in &level.faces[face] {
                texels.extend([
                    f16::from_f32(texel.x),
                    f16::from_f32(texel.y),
                    f16::from_f32(texel.z),
                    f16::ONE,
                ]);
            }
        }
    }
    bytemuck::cast_slice::<f16, u8>(&texels).to_vec()
}

/// Cube-view `Image` from a mip chain whose first entry is the base level.
pub fn cube_image(levels: &[CubeMip]) -> Image {
    let face_size = levels.first().map_or(1, |level| level.size);

    let mut image = Image::new_uninit(
        Extent3d {
            width: face_size,
            height: face_size,
            depth_or_array_layers: 6,
        },
        TextureDimension::D2,
        TextureFormat::Rgba16Float,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.data = Some(pack_rgba16f(levels));
    image.texture_descriptor.mip_level_count = levels.len().max(1) as u32;
    image.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    image.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
        mag_filter: ImageFilterMode::Linear,
        min_filter: ImageFilterMode::Linear,
        mipmap_filter: ImageFilterMode::Linear,
        ..default()
    });
    image
}
