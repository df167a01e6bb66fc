//! Materials and the shared placeholder textures they default to.

use crate::INVALID_INDEX;

/// Well-known indices into every scene's texture array.
///
/// These placeholders are loaded once at scene construction, before any
/// file-backed texture, so materials can reference them without null
/// checks anywhere in the pipeline.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StaticTexture {
    Black = 0,
    Invalid = 1,
    FlatNormal = 2,
    ScramblingRanking1spp = 3,
    SobolSequence = 4,
}

impl StaticTexture {
    /// Number of placeholder slots reserved at the front of the texture array.
    pub const COUNT: u32 = 5;

    pub fn index(self) -> u32 {
        self as u32
    }
}

/// How a material's alpha channel is meant to be interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlphaMode {
    #[default]
    Opaque,
    Premultiplied,
    Transparent,
    /// Alpha is 0 everywhere.
    Off,
}

/// Texture-map indices plus alpha classification for pipeline selection.
///
/// Map indices point into the owning scene's texture array and default to
/// the [`StaticTexture`] placeholders, never to [`INVALID_INDEX`].
#[derive(Clone, Copy, Debug)]
pub struct Material {
    pub diffuse_map_index: u32,
    pub specular_map_index: u32,
    pub normal_map_index: u32,
    pub emissive_map_index: u32,
    pub alpha_mode: AlphaMode,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_map_index: StaticTexture::Black.index(),
            specular_map_index: StaticTexture::Black.index(),
            normal_map_index: StaticTexture::FlatNormal.index(),
            emissive_map_index: StaticTexture::Black.index(),
            alpha_mode: AlphaMode::Opaque,
        }
    }
}

impl Material {
    pub fn is_opaque(&self) -> bool {
        self.alpha_mode == AlphaMode::Opaque
    }

    pub fn is_alpha_opaque(&self) -> bool {
        self.alpha_mode == AlphaMode::Premultiplied
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha_mode == AlphaMode::Transparent
    }

    pub fn is_off(&self) -> bool {
        self.alpha_mode == AlphaMode::Off
    }

    /// A material is emissive iff its emissive map is a real texture
    /// rather than the shared black placeholder.
    pub fn is_emissive(&self) -> bool {
        self.emissive_map_index != StaticTexture::Black.index()
    }

    /// True if any map index points outside `texture_num` or is unset.
    pub fn has_dangling_maps(&self, texture_num: usize) -> bool {
        [
            self.diffuse_map_index,
            self.specular_map_index,
            self.normal_map_index,
            self.emissive_map_index,
        ]
        .iter()
        .any(|&index| index == INVALID_INDEX || index as usize >= texture_num)
    }
}
