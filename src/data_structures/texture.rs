//! Texture descriptors and subresource geometry.
//!
//! This module provides [`Texture`], the CPU-side description of a loaded
//! texture: its decoded mip chain, format, dimensions and alpha
//! classification. It computes per-mip/per-layer subresource layouts
//! (row/slice pitch) for the graphics-API collaborator that performs the
//! actual upload; no GPU resources are created here.

use wgpu::TextureFormat;
use xxhash_rust::xxh3::xxh3_64;

use crate::data_structures::material::AlphaMode;

/// Upload layout of one mip level of one array slice.
///
/// The numeric fields follow the upload descriptor the graphics backend
/// consumes: pitches are in bytes, dimensions in texels. For
/// block-compressed formats the pitch covers whole 4x4 blocks.
#[derive(Debug)]
pub struct TextureSubresource<'a> {
    pub data: &'a [u8],
    pub row_pitch: u32,
    pub slice_pitch: u32,
    pub width: u32,
    pub height: u32,
}

/// A loaded texture: decoded pixel buffers plus the metadata needed to
/// address and upload them.
///
/// The mip chain holds one buffer per mip and array slice; mip `i` of array
/// slice `a` lives at index `a * mip_num + i`. Buffers are exclusively
/// owned and released when the owning scene unloads texture data.
#[derive(Clone, Debug, Default)]
pub struct Texture {
    pub mips: Vec<Vec<u8>>,
    pub name: String,
    pub hash: u64,
    pub alpha_mode: AlphaMode,
    pub format: Option<TextureFormat>,
    pub width: u16,
    pub height: u16,
    pub depth: u16,
    pub mip_num: u16,
    pub array_size: u16,
}

impl Texture {
    /// Describe an already-decoded texture.
    ///
    /// `mips` must hold `array_size` consecutive mip chains of equal
    /// length; the content hash is derived from the top-level mip so
    /// identical textures loaded twice can be deduplicated.
    pub fn from_decoded(
        name: impl Into<String>,
        format: TextureFormat,
        width: u16,
        height: u16,
        depth: u16,
        array_size: u16,
        mips: Vec<Vec<u8>>,
    ) -> Self {
        assert!(array_size >= 1, "texture needs at least one array slice");
        assert!(
            !mips.is_empty() && mips.len() % array_size as usize == 0,
            "mip count {} does not cover {} array slices evenly",
            mips.len(),
            array_size
        );

        let hash = xxh3_64(&mips[0]);
        let mip_num = (mips.len() / array_size as usize) as u16;

        Self {
            mips,
            name: name.into(),
            hash,
            alpha_mode: AlphaMode::Opaque,
            format: Some(format),
            width,
            height,
            depth: depth.max(1),
            mip_num,
            array_size,
        }
    }

    /// Reinterpret the pixel data under a different format, e.g. to view
    /// sRGB data as linear. Dimensions and pitch math must stay compatible.
    pub fn override_format(&mut self, format: TextureFormat) {
        self.format = Some(format);
    }

    pub fn array_size(&self) -> u16 {
        self.array_size
    }

    pub fn mip_num(&self) -> u16 {
        self.mip_num
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn depth(&self) -> u16 {
        self.depth
    }

    pub fn format(&self) -> Option<TextureFormat> {
        self.format
    }

    /// True iff the format stores fixed-size compressed texel blocks
    /// (BCn et al.) rather than per-texel data.
    pub fn is_block_compressed(&self) -> bool {
        self.format.is_some_and(|format| format.is_compressed())
    }

    /// Compute the upload layout of `mip_index` within `array_index`.
    ///
    /// Mip dimensions halve per level and floor at 1. Block-compressed
    /// formats round the pitch up to whole blocks, uncompressed formats
    /// use texels times bytes-per-texel.
    ///
    /// # Panics
    ///
    /// Indices are owned by the caller and assumed pre-validated: an
    /// out-of-range mip or array index, a volume texture or a format
    /// without a defined copy footprint aborts.
    pub fn subresource(&self, mip_index: u16, array_index: u16) -> TextureSubresource<'_> {
        assert!(
            mip_index < self.mip_num,
            "mip {} out of range, texture '{}' has {} mips",
            mip_index,
            self.name,
            self.mip_num
        );
        assert!(
            array_index < self.array_size,
            "array slice {} out of range, texture '{}' has {} slices",
            array_index,
            self.name,
            self.array_size
        );
        // The upload path slices 2D subresources only.
        assert!(
            self.depth <= 1,
            "volume texture '{}' cannot be sliced per mip",
            self.name
        );
        let format = self
            .format
            .unwrap_or_else(|| panic!("texture '{}' has no format", self.name));

        let width = (u32::from(self.width) >> mip_index).max(1);
        let height = (u32::from(self.height) >> mip_index).max(1);

        // (1, 1) for uncompressed formats, so one formula covers both.
        let (block_width, block_height) = format.block_dimensions();
        let block_size = format
            .block_copy_size(None)
            .unwrap_or_else(|| panic!("format {format:?} has no copy footprint"));

        let row_pitch = width.div_ceil(block_width) * block_size;
        let slice_pitch = row_pitch * height.div_ceil(block_height);

        TextureSubresource {
            data: &self.mips[array_index as usize * self.mip_num as usize + mip_index as usize],
            row_pitch,
            slice_pitch,
            width,
            height,
        }
    }
}
