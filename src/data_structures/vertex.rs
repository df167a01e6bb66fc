//! Packed vertex records and the pack/unpack codec.
//!
//! Vertices are stored GPU-ready: positions stay full float, UVs are two
//! half floats in one 32-bit word and normals/tangents are 10:10:10:2
//! unsigned-normalized words. [`UnpackedVertex`] is the expanded float form
//! used for CPU-side processing such as AABB/hull generation.
//!
//! The codec is pure and stateless so its numeric contract can be tested
//! independently of geometry loading.

use half::f16;

/// GPU-resident vertex as it lives in the shared vertex buffer.
///
/// Layout (repr(C), tightly packed):
/// - `position`: 3 x f32
/// - `uv`: two half floats, U in the low 16 bits, V in the high 16 bits
/// - `normal`: 10:10:10:2 unorm, 2-bit field unused
/// - `tangent`: 10:10:10:2 unorm, 2-bit field encodes handedness
///   (`0` means -1, `1` means +1, upper bit reserved)
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: u32,
    pub normal: u32,
    pub tangent: u32,
}

/// Fully expanded float vertex used on the CPU before packing.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct UnpackedVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
    pub tangent: [f32; 4],
}

/// Convert one component from `[-1, 1]` to a 10-bit unorm field.
///
/// Out-of-range input is clamped, the caller is expected to hand in
/// normalized data.
fn pack_unorm_10(value: f32) -> u32 {
    ((value.clamp(-1.0, 1.0) * 0.5 + 0.5) * 1023.0).round() as u32
}

/// Inverse of [`pack_unorm_10`], exact to within one quantization step (1/1023).
fn unpack_unorm_10(bits: u32) -> f32 {
    ((bits & 0x3ff) as f32 / 1023.0) * 2.0 - 1.0
}

fn pack_unorm_10_10_10(v: [f32; 3]) -> u32 {
    pack_unorm_10(v[0]) | (pack_unorm_10(v[1]) << 10) | (pack_unorm_10(v[2]) << 20)
}

fn unpack_unorm_10_10_10(bits: u32) -> [f32; 3] {
    [
        unpack_unorm_10(bits),
        unpack_unorm_10(bits >> 10),
        unpack_unorm_10(bits >> 20),
    ]
}

impl Vertex {
    /// Pack an expanded vertex into the GPU layout.
    pub fn pack(vertex: &UnpackedVertex) -> Self {
        let u = f16::from_f32(vertex.uv[0]).to_bits() as u32;
        let v = f16::from_f32(vertex.uv[1]).to_bits() as u32;

        // Handedness lives in the low bit of the tangent's 2-bit field,
        // the upper bit stays zero.
        let handedness = if vertex.tangent[3] < 0.0 { 0 } else { 1 };

        Self {
            position: vertex.position,
            uv: u | (v << 16),
            normal: pack_unorm_10_10_10(vertex.normal),
            tangent: pack_unorm_10_10_10([vertex.tangent[0], vertex.tangent[1], vertex.tangent[2]])
                | (handedness << 30),
        }
    }

    /// Expand a packed vertex back into floats.
    ///
    /// Exact for the half-float UVs, within 1/1023 for the unorm
    /// normal/tangent components.
    pub fn unpack(&self) -> UnpackedVertex {
        let tangent_xyz = unpack_unorm_10_10_10(self.tangent);
        let handedness = if (self.tangent >> 30) & 0x1 == 1 {
            1.0
        } else {
            -1.0
        };

        UnpackedVertex {
            position: self.position,
            uv: [
                f16::from_bits(self.uv as u16).to_f32(),
                f16::from_bits((self.uv >> 16) as u16).to_f32(),
            ],
            normal: unpack_unorm_10_10_10(self.normal),
            tangent: [tangent_xyz[0], tangent_xyz[1], tangent_xyz[2], handedness],
        }
    }
}

impl From<&UnpackedVertex> for Vertex {
    fn from(vertex: &UnpackedVertex) -> Self {
        Self::pack(vertex)
    }
}

impl From<&Vertex> for UnpackedVertex {
    fn from(vertex: &Vertex) -> Self {
        vertex.unpack()
    }
}
