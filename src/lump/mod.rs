//! Mip-texture lumps

mod parse;
mod repr;

pub use parse::decode_mip_texture;
pub use repr::{Image, MipTextureHead, TextureRecord};
