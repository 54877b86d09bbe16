//! GIF container parsing and LZW image data decoding.
//!
//! The reader walks header, logical screen descriptor, color tables,
//! extensions and image descriptors; compressed image data is collected from
//! the sub-block stream and decoded separately into a palette index stream.

mod lzw;
mod reader;

pub use lzw::decode_lzw;
pub use reader::{
    decode_gif_image, parse_gif, ApplicationExt, ColorTable, CommentExt, Extension, GifFile,
    GifImage, GraphicsControlExt, ImageDescriptor, LogicalScreenDescriptor, PlainTextExt,
    EXTENSION_INTRODUCER, GIF_TRAILER, IMAGE_SEPARATOR,
};
