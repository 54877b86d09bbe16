//! BMP container parsing: file header, DIB header dispatch, palette and the
//! pixel data span. Pixels themselves are never decoded.

mod reader;

pub use reader::{
    parse_bmp, BmpFile, DibHeader, FileHeader, InfoHeader, PaletteEntry, V5Header,
};
