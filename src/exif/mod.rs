//! TIFF/EXIF IFD parsing.
//!
//! Walks the root IFD and the EXIF (tag 34665) and GPS (tag 34853) sub-IFDs,
//! decoding each field's typed value with the classic-TIFF inline
//! optimization: payloads of four bytes or fewer live inside the entry's
//! value/offset cell instead of behind a pointer.

mod reader;
mod tags;

pub use reader::{
    parse_exif, type_width, ExifData, ExifField, ExifValue, Rational, SRational, IFD_ENTRY_LEN,
    TAG_EXIF_IFD, TAG_GPS_IFD, TIFF_BIG, TIFF_LITTLE, TIFF_MAGIC, TYPE_ASCII, TYPE_BYTE,
    TYPE_LONG, TYPE_RATIONAL, TYPE_SHORT, TYPE_SLONG, TYPE_SRATIONAL, TYPE_UNDEFINED,
};
pub use tags::{lookup_tag, TagInfo};
