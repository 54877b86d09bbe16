//! ZIP central directory parsing.
//!
//! Only the End-of-Central-Directory record (located by reverse scan) and
//! the Central Directory File Headers are read; local file headers and data
//! descriptors are not needed to enumerate archive contents.

mod reader;

pub use reader::{
    parse_zip, CentralDirectoryFileHeader, EndOfCentralDirectory, ZipArchive, CDFH_SIGNATURE,
    EOCD_SIGNATURE,
};
