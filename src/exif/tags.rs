//! Static EXIF tag dictionary.
//!
//! Tag numbers are resolved across the Image, Photo, Iop, GPSInfo and
//! MpfInfo namespaces in that order; the first namespace holding the number
//! wins (e.g. 33434 resolves to `Exif.Image.ExposureTime`, which shadows
//! `Exif.Photo`'s entry).

/// Dictionary entry for one tag number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {
    pub namespace: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

type TagTable = &'static [(u16, &'static str, &'static str)];

const IMAGE_TAGS: TagTable = &[
    (254, "NewSubfileType", "General indication of the kind of data"),
    (255, "SubfileType", "Deprecated kind-of-data indication"),
    (256, "ImageWidth", "Number of columns in the image"),
    (257, "ImageLength", "Number of rows in the image"),
    (258, "BitsPerSample", "Bits per component"),
    (259, "Compression", "Compression scheme"),
    (262, "PhotometricInterpretation", "Pixel composition"),
    (266, "FillOrder", "Logical order of bits within a byte"),
    (269, "DocumentName", "Name of the scanned document"),
    (270, "ImageDescription", "Title of the image"),
    (271, "Make", "Manufacturer of the recording equipment"),
    (272, "Model", "Model of the recording equipment"),
    (273, "StripOffsets", "Byte offset of each strip"),
    (274, "Orientation", "Orientation of the image viewed in row/column terms"),
    (277, "SamplesPerPixel", "Number of components per pixel"),
    (278, "RowsPerStrip", "Rows per strip"),
    (279, "StripByteCounts", "Bytes per compressed strip"),
    (282, "XResolution", "Pixels per ResolutionUnit in the width direction"),
    (283, "YResolution", "Pixels per ResolutionUnit in the height direction"),
    (284, "PlanarConfiguration", "Chunky or planar data arrangement"),
    (296, "ResolutionUnit", "Unit for XResolution and YResolution"),
    (301, "TransferFunction", "Transfer function in tabular form"),
    (305, "Software", "Software used to generate the image"),
    (306, "DateTime", "File change date and time"),
    (315, "Artist", "Person who created the image"),
    (316, "HostComputer", "Computer used to generate the image"),
    (317, "Predictor", "Predictor used before coding"),
    (318, "WhitePoint", "Chromaticity of the white point"),
    (319, "PrimaryChromaticities", "Chromaticities of the primaries"),
    (322, "TileWidth", "Number of columns in each tile"),
    (323, "TileLength", "Number of rows in each tile"),
    (324, "TileOffsets", "Byte offset of each tile"),
    (325, "TileByteCounts", "Bytes per compressed tile"),
    (330, "SubIFDs", "Offsets to child IFDs"),
    (338, "ExtraSamples", "Meaning of extra components"),
    (339, "SampleFormat", "How to interpret each data sample"),
    (513, "JPEGInterchangeFormat", "Offset to the JPEG SOI marker"),
    (514, "JPEGInterchangeFormatLength", "Length of the JPEG stream"),
    (529, "YCbCrCoefficients", "RGB to YCbCr transformation matrix"),
    (530, "YCbCrSubSampling", "Chroma subsampling ratio"),
    (531, "YCbCrPositioning", "Chroma sample positioning"),
    (532, "ReferenceBlackWhite", "Reference black and white point values"),
    (700, "XMLPacket", "XMP metadata packet"),
    (33432, "Copyright", "Copyright holder"),
    (33434, "ExposureTime", "Exposure time in seconds"),
    (34665, "ExifTag", "Pointer to the EXIF sub-IFD"),
    (34853, "GPSTag", "Pointer to the GPS sub-IFD"),
    (50706, "DNGVersion", "DNG specification version"),
];

const PHOTO_TAGS: TagTable = &[
    (33434, "ExposureTime", "Exposure time in seconds"),
    (33437, "FNumber", "F number"),
    (34850, "ExposureProgram", "Program used to set exposure"),
    (34852, "SpectralSensitivity", "Spectral sensitivity of each channel"),
    (34855, "PhotographicSensitivity", "Sensitivity (ISO speed) rating"),
    (34856, "OECF", "Opto-electric conversion function"),
    (36864, "ExifVersion", "Supported EXIF version"),
    (36867, "DateTimeOriginal", "Date and time of original data generation"),
    (36868, "DateTimeDigitized", "Date and time of digitization"),
    (37121, "ComponentsConfiguration", "Meaning of each component"),
    (37122, "CompressedBitsPerPixel", "Compression mode in bits per pixel"),
    (37377, "ShutterSpeedValue", "Shutter speed in APEX units"),
    (37378, "ApertureValue", "Lens aperture in APEX units"),
    (37379, "BrightnessValue", "Brightness in APEX units"),
    (37380, "ExposureBiasValue", "Exposure bias in APEX units"),
    (37381, "MaxApertureValue", "Smallest F number of the lens"),
    (37382, "SubjectDistance", "Distance to the subject in meters"),
    (37383, "MeteringMode", "Metering mode"),
    (37384, "LightSource", "Kind of light source"),
    (37385, "Flash", "Flash firing status and mode"),
    (37386, "FocalLength", "Lens focal length in millimeters"),
    (37396, "SubjectArea", "Location and area of the main subject"),
    (37500, "MakerNote", "Manufacturer-private data"),
    (37510, "UserComment", "User keywords or comments"),
    (37520, "SubSecTime", "DateTime subseconds"),
    (37521, "SubSecTimeOriginal", "DateTimeOriginal subseconds"),
    (37522, "SubSecTimeDigitized", "DateTimeDigitized subseconds"),
    (40960, "FlashpixVersion", "Supported Flashpix version"),
    (40961, "ColorSpace", "Color space specifier"),
    (40962, "PixelXDimension", "Valid image width"),
    (40963, "PixelYDimension", "Valid image height"),
    (40964, "RelatedSoundFile", "Name of the related audio file"),
    (40965, "InteroperabilityTag", "Pointer to the Interoperability IFD"),
    (41483, "FlashEnergy", "Strobe energy at capture time"),
    (41484, "SpatialFrequencyResponse", "Spatial frequency table"),
    (41486, "FocalPlaneXResolution", "Pixels per unit on the focal plane, width"),
    (41487, "FocalPlaneYResolution", "Pixels per unit on the focal plane, height"),
    (41488, "FocalPlaneResolutionUnit", "Unit for focal plane resolution"),
    (41492, "SubjectLocation", "Location of the main subject"),
    (41493, "ExposureIndex", "Exposure index at capture time"),
    (41495, "SensingMethod", "Image sensor type"),
    (41728, "FileSource", "Image source"),
    (41729, "SceneType", "Scene type"),
    (41730, "CFAPattern", "Color filter array geometric pattern"),
    (41985, "CustomRendered", "Special processing applied to the image"),
    (41986, "ExposureMode", "Exposure mode set at capture"),
    (41987, "WhiteBalance", "White balance mode set at capture"),
    (41988, "DigitalZoomRatio", "Digital zoom ratio at capture"),
    (41989, "FocalLengthIn35mmFilm", "Equivalent focal length on 35 mm film"),
    (41990, "SceneCaptureType", "Type of scene captured"),
    (41991, "GainControl", "Degree of overall image gain adjustment"),
    (41992, "Contrast", "Direction of contrast processing"),
    (41993, "Saturation", "Direction of saturation processing"),
    (41994, "Sharpness", "Direction of sharpness processing"),
    (41995, "DeviceSettingDescription", "Capture conditions of a particular camera"),
    (41996, "SubjectDistanceRange", "Distance range to the subject"),
    (42016, "ImageUniqueID", "Unique image identifier"),
    (42032, "CameraOwnerName", "Camera owner"),
    (42033, "BodySerialNumber", "Camera body serial number"),
    (42034, "LensSpecification", "Focal length and aperture ranges of the lens"),
    (42035, "LensMake", "Lens manufacturer"),
    (42036, "LensModel", "Lens model name"),
    (42037, "LensSerialNumber", "Lens serial number"),
];

const IOP_TAGS: TagTable = &[
    (1, "InteroperabilityIndex", "Interoperability rule identification"),
    (2, "InteroperabilityVersion", "Interoperability version"),
    (4096, "RelatedImageFileFormat", "File format of the related image"),
    (4097, "RelatedImageWidth", "Width of the related image"),
    (4098, "RelatedImageLength", "Height of the related image"),
];

const GPS_TAGS: TagTable = &[
    (0, "GPSVersionID", "GPS tag version"),
    (1, "GPSLatitudeRef", "North or south latitude"),
    (2, "GPSLatitude", "Latitude as degrees, minutes, seconds"),
    (3, "GPSLongitudeRef", "East or west longitude"),
    (4, "GPSLongitude", "Longitude as degrees, minutes, seconds"),
    (5, "GPSAltitudeRef", "Altitude reference"),
    (6, "GPSAltitude", "Altitude in meters"),
    (7, "GPSTimeStamp", "UTC time as hour, minute, second"),
    (8, "GPSSatellites", "Satellites used for measurement"),
    (9, "GPSStatus", "Receiver status at recording time"),
    (10, "GPSMeasureMode", "2D or 3D measurement"),
    (11, "GPSDOP", "Measurement precision"),
    (12, "GPSSpeedRef", "Unit for speed of movement"),
    (13, "GPSSpeed", "Speed of receiver movement"),
    (14, "GPSTrackRef", "Reference for direction of movement"),
    (15, "GPSTrack", "Direction of movement"),
    (16, "GPSImgDirectionRef", "Reference for image direction"),
    (17, "GPSImgDirection", "Direction of the image at capture"),
    (18, "GPSMapDatum", "Geodetic survey data used"),
    (19, "GPSDestLatitudeRef", "Reference for destination latitude"),
    (20, "GPSDestLatitude", "Latitude of the destination"),
    (21, "GPSDestLongitudeRef", "Reference for destination longitude"),
    (22, "GPSDestLongitude", "Longitude of the destination"),
    (23, "GPSDestBearingRef", "Reference for destination bearing"),
    (24, "GPSDestBearing", "Bearing to the destination"),
    (25, "GPSDestDistanceRef", "Unit for distance to destination"),
    (26, "GPSDestDistance", "Distance to the destination"),
    (27, "GPSProcessingMethod", "Name of GPS processing method"),
    (28, "GPSAreaInformation", "Name of GPS area"),
    (29, "GPSDateStamp", "UTC date of GPS measurement"),
    (30, "GPSDifferential", "Differential correction applied"),
    (31, "GPSHPositioningError", "Horizontal positioning error in meters"),
];

const MPF_TAGS: TagTable = &[
    (45056, "MPFVersion", "Multi-Picture Format version"),
    (45057, "NumberOfImages", "Number of recorded images"),
    (45058, "MPEntry", "Per-image attribute entries"),
    (45059, "ImageUIDList", "Unique image ID list"),
    (45060, "TotalFrames", "Total number of frames"),
];

const NAMESPACES: &[(&str, TagTable)] = &[
    ("Exif.Image", IMAGE_TAGS),
    ("Exif.Photo", PHOTO_TAGS),
    ("Exif.Iop", IOP_TAGS),
    ("Exif.GPSInfo", GPS_TAGS),
    ("Exif.MpfInfo", MPF_TAGS),
];

/// Resolve a tag number. Namespaces are searched in declaration order and
/// the first match wins.
pub fn lookup_tag(tag: u16) -> Option<TagInfo> {
    for &(namespace, table) in NAMESPACES {
        if let Some(&(_, name, description)) = table.iter().find(|&&(t, _, _)| t == tag) {
            return Some(TagInfo { namespace, name, description });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_namespace_wins() {
        let info = lookup_tag(33434).unwrap();
        assert_eq!(info.namespace, "Exif.Image");
        assert_eq!(info.name, "ExposureTime");
    }

    #[test]
    fn gps_names_resolve() {
        assert_eq!(lookup_tag(29).unwrap().name, "GPSDateStamp");
        // Tags 1 and 2 are shadowed by the Iop namespace by lookup order.
        assert_eq!(lookup_tag(1).unwrap().namespace, "Exif.Iop");
    }

    #[test]
    fn unknown_tag_is_none() {
        assert!(lookup_tag(0xFFFE).is_none());
    }
}
