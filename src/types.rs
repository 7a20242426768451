//! Value types shared by the header parsers, the metadata facade and the listing.
//!
//! [`ImageDimensions`] is what leaves the core: it serializes to the flat
//! `{width, height, format}` shape the gallery listing expects, with `null`
//! for anything that could not be recovered.

use serde::{Deserialize, Serialize};

/// Image formats the listing knows about.
///
/// Every variant except [`ImageFormat::Svg`] has a header parser. SVG is
/// tagged from its extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Webp,
    Svg,
}

impl ImageFormat {
    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            "webp" => Some(Self::Webp),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    /// Lower-case tag used in serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Webp => "webp",
            Self::Svg => "svg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
            Self::Webp => "image/webp",
            Self::Svg => "image/svg+xml",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel size recovered by a header parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Per-file result of the metadata facade.
///
/// Width and height live together in one `Option<Dimensions>`, so a value
/// with only one of them set cannot be built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DimensionsRecord", into = "DimensionsRecord")]
pub struct ImageDimensions {
    size: Option<Dimensions>,
    format: Option<ImageFormat>,
}

impl ImageDimensions {
    /// Nothing recovered: `{width: null, height: null, format: null}`.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// A successful header parse.
    pub fn parsed(size: Dimensions, format: ImageFormat) -> Self {
        Self {
            size: Some(size),
            format: Some(format),
        }
    }

    /// Format known, size not recovered (vector images).
    pub fn tagged(format: ImageFormat) -> Self {
        Self { size: None, format: Some(format) }
    }

    pub fn width(&self) -> Option<u32> {
        self.size.map(|d| d.width)
    }

    pub fn height(&self) -> Option<u32> {
        self.size.map(|d| d.height)
    }

    pub fn size(&self) -> Option<Dimensions> {
        self.size
    }

    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn is_unknown(&self) -> bool {
        self.size.is_none() && self.format.is_none()
    }
}

/// Wire shape of [`ImageDimensions`].
#[derive(Serialize, Deserialize)]
struct DimensionsRecord {
    width: Option<u32>,
    height: Option<u32>,
    format: Option<ImageFormat>,
}

impl From<ImageDimensions> for DimensionsRecord {
    fn from(d: ImageDimensions) -> Self {
        Self {
            width: d.width(),
            height: d.height(),
            format: d.format,
        }
    }
}

impl From<DimensionsRecord> for ImageDimensions {
    fn from(r: DimensionsRecord) -> Self {
        // A record with only one side set carries no usable size.
        let size = match (r.width, r.height) {
            (Some(width), Some(height)) => Some(Dimensions { width, height }),
            _ => None,
        };
        Self {
            size,
            format: r.format,
        }
    }
}
