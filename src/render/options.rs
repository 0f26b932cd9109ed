//! Rendering options and configuration.

use std::fmt;
use std::str::FromStr;

use super::JsonFormat;
use crate::error::Error;

/// Output format of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    /// HTML fragment
    #[default]
    Html,
    /// Plain text
    Text,
    /// JSON dump of the document model
    Json,
}

impl FromStr for RenderFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(RenderFormat::Html),
            "text" | "txt" => Ok(RenderFormat::Text),
            "json" => Ok(RenderFormat::Json),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderFormat::Html => "html",
            RenderFormat::Text => "text",
            RenderFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Output format
    pub format: RenderFormat,

    /// Prefix for image paths in output (e.g., "./media/")
    pub image_path_prefix: String,

    /// Emit `<img>` tags for images
    pub include_images: bool,

    /// Character to use for list markers in text output
    pub list_marker: char,

    /// JSON layout
    pub json_format: JsonFormat,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format.
    pub fn with_format(mut self, format: RenderFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the image path prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_path_prefix = prefix.into();
        self
    }

    /// Enable or disable images.
    pub fn with_images(mut self, include: bool) -> Self {
        self.include_images = include;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: RenderFormat::Html,
            image_path_prefix: String::new(),
            include_images: true,
            list_marker: '-',
            json_format: JsonFormat::Pretty,
        }
    }
}
