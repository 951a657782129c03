//! GSEA enrichment plot images.
//! `gseaPlot` answers with a JSON string holding a base64-encoded PNG.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;
use std::io::Cursor;

use sponge_common::{Result, SpongeError};

/// Decoded pixels of a PNG.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    /// Samples per pixel (1 grey, 2 grey+alpha, 3 RGB, 4 RGBA).
    pub channels: usize,
    pub bit_depth: u8,
    pub pixels: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentPlot {
    png: Vec<u8>,
    raster: Raster,
}

impl EnrichmentPlot {
    pub fn from_json(body: &Value) -> Result<Self> {
        let encoded = body
            .as_str()
            .ok_or_else(|| SpongeError::malformed("$", "expected a base64 string"))?;
        Self::from_base64(encoded)
    }

    pub fn from_base64(encoded: &str) -> Result<Self> {
        let encoded = encoded.trim();
        let encoded = encoded
            .strip_prefix("data:image/png;base64,")
            .unwrap_or(encoded);
        let png = STANDARD
            .decode(encoded)
            .map_err(|e| SpongeError::Image(format!("invalid base64: {}", e)))?;
        Self::from_png(png)
    }

    pub fn from_png(png: Vec<u8>) -> Result<Self> {
        let raster = decode_png(&png)?;
        Ok(Self { png, raster })
    }

    /// Encoded PNG bytes as received.
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    pub fn width(&self) -> u32 {
        self.raster.width
    }

    pub fn height(&self) -> u32 {
        self.raster.height
    }
}

fn decode_png(bytes: &[u8]) -> Result<Raster> {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let mut reader = decoder
        .read_info()
        .map_err(|e| SpongeError::Image(format!("invalid PNG: {}", e)))?;
    let mut pixels = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut pixels)
        .map_err(|e| SpongeError::Image(format!("invalid PNG frame: {}", e)))?;
    pixels.truncate(info.buffer_size());

    Ok(Raster {
        width: info.width,
        height: info.height,
        channels: info.color_type.samples(),
        bit_depth: info.bit_depth as u8,
        pixels,
    })
}
