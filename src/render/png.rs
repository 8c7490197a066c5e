//! PNG encoding for RGB chart buffers.
//!
//! Writes IHDR, pHYs, IDAT and IEND chunks. The pHYs chunk records the
//! physical resolution so viewers and print tools see the intended DPI.

use crate::error::{PlotError, Result};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Metres per inch, for the pHYs unit conversion
const METRES_PER_INCH: f64 = 0.0254;

/// Convert dots per inch to the pixels-per-metre value pHYs stores
pub fn dpi_to_ppm(dpi: u32) -> u32 {
    (dpi as f64 / METRES_PER_INCH).round() as u32
}

/// Encode 8-bit RGB pixel data (3 bytes per pixel, row-major) as PNG
pub fn encode_rgb(pixels: &[u8], width: u32, height: u32, dpi: u32) -> Result<Vec<u8>> {
    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(PlotError::Encode(format!(
            "buffer holds {} bytes, {}x{} RGB needs {}",
            pixels.len(),
            width,
            height,
            expected
        )));
    }

    let mut png = Vec::with_capacity(expected / 4);
    png.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(2); // color type (RGB)
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr);

    let ppm = dpi_to_ppm(dpi);
    let mut phys = Vec::with_capacity(9);
    phys.extend_from_slice(&ppm.to_be_bytes());
    phys.extend_from_slice(&ppm.to_be_bytes());
    phys.push(1); // unit: metre
    write_chunk(&mut png, b"pHYs", &phys);

    let idat = deflate_idat_rgb(pixels, width as usize, height as usize)
        .map_err(|e| PlotError::Encode(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Write a PNG chunk: length, type, data, CRC over type and data
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Deflate RGB scanlines, each prefixed with filter type 0
fn deflate_idat_rgb(pixels: &[u8], width: usize, height: usize) -> std::io::Result<Vec<u8>> {
    let stride = width * 3;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    for y in 0..height {
        encoder.write_all(&[0])?;
        encoder.write_all(&pixels[y * stride..(y + 1) * stride])?;
    }
    encoder.finish()
}
