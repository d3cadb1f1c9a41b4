// Minimal PNG encoder for the finished mosaic.
//
// Writes 8-bit RGBA, no interlace, filter type 0 on every scanline. The
// IDAT payload is a zlib stream of stored (uncompressed) deflate blocks —
// mosaics are small and the encoder stays dependency-free apart from the
// CRC. Chunk CRCs use `crc32fast`; the zlib Adler-32 is hand-rolled (it
// is a dozen lines).
//
// Layout per the PNG specification:
//   signature | IHDR | IDAT | IEND
// with each chunk framed as: length (u32 BE) | type | data | CRC-32 of
// type+data (u32 BE).

use std::io::{self, Write};
use std::path::Path;

/// PNG file signature.
const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Largest stored deflate block payload.
const MAX_STORED_BLOCK: usize = 65_535;

/// Encode an RGBA8 buffer as a PNG byte stream.
///
/// `rgba` must hold exactly `width * height * 4` bytes; the encoder
/// truncates or zero-pads rows past the end rather than panicking.
pub fn encode(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&SIGNATURE);

    // IHDR: dimensions, bit depth 8, color type 6 (RGBA), default
    // compression/filter, no interlace.
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 6, 0, 0, 0]);
    write_chunk(&mut out, b"IHDR", &ihdr);

    // Raw image data: each scanline prefixed with filter byte 0.
    let row_bytes = width as usize * 4;
    let mut raw = Vec::with_capacity(height as usize * (row_bytes + 1));
    for y in 0..height as usize {
        raw.push(0);
        let start = y * row_bytes;
        for i in 0..row_bytes {
            raw.push(rgba.get(start + i).copied().unwrap_or(0));
        }
    }

    write_chunk(&mut out, b"IDAT", &zlib_stored(&raw));
    write_chunk(&mut out, b"IEND", &[]);
    out
}

/// Encode and write to a file.
pub fn write(path: &Path, width: u32, height: u32, rgba: &[u8]) -> io::Result<()> {
    let bytes = encode(width, height, rgba);
    let mut file = std::fs::File::create(path)?;
    file.write_all(&bytes)?;
    file.flush()?;
    Ok(())
}

/// Frame one chunk: length, type, data, CRC-32 of type+data.
fn write_chunk(out: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(chunk_type);
    out.extend_from_slice(data);
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Wrap raw bytes in a zlib stream of stored deflate blocks.
fn zlib_stored(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len() + raw.len() / MAX_STORED_BLOCK * 5 + 16);
    // zlib header: deflate, 32K window, no dict, check bits.
    out.extend_from_slice(&[0x78, 0x01]);

    let mut chunks = raw.chunks(MAX_STORED_BLOCK).peekable();
    // An empty input still needs one (final, empty) stored block.
    if chunks.peek().is_none() {
        out.extend_from_slice(&[0x01, 0, 0, 0xFF, 0xFF]);
    }
    while let Some(chunk) = chunks.next() {
        let bfinal = if chunks.peek().is_none() { 1 } else { 0 };
        out.push(bfinal);
        let len = chunk.len() as u16;
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&(!len).to_le_bytes());
        out.extend_from_slice(chunk);
    }

    out.extend_from_slice(&adler32(raw).to_be_bytes());
    out
}

/// Adler-32 checksum per the zlib specification.
fn adler32(data: &[u8]) -> u32 {
    const MOD_ADLER: u32 = 65_521;
    let mut a: u32 = 1;
    let mut b: u32 = 0;
    for &byte in data {
        a = (a + byte as u32) % MOD_ADLER;
        b = (b + a) % MOD_ADLER;
    }
    (b << 16) | a
}
