//! Pixel packing and identifier mangling for generated data tables.

use dotforge_core::{ImageData, Rgba};

/// Pack a raster one bit per pixel, MSB first, rows padded to a byte
/// boundary. A pixel is set when its alpha passes 127.
#[must_use]
pub fn pack_msb_bitmap(image: &ImageData) -> Vec<u8> {
    let stride = image.width.div_ceil(8) as usize;
    let mut bytes = vec![0u8; stride * image.height as usize];
    for y in 0..image.height {
        for x in 0..image.width {
            if image.pixel(x, y).a() > 127 {
                let i = y as usize * stride + (x / 8) as usize;
                bytes[i] |= 0x80 >> (x % 8);
            }
        }
    }
    bytes
}

/// Render bytes as a C initializer list.
#[must_use]
pub fn bytes_to_c_array(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{b:02x}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pack a color into RGB565, the wire format of byte-color displays.
#[must_use]
pub fn rgb565(color: Rgba) -> u16 {
    (u16::from(color.r() & 0xF8) << 8)
        | (u16::from(color.g() & 0xFC) << 3)
        | u16::from(color.b() >> 3)
}

/// Pack a color into `0xAARRGGBB`, one `uint32_t` per pixel.
#[must_use]
pub fn argb8888(color: Rgba) -> u32 {
    (u32::from(color.a()) << 24)
        | (u32::from(color.r()) << 16)
        | (u32::from(color.g()) << 8)
        | u32::from(color.b())
}

/// Derive a stable C identifier for a raster's data table from its pixel
/// content, so layers sharing an image share one declaration.
#[must_use]
pub fn image_identifier(image: &ImageData) -> String {
    format!("image_{:08x}_bits", content_hash(image))
}

/// Escape text for embedding in a C string literal.
#[must_use]
pub fn escape_c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// FNV-1a over the dimensions and pixel bytes.
fn content_hash(image: &ImageData) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    let header = [image.width.to_le_bytes(), image.height.to_le_bytes()];
    for byte in header
        .iter()
        .flatten()
        .copied()
        .chain(image.rgba.iter().copied())
    {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565_packs_primaries() {
        assert_eq!(rgb565(Rgba([255, 255, 255, 255])), 0xFFFF);
        assert_eq!(rgb565(Rgba([255, 0, 0, 255])), 0xF800);
        assert_eq!(rgb565(Rgba([0, 255, 0, 255])), 0x07E0);
        assert_eq!(rgb565(Rgba([0, 0, 0, 255])), 0x0000);
    }

    #[test]
    fn test_bitmap_rows_pad_to_bytes() {
        // 9 wide: bit 0 of the second byte is the ninth pixel.
        let mut image = ImageData::new(9, 2);
        image.set_pixel(0, 0, Rgba::WHITE);
        image.set_pixel(8, 0, Rgba::WHITE);
        image.set_pixel(4, 1, Rgba::WHITE);

        let bytes = pack_msb_bitmap(&image);
        assert_eq!(bytes.len(), 4);
        assert_eq!(bytes[0], 0b1000_0000);
        assert_eq!(bytes[1], 0b1000_0000);
        assert_eq!(bytes[2], 0b0000_1000);
        assert_eq!(bytes[3], 0);
    }

    #[test]
    fn test_identifier_tracks_content() {
        let mut a = ImageData::new(4, 4);
        a.set_pixel(1, 1, Rgba::WHITE);
        let mut b = ImageData::new(4, 4);
        b.set_pixel(1, 1, Rgba::WHITE);
        assert_eq!(image_identifier(&a), image_identifier(&b));

        b.set_pixel(2, 2, Rgba::WHITE);
        assert_ne!(image_identifier(&a), image_identifier(&b));
    }

    #[test]
    fn test_identifier_keeps_bits_naming() {
        let name = image_identifier(&ImageData::new(2, 2));
        assert!(name.starts_with("image_"), "{name}");
        assert!(name.ends_with("_bits"), "{name}");
    }

    #[test]
    fn test_escape_quotes_and_backslashes() {
        assert_eq!(escape_c_string(r#"say "hi"\now"#), r#"say \"hi\"\\now"#);
    }
}
