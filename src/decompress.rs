//! Table payload decompression
//!
//! WOFF 1.0 stores each table payload either raw (when compression did not
//! help) or as a zlib stream. The stored form is detected purely by
//! comparing the two declared lengths.

use std::borrow::Cow;
use std::error::Error;

use crate::error::ConvertError;
use crate::woff::TableDirectoryEntry;

#[cfg(feature = "z")]
pub(crate) fn inflate_z(
    compressed_data: &[u8],
    size_hint: usize,
) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>> {
    use flate2::{Decompress, FlushDecompress};
    // One byte of slack past the declared size so that an overlong stream
    // surfaces as a length mismatch instead of being silently clipped.
    let mut output: Vec<u8> = Vec::with_capacity(size_hint + 1);
    let mut decompressor = Decompress::new(true);
    decompressor.decompress_vec(compressed_data, &mut output, FlushDecompress::Finish)?;
    Ok(output)
}

/// Produce the decompressed bytes for one table.
///
/// `comp_length == orig_length` means the payload was stored raw and is
/// borrowed straight out of the input. Anything else is treated as a zlib
/// stream and inflated; an inflated size that differs from `orig_length` is
/// data corruption and fails the conversion.
#[allow(clippy::type_complexity)]
pub(crate) fn table_payload<'a>(
    entry: &TableDirectoryEntry,
    woff_data: &'a [u8],
    decompress_z: &mut dyn FnMut(&[u8], usize) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>>,
) -> Result<Cow<'a, [u8]>, ConvertError> {
    let stored = entry.payload_slice(woff_data)?;
    if entry.comp_length == entry.orig_length {
        return Ok(Cow::Borrowed(stored));
    }

    let inflated = decompress_z(stored, entry.orig_length as usize)
        .map_err(|err| ConvertError::Decompress(entry.tag, err.to_string()))?;
    if inflated.len() != entry.orig_length as usize {
        return Err(ConvertError::LengthMismatch {
            tag: entry.tag,
            expected: entry.orig_length,
            actual: inflated.len() as u32,
        });
    }
    Ok(Cow::Owned(inflated))
}

#[cfg(all(test, feature = "z"))]
mod tests {
    use super::*;
    use font_types::Tag;

    fn zlib_compress(data: &[u8]) -> Vec<u8> {
        use flate2::{Compression, write::ZlibEncoder};
        use std::io::Write as _;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn entry_for(tag: &[u8; 4], woff_offset: u32, comp_length: u32, orig_length: u32) -> TableDirectoryEntry {
        TableDirectoryEntry {
            tag: Tag::new(tag),
            woff_offset,
            comp_length,
            orig_length,
            orig_checksum: 0,
            output_offset: 0,
        }
    }

    #[test]
    fn equal_lengths_borrow_the_stored_bytes() {
        let woff_data = b"....vmtxdata".to_vec();
        let entry = entry_for(b"vmtx", 4, 8, 8);
        let payload = table_payload(&entry, &woff_data, &mut inflate_z).unwrap();
        assert!(matches!(payload, Cow::Borrowed(_)));
        assert_eq!(&*payload, b"vmtxdata");
    }

    #[test]
    fn compressed_payload_inflates_to_original_length() {
        let original: Vec<u8> = b"glyf data ".repeat(40);
        let compressed = zlib_compress(&original);
        assert!(compressed.len() < original.len());

        let mut woff_data = vec![0u8; 44];
        woff_data.extend_from_slice(&compressed);
        let entry = entry_for(b"glyf", 44, compressed.len() as u32, original.len() as u32);
        let payload = table_payload(&entry, &woff_data, &mut inflate_z).unwrap();
        assert_eq!(&*payload, &original[..]);
    }

    #[test]
    fn wrong_inflated_size_is_a_length_mismatch() {
        let original = vec![7u8; 200];
        let compressed = zlib_compress(&original);
        let entry = entry_for(b"loca", 0, compressed.len() as u32, 199);
        let result = table_payload(&entry, &compressed, &mut inflate_z);
        assert!(matches!(
            result,
            Err(ConvertError::LengthMismatch {
                expected: 199,
                actual: 200,
                ..
            })
        ));
    }

    #[test]
    fn garbage_stream_is_a_decompress_error() {
        let woff_data = vec![0xAB; 32];
        let entry = entry_for(b"cmap", 0, 32, 64);
        let result = table_payload(&entry, &woff_data, &mut inflate_z);
        assert!(matches!(result, Err(ConvertError::Decompress(..))));
    }
}
