//! The WOFF to sfnt conversion pipeline

use std::error::Error;

use bytes::BufMut as _;
use log::{debug, warn};

use crate::decompress::table_payload;
use crate::error::ConvertError;
use crate::name_repair::{NameRepair, repair_family_name};
use crate::sfnt::{BinarySearchFields, assign_output_offsets, round4};
use crate::tags::NAME;
use crate::woff::{TableDirectory, WoffHeader};

#[cfg(feature = "z")]
/// Convert a WOFF 1.0 font to sfnt using the built-in zlib decompressor.
pub fn convert_woff(raw_woff_data: &[u8]) -> Result<Vec<u8>, ConvertError> {
    convert_woff_with_custom_z(raw_woff_data, &mut crate::decompress::inflate_z)
}

/// Convert a WOFF 1.0 font to sfnt using a custom zlib decompressor
/// passed as a closure.
///
/// The closure receives the stored zlib payload and the expected
/// decompressed size as a capacity hint. The returned length is checked
/// against the table's declared original length either way.
#[allow(clippy::type_complexity)]
pub fn convert_woff_with_custom_z(
    raw_woff_data: &[u8],
    decompress_z: &mut dyn FnMut(&[u8], usize) -> Result<Vec<u8>, Box<dyn Error + Send + Sync>>,
) -> Result<Vec<u8>, ConvertError> {
    // Here we create a new view over `raw_woff_data`. Because we pass
    // `&mut input` to the parsing functions, they mutate the slice (not the
    // data it points to) so that it only covers unparsed data, while
    // `raw_woff_data` still holds the full WOFF for offset-based access.
    let mut input = raw_woff_data;

    let header = WoffHeader::parse(&mut input)?;
    let mut table_directory = TableDirectory::parse(&mut input, header.num_tables as usize)?;
    debug!(
        "WOFF flavor {}, {} tables declared, {} kept",
        header.flavor,
        header.num_tables,
        table_directory.len()
    );
    if table_directory.is_empty() {
        warn!("WOFF declares no font tables, emitting an empty sfnt shell");
    }

    let search = BinarySearchFields::for_table_count(table_directory.len() as u16);
    assign_output_offsets(&mut table_directory.tables);

    let mut out: Vec<u8> = Vec::with_capacity(header.total_sfnt_size as usize);

    // sfnt header. The WOFF flavor is the original font's sfnt version tag
    // and goes out unchanged.
    out.put_u32(u32::from_be_bytes(header.flavor.to_be_bytes()));
    out.put_u16(table_directory.len() as u16);
    out.put_u16(search.search_range);
    out.put_u16(search.entry_selector);
    out.put_u16(search.range_shift);

    // Table directory, in declaration order. Checksums are the original
    // tool's values carried through verbatim; this converter never
    // recomputes them.
    for table in table_directory.iter() {
        out.put_u32(u32::from_be_bytes(table.tag.to_be_bytes()));
        out.put_u32(table.orig_checksum);
        out.put_u32(table.output_offset);
        out.put_u32(table.orig_length);
    }

    // Table payloads, each padded with zeros to the next 4-byte boundary.
    for table in table_directory.iter() {
        debug_assert_eq!(out.len(), table.output_offset as usize);
        let data = table_payload(table, raw_woff_data, decompress_z)?;
        if table.tag == NAME {
            match repair_family_name(&data)? {
                NameRepair::FamilyAliased(patched) => {
                    debug!("aliased empty family name record to the PostScript name");
                    out.extend_from_slice(&patched);
                }
                NameRepair::Unchanged => out.extend_from_slice(&data),
            }
        } else {
            out.extend_from_slice(&data);
        }
        out.resize(round4(out.len()), 0);
    }

    Ok(out)
}

#[cfg(feature = "z")]
/// Convert between caller-supplied streams.
///
/// Buffers the input, converts, and writes the result in one pass. The
/// streams are borrowed and never closed; on error, already-written output
/// is the caller's to discard.
pub fn convert<R, W>(input: &mut R, output: &mut W) -> Result<(), ConvertError>
where
    R: std::io::Read,
    W: std::io::Write,
{
    let mut raw_woff_data = Vec::new();
    input.read_to_end(&mut raw_woff_data)?;
    let sfnt_data = convert_woff(&raw_woff_data)?;
    output.write_all(&sfnt_data)?;
    Ok(())
}
