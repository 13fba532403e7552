//! WOFF 1.0 header and table directory parsing
//!
//! <https://www.w3.org/TR/WOFF/>

use std::ops::{Deref, DerefMut};

use bytes::Buf;
use font_types::Tag;
use log::debug;

use crate::error::ConvertError;
use crate::tags::{DSIG, WOFF1_SIG};

/// The fixed 44-byte header at the start of every WOFF 1.0 file.
///
/// <https://www.w3.org/TR/WOFF/#WOFFHeader>
pub struct WoffHeader {
    /// b"wOFF"
    pub signature: Tag,
    /// The "sfnt version" of the wrapped font. Reused verbatim as the
    /// version tag of the output sfnt.
    pub flavor: Tag,
    /// Total size of the WOFF file.
    pub length: u32,
    /// Number of entries in the table directory.
    pub num_tables: u16,
    /// Reserved; set to 0.
    pub reserved: u16,
    /// Total size needed for the uncompressed font data, including the sfnt
    /// header, directory, and font tables (including padding).
    pub total_sfnt_size: u32,
    /// Major version of the WOFF file.
    pub major_version: u16,
    /// Minor version of the WOFF file.
    pub minor_version: u16,
    /// Offset to the metadata block, from the beginning of the WOFF file.
    pub meta_offset: u32,
    /// Length of the compressed metadata block.
    pub meta_length: u32,
    /// Uncompressed size of the metadata block.
    pub meta_orig_length: u32,
    /// Offset to the private data block, from the beginning of the WOFF file.
    pub priv_offset: u32,
    /// Length of the private data block.
    pub priv_length: u32,
}

impl WoffHeader {
    /// Parse the header, validating only the signature.
    ///
    /// Everything else is taken at face value: odd counts or sizes flow
    /// through best-effort and are left for the font loader to reject.
    /// The metadata and private blocks are parsed but never propagated to
    /// the output.
    pub fn parse(input: &mut impl Buf) -> Result<Self, ConvertError> {
        let signature = Tag::from_u32(input.try_get_u32()?);
        if signature != WOFF1_SIG {
            return Err(ConvertError::NotWoff);
        }

        Ok(Self {
            signature,
            flavor: Tag::from_u32(input.try_get_u32()?),
            length: input.try_get_u32()?,
            num_tables: input.try_get_u16()?,
            reserved: input.try_get_u16()?,
            total_sfnt_size: input.try_get_u32()?,
            major_version: input.try_get_u16()?,
            minor_version: input.try_get_u16()?,
            meta_offset: input.try_get_u32()?,
            meta_length: input.try_get_u32()?,
            meta_orig_length: input.try_get_u32()?,
            priv_offset: input.try_get_u32()?,
            priv_length: input.try_get_u32()?,
        })
    }
}

/// One entry of the WOFF table directory.
///
/// <https://www.w3.org/TR/WOFF/#TableDirectory>
pub struct TableDirectoryEntry {
    /// 4-byte table tag
    pub tag: Tag,
    /// Offset of the (possibly compressed) payload from the beginning of
    /// the WOFF file.
    pub woff_offset: u32,
    /// Length of the payload as stored in the WOFF.
    pub comp_length: u32,
    /// Length of the table after decompression.
    pub orig_length: u32,
    /// Checksum computed by whatever tool built the original font.
    /// Carried into the output directory unmodified, never recomputed.
    pub orig_checksum: u32,
    /// Offset of the table in the output sfnt. Assigned during layout,
    /// zero until then.
    pub output_offset: u32,
}

impl TableDirectoryEntry {
    pub fn parse(input: &mut impl Buf) -> Result<Self, ConvertError> {
        Ok(Self {
            tag: Tag::from_u32(input.try_get_u32()?),
            woff_offset: input.try_get_u32()?,
            comp_length: input.try_get_u32()?,
            orig_length: input.try_get_u32()?,
            orig_checksum: input.try_get_u32()?,
            output_offset: 0, // Set in the layout pass
        })
    }

    /// The stored payload bytes for this table, bounds-checked against the
    /// full WOFF data.
    pub fn payload_slice<'a>(&self, woff_data: &'a [u8]) -> Result<&'a [u8], ConvertError> {
        let start = self.woff_offset as usize;
        let end = start
            .checked_add(self.comp_length as usize)
            .ok_or(ConvertError::OutOfBounds(self.tag))?;
        woff_data
            .get(start..end)
            .ok_or(ConvertError::OutOfBounds(self.tag))
    }
}

/// The surviving table directory entries, in declaration order.
pub struct TableDirectory {
    pub tables: Vec<TableDirectoryEntry>,
}

impl Deref for TableDirectory {
    type Target = Vec<TableDirectoryEntry>;
    fn deref(&self) -> &Self::Target {
        &self.tables
    }
}
impl DerefMut for TableDirectory {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tables
    }
}

impl TableDirectory {
    /// Read `num_tables` fixed-size directory entries, dropping any `DSIG`
    /// entry on the way.
    ///
    /// A transcoded font can no longer match its own digital signature, so
    /// carrying the table forward would ship a signature that fails to
    /// verify. Everything downstream (binary-search fields, layout, output
    /// header count) uses the post-filter count. Entries keep their
    /// declaration order; they are not re-sorted by tag or offset.
    pub fn parse(input: &mut impl Buf, num_tables: usize) -> Result<Self, ConvertError> {
        let mut tables = Vec::with_capacity(num_tables);
        for _ in 0..num_tables {
            let entry = TableDirectoryEntry::parse(input)?;
            if entry.tag == DSIG {
                debug!("dropping DSIG table invalidated by transcoding");
                continue;
            }
            tables.push(entry);
        }
        Ok(Self { tables })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut as _;

    fn sample_header_bytes() -> Vec<u8> {
        let mut data = Vec::new();
        data.put_slice(b"wOFF");
        data.put_slice(b"OTTO");
        data.put_u32(1024); // length
        data.put_u16(7); // numTables
        data.put_u16(0); // reserved
        data.put_u32(2048); // totalSfntSize
        data.put_u16(1); // majorVersion
        data.put_u16(2); // minorVersion
        data.put_u32(900); // metaOffset
        data.put_u32(100); // metaLength
        data.put_u32(300); // metaOrigLength
        data.put_u32(1000); // privOffset
        data.put_u32(24); // privLength
        data
    }

    #[test]
    fn parses_all_header_fields() {
        let data = sample_header_bytes();
        let header = WoffHeader::parse(&mut data.as_slice()).unwrap();
        assert_eq!(header.signature, Tag::new(b"wOFF"));
        assert_eq!(header.flavor, Tag::new(b"OTTO"));
        assert_eq!(header.length, 1024);
        assert_eq!(header.num_tables, 7);
        assert_eq!(header.reserved, 0);
        assert_eq!(header.total_sfnt_size, 2048);
        assert_eq!(header.major_version, 1);
        assert_eq!(header.minor_version, 2);
        assert_eq!(header.meta_offset, 900);
        assert_eq!(header.meta_length, 100);
        assert_eq!(header.meta_orig_length, 300);
        assert_eq!(header.priv_offset, 1000);
        assert_eq!(header.priv_length, 24);
    }

    #[test]
    fn rejects_wrong_signature() {
        let mut data = sample_header_bytes();
        data[..4].copy_from_slice(b"wOF2");
        let result = WoffHeader::parse(&mut data.as_slice());
        assert!(matches!(result, Err(ConvertError::NotWoff)));
    }

    #[test]
    fn truncated_header_is_an_eof() {
        let data = sample_header_bytes();
        let result = WoffHeader::parse(&mut &data[..20]);
        assert!(matches!(result, Err(ConvertError::UnexpectedEof)));
    }

    fn directory_entry_bytes(tag: &[u8; 4], offset: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.put_slice(tag);
        data.put_u32(offset);
        data.put_u32(10); // compLength
        data.put_u32(10); // origLength
        data.put_u32(0xDEADBEEF);
        data
    }

    #[test]
    fn dsig_entries_are_filtered_out() {
        let mut data = Vec::new();
        data.extend(directory_entry_bytes(b"cmap", 104));
        data.extend(directory_entry_bytes(b"DSIG", 116));
        data.extend(directory_entry_bytes(b"glyf", 128));
        let directory = TableDirectory::parse(&mut data.as_slice(), 3).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory[0].tag, Tag::new(b"cmap"));
        assert_eq!(directory[1].tag, Tag::new(b"glyf"));
    }

    #[test]
    fn payload_slice_is_bounds_checked() {
        let entry = TableDirectoryEntry {
            tag: Tag::new(b"glyf"),
            woff_offset: 8,
            comp_length: 16,
            orig_length: 16,
            orig_checksum: 0,
            output_offset: 0,
        };
        let woff_data = vec![0u8; 20];
        assert!(matches!(
            entry.payload_slice(&woff_data),
            Err(ConvertError::OutOfBounds(_))
        ));
        let woff_data = vec![0u8; 24];
        assert_eq!(entry.payload_slice(&woff_data).unwrap().len(), 16);
    }
}
