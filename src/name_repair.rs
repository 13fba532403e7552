//! Repair of `name` tables with an empty Windows family name
//!
//! Some malformed source fonts carry a zero-length family name record
//! while still having a usable PostScript name. The platform font stack
//! refuses such fonts, so on the way out we alias the empty family record
//! to the PostScript record's string storage. Decode, patch one record,
//! re-encode; the string storage blob itself is copied byte for byte.

use bytes::{Buf, BufMut};

use crate::error::ConvertError;
use crate::tags::NAME;

const NAME_HEADER_SIZE: usize = 6;
const NAME_RECORD_SIZE: usize = 12;

const WINDOWS_PLATFORM_ID: u16 = 3;
const FAMILY_NAME_ID: u16 = 1;
const POSTSCRIPT_NAME_ID: u16 = 6;

/// Outcome of the repair pass.
///
/// `Unchanged` tells the caller to write the original table bytes through
/// untouched, keeping the common path a pure passthrough.
pub enum NameRepair {
    Unchanged,
    FamilyAliased(Vec<u8>),
}

/// One record of the `name` table.
///
/// <https://learn.microsoft.com/en-us/typography/opentype/spec/name>
struct NameRecord {
    /// Platform identifier code.
    platform_id: u16,
    /// Platform-specific encoding identifier.
    encoding_id: u16,
    /// Language identifier.
    language_id: u16,
    /// Name identifier.
    name_id: u16,
    /// Name string length in bytes.
    length: u16,
    /// Name string offset in bytes from the start of string storage.
    offset: u16,
}

impl NameRecord {
    fn parse(input: &mut impl Buf) -> Self {
        Self {
            platform_id: input.get_u16(),
            encoding_id: input.get_u16(),
            language_id: input.get_u16(),
            name_id: input.get_u16(),
            length: input.get_u16(),
            offset: input.get_u16(),
        }
    }

    fn write(&self, out: &mut impl BufMut) {
        out.put_u16(self.platform_id);
        out.put_u16(self.encoding_id);
        out.put_u16(self.language_id);
        out.put_u16(self.name_id);
        out.put_u16(self.length);
        out.put_u16(self.offset);
    }
}

/// Patch an empty Windows family name record to alias the PostScript name.
///
/// Looks up the (platform 3, name ID 1) record and the first name ID 6
/// record on any platform. If the family record has zero length and the
/// PostScript record does not, the family record's length and offset are
/// overwritten to point at the PostScript string; record order and the
/// storage blob stay exactly as they were. A table too short for its
/// declared record count is data corruption, same severity as a payload
/// length mismatch.
pub fn repair_family_name(data: &[u8]) -> Result<NameRepair, ConvertError> {
    if data.len() < NAME_HEADER_SIZE {
        return Err(ConvertError::MalformedTable(NAME));
    }
    let mut input = data;
    let format = input.get_u16();
    let count = input.get_u16();
    let storage_offset = input.get_u16();

    let records_len = NAME_RECORD_SIZE * count as usize;
    if input.remaining() < records_len {
        return Err(ConvertError::MalformedTable(NAME));
    }
    let mut records: Vec<NameRecord> = (0..count).map(|_| NameRecord::parse(&mut input)).collect();

    let family = records
        .iter()
        .position(|r| r.platform_id == WINDOWS_PLATFORM_ID && r.name_id == FAMILY_NAME_ID);
    let postscript = records.iter().position(|r| r.name_id == POSTSCRIPT_NAME_ID);
    let (Some(family), Some(postscript)) = (family, postscript) else {
        return Ok(NameRepair::Unchanged);
    };
    if records[family].length != 0 || records[postscript].length == 0 {
        return Ok(NameRepair::Unchanged);
    }

    records[family].length = records[postscript].length;
    records[family].offset = records[postscript].offset;

    let mut out = Vec::with_capacity(data.len());
    out.put_u16(format);
    out.put_u16(count);
    out.put_u16(storage_offset);
    for record in &records {
        record.write(&mut out);
    }
    // String storage and anything after the record array, verbatim.
    out.extend_from_slice(&data[NAME_HEADER_SIZE + records_len..]);
    Ok(NameRepair::FamilyAliased(out))
}
