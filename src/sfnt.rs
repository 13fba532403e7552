//! sfnt output layout: binary-search header fields and table placement

use crate::woff::TableDirectoryEntry;

/// Size of the sfnt header (version tag + numTables + search fields).
pub const HEADER_SIZE: usize = 12;
/// Size of one sfnt table directory entry.
pub const DIRECTORY_ENTRY_SIZE: usize = 16;

/// Round a value up to the nearest multiple of 4, leaving it unchanged if
/// rounding would overflow. sfnt table offsets must be 4-byte aligned.
pub(crate) fn round4(value: usize) -> usize {
    match value.checked_add(3) {
        Some(value_plus_3) => value_plus_3 & !3,
        None => value,
    }
}

/// The three derived sfnt header fields that make the table directory
/// binary-searchable.
///
/// <https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory>
pub struct BinarySearchFields {
    /// `2^entry_selector * 16`
    pub search_range: u16,
    /// Largest `e` such that `2^e <= num_tables`.
    pub entry_selector: u16,
    /// `num_tables * 16 - search_range`
    pub range_shift: u16,
}

impl BinarySearchFields {
    /// Compute the fields for the post-filter table count.
    ///
    /// A zero table count has no meaningful binary-search parameters; all
    /// three fields are emitted as zero and the shell is left for the font
    /// loader to reject.
    pub fn for_table_count(num_tables: u16) -> Self {
        if num_tables == 0 {
            return Self {
                search_range: 0,
                entry_selector: 0,
                range_shift: 0,
            };
        }
        let entry_selector = num_tables.ilog2() as u16;
        let search_range = (16u32 << entry_selector) as u16;
        let range_shift = (u32::from(num_tables) * 16).wrapping_sub(u32::from(search_range)) as u16;
        Self {
            search_range,
            entry_selector,
            range_shift,
        }
    }
}

/// Assign each table its output offset.
///
/// First-fit sequential layout in directory declaration order: tables start
/// right after the header and directory, each occupying its decompressed
/// length rounded up to a 4-byte boundary. Tables are never reordered or
/// deduplicated.
pub(crate) fn assign_output_offsets(tables: &mut [TableDirectoryEntry]) {
    let mut offset = HEADER_SIZE + DIRECTORY_ENTRY_SIZE * tables.len();
    for table in tables {
        table.output_offset = offset as u32;
        offset = round4(offset + table.orig_length as usize);
    }
}
