//! WOFF 1.0 to OTF/TTF font container transcoding
//!
//! Takes a WOFF 1.0 compressed font container and rewrites it as a
//! standard sfnt-structured font file that a platform font stack can load
//! directly: the WOFF table directory is re-laid-out as an sfnt table
//! directory, zlib-compressed table payloads are inflated, the `DSIG`
//! table (invalidated by transcoding) is dropped, and `name` tables with
//! an empty Windows family name are patched to reuse the PostScript name.
//!
//! Each conversion is a pure function of its input bytes with no shared
//! state, so calls are independent and safe to run concurrently.
//!
//! ```no_run
//! let woff = std::fs::read("font.woff")?;
//! let otf = unwoff::convert_woff(&woff)?;
//! std::fs::write("font.otf", &otf)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod decompress;
mod error;
mod name_repair;
mod sfnt;
mod tags;
mod woff;

pub use convert::convert_woff_with_custom_z;
#[cfg(feature = "z")]
pub use convert::{convert, convert_woff};
pub use error::ConvertError;
pub use name_repair::{NameRepair, repair_family_name};
pub use sfnt::BinarySearchFields;
pub use woff::{TableDirectory, TableDirectoryEntry, WoffHeader};
