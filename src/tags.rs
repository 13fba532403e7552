//! Tags the conversion pipeline dispatches on

use font_types::Tag;

pub const WOFF1_SIG: Tag = Tag::new(b"wOFF");

/// Digital signature table. Never carried into the output: byte-level
/// transcoding invalidates the signature.
pub const DSIG: Tag = Tag::new(b"DSIG");

/// Naming table, the one table whose contents may be patched on the way out.
pub const NAME: Tag = Tag::new(b"name");
