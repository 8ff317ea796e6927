//! Decoder configuration
//!
//! Mirrors `seq-runtime::son::SonConfig`'s `{ pretty, indent }` shape: a
//! plain data struct with a `Default` impl plus named constructors for the
//! common cases.

/// Options controlling decoder behavior on malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// When `true`, a `LinkRef(obj_k)` whose target never appears anywhere
    /// in the document raises `CodecError::DanglingReference`. When `false`
    /// (the default), the decoder substitutes an empty sequence instead,
    /// matching the original Python codec's tolerant behavior.
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { strict: false }
    }
}

impl DecodeOptions {
    /// Raise `DanglingReference` on unresolved references.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    /// Substitute an empty sequence for unresolved references (the default).
    pub fn tolerant() -> Self {
        Self { strict: false }
    }
}
