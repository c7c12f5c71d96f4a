// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Fixed-capacity authentication tag container.

use core::fmt;
use core::ops::Deref;

use zeroize::Zeroize;

/// Largest tag any algorithm in this crate can produce, in bytes.
///
/// Equal to the SHA-1 digest size, the largest native digest among the
/// supported algorithms.
pub const MAX_TAG_LEN: usize = 20;

/// The output of an authentication computation.
///
/// Holds up to [`MAX_TAG_LEN`] bytes together with the produced length.
/// When a computation is truncated, the container holds exactly the
/// leftmost `tag_len` bytes of the full digest; the remaining capacity is
/// zero and never exposed.
///
/// The caller embeds the tag into whatever wire format the surrounding
/// protocol defines; this type has no serialized representation of its own.
#[derive(Clone)]
pub struct AuthTag {
    bytes: [u8; MAX_TAG_LEN],
    len: usize,
}

impl AuthTag {
    /// Builds a tag holding a copy of `bytes`.
    ///
    /// The caller has already applied truncation; `bytes` must not exceed
    /// [`MAX_TAG_LEN`].
    pub(crate) fn from_slice(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= MAX_TAG_LEN);
        let mut tag = Self {
            bytes: [0u8; MAX_TAG_LEN],
            len: bytes.len(),
        };
        tag.bytes[..bytes.len()].copy_from_slice(bytes);
        tag
    }

    /// Returns the produced tag bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Returns the produced length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tag is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for AuthTag {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Deref for AuthTag {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for AuthTag {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for AuthTag {}

impl Zeroize for AuthTag {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
        self.len = 0;
    }
}

impl fmt::Debug for AuthTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
