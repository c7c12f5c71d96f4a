// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! HMAC-SHA1 authentication module.
//!
//! Implements the generic [`AuthType`] / [`AuthContext`] contract on top of
//! an external MAC backend. SHA-1 yields a 20-byte native digest; tags of
//! any length up to that may be requested, and a truncated tag is always
//! the leftmost bytes of the full digest.
//!
//! # Backend selection
//!
//! The backend shape is fixed at build time by cargo feature and hidden
//! behind the [`Sha1Mac`] alias; nothing in this module branches on it at
//! runtime:
//!
//! - `backend-rustcrypto` (default): direct HMAC context, the inner hash
//!   supplied at init time.
//! - `backend-ring`: keyed algorithm object fetched first, generic MAC
//!   contexts derived from it per message.
//!
//! # Key material
//!
//! The context keeps its bound key in [`Zeroizing`] storage, so every
//! teardown path, normal drop included, wipes it before the memory is
//! released. The wipe covers everything this crate owns; the key schedule
//! the backend crate derives from the key (for instance the HMAC
//! ipad/opad state inside `Hmac<Sha1>`) is owned by that crate and is not
//! guaranteed to be zeroized on drop.

use super::*;

use tracing::{debug, trace};
use zeroize::{Zeroize, Zeroizing};

cfg_if::cfg_if! {
    if #[cfg(feature = "backend-ring")] {
        mod mac_ring;
    } else if #[cfg(feature = "backend-rustcrypto")] {
        mod mac_rustcrypto;
    } else {
        compile_error!("Enable exactly one MAC backend feature: backend-ring or backend-rustcrypto");
    }
}

define_type!(pub(crate) Sha1Mac, mac_ring::RingMac, mac_rustcrypto::RustCryptoMac);

#[cfg(test)]
mod tests;

/// SHA-1 native digest size in bytes.
pub const SHA1_DIGEST_LEN: usize = 20;

/// Internal adapter contract over the linked MAC backend.
///
/// Both backend shapes implement this trait; everything above it is shape
/// agnostic. `create` is the only operation allowed to surface an
/// allocation failure; every other backend rejection is an
/// [`AuthError::AuthFail`].
pub(crate) trait MacBackend: Send + Sized {
    /// Creates the backend MAC state. No key is bound yet.
    fn create() -> Result<Self, AuthError>;

    /// Binds `key` with SHA-1 as the inner hash, discarding any previous
    /// key and progress.
    fn init(&mut self, key: &[u8]) -> Result<(), AuthError>;

    /// Resets progress while keeping the bound key.
    fn start(&mut self) -> Result<(), AuthError>;

    /// Feeds message bytes.
    fn update(&mut self, message: &[u8]) -> Result<(), AuthError>;

    /// Writes the full digest into `digest` and returns the produced
    /// length. Leaves the backend reset for the same key.
    fn finalize(&mut self, digest: &mut [u8]) -> Result<usize, AuthError>;
}

/// The HMAC-SHA1 authentication algorithm.
///
/// Stateless; use [`HMAC_SHA1`] or construct freely. All per-stream state
/// lives in the contexts it allocates.
pub struct HmacSha1;

/// Process-wide instance of the HMAC-SHA1 algorithm.
pub static HMAC_SHA1: HmacSha1 = HmacSha1;

/// Canonical HMAC-SHA1 self-test fixture (RFC 2202, test case 1).
static HMAC_SHA1_SELF_TEST: AuthTestVector = AuthTestVector {
    key: &[0x0b; 20],
    message: b"Hi There",
    tag: &[
        0xb6, 0x17, 0x31, 0x86, 0x55, 0x05, 0x72, 0x64, 0xe2, 0x8b, 0xc0,
        0xb6, 0xfb, 0x37, 0x8c, 0x8e, 0xf1, 0x46, 0xbe, 0x00,
    ],
};

/// Static descriptor for HMAC-SHA1.
pub static HMAC_SHA1_DESCRIPTOR: AuthDescriptor = AuthDescriptor {
    id: AuthAlgoId::HmacSha1,
    description: "hmac sha-1 authentication function",
    max_tag_len: SHA1_DIGEST_LEN,
    key_len: None,
    prefix_len: 0,
    self_test: &HMAC_SHA1_SELF_TEST,
};

impl AuthType for HmacSha1 {
    fn descriptor(&self) -> &'static AuthDescriptor {
        &HMAC_SHA1_DESCRIPTOR
    }

    fn allocate(
        &self,
        key_len: usize,
        tag_len: usize,
    ) -> Result<Box<dyn AuthContext>, AuthError> {
        let ctx = HmacSha1Context::<Sha1Mac>::allocate(key_len, tag_len)?;
        Ok(Box::new(ctx))
    }
}

/// Per-stream HMAC-SHA1 state.
///
/// Generic over the backend so tests can substitute instrumented backends;
/// the public surface only ever uses the build-selected [`Sha1Mac`].
pub(crate) struct HmacSha1Context<B: MacBackend = Sha1Mac> {
    mac: B,
    key: Zeroizing<Vec<u8>>,
    key_len: usize,
    tag_len: usize,
    prefix_len: usize,
}

impl<B: MacBackend> HmacSha1Context<B> {
    /// Constructs a context sized for the given key and tag lengths.
    ///
    /// Bounds are validated before the backend state is created, so a
    /// `BadParam` rejection allocates nothing. If backend creation fails,
    /// nothing built so far survives the error return.
    pub(crate) fn allocate(key_len: usize, tag_len: usize) -> Result<Self, AuthError> {
        debug!(key_len, tag_len, "allocating hmac sha-1 auth context");

        if tag_len > SHA1_DIGEST_LEN {
            return Err(AuthError::BadParam);
        }

        let mac = B::create()?;

        Ok(Self {
            mac,
            key: Zeroizing::new(Vec::new()),
            key_len,
            tag_len,
            prefix_len: 0,
        })
    }

    /// Wipes the key material held by the context.
    ///
    /// Every teardown path funnels through here; `Drop` calls it, and the
    /// `Zeroizing` wrapper wipes again on its own drop as a backstop.
    fn wipe(&mut self) {
        self.key.zeroize();
    }
}

impl<B: MacBackend> Drop for HmacSha1Context<B> {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl<B: MacBackend> AuthContext for HmacSha1Context<B> {
    fn key_len(&self) -> usize {
        self.key_len
    }

    fn tag_len(&self) -> usize {
        self.tag_len
    }

    fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    fn init(&mut self, key: &[u8]) -> Result<(), AuthError> {
        trace!(key_len = key.len(), "keying hmac sha-1 context");

        self.key.zeroize();
        self.key.extend_from_slice(key);
        self.mac.init(key)
    }

    fn start(&mut self) -> Result<(), AuthError> {
        self.mac.start()
    }

    fn update(&mut self, message: &[u8]) -> Result<(), AuthError> {
        trace!(message_len = message.len(), "hmac sha-1 update");

        self.mac.update(message)
    }

    fn compute(&mut self, message: &[u8], tag_len: usize) -> Result<AuthTag, AuthError> {
        trace!(message_len = message.len(), tag_len, "hmac sha-1 compute");

        // Truncation cannot request more bytes than the digest produces.
        if tag_len > SHA1_DIGEST_LEN {
            return Err(AuthError::BadParam);
        }

        self.mac.update(message)?;

        let mut digest = Zeroizing::new([0u8; SHA1_DIGEST_LEN]);
        let produced = self.mac.finalize(&mut digest[..])?;

        if produced < tag_len {
            // Bounds were validated before any backend call, so a shortfall
            // here is an internal-invariant violation, not a routine error.
            debug_assert!(
                false,
                "backend produced {produced} digest bytes, {tag_len} requested"
            );
            return Err(AuthError::AuthFail);
        }

        let tag = AuthTag::from_slice(&digest[..tag_len]);
        trace!(?tag, "hmac sha-1 output");

        Ok(tag)
    }
}
