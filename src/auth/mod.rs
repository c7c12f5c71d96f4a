// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The generic authentication engine contract.
//!
//! This module defines the polymorphic interface every authentication
//! algorithm satisfies: a static, process-lifetime [`AuthType`] describing
//! the algorithm and constructing per-stream contexts, and the mutable
//! [`AuthContext`] carrying key binding and in-progress hash state.
//!
//! # Lifecycle
//!
//! 1. Obtain an algorithm's [`AuthType`] (typically via a registry keyed by
//!    [`AuthAlgoId`]).
//! 2. [`allocate`](AuthType::allocate) a context sized for the stream's key
//!    and tag lengths.
//! 3. [`init`](AuthContext::init) it with the secret key.
//! 4. Either call [`compute`](AuthContext::compute) once with the whole
//!    message, or [`start`](AuthContext::start), any number of
//!    [`update`](AuthContext::update) calls, then `compute` with the
//!    remaining (possibly empty) fragment. Both paths produce the same tag
//!    for the same total message bytes.
//! 5. Drop the context (or call [`deallocate`](AuthContext::deallocate));
//!    key material held by the context is wiped either way.

use super::*;

mod tag;

pub use tag::*;

use tracing::debug;


/// Identifies an authentication algorithm to a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum AuthAlgoId {
    /// HMAC with SHA-1 as the inner hash (RFC 2104).
    HmacSha1,
}

/// A reference key/message/tag triple used to self-test an algorithm.
///
/// Each algorithm publishes one canonical vector through its descriptor;
/// [`run_self_test`] consumes it. The tag is full digest length.
pub struct AuthTestVector {
    /// Secret key bytes.
    pub key: &'static [u8],
    /// Message bytes to authenticate.
    pub message: &'static [u8],
    /// Expected tag over `message` under `key`, at native digest length.
    pub tag: &'static [u8],
}

/// Static, shared metadata describing one authentication algorithm.
///
/// One instance exists per algorithm for the lifetime of the process. It is
/// shared read-only by every context of that algorithm and consumed by the
/// dispatch layer to select algorithms by capability.
pub struct AuthDescriptor {
    /// Algorithm identifier tag.
    pub id: AuthAlgoId,
    /// Human-readable description of the algorithm.
    pub description: &'static str,
    /// Largest tag the algorithm can produce, in bytes. Equal to the
    /// native digest size.
    pub max_tag_len: usize,
    /// Required key length in bytes, or `None` if any length is accepted.
    pub key_len: Option<usize>,
    /// Length of the fixed string prepended to every message, in bytes.
    /// Zero for all current algorithms.
    pub prefix_len: usize,
    /// Canonical self-test fixture for this algorithm.
    pub self_test: &'static AuthTestVector,
}

/// An authentication algorithm: descriptor plus context factory.
///
/// One implementing type exists per algorithm. Implementations are
/// stateless; all mutable state lives in the contexts they allocate.
pub trait AuthType: Sync {
    /// Returns the static descriptor for this algorithm.
    fn descriptor(&self) -> &'static AuthDescriptor;

    /// Constructs a fresh context sized for the given key and tag lengths.
    ///
    /// # Arguments
    ///
    /// * `key_len` - Key length in bytes the context will be initialized with
    /// * `tag_len` - Tag length in bytes the context will produce
    ///
    /// # Errors
    ///
    /// - [`AuthError::BadParam`] if `tag_len` exceeds the algorithm's
    ///   native digest size; nothing is allocated in this case.
    /// - [`AuthError::AllocFail`] if backend-object creation fails; any
    ///   partial allocation is released before the error is returned.
    fn allocate(&self, key_len: usize, tag_len: usize)
        -> Result<Box<dyn AuthContext>, AuthError>;
}

/// Per-stream mutable authentication state.
///
/// A context exclusively owns its backend MAC state. It is not safe for
/// concurrent invocation of any two operations; confine each context to
/// one stream or serialize access externally.
pub trait AuthContext: Send {
    /// Declared key length in bytes.
    fn key_len(&self) -> usize;

    /// Declared tag length in bytes.
    fn tag_len(&self) -> usize;

    /// Length of the fixed prefix fed before the message. Always zero for
    /// the algorithms in this crate.
    fn prefix_len(&self) -> usize;

    /// Binds a secret key to the context and resets all hash progress.
    ///
    /// May be called more than once to re-key; each call fully supersedes
    /// the previous key and any partial computation.
    ///
    /// # Errors
    ///
    /// [`AuthError::AuthFail`] if the backend rejects initialization.
    fn init(&mut self, key: &[u8]) -> Result<(), AuthError>;

    /// Resets hash progress without changing the bound key.
    ///
    /// Cheaper than [`init`](Self::init) when reusing the same key for a
    /// new message.
    ///
    /// # Errors
    ///
    /// [`AuthError::AuthFail`] if no key is bound or the backend rejects
    /// the reset.
    fn start(&mut self) -> Result<(), AuthError>;

    /// Feeds message bytes into the in-progress computation.
    ///
    /// May be called zero or more times between `init`/`start` and
    /// [`compute`](Self::compute).
    ///
    /// # Errors
    ///
    /// [`AuthError::AuthFail`] if the backend rejects the feed.
    fn update(&mut self, message: &[u8]) -> Result<(), AuthError>;

    /// Feeds any final message bytes, finalizes the digest, and returns a
    /// tag of exactly `tag_len` bytes.
    ///
    /// The tag is the leftmost `tag_len` bytes of the full native digest;
    /// truncation never reorders and never hashes the hash. On success the
    /// context is left reset for the same key, as if [`start`](Self::start)
    /// had been called.
    ///
    /// # Errors
    ///
    /// - [`AuthError::BadParam`] if `tag_len` exceeds the native digest
    ///   size; the context state is unchanged.
    /// - [`AuthError::AuthFail`] if finalization fails.
    fn compute(&mut self, message: &[u8], tag_len: usize)
        -> Result<AuthTag, AuthError>;

    /// Releases the context.
    ///
    /// Equivalent to dropping it: key material held by the context is
    /// wiped before the memory is released. This operation always succeeds
    /// from the caller's perspective.
    fn deallocate(self: Box<Self>) {
        drop(self)
    }
}

/// Runs an algorithm's published self-test fixture.
///
/// Exercises the full lifecycle against the descriptor's reference vector:
/// a one-shot computation at native digest length, a truncated computation
/// (half the digest, checked to be the leftmost bytes of the reference
/// tag), and a split incremental computation.
///
/// # Errors
///
/// Propagates lifecycle errors, and returns [`AuthError::AuthFail`] if any
/// computed tag differs from the reference.
pub fn run_self_test(auth: &dyn AuthType) -> Result<(), AuthError> {
    let desc = auth.descriptor();
    let vector = desc.self_test;
    let tag_len = vector.tag.len();

    debug!(id = ?desc.id, "running auth self test");

    let mut ctx = auth.allocate(vector.key.len(), tag_len)?;
    ctx.init(vector.key)?;

    // One-shot at native digest length.
    let tag = ctx.compute(vector.message, tag_len)?;
    if tag.as_bytes() != vector.tag {
        return Err(AuthError::AuthFail);
    }

    // Truncated output must be the leftmost bytes of the reference tag.
    let half = tag_len / 2;
    ctx.start()?;
    let tag = ctx.compute(vector.message, half)?;
    if tag.as_bytes() != &vector.tag[..half] {
        return Err(AuthError::AuthFail);
    }

    // Incremental feeding must match the one-shot result.
    let mid = vector.message.len() / 2;
    ctx.start()?;
    ctx.update(&vector.message[..mid])?;
    let tag = ctx.compute(&vector.message[mid..], tag_len)?;
    if tag.as_bytes() != vector.tag {
        return Err(AuthError::AuthFail);
    }

    Ok(())
}
