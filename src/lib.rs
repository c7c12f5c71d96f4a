// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Pluggable message-authentication primitives for real-time transport
//! packets.
//!
//! This crate provides a uniform lifecycle contract for message
//! authentication algorithms and one concrete binding, HMAC-SHA1. The hash
//! computation itself is delegated to an external cryptographic backend;
//! the value of this crate is the discipline around it:
//!
//! - a polymorphic [`AuthType`] / [`AuthContext`] contract that a registry
//!   can dispatch on by capability rather than by concrete type,
//! - identical results from one-shot and incremental hashing,
//! - truncated tags that are always the leftmost bytes of the full digest,
//! - strict bounds validation before any backend call, and
//! - zeroization of key material on every teardown path.
//!
//! # Backends
//!
//! Two backend shapes are supported, selected at build time by cargo
//! feature and invisible to callers:
//!
//! - `backend-rustcrypto` (default): a direct HMAC context from the
//!   RustCrypto `hmac` and `sha1` crates.
//! - `backend-ring`: `ring`'s fetch-style API, where a keyed algorithm
//!   object is obtained first and generic MAC contexts are derived from it.
//!
//! # Concurrency
//!
//! A context is single-caller state: no two lifecycle operations may run
//! concurrently on the same context. Distinct contexts share nothing and
//! may be used from different threads freely.

mod auth;
mod hmac;

pub use self::auth::*;
pub use self::hmac::*;

use thiserror::Error;

/// Error type for all authentication lifecycle operations.
///
/// The taxonomy is deliberately small: callers branch on the kind of
/// failure, not on backend-specific detail. Backend failures are never
/// retried internally; they signal a programming or environment error,
/// not a transient condition.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// A requested or declared tag length exceeds the algorithm's native
    /// digest size. Detected before any backend call; no resources are
    /// touched.
    #[error("tag length exceeds the native digest size")]
    BadParam,

    /// Memory or backend-object creation failed during allocation. Any
    /// partially acquired resources have already been released.
    #[error("auth context allocation failed")]
    AllocFail,

    /// The backend rejected an init, start, update, or finalize operation.
    #[error("authentication operation failed")]
    AuthFail,
}

/// Macro for defining backend-specific type aliases.
///
/// This macro creates one alias per supported MAC backend, so the modules
/// above the adapter never branch on which backend was compiled in. The
/// ring backend wins when both features are enabled.
macro_rules! define_type {
    ($vis:vis $name:ident, $ring_type:ty, $rustcrypto_type:ty) => {
        /// Selected MAC backend for this build.
        #[cfg(feature = "backend-ring")]
        $vis type $name = $ring_type;

        /// Selected MAC backend for this build.
        #[cfg(all(feature = "backend-rustcrypto", not(feature = "backend-ring")))]
        $vis type $name = $rustcrypto_type;
    };
}

pub(crate) use define_type;
