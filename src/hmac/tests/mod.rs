// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;

use std::sync::atomic::{AtomicIsize, Ordering};


/// Installs a tracing subscriber capturing this crate's debug and trace
/// events into the test output. Safe to call from every test; only the
/// first call installs.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Net number of live `CountingMac` instances.
pub(crate) static COUNTING_MAC_LIVE: AtomicIsize = AtomicIsize::new(0);

/// Backend stub that tracks create/drop pairing.
///
/// Stands in for the allocation-counter fixture: every `create` must be
/// balanced by exactly one drop, so the counter's net change exposes
/// leaked or double-freed backend state.
pub(crate) struct CountingMac;

impl MacBackend for CountingMac {
    fn create() -> Result<Self, AuthError> {
        COUNTING_MAC_LIVE.fetch_add(1, Ordering::SeqCst);
        Ok(Self)
    }

    fn init(&mut self, _key: &[u8]) -> Result<(), AuthError> {
        Ok(())
    }

    fn start(&mut self) -> Result<(), AuthError> {
        Ok(())
    }

    fn update(&mut self, _message: &[u8]) -> Result<(), AuthError> {
        Ok(())
    }

    fn finalize(&mut self, digest: &mut [u8]) -> Result<usize, AuthError> {
        digest[..SHA1_DIGEST_LEN].fill(0);
        Ok(SHA1_DIGEST_LEN)
    }
}

impl Drop for CountingMac {
    fn drop(&mut self) {
        COUNTING_MAC_LIVE.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Backend stub whose creation always fails.
pub(crate) struct FailingMac;

impl MacBackend for FailingMac {
    fn create() -> Result<Self, AuthError> {
        Err(AuthError::AllocFail)
    }

    fn init(&mut self, _key: &[u8]) -> Result<(), AuthError> {
        Err(AuthError::AuthFail)
    }

    fn start(&mut self) -> Result<(), AuthError> {
        Err(AuthError::AuthFail)
    }

    fn update(&mut self, _message: &[u8]) -> Result<(), AuthError> {
        Err(AuthError::AuthFail)
    }

    fn finalize(&mut self, _digest: &mut [u8]) -> Result<usize, AuthError> {
        Err(AuthError::AuthFail)
    }
}
