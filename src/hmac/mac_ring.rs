// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! ring-backed MAC state: the fetch-style shape.
//!
//! The HMAC-SHA1 algorithm object is selected once per keying and a
//! generic MAC context is derived from the keyed object for each message.
//! The keyed object is retained so reset-without-rekey is a fresh context
//! derivation rather than a re-key.

use ring::hmac;

use super::*;

pub(crate) struct RingMac {
    key: Option<hmac::Key>,
    ctx: Option<hmac::Context>,
}

impl MacBackend for RingMac {
    fn create() -> Result<Self, AuthError> {
        Ok(Self {
            key: None,
            ctx: None,
        })
    }

    fn init(&mut self, key: &[u8]) -> Result<(), AuthError> {
        let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, key);
        self.ctx = Some(hmac::Context::with_key(&key));
        self.key = Some(key);
        Ok(())
    }

    fn start(&mut self) -> Result<(), AuthError> {
        let key = self.key.as_ref().ok_or(AuthError::AuthFail)?;
        self.ctx = Some(hmac::Context::with_key(key));
        Ok(())
    }

    fn update(&mut self, message: &[u8]) -> Result<(), AuthError> {
        let ctx = self.ctx.as_mut().ok_or(AuthError::AuthFail)?;
        ctx.update(message);
        Ok(())
    }

    fn finalize(&mut self, digest: &mut [u8]) -> Result<usize, AuthError> {
        // Signing consumes the context; derive a fresh one afterwards so
        // the post-finalize state matches the other backend shape.
        let ctx = self.ctx.take().ok_or(AuthError::AuthFail)?;
        let tag = ctx.sign();
        let produced = tag.as_ref().len();

        if digest.len() < produced {
            return Err(AuthError::AuthFail);
        }
        digest[..produced].copy_from_slice(tag.as_ref());

        self.start()?;
        Ok(produced)
    }
}
