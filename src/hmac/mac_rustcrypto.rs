// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! RustCrypto-backed MAC state: the direct HMAC context shape.
//!
//! The inner hash is supplied at init time by constructing
//! `Hmac<Sha1>` from the key; reset-without-rekey maps onto the
//! context's own `reset`, and finalize uses `finalize_reset` so the
//! state is immediately reusable for the same key.

use ::hmac::{Hmac, Mac};
use ::sha1::Sha1;

use super::*;

pub(crate) struct RustCryptoMac {
    mac: Option<Hmac<Sha1>>,
}

impl MacBackend for RustCryptoMac {
    fn create() -> Result<Self, AuthError> {
        Ok(Self { mac: None })
    }

    fn init(&mut self, key: &[u8]) -> Result<(), AuthError> {
        let mac = Hmac::<Sha1>::new_from_slice(key).map_err(|_| AuthError::AuthFail)?;
        self.mac = Some(mac);
        Ok(())
    }

    fn start(&mut self) -> Result<(), AuthError> {
        let mac = self.mac.as_mut().ok_or(AuthError::AuthFail)?;
        mac.reset();
        Ok(())
    }

    fn update(&mut self, message: &[u8]) -> Result<(), AuthError> {
        let mac = self.mac.as_mut().ok_or(AuthError::AuthFail)?;
        mac.update(message);
        Ok(())
    }

    fn finalize(&mut self, digest: &mut [u8]) -> Result<usize, AuthError> {
        let mac = self.mac.as_mut().ok_or(AuthError::AuthFail)?;
        let output = mac.finalize_reset().into_bytes();

        if digest.len() < output.len() {
            return Err(AuthError::AuthFail);
        }
        digest[..output.len()].copy_from_slice(&output);

        Ok(output.len())
    }
}
