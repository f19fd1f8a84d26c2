// MinIO Rust Library for Amazon S3 Compatible Cloud Storage
// Copyright 2025 MinIO, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Signature V4 for S3 POST policies

use crate::s3::creds::CredentialContext;
use hex::encode as hexencode;
#[cfg(not(feature = "ring"))]
use hmac::{Hmac, Mac};
#[cfg(feature = "ring")]
use ring::hmac;
#[cfg(not(feature = "ring"))]
use sha2::Sha256;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Returns HMAC hash for given key and data
pub fn hmac_hash(key: &[u8], data: &[u8]) -> Vec<u8> {
    #[cfg(feature = "ring")]
    {
        let key = hmac::Key::new(hmac::HMAC_SHA256, key);
        hmac::sign(&key, data).as_ref().to_vec()
    }
    #[cfg(not(feature = "ring"))]
    {
        let mut hasher =
            Hmac::<Sha256>::new_from_slice(key).expect("HMAC can take key of any size");
        hasher.update(data);
        hasher.finalize().into_bytes().to_vec()
    }
}

/// Returns hex encoded HMAC hash for given key and data
pub fn hmac_hash_hex(key: &[u8], data: &[u8]) -> String {
    hexencode(hmac_hash(key, data))
}

/// Derived SigV4 signing key, scoped to one date, region, service and request type.
///
/// The key bytes are wiped on drop and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns lowercase hex encoded signature of given data
    pub fn sign(&self, data: &[u8]) -> String {
        hmac_hash_hex(&self.0, data)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(*****)")
    }
}

/// Returns signing key of given credential context
pub fn get_signing_key(ctx: &CredentialContext) -> SigningKey {
    let mut secret = Zeroizing::new(b"AWS4".to_vec());
    secret.extend_from_slice(ctx.secret_key().as_bytes());

    let date_key = Zeroizing::new(hmac_hash(&secret, ctx.date_stamp().as_bytes()));
    let date_region_key = Zeroizing::new(hmac_hash(&date_key, ctx.region().as_bytes()));
    let date_region_service_key =
        Zeroizing::new(hmac_hash(&date_region_key, ctx.service().as_bytes()));
    SigningKey(hmac_hash(
        &date_region_service_key,
        ctx.request_type().as_bytes(),
    ))
}

/// Returns signature of the base64 encoded POST policy.
///
/// The base64 text itself is the string-to-sign, not the decoded JSON.
pub fn post_presign_v4(ctx: &CredentialContext, policy_base64: &str) -> String {
    get_signing_key(ctx).sign(policy_base64.as_bytes())
}
