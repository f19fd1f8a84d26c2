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

//! Error definitions for POST policy signing

use thiserror::Error;

/// Error definitions
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to serialize policy: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base64 policy: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("policy is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid expiration time: {0}")]
    TimeParse(#[from] chrono::ParseError),

    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    #[error("invalid policy document: {0}")]
    InvalidPolicy(String),

    #[error("form field violates policy: {0}")]
    PolicyViolation(String),
}
