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

//! Form field names and fixed values of a presigned POST upload

pub const ACL: &str = "acl";
pub const BUCKET: &str = "bucket";
pub const KEY: &str = "key";
pub const SUCCESS_ACTION_STATUS: &str = "success_action_status";
pub const FILE: &str = "file";

pub const POLICY: &str = "policy";

pub const X_AMZ_ALGORITHM: &str = "x-amz-algorithm";
pub const X_AMZ_CREDENTIAL: &str = "x-amz-credential";
pub const X_AMZ_DATE: &str = "x-amz-date";
pub const X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";
pub const X_AMZ_SIGNATURE: &str = "x-amz-signature";

/// Fields with this prefix are ignored by the policy evaluator
pub const X_IGNORE_PREFIX: &str = "x-ignore-";

pub const ACL_PRIVATE: &str = "private";
pub const SUCCESS_STATUS_CREATED: &str = "201";
pub const SIGV4_ALGORITHM: &str = "AWS4-HMAC-SHA256";

pub const DEFAULT_SERVICE: &str = "s3";
pub const DEFAULT_REQUEST_TYPE: &str = "aws4_request";

/// Seconds a policy stays valid unless configured otherwise
pub const DEFAULT_POLICY_TIMEOUT_SECS: i64 = 600;
