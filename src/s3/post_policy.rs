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

//! POST policy document: exact-match conditions and expiration
//!
//! See [Creating a POST Policy](https://docs.aws.amazon.com/AmazonS3/latest/API/sigv4-HTTPPOSTConstructPolicy.html).

use crate::s3::creds::CredentialContext;
use crate::s3::error::Error;
use crate::s3::form_constants::*;
use crate::s3::utils::{UtcTime, b64_decode, b64_encode, to_amz_date};
use chrono::Duration;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Exact-match policy condition.
///
/// Serializes as a JSON object with exactly one entry, e.g. `{"acl":"private"}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    field: String,
    value: String,
}

impl Condition {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ConditionVisitor;

        impl<'de> Visitor<'de> for ConditionVisitor {
            type Value = Condition;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object with exactly one string entry")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Condition, A::Error> {
                let (field, value) = map
                    .next_entry::<String, String>()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if map.next_key::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(2, &self));
                }
                Ok(Condition { field, value })
            }
        }

        deserializer.deserialize_map(ConditionVisitor)
    }
}

/// Ordered list of conditions; serializes as a JSON array in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conditions(Vec<Condition>);

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.push(Condition::new(field, value));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Condition> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns value of the first condition on given field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.value.as_str())
    }
}

impl<'a> IntoIterator for &'a Conditions {
    type Item = &'a Condition;
    type IntoIter = std::slice::Iter<'a, Condition>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds the upload conditions for given bucket and object key.
///
/// The order is fixed: `acl`, `bucket`, `key`, `success_action_status`, `x-amz-algorithm`,
/// `x-amz-credential`, `x-amz-date`, followed by `x-amz-security-token` when the context
/// carries a session token. `now` must be the instant the context was created with.
pub fn build_conditions(
    bucket: &str,
    key: &str,
    ctx: &CredentialContext,
    now: UtcTime,
) -> Conditions {
    let mut conditions = Conditions::new();
    conditions.push(ACL, ACL_PRIVATE);
    conditions.push(BUCKET, bucket);
    conditions.push(KEY, key);
    conditions.push(SUCCESS_ACTION_STATUS, SUCCESS_STATUS_CREATED);
    conditions.push(X_AMZ_ALGORITHM, SIGV4_ALGORITHM);
    conditions.push(X_AMZ_CREDENTIAL, ctx.credential_scope());
    conditions.push(X_AMZ_DATE, to_amz_date(now));
    if let Some(token) = ctx.session_token() {
        conditions.push(X_AMZ_SECURITY_TOKEN, token);
    }
    conditions
}

mod iso8601 {
    use crate::s3::utils::{UtcTime, from_iso8601utc, to_iso8601utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &UtcTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_iso8601utc(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<UtcTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        from_iso8601utc(&s).map_err(serde::de::Error::custom)
    }
}

/// Expiring POST policy document
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostPolicy {
    #[serde(with = "iso8601")]
    expiration: UtcTime,
    conditions: Conditions,
}

impl PostPolicy {
    /// Returns a policy expiring `timeout` after `now`.
    pub fn new(timeout: Duration, conditions: Conditions, now: UtcTime) -> Self {
        Self {
            expiration: now + timeout,
            conditions,
        }
    }

    pub fn expiration(&self) -> UtcTime {
        self.expiration
    }

    pub fn conditions(&self) -> &Conditions {
        &self.conditions
    }

    /// Returns the compact JSON document, `expiration` first
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Returns the JSON document encoded with standard, padded base64
    pub fn encode(&self) -> Result<String, Error> {
        let json = self.to_json()?;
        log::trace!("policy document is {} bytes", json.len());
        Ok(b64_encode(json))
    }

    /// Parses a base64 encoded policy document.
    ///
    /// The document must contain exactly the `expiration` and `conditions` keys, and every
    /// condition must be an object with a single string entry.
    pub fn decode(policy_base64: &str) -> Result<Self, Error> {
        let json = String::from_utf8(b64_decode(policy_base64)?)?;
        serde_json::from_str(&json).map_err(|e| Error::InvalidPolicy(e.to_string()))
    }
}

/// Builds a policy expiring `timeout_secs` seconds after `now`.
pub fn build_policy(timeout_secs: i64, conditions: Conditions, now: UtcTime) -> PostPolicy {
    PostPolicy::new(Duration::seconds(timeout_secs), conditions, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn test_now() -> UtcTime {
        Utc.with_ymd_and_hms(2017, 2, 7, 12, 0, 0).unwrap()
    }

    fn test_conditions() -> Conditions {
        let ctx = CredentialContext::new("", "", "eu-central-1", test_now());
        build_conditions("test", "test.csv.gz", &ctx, test_now())
    }

    const EXPECTED_JSON: &str = concat!(
        r#"{"expiration":"2017-02-07T12:10:00.000Z","conditions":["#,
        r#"{"acl":"private"},{"bucket":"test"},{"key":"test.csv.gz"},"#,
        r#"{"success_action_status":"201"},{"x-amz-algorithm":"AWS4-HMAC-SHA256"},"#,
        r#"{"x-amz-credential":"/20170207/eu-central-1/s3/aws4_request"},"#,
        r#"{"x-amz-date":"20170207T120000Z"}]}"#
    );

    const EXPECTED_BASE64: &str = "eyJleHBpcmF0aW9uIjoiMjAxNy0wMi0wN1QxMjoxMDowMC4wMDBaIiwiY29uZGl0aW9ucyI6W3siYWNsIjoicHJpdmF0ZSJ9LHsiYnVja2V0IjoidGVzdCJ9LHsia2V5IjoidGVzdC5jc3YuZ3oifSx7InN1Y2Nlc3NfYWN0aW9uX3N0YXR1cyI6IjIwMSJ9LHsieC1hbXotYWxnb3JpdGhtIjoiQVdTNC1ITUFDLVNIQTI1NiJ9LHsieC1hbXotY3JlZGVudGlhbCI6Ii8yMDE3MDIwNy9ldS1jZW50cmFsLTEvczMvYXdzNF9yZXF1ZXN0In0seyJ4LWFtei1kYXRlIjoiMjAxNzAyMDdUMTIwMDAwWiJ9XX0=";

    #[test]
    fn test_build_conditions_order() {
        let conditions = test_conditions();
        let fields: Vec<&str> = conditions.iter().map(|c| c.field()).collect();
        assert_eq!(
            fields,
            [
                "acl",
                "bucket",
                "key",
                "success_action_status",
                "x-amz-algorithm",
                "x-amz-credential",
                "x-amz-date"
            ]
        );
    }

    #[test]
    fn test_build_conditions_with_session_token() {
        let ctx = CredentialContext::new("AK", "SK", "us-east-1", test_now())
            .with_session_token(Some("token"));
        let conditions = build_conditions("b", "k", &ctx, test_now());
        assert_eq!(conditions.len(), 8);
        assert_eq!(conditions.get(X_AMZ_SECURITY_TOKEN), Some("token"));
        assert_eq!(conditions.iter().last().unwrap().field(), X_AMZ_SECURITY_TOKEN);
    }

    #[test]
    fn test_conditions_render_as_single_key_objects() {
        let json = serde_json::to_string(&test_conditions()).unwrap();
        assert!(json.starts_with(r#"[{"acl":"private"},{"bucket":"test"},"#));
    }

    #[test]
    fn test_policy_json() {
        let policy = build_policy(DEFAULT_POLICY_TIMEOUT_SECS, test_conditions(), test_now());
        assert_eq!(policy.to_json().unwrap(), EXPECTED_JSON);
    }

    #[test]
    fn test_policy_encode() {
        let policy = build_policy(DEFAULT_POLICY_TIMEOUT_SECS, test_conditions(), test_now());
        assert_eq!(policy.encode().unwrap(), EXPECTED_BASE64);
    }

    #[test]
    fn test_policy_expiration_offset() {
        let policy = build_policy(90, Conditions::new(), test_now());
        assert_eq!(policy.expiration() - test_now(), Duration::seconds(90));
    }

    #[test]
    fn test_policy_decode() {
        let policy = PostPolicy::decode(EXPECTED_BASE64).unwrap();
        assert_eq!(policy.expiration(), test_now() + Duration::seconds(600));
        assert_eq!(policy.conditions(), &test_conditions());
    }

    #[test]
    fn test_policy_decode_rejects_merged_conditions() {
        let json = r#"{"expiration":"2017-02-07T12:10:00.000Z","conditions":[{"acl":"private","bucket":"test"}]}"#;
        let err = PostPolicy::decode(&b64_encode(json)).unwrap_err();
        assert!(matches!(err, Error::InvalidPolicy(_)));
    }

    #[test]
    fn test_policy_decode_rejects_extra_keys() {
        let json = r#"{"expiration":"2017-02-07T12:10:00.000Z","conditions":[],"extra":1}"#;
        assert!(matches!(
            PostPolicy::decode(&b64_encode(json)),
            Err(Error::InvalidPolicy(_))
        ));

        let json = r#"{"conditions":[]}"#;
        assert!(matches!(
            PostPolicy::decode(&b64_encode(json)),
            Err(Error::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_policy_decode_rejects_bad_base64() {
        assert!(matches!(
            PostPolicy::decode("%%%"),
            Err(Error::Base64(_))
        ));
    }
}
