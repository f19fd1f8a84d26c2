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

use crate::s3::client::{PostUploadSigner, endpoint_url};
use crate::s3::error::Error;
use crate::s3::form_constants::*;
use crate::s3::post_policy::{PostPolicy, build_conditions};
use crate::s3::signer::post_presign_v4;
use crate::s3::utils::{UtcTime, utc_now};
use std::collections::HashMap;
use typed_builder::TypedBuilder;

/// Argument builder for generating presigned POST form data for the
/// [`POST Object`](https://docs.aws.amazon.com/AmazonS3/latest/API/RESTObjectPOST.html) S3 API operation.
///
/// This struct constructs the parameters required for the
/// [`PostUploadSigner::presigned_post_form_data`] method.
#[derive(Debug, Clone, TypedBuilder)]
pub struct PresignedPostFormData {
    #[builder(!default)] // force required
    signer: PostUploadSigner,
    #[builder(setter(into))]
    bucket: String,
    #[builder(setter(into))]
    key: String,
    /// Signing instant; the clock is read once when not set
    #[builder(default, setter(into))]
    now: Option<UtcTime>,
}

/// Builder type alias for [`PresignedPostFormData`].
///
/// Constructed via [`PresignedPostFormData::builder()`](PresignedPostFormData::builder) and used to build a [`PresignedPostFormData`] instance.
pub type PresignedPostFormDataBldr =
    PresignedPostFormDataBuilder<((PostUploadSigner,), (String,), (String,), ())>;

impl PresignedPostFormData {
    /// Signs the upload policy and returns the endpoint and form fields.
    ///
    /// Fails only if the policy document cannot be serialized; there is no partial result.
    pub fn send(self) -> Result<PresignedPostForm, Error> {
        let now = self.now.unwrap_or_else(utc_now);
        let ctx = self.signer.credential_context(now);

        let conditions = build_conditions(&self.bucket, &self.key, &ctx, now);
        let policy = PostPolicy::new(self.signer.timeout(), conditions, now);
        let encoded_policy = policy.encode()?;
        let signature = post_presign_v4(&ctx, &encoded_policy);

        let mut fields: HashMap<String, String> = HashMap::new();
        for condition in policy.conditions() {
            fields.insert(condition.field().to_string(), condition.value().to_string());
        }
        fields.insert(POLICY.into(), encoded_policy);
        fields.insert(X_AMZ_SIGNATURE.into(), signature);

        log::debug!(
            "signed POST policy: bucket={} key={} credential={} expires={}",
            self.bucket,
            self.key,
            ctx.credential_scope(),
            policy.expiration()
        );

        Ok(PresignedPostForm {
            endpoint: endpoint_url(&self.bucket),
            fields,
        })
    }
}

/// Endpoint and form fields of a presigned POST upload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresignedPostForm {
    endpoint: String,
    fields: HashMap<String, String>,
}

impl PresignedPostForm {
    /// URL the browser posts the form to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Form fields to send along with the `file` field
    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn into_parts(self) -> (String, HashMap<String, String>) {
        (self.endpoint, self.fields)
    }

    fn is_exempt(field: &str) -> bool {
        field.eq_ignore_ascii_case(X_AMZ_SIGNATURE)
            || field.eq_ignore_ascii_case(FILE)
            || field.eq_ignore_ascii_case(POLICY)
            || field.to_ascii_lowercase().starts_with(X_IGNORE_PREFIX)
    }

    /// Checks that every form field is covered by a policy condition with the same value.
    ///
    /// `x-amz-signature`, `file`, `policy` and `x-ignore-` prefixed fields are exempt. The
    /// storage service rejects uploads carrying uncovered fields even if the signature is valid.
    pub fn check_conditions(&self) -> Result<(), Error> {
        let encoded_policy = self
            .get(POLICY)
            .ok_or_else(|| Error::PolicyViolation("policy field is missing".into()))?;
        let policy = PostPolicy::decode(encoded_policy)?;

        for (field, value) in &self.fields {
            if Self::is_exempt(field) {
                continue;
            }
            match policy.conditions().get(field) {
                Some(expected) if expected == value => {}
                Some(expected) => {
                    return Err(Error::PolicyViolation(format!(
                        "{field} is {value:?} but policy requires {expected:?}"
                    )));
                }
                None => {
                    return Err(Error::PolicyViolation(format!(
                        "{field} is not covered by any policy condition"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Adds an extra form field, e.g. an `x-ignore-` field consumed only by the client.
    pub fn insert_field(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }
}
