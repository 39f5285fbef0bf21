// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response types for the API.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Result of a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Always true; failures are reported through the status code.
    pub success: bool,
    /// Generated unique name under which the file is stored.
    pub file_name: String,
    /// Name supplied by the client.
    pub original_name: String,
    /// Size in bytes.
    pub size: u64,
    /// Path of the stored file on the server.
    pub upload_path: String,
    /// SHA-256 of the stored bytes (hex).
    pub sha256: String,
}

/// A stored file as listed by `GET /files`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Stored (generated) file name.
    pub file_name: String,
    /// Size in bytes.
    pub size: u64,
    /// Creation time, RFC 3339.
    #[serde(with = "time::serde::rfc3339")]
    pub upload_date: OffsetDateTime,
}
