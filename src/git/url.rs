// gitsync: Git synchronization orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTPS remote URL with embedded credentials.

use crate::config::types::RemoteConfig;
use crate::core::redact::redact_userinfo;

/// `https://<user>:<pass>@<host>/<owner>/<repo>.git` with user and password
/// percent-encoded.
#[must_use]
pub fn credentialed_remote_url(remote: &RemoteConfig) -> String {
    format!(
        "https://{}:{}@{}/{}/{}.git",
        urlencoding::encode(&remote.username),
        urlencoding::encode(&remote.password),
        remote.host.trim(),
        remote.owner.trim(),
        remote.repo.trim(),
    )
}

/// Same URL with the password masked, for logs.
#[must_use]
pub fn redacted_remote_url(remote: &RemoteConfig) -> String {
    redact_userinfo(&credentialed_remote_url(remote)).into_owned()
}
