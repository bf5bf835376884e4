// Copyright (c) 2023 Unfolded Circle ApS, Markus Zehnder <markus.z@unfoldedcircle.com>
// SPDX-License-Identifier: MPL-2.0

use std::time::Duration;

/// Create a plain HTTP client with a bounded request timeout.
///
/// The client is cheap to clone and must be used on the actix runtime it was created on.
pub fn new_http_client(request_timeout: Duration) -> awc::Client {
    awc::ClientBuilder::new()
        .timeout(request_timeout)
        .add_default_header(("Accept", "application/json"))
        .finish()
}
