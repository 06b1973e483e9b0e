//! Validation of names the stack puts into resource properties.
//!
//! Bucket names follow the
//! [Amazon S3 naming rules](https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html);
//! usernames are only checked for what would corrupt their home directory
//! path. Everything else about usernames and public keys is left to the
//! platform.

use std::net::Ipv4Addr;

use crate::error::SynthError;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

fn invalid_bucket(name: &str, reason: impl Into<String>) -> SynthError {
    SynthError::InvalidBucketName {
        name: name.to_owned(),
        reason: reason.into(),
    }
}

/// Validate an explicit S3 bucket name.
///
/// Rules:
/// - 3-63 characters long
/// - Only lowercase letters, numbers, hyphens, and dots
/// - Must start and end with a letter or number
/// - No consecutive dots (`..`)
/// - Not formatted as an IPv4 address
/// - Must not start with `xn--` or `sthree-`, or end with `-s3alias`
///
/// # Errors
///
/// Returns [`SynthError::InvalidBucketName`] if any rule is violated.
///
/// # Examples
///
/// ```
/// use transferstack_synth::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("acme-sftp-uploads").is_ok());
/// assert!(validate_bucket_name("AB").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> Result<(), SynthError> {
    let len = name.len();

    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return Err(invalid_bucket(
            name,
            format!(
                "must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
            ),
        ));
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
    {
        return Err(invalid_bucket(
            name,
            "must only contain lowercase letters, numbers, hyphens, and dots",
        ));
    }

    let bytes = name.as_bytes();
    let edge_ok = |b: u8| b.is_ascii_lowercase() || b.is_ascii_digit();
    if !edge_ok(bytes[0]) || !edge_ok(bytes[len - 1]) {
        return Err(invalid_bucket(name, "must start and end with a letter or number"));
    }

    if name.contains("..") {
        return Err(invalid_bucket(name, "must not contain consecutive dots"));
    }

    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(invalid_bucket(name, "must not be formatted as an IP address"));
    }

    if name.starts_with("xn--") || name.starts_with("sthree-") {
        return Err(invalid_bucket(name, "must not start with 'xn--' or 'sthree-'"));
    }

    if name.ends_with("-s3alias") {
        return Err(invalid_bucket(name, "must not end with '-s3alias'"));
    }

    Ok(())
}

/// Validate a username as a home directory segment.
///
/// `position` is the 1-based index of the client entry, used in the error.
///
/// # Errors
///
/// Returns [`SynthError::InvalidUsername`] if the username contains `/`,
/// whitespace or control characters, or is a `.` / `..` path component.
///
/// # Examples
///
/// ```
/// use transferstack_synth::validation::validate_username;
///
/// assert!(validate_username(1, "u1").is_ok());
/// assert!(validate_username(1, "alice/bob").is_err());
/// ```
pub fn validate_username(position: usize, username: &str) -> Result<(), SynthError> {
    let invalid = |reason: String| SynthError::InvalidUsername {
        position,
        username: username.to_owned(),
        reason,
    };

    if let Some(bad) = username
        .chars()
        .find(|&c| c == '/' || c.is_whitespace() || c.is_control())
    {
        return Err(invalid(format!(
            "contains {bad:?}, which is not allowed in a home directory"
        )));
    }

    if matches!(username, "." | "..") {
        return Err(invalid("must not be a relative path component".to_owned()));
    }

    Ok(())
}
