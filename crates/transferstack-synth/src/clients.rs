//! Client list parsing.
//!
//! The client list is a single configuration string of the form
//! `user1:key1,user2:key2`. Whitespace around commas is ignored. Each entry is
//! split on its first colon only, so keys that themselves contain colons
//! survive intact.

use std::collections::HashMap;

use tracing::debug;

use crate::error::SynthError;
use crate::validation::validate_username;

/// A client allowed to connect: a username and its SSH public key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Client {
    /// Transfer username, also the home directory name.
    pub username: String,
    /// SSH public key blob, passed through unvalidated.
    pub public_key: String,
}

impl Client {
    /// Create a client record.
    #[must_use]
    pub fn new(username: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            public_key: public_key.into(),
        }
    }
}

/// Parse a client list into `(username, public key)` records, in input order.
///
/// # Errors
///
/// Fails on the first problem found:
/// - [`SynthError::EmptyClientList`] for empty or whitespace-only input,
/// - [`SynthError::EmptyClientEntry`] for empty entries such as a trailing comma,
/// - [`SynthError::MalformedClientEntry`] for entries without a colon or with
///   an empty username or key,
/// - [`SynthError::InvalidUsername`] for usernames that cannot name a home
///   directory (`/`, inner whitespace, `.` or `..`),
/// - [`SynthError::DuplicateClient`] when a username repeats.
///
/// # Examples
///
/// ```
/// use transferstack_synth::clients::{Client, parse_clients};
///
/// let clients = parse_clients("alice:ssh-rsa AAA , bob:ssh-ed25519 BBB").unwrap();
/// assert_eq!(
///     clients,
///     vec![
///         Client::new("alice", "ssh-rsa AAA"),
///         Client::new("bob", "ssh-ed25519 BBB"),
///     ]
/// );
/// ```
pub fn parse_clients(input: &str) -> Result<Vec<Client>, SynthError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(SynthError::EmptyClientList);
    }

    let mut clients = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for (index, chunk) in input.split(',').enumerate() {
        let position = index + 1;
        let chunk = chunk.trim();
        if chunk.is_empty() {
            return Err(SynthError::EmptyClientEntry { position });
        }

        let Some((username, public_key)) = chunk.split_once(':') else {
            return Err(SynthError::MalformedClientEntry {
                position,
                entry: chunk.to_owned(),
                reason: "expected user:key".to_owned(),
            });
        };
        let username = username.trim();
        let public_key = public_key.trim();

        if username.is_empty() {
            return Err(SynthError::MalformedClientEntry {
                position,
                entry: chunk.to_owned(),
                reason: "username is empty".to_owned(),
            });
        }
        if public_key.is_empty() {
            return Err(SynthError::MalformedClientEntry {
                position,
                entry: username.to_owned(),
                reason: "public key is empty".to_owned(),
            });
        }

        validate_username(position, username)?;

        if let Some(&first) = seen.get(username) {
            return Err(SynthError::DuplicateClient {
                username: username.to_owned(),
                first,
                second: position,
            });
        }
        seen.insert(username, position);

        clients.push(Client::new(username, public_key));
    }

    debug!(count = clients.len(), "parsed client list");
    Ok(clients)
}
