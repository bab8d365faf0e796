//! Request authentication credentials

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Credential applied to outgoing requests
///
/// A client-wide default can be set at construction; a per-call credential in
/// [`RequestOptions`](crate::RequestOptions) takes precedence over it. The
/// credential is rendered to an `authorization` header at dispatch time, so
/// injected transports observe exactly what a real backend would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// HTTP Basic authentication (RFC 7617)
    Basic {
        /// User name
        username: String,
        /// Password
        password: String,
    },
    /// Bearer token authentication
    Bearer(String),
}

impl Auth {
    /// Basic credential from a username and password
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Auth::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Bearer credential from a token
    pub fn bearer(token: impl Into<String>) -> Self {
        Auth::Bearer(token.into())
    }

    /// Render the credential as an `authorization` header value
    pub fn header_value(&self) -> String {
        match self {
            Auth::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                format!("Basic {encoded}")
            }
            Auth::Bearer(token) => format!("Bearer {token}"),
        }
    }
}
