//! URL resolution
//!
//! [`build_url`] is the canonical joining algorithm. Resolution is routed
//! through the [`ResolveUrl`] strategy stored on the session, so a custom
//! resolver supplied at construction is honored by every node derived from
//! the client, including nodes built through the plain chaining API.

use url::Url;

/// Join a base URL and a segment chain into the final URL string
///
/// Exactly one `/` separates consecutive components. Segment contents are
/// opaque: nothing inside a segment is escaped, split, or collapsed. With
/// `append_slash` set, exactly one trailing `/` is appended, and only when
/// there is at least one segment. An empty chain returns the base URL
/// unchanged.
///
/// The function is pure: resolving the same inputs always yields the same
/// string.
pub fn build_url(base: &Url, segments: &[String], append_slash: bool) -> String {
    if segments.is_empty() {
        return base.as_str().to_string();
    }
    let mut url = base.as_str().trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.push_str(segment);
    }
    if append_slash {
        url.push('/');
    }
    url
}

/// Strategy for resolving a segment chain into a URL
///
/// The default is [`StandardResolver`]. Supplying a custom implementation via
/// [`ClientBuilder::resolver`](crate::ClientBuilder::resolver) customizes
/// resolution for every chain derived from that client; the strategy is
/// dispatched dynamically, never bound at construction of a node.
pub trait ResolveUrl: Send + Sync {
    /// Resolve the URL for `segments` chained under `base`
    fn resolve(&self, base: &Url, segments: &[String], append_slash: bool) -> String;
}

/// Default resolver: plain segment joining via [`build_url`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardResolver;

impl ResolveUrl for StandardResolver {
    fn resolve(&self, base: &Url, segments: &[String], append_slash: bool) -> String {
        build_url(base, segments, append_slash)
    }
}
