//! Normalization of the image strings reported by container runtimes.
//!
//! Runtimes do not agree on how they report an image: some prefix it with a
//! transport scheme (`docker://`, `containerd://`, `cri-o://`), some embed the
//! digest in the reference and some only expose it through the image ID. The
//! functions here turn those strings into a canonical, digest-preferring form.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SCHEME: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://").unwrap();
    static ref DIGEST: Regex = Regex::new(r"[A-Za-z0-9_+.\-]+:[A-Fa-f0-9]{32,128}").unwrap();
    static ref AT_DIGEST: Regex = Regex::new(r"@([A-Za-z0-9_+.\-]+:[A-Fa-f0-9]{32,128})").unwrap();
}

pub const UNKNOWN_IMAGE_NAME: &str = "unknown";

/// Removes a leading `<scheme>://` if present.
pub fn strip_transport_scheme(image: &str) -> &str {
    match SCHEME.find(image) {
        Some(scheme) => &image[scheme.end()..],
        None => image,
    }
}

/// Rejects strings that cannot name a repository, such as `""`, `":"`,
/// `":v1.2.3"` or `"@sha256:..."`.
pub fn is_valid_reference(image: &str) -> bool {
    let image = strip_transport_scheme(image.trim());
    if image.is_empty() || image.starts_with(':') || image.starts_with('@') {
        return false;
    }

    let repository = image.split([':', '@']).next().unwrap_or_default();
    repository.chars().any(|c| c.is_ascii_alphanumeric())
}

/// Returns the first `<algorithm>:<hex>` found, trying the candidates in order.
pub fn extract_digest<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter(|candidate| !candidate.is_empty())
        .find_map(|candidate| DIGEST.find(candidate))
        .map(|digest| digest.as_str().to_string())
}

/// Digest embedded in a reference through `@<algorithm>:<hex>`, if any.
pub fn embedded_digest(reference: &str) -> Option<&str> {
    AT_DIGEST
        .captures(reference)
        .and_then(|captures| captures.get(1))
        .map(|digest| digest.as_str())
}

/// Builds the canonical reference: digest-qualified when a digest is known,
/// never appending a second digest to a reference that already carries one.
pub fn compose_reference(image: &str, digest: Option<&str>) -> String {
    let image = strip_transport_scheme(image);
    if embedded_digest(image).is_some() {
        return image.to_string();
    }

    match digest.filter(|digest| !digest.is_empty()) {
        Some(digest) => format!("{image}@{digest}"),
        None => image.to_string(),
    }
}

/// Last path segment of the repository without tag or digest.
///
/// `ghcr.io/org/app:1.2.3` and `registry.local:5000/ns/app@sha256:...` both
/// yield `app`.
pub fn short_name(reference: &str) -> String {
    let reference = strip_transport_scheme(reference);
    let tail = reference.rsplit('/').next().unwrap_or_default();
    let tail = tail.split('@').next().unwrap_or_default();
    let tail = tail.split(':').next().unwrap_or_default();

    if tail.is_empty() {
        UNKNOWN_IMAGE_NAME.to_string()
    } else {
        tail.to_string()
    }
}

/// Per-namespace uniqueness key: the digest when known, otherwise the
/// reference, case-folded.
pub fn identity_key(reference: &str, digest: Option<&str>) -> String {
    digest
        .filter(|digest| !digest.is_empty())
        .unwrap_or(reference)
        .to_lowercase()
}
