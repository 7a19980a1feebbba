use serde::Serialize;

use super::image_reference;

/// Canonical representation of an image found running in a namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ContainerImage {
    #[serde(rename = "ref")]
    reference: String,
    name: String,
    digest: Option<String>,
}

impl ContainerImage {
    /// Normalizes `image` and qualifies it with `digest` when one is known.
    ///
    /// A digest already embedded in `image` wins over `digest`, so the
    /// resulting reference always ends with `@<digest>` when a digest is set.
    pub fn new(image: &str, digest: Option<String>) -> Self {
        let reference = image_reference::compose_reference(image, digest.as_deref());
        let digest = image_reference::embedded_digest(&reference)
            .map(str::to_string)
            .or(digest);
        let name = image_reference::short_name(&reference);

        Self {
            reference,
            name,
            digest,
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    pub fn identity_key(&self) -> String {
        image_reference::identity_key(&self.reference, self.digest())
    }
}
