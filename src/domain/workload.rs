/// Namespace used when a workload does not report one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Runtime status categories, in the order their images are collected.
///
/// The order is part of the deduplication contract: when two images share an
/// identity key the one collected first is kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Regular,
    Init,
    Ephemeral,
}

impl StatusCategory {
    pub const ALL: [StatusCategory; 3] = [
        StatusCategory::Regular,
        StatusCategory::Init,
        StatusCategory::Ephemeral,
    ];
}

/// Image as reported by the runtime for a started container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportedImage {
    pub image: String,
    /// Usually carries the content digest, e.g. `docker-pullable://nginx@sha256:...`.
    pub image_id: String,
}

impl ReportedImage {
    pub fn new(image: impl Into<String>, image_id: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            image_id: image_id.into(),
        }
    }
}

/// One running or pending unit (a pod) as returned by the listing source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Workload {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub container_statuses: Vec<ReportedImage>,
    pub init_container_statuses: Vec<ReportedImage>,
    pub ephemeral_container_statuses: Vec<ReportedImage>,
    /// Images declared by the regular containers of the spec.
    pub declared_images: Vec<String>,
}

impl Workload {
    pub fn namespace(&self) -> &str {
        self.namespace
            .as_deref()
            .filter(|namespace| !namespace.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    pub fn statuses(&self, category: StatusCategory) -> &[ReportedImage] {
        match category {
            StatusCategory::Regular => &self.container_statuses,
            StatusCategory::Init => &self.init_container_statuses,
            StatusCategory::Ephemeral => &self.ephemeral_container_statuses,
        }
    }
}
