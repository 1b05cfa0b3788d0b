//! Options for package loading.

/// Descriptor filename looked up inside directories and URL prefixes.
pub const DEFAULT_FILENAME: &str = "datapackage.json";

/// Options for loading a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOptions {
    /// Forces every resource to be classified local (`Some(true)`) or
    /// remote (`Some(false)`).
    ///
    /// `None` inspects each resource descriptor.
    pub local: Option<bool>,

    /// Filename appended to directory and URL-prefix references.
    pub default_filename: String,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            local: None,
            default_filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl PackageOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the local/remote override for resources.
    pub fn with_local(mut self, local: Option<bool>) -> Self {
        self.local = local;
        self
    }

    /// Set the descriptor filename used for directories and URL prefixes.
    pub fn with_default_filename(mut self, filename: impl Into<String>) -> Self {
        self.default_filename = filename.into();
        self
    }
}
