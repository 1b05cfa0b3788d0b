//! Reference classification and base resolution.
//!
//! A package reference given as a string is either a filesystem location or
//! a URL. This module decides which, works out where the descriptor itself
//! lives, and computes the [`Base`] that relative resource paths are
//! resolved against.

use std::fmt;
use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::error::{PackageError, PackageResult};

/// Location that relative resource paths are resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Base {
    /// Package was built from an in-memory object; renders as `""`.
    #[default]
    Memory,
    /// Absolute directory containing a local descriptor.
    Directory(PathBuf),
    /// URL prefix of a remote descriptor, without trailing slash.
    Url(String),
}

impl Base {
    /// Whether this base points at the local filesystem (or nowhere).
    pub fn is_local(&self) -> bool {
        !matches!(self, Base::Url(_))
    }

    /// Join a relative resource path onto this base as a filesystem path.
    ///
    /// Absolute paths replace the base, matching [`Path::join`].
    pub fn join_path(&self, path: &str) -> PathBuf {
        match self {
            Base::Memory => PathBuf::from(path),
            Base::Directory(dir) => dir.join(path),
            Base::Url(url) => Path::new(url).join(path),
        }
    }

    /// Join a relative resource path onto a URL base.
    ///
    /// Returns `None` for non-URL bases.
    pub fn join_url(&self, path: &str) -> Option<String> {
        match self {
            Base::Url(url) => Some(format!("{}/{}", url, path.trim_start_matches('/'))),
            _ => None,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Base::Memory => Ok(()),
            Base::Directory(dir) => write!(f, "{}", dir.display()),
            Base::Url(url) => f.write_str(url),
        }
    }
}

impl PartialEq<str> for Base {
    fn eq(&self, other: &str) -> bool {
        match self {
            Base::Memory => other.is_empty(),
            Base::Directory(dir) => dir.as_os_str() == other,
            Base::Url(url) => url == other,
        }
    }
}

impl PartialEq<&str> for Base {
    fn eq(&self, other: &&str) -> bool {
        <Base as PartialEq<str>>::eq(self, other)
    }
}

/// Where a package descriptor should be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorLocation {
    /// Local descriptor file and its containing directory.
    File { path: PathBuf, base: Base },
    /// Remote descriptor URL and its URL prefix.
    Remote { url: String, base: Base },
}

impl DescriptorLocation {
    /// The base relative resources resolve against.
    pub fn base(&self) -> &Base {
        match self {
            DescriptorLocation::File { base, .. } | DescriptorLocation::Remote { base, .. } => base,
        }
    }

    /// Whether the descriptor lives on the local filesystem.
    pub fn is_local(&self) -> bool {
        matches!(self, DescriptorLocation::File { .. })
    }
}

/// Parse `reference` as a URL, rejecting Windows drive letters and
/// scheme-only strings such as `mailto:` that cannot carry a path.
fn parse_url(reference: &str) -> Option<Url> {
    if !reference.contains("://") {
        return None;
    }
    let url = Url::parse(reference).ok()?;
    if url.scheme().len() < 2 || url.cannot_be_a_base() {
        return None;
    }
    Some(url)
}

/// Whether a string looks like a URL with a scheme (`http://`, `https://`, ...).
pub fn is_url(reference: &str) -> bool {
    parse_url(reference).is_some()
}

/// Whether the last URL path segment names a file, i.e. has an extension.
fn names_file(url: &Url) -> bool {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(|segment| Path::new(segment).extension().is_some())
        .unwrap_or(false)
}

/// Split a remote reference into the descriptor URL and its base.
///
/// A URL naming a file is fetched as-is and its base drops the filename.
/// Anything else is treated as a prefix: `default_filename` is appended and
/// the base is the reference without a trailing slash.
pub fn resolve_remote(url: &Url, reference: &str, default_filename: &str) -> DescriptorLocation {
    // Query and fragment never contribute to the base.
    let without_suffix = reference
        .split(['?', '#'])
        .next()
        .unwrap_or(reference);

    if names_file(url) {
        let base = without_suffix
            .rsplit_once('/')
            .map(|(prefix, _)| prefix)
            .unwrap_or(without_suffix)
            .trim_end_matches('/');
        DescriptorLocation::Remote {
            url: reference.to_string(),
            base: Base::Url(base.to_string()),
        }
    } else {
        let base = without_suffix.trim_end_matches('/');
        DescriptorLocation::Remote {
            url: format!("{}/{}", base, default_filename),
            base: Base::Url(base.to_string()),
        }
    }
}

/// Resolve a local path reference to its descriptor file and base directory.
///
/// Directories resolve to `<dir>/<default_filename>`; files resolve to
/// themselves. The base is the canonical containing directory.
pub fn resolve_local(path: &Path, default_filename: &str) -> PackageResult<DescriptorLocation> {
    if !path.exists() {
        return Err(PackageError::ReferenceNotFound(path.display().to_string()));
    }

    let canonical = path.canonicalize().map_err(|source| PackageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if canonical.is_dir() {
        Ok(DescriptorLocation::File {
            path: canonical.join(default_filename),
            base: Base::Directory(canonical),
        })
    } else {
        let dir = canonical
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        Ok(DescriptorLocation::File {
            path: canonical,
            base: Base::Directory(dir),
        })
    }
}

/// Classify a string reference and resolve it to a descriptor location.
///
/// `file://` URLs are converted to paths and treated as local references.
pub fn resolve_reference(reference: &str, default_filename: &str) -> PackageResult<DescriptorLocation> {
    let location = match parse_url(reference) {
        Some(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| PackageError::ReferenceNotFound(reference.to_string()))?;
            resolve_local(&path, default_filename)?
        }
        Some(url) => resolve_remote(&url, reference, default_filename),
        None => resolve_local(Path::new(reference), default_filename)?,
    };

    tracing::debug!(
        reference,
        local = location.is_local(),
        base = %location.base(),
        "resolved package reference"
    );
    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn remote(reference: &str) -> (String, String) {
        match resolve_reference(reference, "datapackage.json").unwrap() {
            DescriptorLocation::Remote { url, base } => (url, base.to_string()),
            other => panic!("expected remote location, got {:?}", other),
        }
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("http://example.com/"));
        assert!(is_url("https://example.com/pkg/datapackage.json"));
        assert!(!is_url("test-pkg/datapackage.json"));
        assert!(!is_url("/abs/path"));
        assert!(!is_url("C:\\data\\datapackage.json"));
        assert!(!is_url("mailto:someone@example.com"));
    }

    #[test]
    fn test_remote_bare_host() {
        let (url, base) = remote("http://example.com/");
        assert_eq!(url, "http://example.com/datapackage.json");
        assert_eq!(base, "http://example.com");
    }

    #[test]
    fn test_remote_host_without_slash() {
        let (url, base) = remote("http://example.com");
        assert_eq!(url, "http://example.com/datapackage.json");
        assert_eq!(base, "http://example.com");
    }

    #[test]
    fn test_remote_prefix_with_path() {
        let (url, base) = remote("https://example.com/data/gdp/");
        assert_eq!(url, "https://example.com/data/gdp/datapackage.json");
        assert_eq!(base, "https://example.com/data/gdp");
    }

    #[test]
    fn test_remote_explicit_file() {
        let (url, base) = remote("http://example.com/datapackage.json");
        assert_eq!(url, "http://example.com/datapackage.json");
        assert_eq!(base, "http://example.com");
    }

    #[test]
    fn test_remote_nested_file_with_query() {
        let (url, base) = remote("https://example.com/pkgs/gdp/package.json?raw=true");
        assert_eq!(url, "https://example.com/pkgs/gdp/package.json?raw=true");
        assert_eq!(base, "https://example.com/pkgs/gdp");
    }

    #[test]
    fn test_remote_custom_default_filename() {
        let location = resolve_reference("http://example.com/", "valid-datapackage.json").unwrap();
        assert_eq!(
            location,
            DescriptorLocation::Remote {
                url: "http://example.com/valid-datapackage.json".to_string(),
                base: Base::Url("http://example.com".to_string()),
            }
        );
        assert!(!location.is_local());
    }

    #[test]
    fn test_local_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("datapackage.json");
        fs::write(&file, "{}").unwrap();

        let location = resolve_reference(file.to_str().unwrap(), "datapackage.json").unwrap();
        let dir = temp.path().canonicalize().unwrap();
        assert_eq!(
            location,
            DescriptorLocation::File {
                path: dir.join("datapackage.json"),
                base: Base::Directory(dir),
            }
        );
    }

    #[test]
    fn test_local_directory_uses_default_filename() {
        let temp = TempDir::new().unwrap();

        let location = resolve_reference(temp.path().to_str().unwrap(), "custom.json").unwrap();
        let dir = temp.path().canonicalize().unwrap();
        assert_eq!(location.base(), &Base::Directory(dir.clone()));
        assert!(matches!(location, DescriptorLocation::File { ref path, .. } if *path == dir.join("custom.json")));
    }

    #[test]
    fn test_file_url_is_local() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().canonicalize().unwrap();
        let reference = Url::from_directory_path(&dir).unwrap().to_string();

        let location = resolve_reference(&reference, "datapackage.json").unwrap();
        assert!(location.is_local());
        assert_eq!(location.base(), &Base::Directory(dir));
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let err = resolve_reference("/definitely/not/here", "datapackage.json").unwrap_err();
        assert!(matches!(err, PackageError::ReferenceNotFound(_)));
    }

    #[test]
    fn test_base_display_and_eq() {
        assert_eq!(Base::Memory.to_string(), "");
        assert_eq!(Base::Memory, "");
        assert_eq!(Base::Url("http://example.com".into()), "http://example.com");
        assert_eq!(Base::Directory(PathBuf::from("/tmp/pkg")), "/tmp/pkg");
    }

    #[test]
    fn test_base_join_path() {
        assert_eq!(Base::Memory.join_path("data.csv"), PathBuf::from("data.csv"));
        assert_eq!(
            Base::Directory(PathBuf::from("/tmp/pkg")).join_path("data.csv"),
            PathBuf::from("/tmp/pkg/data.csv")
        );
        assert_eq!(
            Base::Directory(PathBuf::from("/tmp/pkg")).join_path("/abs/data.csv"),
            PathBuf::from("/abs/data.csv")
        );
    }

    #[test]
    fn test_base_join_url() {
        let base = Base::Url("http://example.com/pkg".to_string());
        assert_eq!(
            base.join_url("data/x.csv").as_deref(),
            Some("http://example.com/pkg/data/x.csv")
        );
        assert_eq!(Base::Memory.join_url("x.csv"), None);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_prefix_base_strips_trailing_slash(
                host in "[a-z]{1,10}\\.(com|org|net)",
                segments in prop::collection::vec("[a-z0-9_-]{1,8}", 0..4),
                slashes in 0usize..3
            ) {
                let prefix = std::iter::once(format!("http://{}", host))
                    .chain(segments)
                    .collect::<Vec<_>>()
                    .join("/");
                let reference = format!("{}{}", prefix, "/".repeat(slashes));

                let location = resolve_reference(&reference, "datapackage.json")?;
                prop_assert_eq!(location.base().to_string(), prefix.clone());
                prop_assert_eq!(
                    location,
                    DescriptorLocation::Remote {
                        url: format!("{}/datapackage.json", prefix),
                        base: Base::Url(prefix),
                    }
                );
            }

            #[test]
            fn test_file_base_strips_filename(
                host in "[a-z]{1,10}\\.(com|org|net)",
                segments in prop::collection::vec("[a-z0-9_-]{1,8}", 0..4),
                file in "[a-z]{1,8}\\.(json|txt)"
            ) {
                let prefix = std::iter::once(format!("https://{}", host))
                    .chain(segments)
                    .collect::<Vec<_>>()
                    .join("/");
                let reference = format!("{}/{}", prefix, file);

                let location = resolve_reference(&reference, "datapackage.json")?;
                prop_assert_eq!(location.base().to_string(), prefix);
                let is_file_url =
                    matches!(location, DescriptorLocation::Remote { ref url, .. } if *url == reference);
                prop_assert!(is_file_url);
            }
        }
    }
}
