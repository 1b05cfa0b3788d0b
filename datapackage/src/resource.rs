//! Resource classification and data access.
//!
//! Every entry of a package's `resources` array becomes a [`Resource`]:
//!
//! ```text
//! descriptor ──► ResourceResolver ──┬─► Inline  (literal `data`, no I/O)
//!                    + Base         ├─► Local   (file or URL at base/path)
//!                                   └─► Remote  (URL fetched over HTTP)
//! ```
//!
//! Each variant owns a copy of its descriptor and of the package base.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::descriptor::{json_type_name, Descriptor, Properties};
use crate::error::{PackageError, PackageResult};
use crate::fetch::HttpClient;
use crate::location::{is_url, Base};

static NULL: Value = Value::Null;

/// The three ways a resource can carry its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Inline,
    Local,
    Remote,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Inline => write!(f, "inline"),
            ResourceKind::Local => write!(f, "local"),
            ResourceKind::Remote => write!(f, "remote"),
        }
    }
}

/// Data returned by [`Resource::data`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceData<'a> {
    /// Literal value from an inline resource, unmodified.
    Inline(&'a Value),
    /// Raw bytes read from a file or fetched from a URL.
    Bytes(Vec<u8>),
}

impl ResourceData<'_> {
    /// The inline value, if this is inline data.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ResourceData::Inline(value) => Some(value),
            ResourceData::Bytes(_) => None,
        }
    }

    /// The raw bytes, if this is file or remote data.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ResourceData::Inline(_) => None,
            ResourceData::Bytes(bytes) => Some(bytes),
        }
    }

    /// Render as text: inline values as JSON, bytes as lossy UTF-8.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            ResourceData::Inline(value) => Cow::Owned(value.to_string()),
            ResourceData::Bytes(bytes) => String::from_utf8_lossy(bytes),
        }
    }
}

/// Resource with literal `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineResource {
    descriptor: Descriptor,
}

impl InlineResource {
    /// The literal data value.
    pub fn data(&self) -> &Value {
        self.descriptor.get("data").unwrap_or(&NULL)
    }
}

/// Where the bytes of a [`LocalResource`] live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalSource {
    /// A file on disk.
    File(PathBuf),
    /// A file next to a remote descriptor.
    Url(String),
}

impl LocalSource {
    /// `path` joined onto `base`.
    ///
    /// URL bases yield `base/path`, or `path` itself when it is already an
    /// absolute URL.
    fn resolve(base: &Base, path: &str) -> Self {
        match base.join_url(path) {
            Some(_) if is_url(path) => LocalSource::Url(path.to_string()),
            Some(url) => LocalSource::Url(url),
            None => LocalSource::File(base.join_path(path)),
        }
    }
}

impl fmt::Display for LocalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalSource::File(path) => write!(f, "{}", path.display()),
            LocalSource::Url(url) => f.write_str(url),
        }
    }
}

/// Resource whose `path` is relative to the package base.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalResource {
    descriptor: Descriptor,
    base: Base,
    source: LocalSource,
}

impl LocalResource {
    /// The descriptor's `path` joined onto the base, computed once when the
    /// resource was resolved.
    pub fn source(&self) -> &LocalSource {
        &self.source
    }

    /// The joined file path, unless the base is a URL.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            LocalSource::File(path) => Some(path),
            LocalSource::Url(_) => None,
        }
    }

    /// Base the path was resolved against.
    pub fn base(&self) -> &Base {
        &self.base
    }

    /// Read the raw contents: from disk, or with `http` for URL bases.
    pub fn data(&self, http: &dyn HttpClient) -> PackageResult<Vec<u8>> {
        match &self.source {
            LocalSource::File(path) => fs::read(path).map_err(|source| PackageError::Io {
                path: path.clone(),
                source,
            }),
            LocalSource::Url(url) => Ok(http.get(url)?),
        }
    }
}

/// Resource fetched over HTTP.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteResource {
    descriptor: Descriptor,
    base: Base,
    url: Option<String>,
}

impl RemoteResource {
    /// Absolute URL of the data, if the descriptor and base allow one.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Base the URL was resolved against.
    pub fn base(&self) -> &Base {
        &self.base
    }

    /// Fetch the raw data.
    pub fn data(&self, http: &dyn HttpClient) -> PackageResult<Vec<u8>> {
        let url = self.url.as_deref().ok_or_else(|| {
            PackageError::InvalidResource(format!(
                "remote resource {} has no URL resolvable against base '{}'",
                self.descriptor
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("<unnamed>"),
                self.base
            ))
        })?;
        Ok(http.get(url)?)
    }
}

/// One resolved entry of a package's `resources`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Inline(InlineResource),
    Local(LocalResource),
    Remote(RemoteResource),
}

impl Resource {
    /// Which variant this resource resolved to.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Inline(_) => ResourceKind::Inline,
            Resource::Local(_) => ResourceKind::Local,
            Resource::Remote(_) => ResourceKind::Remote,
        }
    }

    /// Whether the resource was classified local (inline or `path`).
    pub fn is_local(&self) -> bool {
        self.kind() != ResourceKind::Remote
    }

    /// Where the data comes from, for display: the joined path, the URL, or
    /// `"inline"`.
    pub fn location(&self) -> String {
        match self {
            Resource::Inline(_) => "inline".to_string(),
            Resource::Local(local) => local.source.to_string(),
            Resource::Remote(remote) => remote.url.clone().unwrap_or_default(),
        }
    }

    /// Read the resource data.
    ///
    /// Inline data is returned as-is. Local data is read from disk, or
    /// fetched with `http` when the package base is a URL. Remote data is
    /// always fetched with `http`.
    pub fn data(&self, http: &dyn HttpClient) -> PackageResult<ResourceData<'_>> {
        match self {
            Resource::Inline(inline) => Ok(ResourceData::Inline(inline.data())),
            Resource::Local(local) => local.data(http).map(ResourceData::Bytes),
            Resource::Remote(remote) => remote.data(http).map(ResourceData::Bytes),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.string_property("name")
    }

    pub fn title(&self) -> Option<&str> {
        self.string_property("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.string_property("description")
    }

    pub fn format(&self) -> Option<&str> {
        self.string_property("format")
    }

    pub fn mediatype(&self) -> Option<&str> {
        self.string_property("mediatype")
    }

    pub fn encoding(&self) -> Option<&str> {
        self.string_property("encoding")
    }

    /// The descriptor as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.properties().clone())
    }
}

impl Properties for Resource {
    fn properties(&self) -> &Descriptor {
        match self {
            Resource::Inline(r) => &r.descriptor,
            Resource::Local(r) => &r.descriptor,
            Resource::Remote(r) => &r.descriptor,
        }
    }

    fn properties_mut(&mut self) -> &mut Descriptor {
        match self {
            Resource::Inline(r) => &mut r.descriptor,
            Resource::Local(r) => &mut r.descriptor,
            Resource::Remote(r) => &mut r.descriptor,
        }
    }
}

/// Decides which [`Resource`] variant a descriptor becomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceResolver {
    local: Option<bool>,
}

impl ResourceResolver {
    /// Resolver that inspects each descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver with an explicit local/remote override.
    ///
    /// `Some(_)` skips inspection of the descriptor entirely.
    pub fn with_local(local: Option<bool>) -> Self {
        Self { local }
    }

    /// The override, if any.
    pub fn local(&self) -> Option<bool> {
        self.local
    }

    /// Whether a descriptor is classified as local.
    ///
    /// Local means a non-null `path` or `data` field, unless overridden.
    pub fn is_local(&self, descriptor: &Descriptor) -> bool {
        self.local
            .unwrap_or_else(|| has_field(descriptor, "path") || has_field(descriptor, "data"))
    }

    /// The variant a descriptor would resolve to.
    pub fn classify(&self, descriptor: &Descriptor) -> ResourceKind {
        if !self.is_local(descriptor) {
            ResourceKind::Remote
        } else if has_field(descriptor, "data") {
            ResourceKind::Inline
        } else {
            ResourceKind::Local
        }
    }

    /// Build the resource for one descriptor, resolving paths against `base`.
    pub fn resolve(&self, descriptor: &Value, base: &Base) -> PackageResult<Resource> {
        let descriptor = descriptor.as_object().ok_or_else(|| {
            PackageError::InvalidResource(format!(
                "expected a JSON object, found {}",
                json_type_name(descriptor)
            ))
        })?;

        let resource = match self.classify(descriptor) {
            ResourceKind::Inline => Resource::Inline(InlineResource {
                descriptor: descriptor.clone(),
            }),
            ResourceKind::Local => {
                let path = match descriptor.get("path") {
                    Some(Value::String(path)) => path,
                    Some(other) if !other.is_null() => {
                        return Err(PackageError::InvalidResource(format!(
                            "path must be a string, found {}",
                            json_type_name(other)
                        )))
                    }
                    _ => {
                        return Err(PackageError::InvalidResource(
                            "local resource has neither path nor data".to_string(),
                        ))
                    }
                };
                Resource::Local(LocalResource {
                    descriptor: descriptor.clone(),
                    base: base.clone(),
                    source: LocalSource::resolve(base, path),
                })
            }
            ResourceKind::Remote => Resource::Remote(RemoteResource {
                descriptor: descriptor.clone(),
                base: base.clone(),
                url: remote_url(descriptor, base),
            }),
        };

        tracing::trace!(
            kind = %resource.kind(),
            location = %resource.location(),
            "resolved resource"
        );
        Ok(resource)
    }
}

fn has_field(descriptor: &Descriptor, name: &str) -> bool {
    descriptor.get(name).is_some_and(|v| !v.is_null())
}

/// Absolute URL of a remote resource: an absolute `url` field, an absolute
/// `path`, or `path` joined onto a URL base.
fn remote_url(descriptor: &Descriptor, base: &Base) -> Option<String> {
    let absolute = |name: &str| {
        descriptor
            .get(name)
            .and_then(Value::as_str)
            .filter(|candidate| is_url(candidate))
            .map(str::to_string)
    };

    absolute("url").or_else(|| absolute("path")).or_else(|| {
        descriptor
            .get("path")
            .and_then(Value::as_str)
            .and_then(|path| base.join_url(path))
    })
}
