//! The solution manifest (`ubix.json`).

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use serde_json::{Map, Value};

use crate::domain::version::{ApiVersion, Version};

/// Persisted metadata describing one solution.
///
/// Keys the tool does not know about are kept in `extra`, in their original
/// order, and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: String,
    #[serde(default)]
    pub author: String,
    pub version: Version,
    #[serde(default)]
    pub api: ApiVersion,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub last_update: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The user-controlled fields of a new manifest, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestFields {
    pub name: String,
    pub author: String,
    pub version: Version,
    pub api: ApiVersion,
}

impl Manifest {
    /// Assemble a brand-new manifest.
    pub fn new(
        fields: ManifestFields,
        path: impl Into<String>,
        file_name: impl Into<String>,
        last_update: impl Into<String>,
    ) -> Self {
        Self {
            name: fields.name,
            author: fields.author,
            version: fields.version,
            api: fields.api,
            path: path.into(),
            file_name: file_name.into(),
            last_update: last_update.into(),
            extra: Map::new(),
        }
    }

}

/// A manifest read back from disk.
///
/// Only `version` is interpreted. Every other key, including ones `init`
/// writes, is kept exactly as stored, so a hand-edited `author` or `api`
/// never blocks a version change or a package.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredManifest {
    version: Version,
    document: Map<String, Value>,
}

impl StoredManifest {
    pub fn version(&self) -> Version {
        self.version
    }

    /// The `name` key, when it holds a string.
    pub fn name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    /// Replace the version and stamp the change, keeping key order.
    pub fn set_version(&mut self, version: Version, timestamp: impl Into<String>) {
        self.version = version;
        self.document
            .insert("version".into(), Value::String(version.to_string()));
        self.document
            .insert("lastUpdate".into(), Value::String(timestamp.into()));
    }
}

impl<'de> Deserialize<'de> for StoredManifest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let document = Map::<String, Value>::deserialize(deserializer)?;
        let version = document
            .get("version")
            .ok_or_else(|| D::Error::missing_field("version"))
            .and_then(|v| Version::deserialize(v).map_err(D::Error::custom))?;
        Ok(Self { version, document })
    }
}

impl Serialize for StoredManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

/// Four-space indented JSON with a trailing newline, the manifest's on-disk
/// format.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Human-readable local time, e.g. `Mon Oct 19 2026 14:03:11 GMT+0200`.
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .format("%a %b %d %Y %H:%M:%S GMT%z")
        .to_string()
}
