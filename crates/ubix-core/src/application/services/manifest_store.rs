//! Manifest Store - locate, load and persist `ubix.json`.
//!
//! All I/O goes through the [`Filesystem`] port, so the store works the
//! same against the real disk and the in-memory test filesystem.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem},
    },
    domain::{
        MANIFEST_FILE, Manifest, ManifestFields, StoredManifest, manifest_path_field,
        timestamp_now, to_pretty_json,
    },
    error::{UbixError, UbixResult},
};

/// Reads and writes solution manifests.
pub struct ManifestStore<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> ManifestStore<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// The manifest path used when none is given: `./ubix.json`.
    pub fn default_path() -> PathBuf {
        Path::new(".").join(MANIFEST_FILE)
    }

    /// Resolve the manifest path and check that it is a regular file.
    pub fn locate(&self, explicit: Option<&Path>) -> UbixResult<PathBuf> {
        let path = explicit.map_or_else(Self::default_path, Path::to_path_buf);

        match self.fs.stat(&path)? {
            Some(EntryKind::File) => Ok(path),
            Some(_) => Err(ApplicationError::WrongType {
                what: "solution file",
                path,
            }
            .into()),
            None => Err(ApplicationError::NotFound {
                what: "solution file",
                path,
            }
            .into()),
        }
    }

    /// Load the manifest as an untyped JSON document.
    pub fn read_document(&self, path: &Path) -> UbixResult<Value> {
        self.parse(path)
    }

    /// Load the manifest, checking only its version.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> UbixResult<StoredManifest> {
        let manifest: StoredManifest = self.parse(path)?;
        debug!(version = %manifest.version(), "Manifest loaded");
        Ok(manifest)
    }

    /// Write `manifest` to `path` via a sibling temporary file.
    #[instrument(skip(self, manifest), fields(path = %path.display()))]
    pub fn save<M: Serialize>(&self, path: &Path, manifest: &M) -> UbixResult<()> {
        let json = to_pretty_json(manifest).map_err(|e| UbixError::Internal {
            message: format!("serializing manifest: {e}"),
        })?;

        let tmp = temp_path(path);
        self.fs.write_file(&tmp, json.as_bytes())?;
        if let Err(e) = self.fs.rename(&tmp, path) {
            warn!(tmp = %tmp.display(), "Replacing manifest failed, removing temporary file");
            if let Err(cleanup) = self.fs.remove_file(&tmp) {
                warn!(error = %cleanup, "Cleanup failed");
            }
            return Err(e);
        }

        debug!(bytes = json.len(), "Manifest saved");
        Ok(())
    }

    /// Build a brand-new manifest for the solution in `directory` and save
    /// it there.
    ///
    /// `fileName` is the directory's own name, which is the sanitized
    /// solution name.
    #[instrument(skip(self, fields), fields(directory = %directory.display()))]
    pub fn create(&self, directory: &Path, fields: ManifestFields) -> UbixResult<Manifest> {
        let absolute = self.fs.absolute(directory)?;
        let file_name = directory
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let manifest = Manifest::new(
            fields,
            manifest_path_field(&absolute),
            file_name,
            timestamp_now(),
        );
        self.save(&directory.join(MANIFEST_FILE), &manifest)?;
        Ok(manifest)
    }

    fn parse<T: DeserializeOwned>(&self, path: &Path) -> UbixResult<T> {
        let bytes = self.fs.read_file(path)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ApplicationError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(MANIFEST_FILE));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{ApiVersion, Version};
    use crate::error::ErrorKind;

    const MANIFEST: &str = r#"{
    "name": "churn",
    "author": "Ana",
    "version": "1.2.3",
    "api": "latest",
    "path": "home/ana/churn",
    "fileName": "churn",
    "lastUpdate": "Mon Jan 05 2026 10:00:00 GMT+0000",
    "owner": "analytics"
}
"#;

    fn fields() -> ManifestFields {
        ManifestFields {
            name: "Churn Model".into(),
            author: String::new(),
            version: Version::new(0, 0, 0),
            api: ApiVersion::Latest,
        }
    }

    #[test]
    fn locate_defaults_to_manifest_in_current_dir() {
        let mut fs = MockFilesystem::new();
        fs.expect_stat()
            .withf(|p| p == Path::new("./ubix.json"))
            .returning(|_| Ok(Some(EntryKind::File)));

        let store = ManifestStore::new(&fs);
        assert_eq!(store.locate(None).unwrap(), Path::new("./ubix.json"));
    }

    #[test]
    fn locate_reports_missing_and_wrong_type() {
        let mut fs = MockFilesystem::new();
        fs.expect_stat()
            .withf(|p| p == Path::new("missing.json"))
            .returning(|_| Ok(None));
        fs.expect_stat()
            .withf(|p| p == Path::new("somedir"))
            .returning(|_| Ok(Some(EntryKind::Directory)));

        let store = ManifestStore::new(&fs);
        let err = store.locate(Some(Path::new("missing.json"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Cannot find solution file at missing.json");

        let err = store.locate(Some(Path::new("somedir"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongType);
    }

    #[test]
    fn locate_propagates_stat_failures() {
        let mut fs = MockFilesystem::new();
        fs.expect_stat()
            .returning(|p| Err(ApplicationError::io(p, "permission denied").into()));

        let err = ManifestStore::new(&fs).locate(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoError);
    }

    #[test]
    fn load_reads_version_and_name() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file()
            .returning(|_| Ok(MANIFEST.as_bytes().to_vec()));

        let manifest = ManifestStore::new(&fs).load(Path::new("ubix.json")).unwrap();
        assert_eq!(manifest.version(), Version::new(1, 2, 3));
        assert_eq!(manifest.name(), Some("churn"));
    }

    #[test]
    fn load_ignores_fields_it_does_not_use() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file().returning(|_| {
            Ok(br#"{"name": "x", "author": null, "api": 7, "version": "0.3.0"}"#.to_vec())
        });

        let manifest = ManifestStore::new(&fs).load(Path::new("ubix.json")).unwrap();
        assert_eq!(manifest.version(), Version::new(0, 3, 0));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file()
            .returning(|_| Ok(b"{ not json".to_vec()));

        let err = ManifestStore::new(&fs).load(Path::new("ubix.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn invalid_version_in_document_is_a_parse_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_read_file()
            .returning(|_| Ok(br#"{"name": "x", "version": "1.2"}"#.to_vec()));

        let err = ManifestStore::new(&fs).load(Path::new("ubix.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn save_writes_temp_file_then_renames() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&written);

        let mut fs = MockFilesystem::new();
        let mut seq = mockall::Sequence::new();
        fs.expect_write_file()
            .withf(|path, _| path == Path::new("sol/ubix.json.tmp"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, content| {
                sink.lock().unwrap().extend_from_slice(content);
                Ok(())
            });
        fs.expect_rename()
            .withf(|from, to| {
                from == Path::new("sol/ubix.json.tmp") && to == Path::new("sol/ubix.json")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let manifest: StoredManifest = serde_json::from_str(MANIFEST).unwrap();
        ManifestStore::new(&fs)
            .save(Path::new("sol/ubix.json"), &manifest)
            .unwrap();

        let written = String::from_utf8(written.lock().unwrap().clone()).unwrap();
        assert_eq!(written, MANIFEST);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().times(1).returning(|_, _| Ok(()));
        fs.expect_rename()
            .times(1)
            .returning(|_, to| Err(ApplicationError::io(to, "read-only").into()));
        fs.expect_remove_file()
            .withf(|path| path == Path::new("sol/ubix.json.tmp"))
            .times(1)
            .returning(|_| Ok(()));

        let manifest: StoredManifest = serde_json::from_str(MANIFEST).unwrap();
        let err = ManifestStore::new(&fs)
            .save(Path::new("sol/ubix.json"), &manifest)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoError);
    }

    #[test]
    fn create_derives_path_and_file_name_from_directory() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&written);

        let mut fs = MockFilesystem::new();
        fs.expect_absolute()
            .returning(|p| Ok(Path::new("/home/ana").join(p)));
        fs.expect_write_file().returning(move |_, content| {
            sink.lock().unwrap().extend_from_slice(content);
            Ok(())
        });
        fs.expect_rename()
            .withf(|from, to| {
                from == Path::new("work/Churn Model/ubix.json.tmp")
                    && to == Path::new("work/Churn Model/ubix.json")
            })
            .returning(|_, _| Ok(()));

        let manifest = ManifestStore::new(&fs)
            .create(Path::new("work/Churn Model"), fields())
            .unwrap();

        assert_eq!(manifest.path, "home/ana/work/Churn Model");
        assert_eq!(manifest.file_name, "Churn Model");
        assert!(!manifest.last_update.is_empty());

        let on_disk: Manifest =
            serde_json::from_slice(&written.lock().unwrap()).unwrap();
        assert_eq!(on_disk, manifest);
    }
}
