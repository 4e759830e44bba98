//! Zip archiver using the `zip` and `walkdir` crates.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, result::ZipError, write::SimpleFileOptions};

use ubix_core::{
    application::{
        ApplicationError,
        ports::{ArchiveEntry, ArchivePlan, Archiver},
    },
    error::UbixResult,
};

/// Writes deflate-compressed zip archives to the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Error)]
enum BuildError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Zip(#[from] ZipError),
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error("{} is outside {}", path.display(), root.display())]
    Outside { path: PathBuf, root: PathBuf },
}

impl Archiver for ZipArchiver {
    fn write_archive(&self, plan: &ArchivePlan) -> UbixResult<u64> {
        info!(output = %plan.output.display(), entries = plan.entries.len(), "Writing archive");

        match build(plan) {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                warn!("Archive failed, removing partial output");
                if let Err(cleanup) = std::fs::remove_file(&plan.output) {
                    if cleanup.kind() != io::ErrorKind::NotFound {
                        warn!(
                            error = %cleanup,
                            path = %plan.output.display(),
                            "Cleanup failed"
                        );
                    }
                }
                Err(ApplicationError::Archive {
                    path: plan.output.clone(),
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }
}

fn build(plan: &ArchivePlan) -> Result<u64, BuildError> {
    let output_abs = std::path::absolute(&plan.output)?;
    let mut writer = ZipWriter::new(File::create(&plan.output)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in &plan.entries {
        match entry {
            ArchiveEntry::File { source, name } => {
                add_file(&mut writer, source, name, options)?;
            }
            ArchiveEntry::Directory { source, name } => {
                let root = std::path::absolute(source)?;
                for item in WalkDir::new(&root).sort_by_file_name() {
                    let item = item?;
                    if item.path() == output_abs {
                        debug!(path = %item.path().display(), "Skipping archive output");
                        continue;
                    }
                    let entry_name = archive_name(name, &root, item.path())?;
                    if item.file_type().is_dir() {
                        writer.add_directory(format!("{entry_name}/"), options)?;
                    } else {
                        add_file(&mut writer, item.path(), &entry_name, options)?;
                    }
                }
            }
        }
    }

    let file = writer.finish()?;
    Ok(file.metadata()?.len())
}

fn add_file(
    writer: &mut ZipWriter<File>,
    source: &Path,
    name: &str,
    options: SimpleFileOptions,
) -> Result<(), BuildError> {
    debug!(entry = name, "Adding file");
    writer.start_file(name, options)?;
    io::copy(&mut File::open(source)?, writer)?;
    Ok(())
}

/// `prefix/relative/path` with `/` separators.
fn archive_name(prefix: &str, root: &Path, path: &Path) -> Result<String, BuildError> {
    let relative = path.strip_prefix(root).map_err(|_| BuildError::Outside {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    })?;

    let mut name = prefix.to_owned();
    for part in relative.components() {
        name.push('/');
        name.push_str(&part.as_os_str().to_string_lossy());
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    fn names(archive: &Path) -> Vec<String> {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_owned())
            .collect()
    }

    #[test]
    fn archives_directories_under_their_names() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(data.join("raw")).unwrap();
        std::fs::write(data.join("raw").join("a.csv"), "x,y\n1,2\n").unwrap();
        std::fs::write(dir.path().join("ubix.json"), "{}\n").unwrap();

        let output = dir.path().join("out.zip");
        let plan = ArchivePlan {
            output: output.clone(),
            entries: vec![
                ArchiveEntry::Directory {
                    source: data,
                    name: "data".into(),
                },
                ArchiveEntry::File {
                    source: dir.path().join("ubix.json"),
                    name: "ubix.json".into(),
                },
            ],
        };

        let bytes = ZipArchiver::new().write_archive(&plan).unwrap();
        assert_eq!(bytes, std::fs::metadata(&output).unwrap().len());
        assert_eq!(
            names(&output),
            ["data/", "data/raw/", "data/raw/a.csv", "ubix.json"]
        );

        let mut zip = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
        let mut csv = String::new();
        zip.by_name("data/raw/a.csv")
            .unwrap()
            .read_to_string(&mut csv)
            .unwrap();
        assert_eq!(csv, "x,y\n1,2\n");
    }

    #[test]
    fn output_inside_packaged_tree_is_not_archived() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("keep.txt"), "k").unwrap();

        let output = data.join("pkg.zip");
        let plan = ArchivePlan {
            output: output.clone(),
            entries: vec![ArchiveEntry::Directory {
                source: data,
                name: "data".into(),
            }],
        };

        ZipArchiver::new().write_archive(&plan).unwrap();
        assert_eq!(names(&output), ["data/", "data/keep.txt"]);
    }

    #[test]
    fn failure_is_archive_error_and_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.zip");
        let plan = ArchivePlan {
            output: output.clone(),
            entries: vec![ArchiveEntry::File {
                source: dir.path().join("missing.json"),
                name: "ubix.json".into(),
            }],
        };

        let err = ZipArchiver::new().write_archive(&plan).unwrap_err();
        assert_eq!(err.kind(), ubix_core::error::ErrorKind::ArchiveError);
        assert!(!output.exists());
    }
}
