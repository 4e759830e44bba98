//! On-disk shape of a solution.
//!
//! ```text
//! <solution>/
//! ├── ubix.json
//! ├── data/
//! ├── scripts/
//! │   ├── R/
//! │   └── py/
//! └── dsl/
//! ```

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::DomainError;

/// Default manifest file name.
pub const MANIFEST_FILE: &str = "ubix.json";

/// Default archive name, created inside the solution directory.
pub const ARCHIVE_FILE: &str = "ubix.zip";

/// Directories created by `init`, relative to the solution root.
pub const SKELETON_DIRS: [&str; 5] = ["data", "scripts", "scripts/R", "scripts/py", "dsl"];

/// Subtrees copied into the package archive.
pub const PACKAGED_DIRS: [&str; 3] = ["data", "scripts", "dsl"];

const MAX_FILE_NAME_BYTES: usize = 255;

/// Paths inside one solution directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionLayout {
    root: PathBuf,
}

impl SolutionLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join(ARCHIVE_FILE)
    }

    /// Skeleton directories in creation order (parents first).
    pub fn skeleton_dirs(&self) -> impl Iterator<Item = PathBuf> + '_ {
        SKELETON_DIRS.iter().map(|rel| self.join_rel(rel))
    }

    /// `(absolute source, archive name)` for each packaged subtree.
    pub fn packaged_dirs(&self) -> impl Iterator<Item = (PathBuf, &'static str)> + '_ {
        PACKAGED_DIRS.iter().map(|rel| (self.join_rel(rel), *rel))
    }

    fn join_rel(&self, rel: &str) -> PathBuf {
        rel.split('/').fold(self.root.clone(), |path, seg| path.join(seg))
    }
}

// ── sanitisation ─────────────────────────────────────────────────────────────

static ILLEGAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/?<>\\:*|"]"#).expect("illegal-char pattern compiles"));
static CONTROL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x1f\x{80}-\x{9f}]").expect("control pattern compiles"));
static RESERVED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.+$").expect("reserved pattern compiles"));
static WINDOWS_RESERVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(con|prn|aux|nul|com[0-9]|lpt[0-9])(\..*)?$")
        .expect("windows-reserved pattern compiles")
});
static WINDOWS_TRAILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[. ]+$").expect("trailing pattern compiles"));

/// Strip characters that are unsafe in a file or directory name.
///
/// Fails with `InvalidFormat` when nothing usable is left.
pub fn sanitize_file_name(name: &str) -> Result<String, DomainError> {
    let cleaned = ILLEGAL.replace_all(name, "");
    let cleaned = CONTROL.replace_all(&cleaned, "");
    let cleaned = RESERVED.replace_all(&cleaned, "");
    let cleaned = WINDOWS_RESERVED.replace_all(&cleaned, "");
    let cleaned = WINDOWS_TRAILING.replace_all(&cleaned, "");
    let cleaned = truncate_bytes(&cleaned, MAX_FILE_NAME_BYTES);

    if cleaned.is_empty() {
        return Err(DomainError::invalid_format(
            "name",
            name,
            Some(&format!("'{name}' does not contain any usable file name characters")),
        ));
    }
    Ok(cleaned.to_owned())
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// The manifest `path` value: `absolute` normalised lexically, with the
/// filesystem root removed and `/` as separator.
pub fn manifest_path_field(absolute: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in absolute.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
        }
    }
    parts.join("/")
}
