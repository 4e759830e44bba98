//! Solution Service - main application orchestrator.
//!
//! One method per command:
//! 1. `plan_init` + `init`: validate overrides, prompt for the rest, write
//!    the skeleton and manifest
//! 2. `version`: show or bump the manifest version
//! 3. `info`: return the manifest document untouched
//! 4. `package`: zip the solution tree
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, ManifestStore,
        ports::{ArchiveEntry, ArchivePlan, Archiver, EntryKind, Filesystem, PromptField, Prompter},
    },
    domain::{
        ApiVersion, BumpArgs, DomainError, MANIFEST_FILE, Manifest, ManifestFields, ParamRule,
        SolutionLayout, ValidationErrors, Version, compute_new_version, sanitize_file_name,
        timestamp_now, validate_text,
    },
    error::UbixResult,
};

// ── requests & outcomes ──────────────────────────────────────────────────────

/// Prompt defaults for `init`, normally taken from the user's config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitDefaults {
    pub author: String,
    pub version: String,
    pub api: String,
}

impl Default for InitDefaults {
    fn default() -> Self {
        Self {
            author: String::new(),
            version: "0.0.0".into(),
            api: "latest".into(),
        }
    }
}

/// Raw `init` arguments as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct InitRequest {
    pub name: String,
    /// Parent directory of the new solution; the current directory if absent.
    pub path: Option<PathBuf>,
    pub author: Option<String>,
    pub version: Option<String>,
    pub api: Option<String>,
    pub defaults: InitDefaults,
}

/// A checked `init` request, ready for prompting.
#[derive(Debug, Clone)]
pub struct InitPlan {
    directory: PathBuf,
    raw_name: String,
    name: Option<String>,
    author: Option<String>,
    version: Option<String>,
    api: Option<String>,
    defaults: InitDefaults,
    warnings: ValidationErrors,
}

impl InitPlan {
    /// Where the solution will be created.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Overrides that were rejected and will be asked for instead.
    pub fn warnings(&self) -> &ValidationErrors {
        &self.warnings
    }

    /// Fields without a valid override, in prompting order.
    pub fn prompt_fields(&self) -> Vec<PromptField> {
        let mut fields = Vec::new();
        if self.name.is_none() {
            fields.push(PromptField {
                key: "name",
                description: "Solution name",
                default: self.raw_name.clone(),
                rule: ParamRule::name(),
                required: true,
            });
        }
        if self.author.is_none() {
            fields.push(PromptField {
                key: "author",
                description: "Author",
                default: self.defaults.author.clone(),
                rule: ParamRule::new(),
                required: false,
            });
        }
        if self.version.is_none() {
            fields.push(PromptField {
                key: "version",
                description: "Solution version",
                default: self.defaults.version.clone(),
                rule: ParamRule::version(),
                required: true,
            });
        }
        if self.api.is_none() {
            fields.push(PromptField {
                key: "api",
                description: "UBIX API version",
                default: self.defaults.api.clone(),
                rule: ParamRule::api(),
                required: false,
            });
        }
        fields
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitOutcome {
    pub directory: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionMode {
    /// Print the current version.
    #[default]
    Show,
    /// Compute and persist a new version.
    Update,
}

#[derive(Debug, Clone, Default)]
pub struct VersionRequest {
    pub mode: VersionMode,
    /// Manifest file; `./ubix.json` if absent.
    pub solution: Option<PathBuf>,
    pub version: Option<String>,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
}

impl VersionRequest {
    fn bump_args(&self) -> BumpArgs<'_> {
        BumpArgs {
            version: self.version.as_deref(),
            major: self.major.as_deref(),
            minor: self.minor.as_deref(),
            patch: self.patch.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionOutcome {
    pub manifest_path: PathBuf,
    pub previous: Version,
    pub current: Version,
    pub updated: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PackageRequest {
    /// Solution directory; the current directory if absent.
    pub path: Option<PathBuf>,
    /// Archive to write; `ubix.zip` inside the solution if absent.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    pub archive: PathBuf,
    pub bytes: u64,
    /// Subfolders left out because they do not exist.
    pub skipped: Vec<&'static str>,
}

// ── service ──────────────────────────────────────────────────────────────────

/// Runs the `ubix` commands against a filesystem and an archiver.
pub struct SolutionService {
    filesystem: Box<dyn Filesystem>,
    archiver: Box<dyn Archiver>,
}

impl SolutionService {
    /// Create a new solution service with the given adapters.
    pub fn new(filesystem: Box<dyn Filesystem>, archiver: Box<dyn Archiver>) -> Self {
        Self {
            filesystem,
            archiver,
        }
    }

    /// Manifest access over this service's filesystem.
    pub fn store(&self) -> ManifestStore<'_> {
        ManifestStore::new(self.filesystem.as_ref())
    }

    /// Check the target directory and the command-line overrides.
    ///
    /// Invalid overrides are not fatal: they are recorded in
    /// [`InitPlan::warnings`] and the field is prompted for instead.
    #[instrument(skip_all, fields(name = %request.name))]
    pub fn plan_init(&self, request: InitRequest) -> UbixResult<InitPlan> {
        let file_name = sanitize_file_name(&request.name)?;
        let directory = match &request.path {
            Some(parent) => parent.join(&file_name),
            None => PathBuf::from(&file_name),
        };
        self.ensure_absent(&directory)?;

        let mut warnings = ValidationErrors::new();
        let name = warnings.collect(validate_text(
            Some(request.name.as_str()),
            "name",
            &ParamRule::name(),
        ));
        let author = request.author.filter(|a| !a.is_empty());
        let version = warnings.collect(validate_text(
            request.version.as_deref(),
            "version",
            &ParamRule::version(),
        ));
        let api = warnings.collect(validate_text(
            request.api.as_deref(),
            "api",
            &ParamRule::api(),
        ));

        if !warnings.is_empty() {
            warn!(count = warnings.len(), "Rejected init parameters");
        }

        Ok(InitPlan {
            directory,
            raw_name: request.name,
            name,
            author,
            version,
            api,
            defaults: request.defaults,
            warnings,
        })
    }

    /// Prompt for the remaining fields, then create the solution.
    #[instrument(skip_all, fields(directory = %plan.directory.display()))]
    pub fn init(&self, plan: InitPlan, prompter: &dyn Prompter) -> UbixResult<InitOutcome> {
        let fields = self.answer(&plan, prompter)?;
        self.create(plan, fields)
    }

    /// Prompt for every field without a valid override and check the
    /// final values. Any failure here is fatal.
    pub fn answer(&self, plan: &InitPlan, prompter: &dyn Prompter) -> UbixResult<ManifestFields> {
        let mut answers = Vec::new();
        for field in plan.prompt_fields() {
            let answer = prompter.prompt(&field)?;
            answers.push((field.key, answer));
        }
        let answer = |key: &str| {
            answers
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
        };

        let name = plan.name.clone().or_else(|| answer("name"));
        let author = plan.author.clone().or_else(|| answer("author"));
        let version = plan.version.clone().or_else(|| answer("version"));
        let api = plan.api.clone().or_else(|| answer("api"));
        Ok(confirm_fields(name, author, version, api)?)
    }

    /// Write the skeleton folders and the manifest.
    pub fn create(&self, plan: InitPlan, fields: ManifestFields) -> UbixResult<InitOutcome> {
        // The directory may have appeared while the user was answering.
        self.ensure_absent(&plan.directory)?;

        info!("Creating solution at {}", plan.directory.display());
        let layout = SolutionLayout::new(&plan.directory);
        for dir in layout.skeleton_dirs() {
            self.filesystem.create_dir_all(&dir)?;
        }

        let manifest = self.store().create(&plan.directory, fields)?;
        info!(name = %manifest.name, version = %manifest.version, "Solution created");

        Ok(InitOutcome {
            manifest_path: layout.manifest_path(),
            directory: plan.directory,
            manifest,
        })
    }

    /// Show the manifest version, or bump it and save.
    #[instrument(skip_all, fields(mode = ?request.mode))]
    pub fn version(&self, request: VersionRequest) -> UbixResult<VersionOutcome> {
        let store = self.store();
        let path = store.locate(request.solution.as_deref())?;
        let mut manifest = store.load(&path)?;
        let previous = manifest.version();

        if request.mode == VersionMode::Show {
            return Ok(VersionOutcome {
                manifest_path: path,
                previous,
                current: previous,
                updated: false,
            });
        }

        let next = compute_new_version(&previous, &request.bump_args())?;
        manifest.set_version(next, timestamp_now());
        store.save(&path, &manifest)?;
        info!(from = %previous, to = %next, "Version updated");

        Ok(VersionOutcome {
            manifest_path: path,
            previous,
            current: next,
            updated: true,
        })
    }

    /// The manifest exactly as stored.
    #[instrument(skip(self))]
    pub fn info(&self, solution: Option<&Path>) -> UbixResult<Value> {
        let store = self.store();
        let path = store.locate(solution)?;
        store.read_document(&path)
    }

    /// Zip the solution's content folders and manifest.
    #[instrument(skip_all)]
    pub fn package(&self, request: PackageRequest) -> UbixResult<PackageOutcome> {
        let root = request.path.unwrap_or_else(|| PathBuf::from("."));
        match self.filesystem.stat(&root)? {
            Some(EntryKind::Directory) => {}
            Some(_) => {
                return Err(ApplicationError::WrongType {
                    what: "solution path",
                    path: root,
                }
                .into());
            }
            None => {
                return Err(ApplicationError::NotFound {
                    what: "solution",
                    path: root,
                }
                .into());
            }
        }

        let layout = SolutionLayout::new(&root);
        let store = self.store();
        let manifest_path = store.locate(Some(&layout.manifest_path()))?;
        let manifest = store.load(&manifest_path)?;
        debug!(
            name = manifest.name().unwrap_or_default(),
            version = %manifest.version(),
            "Packaging solution"
        );

        let mut entries = Vec::new();
        let mut skipped = Vec::new();
        for (source, name) in layout.packaged_dirs() {
            match self.filesystem.stat(&source)? {
                Some(EntryKind::Directory) => entries.push(ArchiveEntry::Directory {
                    source,
                    name: name.to_owned(),
                }),
                Some(_) => {
                    return Err(ApplicationError::WrongType {
                        what: "solution folder",
                        path: source,
                    }
                    .into());
                }
                None => {
                    warn!(folder = name, "Solution folder missing, not packaged");
                    skipped.push(name);
                }
            }
        }
        entries.push(ArchiveEntry::File {
            source: manifest_path,
            name: MANIFEST_FILE.to_owned(),
        });

        let plan = ArchivePlan {
            output: request.file.unwrap_or_else(|| layout.archive_path()),
            entries,
        };
        let bytes = self.archiver.write_archive(&plan)?;
        info!(archive = %plan.output.display(), bytes, "Package written");

        Ok(PackageOutcome {
            archive: plan.output,
            bytes,
            skipped,
        })
    }

    fn ensure_absent(&self, directory: &Path) -> UbixResult<()> {
        match self.filesystem.stat(directory)? {
            Some(_) => Err(ApplicationError::AlreadyExists {
                path: directory.to_path_buf(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

/// Fail-fast check of the final `init` values.
fn confirm_fields(
    name: Option<String>,
    author: Option<String>,
    version: Option<String>,
    api: Option<String>,
) -> Result<ManifestFields, DomainError> {
    let name = validate_text(name.as_deref(), "name", &ParamRule::name())?
        .ok_or(DomainError::MissingRequiredField { field: "name" })?;
    let version: Version = validate_text(version.as_deref(), "version", &ParamRule::version())?
        .ok_or(DomainError::MissingRequiredField { field: "version" })?
        .parse()?;
    let api = match validate_text(api.as_deref(), "api", &ParamRule::api())? {
        Some(api) => api.parse()?,
        None => ApiVersion::Latest,
    };

    Ok(ManifestFields {
        name,
        author: author.unwrap_or_default(),
        version,
        api,
    })
}
