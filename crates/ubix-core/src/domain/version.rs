//! Semantic versions and the bump rules applied by `ubix version update`.
//!
//! # Bump rules
//!
//! - An explicit version wins; increments are ignored.
//! - Increments are added to their components independently
//!   (`1.2.3` + major 1 = `2.2.3`; nothing is reset).
//! - With no explicit version and no increments, the patch component is
//!   incremented by one.
//! - A component pushed below zero is an error for that increment. All
//!   such errors are collected before the bump is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::validation::{
    API_PATTERN, ParamRule, VERSION_PATTERN, ValidationErrors, validate_int, validate_text,
};

// ── Version ──────────────────────────────────────────────────────────────────

/// A `major.minor.patch` version with non-negative components.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub const fn component(&self, which: VersionComponent) -> u64 {
        match which {
            VersionComponent::Major => self.major,
            VersionComponent::Minor => self.minor,
            VersionComponent::Patch => self.patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !VERSION_PATTERN.is_match(s) {
            return Err(DomainError::invalid_format("version", s, None));
        }

        let mut parts = s.split('.').map(str::parse::<u64>);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(major)), Some(Ok(minor)), Some(Ok(patch))) => {
                Ok(Self::new(major, minor, patch))
            }
            // Matched the pattern but a component overflows u64.
            _ => Err(DomainError::invalid_format("version", s, None)),
        }
    }
}

impl TryFrom<String> for Version {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.to_string()
    }
}

/// One of the three version components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionComponent {
    Major,
    Minor,
    Patch,
}

impl VersionComponent {
    pub const ALL: [Self; 3] = [Self::Major, Self::Minor, Self::Patch];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ApiVersion ───────────────────────────────────────────────────────────────

/// The platform API a solution targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ApiVersion {
    #[default]
    Latest,
    Pinned(Version),
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Pinned(v) => v.fmt(f),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !API_PATTERN.is_match(s) {
            return Err(DomainError::invalid_format("api", s, None));
        }
        if s == "latest" {
            return Ok(Self::Latest);
        }
        s.parse()
            .map(Self::Pinned)
            .map_err(|_| DomainError::invalid_format("api", s, None))
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ApiVersion> for String {
    fn from(value: ApiVersion) -> Self {
        value.to_string()
    }
}

// ── VersionBump ──────────────────────────────────────────────────────────────

/// Raw, unvalidated bump options as typed by the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct BumpArgs<'a> {
    pub version: Option<&'a str>,
    pub major: Option<&'a str>,
    pub minor: Option<&'a str>,
    pub patch: Option<&'a str>,
}

/// A validated request to move from one version to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionBump {
    pub explicit: Option<Version>,
    pub major: Option<i64>,
    pub minor: Option<i64>,
    pub patch: Option<i64>,
}

impl VersionBump {
    /// Jump straight to `version`.
    pub fn explicit(version: Version) -> Self {
        Self {
            explicit: Some(version),
            ..Self::default()
        }
    }

    pub fn with_major(mut self, increment: i64) -> Self {
        self.major = Some(increment);
        self
    }

    pub fn with_minor(mut self, increment: i64) -> Self {
        self.minor = Some(increment);
        self
    }

    pub fn with_patch(mut self, increment: i64) -> Self {
        self.patch = Some(increment);
        self
    }

    /// Validate raw options, recording failures in `errors`. Invalid options
    /// are treated as absent so the remaining ones can still be checked.
    pub fn from_args(args: &BumpArgs<'_>, errors: &mut ValidationErrors) -> Self {
        let explicit = errors
            .collect(validate_text(args.version, "version", &ParamRule::version()))
            .and_then(|v| errors.collect(v.parse::<Version>().map(Some)));

        Self {
            explicit,
            major: errors.collect(validate_int(args.major, "major")),
            minor: errors.collect(validate_int(args.minor, "minor")),
            patch: errors.collect(validate_int(args.patch, "patch")),
        }
    }

    /// The increment applied to each component, after the default-patch rule.
    pub fn increments(&self) -> [i64; 3] {
        if self.major.is_none() && self.minor.is_none() && self.patch.is_none() {
            return [0, 0, 1];
        }
        [
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        ]
    }

    /// Compute the next version, recording out-of-range increments in
    /// `errors`. Returns `None` when any component is out of range.
    pub fn compute(&self, current: &Version, errors: &mut ValidationErrors) -> Option<Version> {
        if let Some(explicit) = self.explicit {
            return Some(explicit);
        }

        let mut next = [0u64; 3];
        let mut ok = true;
        for ((slot, component), increment) in next
            .iter_mut()
            .zip(VersionComponent::ALL)
            .zip(self.increments())
        {
            match current.component(component).checked_add_signed(increment) {
                Some(value) => *slot = value,
                None => {
                    errors.push(DomainError::InvalidIncrement {
                        component,
                        increment,
                    });
                    ok = false;
                }
            }
        }

        ok.then(|| Version::new(next[0], next[1], next[2]))
    }

    /// Compute the next version or fail with every out-of-range increment.
    pub fn apply(&self, current: &Version) -> Result<Version, DomainError> {
        let mut errors = ValidationErrors::new();
        let next = self.compute(current, &mut errors);
        errors.into_result()?;
        next.ok_or(DomainError::MissingRequiredField { field: "version" })
    }
}

/// Validate raw bump options and compute the new version in one pass.
///
/// Option errors and increment errors are reported together; nothing is
/// returned unless both passes are clean.
pub fn compute_new_version(current: &Version, args: &BumpArgs<'_>) -> Result<Version, DomainError> {
    let mut errors = ValidationErrors::new();
    let bump = VersionBump::from_args(args, &mut errors);
    let next = bump.compute(current, &mut errors);
    errors.into_result()?;
    next.ok_or(DomainError::MissingRequiredField { field: "version" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_displays_round_trip() {
        assert_eq!(v("1.2.3"), Version::new(1, 2, 3));
        assert_eq!(Version::new(10, 0, 7).to_string(), "10.0.7");
    }

    #[test]
    fn leading_zeros_are_dropped_on_display() {
        assert_eq!(v("01.002.0003").to_string(), "1.2.3");
    }

    #[test]
    fn rejects_malformed_versions() {
        for bad in ["1.2", "1.2.3.4", "a.b.c", "", "99999999999999999999.0.0"] {
            let err = bad.parse::<Version>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat, "accepted: {bad}");
        }
    }

    #[test]
    fn api_version_accepts_latest_and_pinned() {
        assert_eq!("latest".parse::<ApiVersion>(), Ok(ApiVersion::Latest));
        assert_eq!(
            "2.0.1".parse::<ApiVersion>(),
            Ok(ApiVersion::Pinned(Version::new(2, 0, 1)))
        );
        assert!("newest".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn bare_bump_increments_patch() {
        assert_eq!(VersionBump::default().apply(&v("1.2.3")), Ok(v("1.2.4")));
    }

    #[test]
    fn major_increment_alone_leaves_patch_untouched() {
        let bump = VersionBump::default().with_major(1);
        assert_eq!(bump.apply(&v("1.2.3")), Ok(v("2.2.3")));
    }

    #[test]
    fn increments_combine_additively() {
        let bump = VersionBump::default()
            .with_major(1)
            .with_minor(2)
            .with_patch(3);
        assert_eq!(bump.apply(&v("1.1.1")), Ok(v("2.3.4")));
    }

    #[test]
    fn negative_increment_can_decrement() {
        let bump = VersionBump::default().with_minor(-1);
        assert_eq!(bump.apply(&v("1.2.3")), Ok(v("1.1.3")));
    }

    #[test]
    fn patch_below_zero_is_invalid_increment() {
        let err = VersionBump::default()
            .with_patch(-1)
            .apply(&v("0.0.0"))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidIncrement {
                component: VersionComponent::Patch,
                increment: -1
            }
        );
    }

    #[test]
    fn every_out_of_range_component_is_reported() {
        let err = VersionBump::default()
            .with_major(-1)
            .with_minor(-5)
            .apply(&v("0.1.0"))
            .unwrap_err();
        let DomainError::Invalid(errors) = err else {
            panic!("expected a batch, got {err:?}");
        };
        let messages = errors.messages();
        assert_eq!(
            messages,
            vec![
                "Invalid major version increment: -1",
                "Invalid minor version increment: -5",
            ]
        );
    }

    #[test]
    fn explicit_version_ignores_increments() {
        let bump = VersionBump::explicit(v("2.0.0")).with_major(-100);
        assert_eq!(bump.apply(&v("9.9.9")), Ok(v("2.0.0")));
    }

    #[test]
    fn compute_new_version_from_raw_args() {
        let args = BumpArgs {
            minor: Some("1"),
            ..BumpArgs::default()
        };
        assert_eq!(compute_new_version(&v("1.2.3"), &args), Ok(v("1.3.3")));
    }

    #[test]
    fn compute_new_version_reports_option_and_increment_errors_together() {
        let args = BumpArgs {
            major: Some("one"),
            patch: Some("-4"),
            ..BumpArgs::default()
        };
        let err = compute_new_version(&v("0.0.3"), &args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let text = err.to_string();
        assert!(text.contains("invalid value for major: one"));
        assert!(text.contains("Invalid patch version increment: -4"));
    }

    #[test]
    fn invalid_explicit_version_is_rejected() {
        let args = BumpArgs {
            version: Some("2.0"),
            ..BumpArgs::default()
        };
        let err = compute_new_version(&v("1.0.0"), &args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn overflowing_explicit_version_is_rejected_not_bumped() {
        let args = BumpArgs {
            version: Some("99999999999999999999.0.0"),
            ..BumpArgs::default()
        };
        let err = compute_new_version(&v("1.2.3"), &args).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&v("3.1.4")).unwrap();
        assert_eq!(json, "\"3.1.4\"");
        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v("3.1.4"));
        assert!(serde_json::from_str::<Version>("\"3.1\"").is_err());
    }
}
