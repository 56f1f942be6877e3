use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Parsed `MAJOR.MINOR.PATCH[-prerelease][+build]` version.
///
/// Only constructible through [`SemverParts::parse`]. Missing prerelease or
/// build metadata is `None`, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemverParts {
    major: u64,
    minor: u64,
    patch: u64,
    prerelease: Option<String>,
    build: Option<String>,
}

impl SemverParts {
    /// Parses a version string, accepting an optional leading `v`.
    ///
    /// Returns `None` for anything `semver` rejects; callers treat that as
    /// "cannot classify".
    pub fn parse(version: &str) -> Option<Self> {
        let trimmed = version.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let parsed = Version::parse(trimmed).ok()?;

        Some(Self {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            prerelease: (!parsed.pre.is_empty()).then(|| parsed.pre.as_str().to_string()),
            build: (!parsed.build.is_empty()).then(|| parsed.build.as_str().to_string()),
        })
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn prerelease(&self) -> Option<&str> {
        self.prerelease.as_deref()
    }

    pub fn build(&self) -> Option<&str> {
        self.build.as_deref()
    }

    /// The version with prerelease and build metadata dropped.
    fn core(&self) -> Version {
        Version::new(self.major, self.minor, self.patch)
    }
}

/// Kind of upgrade between two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateType {
    Major,
    Minor,
    Patch,
    None,
}

impl UpdateType {
    /// Classifies the upgrade from `current` to `latest`.
    ///
    /// Prerelease and build metadata are parsed but ignored: versions with
    /// equal cores are `None` whatever their tags. A downgrade is also
    /// `None`.
    pub fn between(current: &str, latest: &str) -> Self {
        let (Some(current), Some(latest)) = (SemverParts::parse(current), SemverParts::parse(latest))
        else {
            return UpdateType::None;
        };

        if latest.major != current.major {
            return if latest.major > current.major {
                UpdateType::Major
            } else {
                UpdateType::None
            };
        }
        if latest.minor != current.minor {
            return if latest.minor > current.minor {
                UpdateType::Minor
            } else {
                UpdateType::None
            };
        }
        if latest.patch > current.patch {
            UpdateType::Patch
        } else {
            UpdateType::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Major => "major",
            UpdateType::Minor => "minor",
            UpdateType::Patch => "patch",
            UpdateType::None => "none",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orders two version strings by major, minor, then patch.
///
/// Prerelease and build metadata do not take part. Unparseable input on
/// either side compares `Equal` rather than failing.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (SemverParts::parse(a), SemverParts::parse(b)) {
        (Some(a), Some(b)) => a.core().cmp(&b.core()),
        _ => Ordering::Equal,
    }
}
