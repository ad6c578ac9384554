//! Version-gated schema migrations.
//!
//! Each migration names the schema version it produces. A document whose
//! version does not satisfy `>= target` gets the migration applied once at
//! load time, and its version is raised to the target. Add new migrations to
//! the end of [`MIGRATIONS`]; parsing code never needs to know about them.

use std::sync::LazyLock;

use regex_lite::Regex;
use semver::{Version, VersionReq};
use tracing::debug;

use crate::domain::asset::Assets;
use crate::domain::schema::RawStep;
use crate::error::Result;

static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("version pattern is valid")
});

pub struct Migration {
    /// Schema version this migration brings a document up to.
    pub target: &'static str,
    pub description: &'static str,
    pub apply: fn(&mut [RawStep], &mut Assets) -> Result<()>,
}

pub const MIGRATIONS: &[Migration] = &[Migration {
    target: "1.2.0",
    description: "move inline image URLs into the asset registry",
    apply: migrate_image_urls,
}];

/// Schema version written by this crate.
pub fn current_version() -> &'static str {
    MIGRATIONS.last().map(|m| m.target).unwrap_or("1.0.0")
}

/// Loosely read a version: the first `major[.minor[.patch]]` run, missing parts are 0.
///
/// `"v1.1"` becomes `1.1.0`, `"2"` becomes `2.0.0`. Returns `None` when the
/// string holds no digits at all.
pub fn coerce_version(input: &str) -> Option<Version> {
    let caps = VERSION_REGEX.captures(input)?;
    let part = |i: usize| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    Some(Version::new(part(1)?, part(2)?, part(3)?))
}

/// Whether `version`, coerced, satisfies the requirement `req`.
pub fn satisfies(version: &str, req: &str) -> bool {
    match (coerce_version(version), VersionReq::parse(req)) {
        (Some(v), Ok(req)) => req.matches(&v),
        _ => false,
    }
}

/// Apply every migration the document's version is missing.
///
/// Returns the version the document conforms to afterwards.
pub fn migrate(version: &str, steps: &mut [RawStep], assets: &mut Assets) -> Result<String> {
    let mut current = version.to_string();

    for migration in MIGRATIONS {
        if satisfies(&current, &format!(">={}", migration.target)) {
            continue;
        }
        debug!(
            "Migrating document from version '{}' to {}: {}",
            current, migration.target, migration.description
        );
        (migration.apply)(steps, assets)?;
        current = migration.target.to_string();
    }

    Ok(current)
}

/// Before 1.2.0 image steps held the image URL inline. Register each URL as an
/// asset and point the step at the asset id instead.
fn migrate_image_urls(steps: &mut [RawStep], assets: &mut Assets) -> Result<()> {
    for step in steps.iter_mut().filter(|step| step.kind == "image") {
        let asset = assets.add_from_url(&step.content)?;
        step.content = asset.id.clone();
    }
    Ok(())
}
