#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    fmt::{self, Display},
    path::{Component, Path},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Directories, either at the exercise root or directly under `src`, whose
/// contents always stay with the exercise's support material.
const NEVER_MOVED_DIRS: [&str; 2] = ["test", "lib"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Build systems an exercise can use, each with its own source layout.
pub enum BuildSystem {
    /// Maven: sources under `src/main`, described by `pom.xml`.
    Maven,
    /// Ant: sources under `src`, described by `build.xml`.
    Ant,
    /// make: C sources under `src`, described by `Makefile`.
    Make,
}

impl BuildSystem {
    /// Every supported build system.
    pub const ALL: [BuildSystem; 3] = [BuildSystem::Maven, BuildSystem::Ant, BuildSystem::Make];

    /// Build descriptor that must never be moved.
    pub fn descriptor(self) -> &'static str {
        match self {
            BuildSystem::Maven => "pom.xml",
            BuildSystem::Ant => "build.xml",
            BuildSystem::Make => "Makefile",
        }
    }

    /// Directory, relative to the exercise root, holding student sources.
    pub fn source_dir(self) -> &'static Path {
        match self {
            BuildSystem::Maven => Path::new("src/main"),
            BuildSystem::Ant | BuildSystem::Make => Path::new("src"),
        }
    }

    /// Whether `path`, relative to the exercise root, should move from the
    /// solution tree into the student stub tree.
    ///
    /// Pure: looks only at the path, never at the file system.
    pub fn should_move(self, path: &Path) -> bool {
        if path.is_absolute() || path.file_name().is_none_or(|name| name == self.descriptor()) {
            return false;
        }

        !in_support_dir(path) && path.starts_with(self.source_dir())
    }

    /// Canonical lowercase name.
    fn as_str(self) -> &'static str {
        match self {
            BuildSystem::Maven => "maven",
            BuildSystem::Ant => "ant",
            BuildSystem::Make => "make",
        }
    }
}

/// Whether `path` lies in a top level `test`/`lib` directory or in
/// `src/test`/`src/lib`. Deeper directories with those names are ordinary
/// packages.
fn in_support_dir(path: &Path) -> bool {
    let mut parts = path.components().filter_map(|c| match c {
        Component::Normal(part) => Some(part),
        _ => None,
    });
    let is_support = |part: &std::ffi::OsStr| NEVER_MOVED_DIRS.iter().any(|dir| part == *dir);

    match (parts.next(), parts.next()) {
        (Some(first), _) if is_support(first) => true,
        (Some(first), Some(second)) if first == "src" => is_support(second),
        _ => false,
    }
}

impl Display for BuildSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuildSystem::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown build system: {s} (expected maven, ant or make)"))
    }
}
