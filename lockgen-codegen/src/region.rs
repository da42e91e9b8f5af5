//! Marker regions and the files they live in.

use std::{
    fmt,
    path::{Path, PathBuf},
};

/// Which generated file a region belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// `include/<table>.h`
    Header,
    /// `source/<table>.c`
    Source,
}

impl Target {
    pub const ALL: [Target; 2] = [Target::Header, Target::Source];

    /// Directory under the project base path.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Target::Header => "include",
            Target::Source => "source",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Target::Header => "h",
            Target::Source => "c",
        }
    }

    /// Regions filled in this file.
    pub fn regions(&self) -> &'static [Region] {
        match self {
            Target::Header => &[Region::Ids, Region::Constants],
            Target::Source => &[
                Region::Table,
                Region::Map,
                Region::Init,
                Region::Reset,
                Region::Locks,
            ],
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Header => write!(f, "header"),
            Target::Source => write!(f, "source"),
        }
    }
}

/// A purpose label found after a begin marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Table,
    Map,
    Init,
    Reset,
    Locks,
    Ids,
    Constants,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Table,
        Region::Map,
        Region::Init,
        Region::Reset,
        Region::Locks,
        Region::Ids,
        Region::Constants,
    ];

    /// The label written in the marker comment, e.g. `/* pystart - init */`.
    pub fn label(&self) -> &'static str {
        match self {
            Region::Table => "locking table",
            Region::Map => "locking map",
            Region::Init => "init",
            Region::Reset => "reset",
            Region::Locks => "locks",
            Region::Ids => "locking ids",
            Region::Constants => "locking constants",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }

    pub fn target(&self) -> Target {
        match self {
            Region::Ids | Region::Constants => Target::Header,
            Region::Table | Region::Map | Region::Init | Region::Reset | Region::Locks => {
                Target::Source
            }
        }
    }
}

/// Placeholder substituted with the project name in the base path.
pub const PROJECT_PLACEHOLDER: &str = "%PROJ%";

/// Default project base path template.
pub const DEFAULT_BASE_PATH: &str = "./custom/%PROJ%";

/// Default stem of the generated header and source files.
pub const DEFAULT_TABLE_FILE_NAME: &str = "locking_table";

/// Locations of the generated files for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    base: PathBuf,
    table_file_name: String,
}

impl TargetPaths {
    /// Substitute `project` into `base_template`.
    ///
    /// `./custom/%PROJ%` with `MG100` gives `./custom/MG100/include/locking_table.h`
    /// and `./custom/MG100/source/locking_table.c`.
    pub fn from_template(base_template: &str, project: &str, table_file_name: &str) -> Self {
        Self {
            base: PathBuf::from(base_template.replace(PROJECT_PLACEHOLDER, project)),
            table_file_name: table_file_name.to_string(),
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn dir(&self, target: Target) -> PathBuf {
        self.base.join(target.dir_name())
    }

    pub fn file(&self, target: Target) -> PathBuf {
        self.dir(target)
            .join(format!("{}.{}", self.table_file_name, target.extension()))
    }
}
