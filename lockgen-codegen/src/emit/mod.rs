//! Fragment emission for the locking table.
//!
//! Every fragment is a pure function of the project's lock list and keeps
//! declaration order. Columns are left-justified to fixed widths so that
//! regenerated files diff cleanly.

mod header;
mod source;

use lockgen_manifest::Project;

use crate::{EmitError, Region};

/// Width of the `#define LOCKING_ID_<name>` column.
pub const ID_WIDTH: usize = 54;
/// Width of the `LOCK(<name>)` column of the table.
pub const NAME_MACRO_WIDTH: usize = 20;
/// Padding added to the longest lock name for constant definitions.
pub const DEFINE_WIDTH: usize = 20;
/// Width of the `LOCKING_TYPE_*` column of the table.
pub const TYPE_WIDTH: usize = 24;
/// Width of each `.count = N` / `.limit = M` column.
pub const COUNT_LIMIT_WIDTH: usize = 12;
/// Width of table indices and ids.
pub const INDEX_WIDTH: usize = 3;

/// Renders fragments for one project.
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    project: &'a Project,
}

impl<'a> Emitter<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }

    /// Render the fragment that fills `region`.
    pub fn render(&self, region: Region) -> Result<String, EmitError> {
        match region {
            Region::Table => Ok(self.table()),
            Region::Map => self.map(),
            Region::Init => Ok(self.init()),
            Region::Reset => Ok(self.reset()),
            Region::Locks => Ok(self.structs()),
            Region::Ids => Ok(self.ids()),
            Region::Constants => self.constants(),
        }
    }

    fn max_id(&self, fragment: &'static str) -> Result<u32, EmitError> {
        self.project
            .max_id()
            .ok_or_else(|| EmitError::EmptyProject {
                project: self.project.name().to_string(),
                fragment,
            })
    }
}

#[cfg(test)]
mod tests {
    use lockgen_manifest::Lock;

    use super::*;

    #[test]
    fn test_render_dispatches_every_region() {
        let project = Project::new("X", vec![Lock::mutex(1, "A")]);
        let emitter = Emitter::new(&project);

        for region in Region::ALL {
            assert!(emitter.render(region).is_ok(), "{:?}", region);
        }
    }

    #[test]
    fn test_empty_project_fails_for_id_range_fragments() {
        let project = Project::new("X", Vec::new());
        let emitter = Emitter::new(&project);

        assert_eq!(
            emitter.render(Region::Map),
            Err(EmitError::EmptyProject {
                project: "X".into(),
                fragment: "map",
            })
        );
        assert!(emitter.render(Region::Constants).is_err());
        assert_eq!(emitter.render(Region::Table), Ok(String::new()));
        assert_eq!(emitter.render(Region::Init), Ok(String::new()));
    }
}
