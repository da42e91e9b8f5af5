//! Fragments spliced into `locking_table.h`.

use super::{DEFINE_WIDTH, Emitter, ID_WIDTH};
use crate::{EmitError, builder::CodeBuilder};

impl Emitter<'_> {
    /// One `#define LOCKING_ID_<name> <id>` per lock.
    pub fn ids(&self) -> String {
        CodeBuilder::c()
            .each(self.project.locks(), |b, lock| {
                b.line(&id_define(&lock.name, lock.id))
            })
            .build()
    }

    /// `LOCKING_TABLE_SIZE` and `LOCKING_TABLE_MAX_ID`.
    pub fn constants(&self) -> Result<String, EmitError> {
        let max_id = self.max_id("constants")?;
        let width = self.project.longest_name().unwrap_or_default() + DEFINE_WIDTH;

        Ok(CodeBuilder::c()
            .line(&format!(
                "#define LOCKING_{:<width$} {}",
                "TABLE_SIZE",
                self.project.len()
            ))
            .line(&format!("#define LOCKING_{:<width$} {}", "TABLE_MAX_ID", max_id))
            .build())
    }
}

fn id_define(name: &str, id: u32) -> String {
    let define = format!("#define LOCKING_ID_{}", name);
    // Overlong names would otherwise run into the value.
    if define.len() >= ID_WIDTH {
        format!("{} {}", define, id)
    } else {
        format!("{:<w$}{}", define, id, w = ID_WIDTH)
    }
}
