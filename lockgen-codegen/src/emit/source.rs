//! Fragments spliced into `locking_table.c`.

use std::collections::BTreeMap;

use lockgen_core::LockKind;
use lockgen_manifest::Lock;

use super::{COUNT_LIMIT_WIDTH, Emitter, INDEX_WIDTH, NAME_MACRO_WIDTH, TYPE_WIDTH};
use crate::{EmitError, builder::CodeBuilder};

impl Emitter<'_> {
    /// `LOCKING_TABLE` initializer entries, one per lock.
    pub fn table(&self) -> String {
        CodeBuilder::c()
            .indent()
            .each(self.project.locks().iter().enumerate(), |b, (index, lock)| {
                b.line(&table_entry(index, lock))
            })
            .trim_trailing_comma()
            .build()
    }

    /// `LOCKING_MAP` entries from id to table slot; ids without a lock are omitted.
    pub fn map(&self) -> Result<String, EmitError> {
        let max_id = self.max_id("map")?;

        let mut slots = BTreeMap::new();
        for (position, lock) in self.project.locks().iter().enumerate() {
            slots.entry(lock.id).or_insert(position);
        }

        Ok(CodeBuilder::c()
            .indent()
            .each(slots.range(..=max_id), |b, (id, position)| {
                b.line(&format!(
                    "[{:<w$}] = &LOCKING_TABLE[{:<w$}],",
                    id,
                    position,
                    w = INDEX_WIDTH
                ))
            })
            .trim_trailing_comma()
            .build())
    }

    /// Kernel object initialisation calls.
    pub fn init(&self) -> String {
        CodeBuilder::c()
            .indent()
            .each(self.project.locks(), |b, lock| match lock.kind {
                LockKind::Mutex => b.line(&format!("k_mutex_init(&{});", lock.name)),
                LockKind::Semaphore => b.line(&format!(
                    "k_sem_init(&{}, {}, {});",
                    lock.name, lock.count, lock.limit
                )),
                LockKind::Unknown(_) => b,
            })
            .build()
    }

    /// Semaphore reset calls; mutexes have nothing to reset.
    pub fn reset(&self) -> String {
        CodeBuilder::c()
            .indent()
            .each(self.project.locks(), |b, lock| {
                b.when(lock.kind.is_semaphore(), |b| {
                    b.line(&format!("k_sem_reset(&{});", lock.name))
                })
            })
            .build()
    }

    /// Static storage for each kernel object.
    pub fn structs(&self) -> String {
        CodeBuilder::c()
            .each(self.project.locks(), |b, lock| match lock.kind.storage_type() {
                Some(storage) => b.line(&format!("static {} {};", storage, lock.name)),
                None => b,
            })
            .build()
    }
}

fn table_entry(index: usize, lock: &Lock) -> String {
    format!(
        "[{:<iw$}] = {{ {:<iw$}, {:<nw$}, {:<tw$}, {:<cw$}, {:<cw$} }},",
        index,
        lock.id,
        format!("LOCK({})", lock.name),
        lock.kind.type_tag(),
        format!(".count = {}", lock.count),
        format!(".limit = {}", lock.limit),
        iw = INDEX_WIDTH,
        nw = NAME_MACRO_WIDTH,
        tw = TYPE_WIDTH,
        cw = COUNT_LIMIT_WIDTH,
    )
}

#[cfg(test)]
mod tests {
    use lockgen_manifest::Project;

    use super::*;

    fn scenario() -> Project {
        Project::new(
            "X",
            vec![Lock::mutex(1, "A"), Lock::semaphore(2, "B", 1, 4)],
        )
    }

    #[test]
    fn test_table() {
        let project = scenario();

        assert_eq!(
            Emitter::new(&project).table(),
            "\t[0  ] = { 1  , LOCK(A)             , LOCKING_TYPE_MUTEX      , .count = 0  , .limit = 0   },\n\
             \t[1  ] = { 2  , LOCK(B)             , LOCKING_TYPE_SEMAPHORE  , .count = 1  , .limit = 4   }\n"
        );
    }

    #[test]
    fn test_table_matches_existing_entry_layout() {
        let project = Project::new("MG100", vec![Lock::mutex(0, "adc")]);

        assert_eq!(
            Emitter::new(&project).table(),
            "\t[0  ] = { 0  , LOCK(adc)           , LOCKING_TYPE_MUTEX      , .count = 0  , .limit = 0   }\n"
        );
    }

    #[test]
    fn test_map_is_sparse() {
        let project = Project::new(
            "X",
            vec![
                Lock::mutex(0, "a"),
                Lock::mutex(2, "b"),
                Lock::mutex(5, "c"),
            ],
        );

        let map = Emitter::new(&project).map().unwrap();

        assert_eq!(
            map,
            "\t[0  ] = &LOCKING_TABLE[0  ],\n\
             \t[2  ] = &LOCKING_TABLE[1  ],\n\
             \t[5  ] = &LOCKING_TABLE[2  ]\n"
        );
        assert_eq!(map.lines().count(), 3);
    }

    #[test]
    fn test_map_follows_table_position_not_id_order() {
        let project = Project::new("X", vec![Lock::mutex(7, "late"), Lock::mutex(3, "early")]);

        let map = Emitter::new(&project).map().unwrap();

        assert_eq!(
            map,
            "\t[3  ] = &LOCKING_TABLE[1  ],\n\t[7  ] = &LOCKING_TABLE[0  ]\n"
        );
    }

    #[test]
    fn test_init() {
        let project = scenario();

        assert_eq!(
            Emitter::new(&project).init(),
            "\tk_mutex_init(&A);\n\tk_sem_init(&B, 1, 4);\n"
        );
    }

    #[test]
    fn test_reset_only_semaphores() {
        let project = scenario();

        let reset = Emitter::new(&project).reset();

        assert_eq!(reset, "\tk_sem_reset(&B);\n");
        assert_eq!(reset.lines().count(), 1);
    }

    #[test]
    fn test_structs() {
        let project = scenario();

        assert_eq!(
            Emitter::new(&project).structs(),
            "static struct k_mutex A;\nstatic struct k_sem B;\n"
        );
    }

    #[test]
    fn test_deterministic() {
        let project = scenario();
        let emitter = Emitter::new(&project);

        assert_eq!(emitter.table(), emitter.table());
        assert_eq!(emitter.map(), emitter.map());
    }
}
