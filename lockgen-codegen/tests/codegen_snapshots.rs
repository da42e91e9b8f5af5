//! Snapshot tests for locking table generation.
//!
//! These tests splice a realistic pair of target files and verify the result.
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::{fs, path::Path};

use lockgen_codegen::{DEFAULT_BASE_PATH, Generator, Region, Target, TargetPaths};
use lockgen_core::WriteResult;
use lockgen_manifest::{Lock, Project};

const SOURCE_FIXTURE: &str = include_str!("fixtures/locking_table.c");
const HEADER_FIXTURE: &str = include_str!("fixtures/locking_table.h");

fn scenario() -> Project {
    Project::new(
        "X",
        vec![Lock::mutex(1, "A"), Lock::semaphore(2, "B", 1, 4)],
    )
}

/// Lay out `custom/X/{include,source}` under `root` with the fixture files.
fn target_paths(root: &Path) -> TargetPaths {
    let template = root.join(DEFAULT_BASE_PATH.trim_start_matches("./"));
    let paths = TargetPaths::from_template(&template.to_string_lossy(), "X", "locking_table");

    for target in Target::ALL {
        fs::create_dir_all(paths.dir(target)).expect("Failed to create target dir");
    }
    fs::write(paths.file(Target::Source), SOURCE_FIXTURE).expect("Failed to write source");
    fs::write(paths.file(Target::Header), HEADER_FIXTURE).expect("Failed to write header");
    paths
}

#[test]
fn test_scenario_source() {
    let dir = tempfile::tempdir().unwrap();
    let paths = target_paths(dir.path());
    let project = scenario();

    Generator::new(&project).generate(&paths).unwrap();

    let source = fs::read_to_string(paths.file(Target::Source)).unwrap();
    insta::assert_snapshot!("scenario_source", source);
}

#[test]
fn test_scenario_header() {
    let dir = tempfile::tempdir().unwrap();
    let paths = target_paths(dir.path());
    let project = scenario();

    Generator::new(&project).generate(&paths).unwrap();

    let header = fs::read_to_string(paths.file(Target::Header)).unwrap();
    insta::assert_snapshot!("scenario_header", header);
}

#[test]
fn test_every_region_filled() {
    let dir = tempfile::tempdir().unwrap();
    let paths = target_paths(dir.path());
    let project = scenario();

    let result = Generator::new(&project).generate(&paths).unwrap();

    // regions are listed in the order the fixtures declare them
    let expected = |target: Target| match target {
        Target::Header => vec![Region::Ids, Region::Constants],
        Target::Source => vec![
            Region::Locks,
            Region::Table,
            Region::Map,
            Region::Init,
            Region::Reset,
        ],
    };

    assert_eq!(result.files.len(), 2);
    for generated in &result.files {
        assert_eq!(generated.file.filled, expected(generated.file.target));
        assert!(!generated.file.is_unmatched());
        assert!(generated.file.unrecognized.is_empty());
        assert_eq!(generated.result, WriteResult::Written);
    }
}

#[test]
fn test_regeneration_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let paths = target_paths(dir.path());
    let project = scenario();
    let generator = Generator::new(&project);

    generator.generate(&paths).unwrap();
    let second = generator.generate(&paths).unwrap();

    for generated in &second.files {
        assert_eq!(generated.result, WriteResult::Unchanged);
    }
}

#[test]
fn test_preview_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let paths = target_paths(dir.path());
    let project = scenario();

    let preview = Generator::new(&project).preview(&paths).unwrap();

    assert!(preview[1].content.contains("k_sem_reset(&B);"));
    assert_eq!(
        fs::read_to_string(paths.file(Target::Source)).unwrap(),
        SOURCE_FIXTURE
    );
}

#[test]
fn test_broken_source_leaves_header_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let paths = target_paths(dir.path());
    fs::write(
        paths.file(Target::Source),
        "/* pystart - init */\nk_mutex_init(&adc);\n",
    )
    .unwrap();
    let project = scenario();

    let err = Generator::new(&project).generate(&paths).unwrap_err();

    assert!(format!("{:#}", err).contains("no end marker"));
    assert_eq!(
        fs::read_to_string(paths.file(Target::Header)).unwrap(),
        HEADER_FIXTURE
    );
}
