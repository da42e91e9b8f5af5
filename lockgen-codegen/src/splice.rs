//! Marker-region splicing.
//!
//! A target file carries pairs of marker comments:
//!
//! ```c
//! /* pystart - locking table */
//! ...generated, replaced on every run...
//! /* pyend */
//! ```
//!
//! Everything outside a region is copied through untouched, line terminators
//! included.

use std::{fs, path::Path};

use indexmap::IndexMap;

use crate::{EmitError, Region, SpliceError};

/// Token identifying a begin-marker line.
pub const BEGIN_MARKER: &str = "pystart";
/// Token identifying an end-marker line.
pub const END_MARKER: &str = "pyend";

/// Classification of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker<'a> {
    /// Begin marker with its purpose label.
    Begin(&'a str),
    End,
    Text,
}

impl<'a> Marker<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(at) = line.find(BEGIN_MARKER) {
            Marker::Begin(label(&line[at + BEGIN_MARKER.len()..]))
        } else if line.contains(END_MARKER) {
            Marker::End
        } else {
            Marker::Text
        }
    }
}

/// `" - locking table */\n"` -> `"locking table"`
fn label(rest: &str) -> &str {
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('-').unwrap_or(rest).trim();
    rest.strip_suffix("*/").unwrap_or(rest).trim_end()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpliceState {
    Copying,
    /// Inside a region opened on the given (1-based) line.
    Skipping { opened: usize },
}

type Producer<'a> = Box<dyn FnMut() -> Result<String, EmitError> + 'a>;

/// Result of splicing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceOutput {
    pub content: String,
    /// Regions that received a fragment, in file order.
    pub filled: Vec<Region>,
    /// Labels of begin markers with no registered fragment.
    pub unrecognized: Vec<String>,
}

/// Replaces the body of every known marker region with a fresh fragment.
#[derive(Default)]
pub struct Splicer<'a> {
    producers: IndexMap<Region, Producer<'a>>,
}

impl<'a> Splicer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the fragment producer for `region`.
    pub fn region<F>(mut self, region: Region, producer: F) -> Self
    where
        F: FnMut() -> Result<String, EmitError> + 'a,
    {
        self.producers.insert(region, Box::new(producer));
        self
    }

    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.producers.keys().copied()
    }

    pub fn splice_str(&mut self, input: &str) -> Result<SpliceOutput, SpliceError> {
        let mut content = String::with_capacity(input.len());
        let mut filled = Vec::new();
        let mut unrecognized = Vec::new();
        let mut state = SpliceState::Copying;

        for (index, line) in input.split_inclusive('\n').enumerate() {
            let number = index + 1;
            state = match (state, Marker::classify(line)) {
                (SpliceState::Copying, Marker::Begin(label)) => {
                    content.push_str(line);
                    let producer = Region::from_label(label).and_then(|region| {
                        self.producers.get_mut(&region).map(|produce| (region, produce))
                    });
                    match producer {
                        Some((region, produce)) => {
                            let fragment = produce()?;
                            if line.ends_with("\r\n") {
                                content.push_str(&fragment.replace('\n', "\r\n"));
                            } else {
                                content.push_str(&fragment);
                            }
                            filled.push(region);
                        }
                        None => unrecognized.push(label.to_string()),
                    }
                    SpliceState::Skipping { opened: number }
                }
                (SpliceState::Copying, _) => {
                    content.push_str(line);
                    SpliceState::Copying
                }
                (SpliceState::Skipping { .. }, Marker::End) => {
                    content.push_str(line);
                    SpliceState::Copying
                }
                (SpliceState::Skipping { opened }, Marker::Begin(_)) => {
                    return Err(SpliceError::NestedMarker {
                        line: number,
                        open: opened,
                    });
                }
                (skipping @ SpliceState::Skipping { .. }, Marker::Text) => skipping,
            };
        }

        if let SpliceState::Skipping { opened } = state {
            return Err(SpliceError::UnterminatedRegion { line: opened });
        }

        Ok(SpliceOutput {
            content,
            filled,
            unrecognized,
        })
    }

    /// Read `path` and splice it in memory. The file itself is not touched.
    pub fn splice_path(&mut self, path: impl AsRef<Path>) -> Result<SpliceOutput, SpliceError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| SpliceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.splice_str(&input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(text: &'static str) -> impl FnMut() -> Result<String, EmitError> {
        move || Ok(text.to_string())
    }

    #[test]
    fn test_classify() {
        assert_eq!(
            Marker::classify("/* pystart - locking table */\n"),
            Marker::Begin("locking table")
        );
        assert_eq!(
            Marker::classify("\t/* pystart - init */\r\n"),
            Marker::Begin("init")
        );
        assert_eq!(Marker::classify("// pystart - reset"), Marker::Begin("reset"));
        assert_eq!(Marker::classify("/* pyend */\n"), Marker::End);
        assert_eq!(Marker::classify("int x;\n"), Marker::Text);
    }

    #[test]
    fn test_replaces_region_body() {
        let mut splicer = Splicer::new().region(Region::Init, fixed("\tk_mutex_init(&A);\n"));

        let output = splicer
            .splice_str("void f(void)\n{\n/* pystart - init */\n\tstale();\n/* pyend */\n}\n")
            .unwrap();

        assert_eq!(
            output.content,
            "void f(void)\n{\n/* pystart - init */\n\tk_mutex_init(&A);\n/* pyend */\n}\n"
        );
        assert_eq!(output.filled, vec![Region::Init]);
        assert!(output.unrecognized.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let input = "a\n/* pystart - locks */\n/* pyend */\nb\n";
        let mut splicer = Splicer::new().region(Region::Locks, fixed("static struct k_mutex A;\n"));

        let once = splicer.splice_str(input).unwrap().content;
        let twice = splicer.splice_str(&once).unwrap().content;

        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_label_empties_region() {
        let mut splicer = Splicer::new().region(Region::Init, fixed("x\n"));

        let output = splicer
            .splice_str("/* pystart - attribute table */\nold\n/* pyend */\n")
            .unwrap();

        assert_eq!(output.content, "/* pystart - attribute table */\n/* pyend */\n");
        assert_eq!(output.unrecognized, vec!["attribute table".to_string()]);
        assert!(output.filled.is_empty());
    }

    #[test]
    fn test_known_label_without_producer_is_unrecognized() {
        let mut splicer = Splicer::new().region(Region::Init, fixed("x\n"));

        let output = splicer
            .splice_str("/* pystart - locking ids */\n/* pyend */\n")
            .unwrap();

        assert_eq!(output.unrecognized, vec!["locking ids".to_string()]);
    }

    #[test]
    fn test_no_markers_is_unchanged() {
        let input = "#ifndef X\n#define X\n#endif\n";
        let output = Splicer::new()
            .region(Region::Ids, fixed("y\n"))
            .splice_str(input)
            .unwrap();

        assert_eq!(output.content, input);
        assert!(output.filled.is_empty());
    }

    #[test]
    fn test_stray_end_marker_is_kept() {
        let input = "a\n/* pyend */\nb\n";
        let output = Splicer::new().splice_str(input).unwrap();

        assert_eq!(output.content, input);
    }

    #[test]
    fn test_nested_marker() {
        let err = Splicer::new()
            .splice_str("/* pystart - init */\n/* pystart - reset */\n/* pyend */\n")
            .unwrap_err();

        assert!(matches!(err, SpliceError::NestedMarker { line: 2, open: 1 }));
    }

    #[test]
    fn test_unterminated_region() {
        let err = Splicer::new()
            .splice_str("a\n/* pystart - init */\nb\n")
            .unwrap_err();

        assert!(matches!(err, SpliceError::UnterminatedRegion { line: 2 }));
    }

    #[test]
    fn test_preserves_crlf() {
        let mut splicer = Splicer::new().region(Region::Reset, fixed("\tk_sem_reset(&B);\n"));

        let output = splicer
            .splice_str("a\r\n/* pystart - reset */\r\nold\r\n/* pyend */\r\nlast")
            .unwrap();

        assert_eq!(
            output.content,
            "a\r\n/* pystart - reset */\r\n\tk_sem_reset(&B);\r\n/* pyend */\r\nlast"
        );
    }

    #[test]
    fn test_emit_error_propagates() {
        let err = Splicer::new()
            .region(Region::Map, || {
                Err(EmitError::EmptyProject {
                    project: "X".into(),
                    fragment: "map",
                })
            })
            .splice_str("/* pystart - locking map */\n/* pyend */\n")
            .unwrap_err();

        assert!(matches!(err, SpliceError::Emit(_)));
    }

    #[test]
    fn test_splice_path_reports_unterminated_region() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locking_table.c");
        fs::write(&path, "/* pystart - init */\nold\n").unwrap();

        let err = Splicer::new()
            .region(Region::Init, fixed("new\n"))
            .splice_path(&path)
            .unwrap_err();

        assert!(matches!(err, SpliceError::UnterminatedRegion { line: 1 }));
    }

    #[test]
    fn test_splice_path_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locking_table.c");
        let original = "/* pystart - init */\n/* pyend */\n";
        fs::write(&path, original).unwrap();

        let output = Splicer::new()
            .region(Region::Init, fixed("new\n"))
            .splice_path(&path)
            .unwrap();

        assert_eq!(output.content, "/* pystart - init */\nnew\n/* pyend */\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Splicer::new()
            .splice_path(dir.path().join("missing.h"))
            .unwrap_err();

        assert!(matches!(err, SpliceError::Io { .. }));
    }
}
