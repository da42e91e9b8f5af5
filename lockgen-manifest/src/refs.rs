//! JSON reference (`$ref`) expansion.
//!
//! Shared schema fragments are inlined before extraction. Only the subtree
//! that is extracted is expanded; its targets may live anywhere in the
//! document. A reference is either internal (`#/components/schemas/mutex`)
//! or external (`common.json#/semaphore`, resolved relative to the
//! referring file). Members next to a `$ref` are ignored, as JSON Reference
//! specifies.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Return a copy of `root` with every `$ref` below `path` replaced by its
/// target.
///
/// References elsewhere in the document are kept as written. When `path`
/// does not exist the copy is returned untouched.
pub(crate) fn resolve_at(root: &Value, path: &[&str], base_dir: &Path) -> Result<Value> {
    let mut resolved = root.clone();
    let Some(subtree) = path
        .iter()
        .try_fold(&mut resolved, |node, key| node.get_mut(*key))
    else {
        return Ok(resolved);
    };

    let mut resolver = Resolver {
        root,
        base_dir,
        external: HashMap::new(),
        stack: Vec::new(),
    };
    let expanded = resolver.expand(subtree, None)?;
    *subtree = expanded;
    Ok(resolved)
}

struct Resolver<'a> {
    root: &'a Value,
    base_dir: &'a Path,
    /// External documents by path, each loaded once.
    external: HashMap<PathBuf, Value>,
    /// References currently being expanded, for cycle detection.
    stack: Vec<String>,
}

impl Resolver<'_> {
    /// Expand `value`, which lives in `file` (`None` is the root document).
    fn expand(&mut self, value: &Value, file: Option<&Path>) -> Result<Value> {
        match value {
            Value::Object(map) => {
                if let Some(reference) = map.get("$ref") {
                    let Some(reference) = reference.as_str() else {
                        return Err(Error::reference(
                            reference.to_string(),
                            "$ref must be a string",
                        ));
                    };
                    return self.follow(reference, file);
                }
                let mut expanded = Map::with_capacity(map.len());
                for (key, member) in map {
                    expanded.insert(key.clone(), self.expand(member, file)?);
                }
                Ok(Value::Object(expanded))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.expand(item, file))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn follow(&mut self, reference: &str, file: Option<&Path>) -> Result<Value> {
        let (location, pointer) = reference.split_once('#').unwrap_or((reference, ""));

        let target_file = if location.is_empty() {
            file.map(Path::to_path_buf)
        } else {
            Some(self.dir_of(file).join(location))
        };

        let key = format!(
            "{}#{}",
            target_file
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            pointer
        );
        if self.stack.contains(&key) {
            return Err(Error::reference(
                reference,
                format!("reference cycle through {}", self.stack.join(" -> ")),
            ));
        }

        let target = self.lookup(reference, target_file.as_deref(), pointer)?;

        self.stack.push(key);
        let expanded = self.expand(&target, target_file.as_deref());
        self.stack.pop();
        expanded
    }

    /// Clone the value at `pointer` inside `file`.
    fn lookup(&mut self, reference: &str, file: Option<&Path>, pointer: &str) -> Result<Value> {
        let document = match file {
            None => self.root,
            Some(path) => {
                if !self.external.contains_key(path) {
                    let loaded = load_external(reference, path)?;
                    self.external.insert(path.to_path_buf(), loaded);
                }
                &self.external[path]
            }
        };

        document
            .pointer(pointer)
            .cloned()
            .ok_or_else(|| Error::reference(reference, format!("no value at '{}'", pointer)))
    }

    fn dir_of(&self, file: Option<&Path>) -> PathBuf {
        file.and_then(Path::parent)
            .unwrap_or(self.base_dir)
            .to_path_buf()
    }
}

fn load_external(reference: &str, path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::reference(reference, format!("cannot read '{}': {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::reference(reference, format!("invalid JSON in '{}': {}", path.display(), e))
    })
}
