//! Uniqueness and range checks for a loaded lock document.
//!
//! Validation is all or nothing: checks run in a fixed order and the first
//! failure is returned. Nothing is mutated.

use indexmap::IndexMap;
use lockgen_core::LockKind;
use miette::SourceSpan;

use crate::{Catalog, Error, Project, Result, SourceContext, error::Scope};

/// Validate the catalog and the project without source spans.
pub fn validate(catalog: &Catalog, project: &Project) -> Result<()> {
    Validator::new(catalog, project).run()
}

/// Validation run over one catalog/project pair.
///
/// # Example
///
/// ```ignore
/// let (catalog, project) = document.extract("MG100")?;
/// Validator::new(&catalog, &project)
///     .with_source(document.source())
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct Validator<'a> {
    catalog: &'a Catalog,
    project: &'a Project,
    source: Option<&'a SourceContext>,
}

impl<'a> Validator<'a> {
    pub fn new(catalog: &'a Catalog, project: &'a Project) -> Self {
        Self {
            catalog,
            project,
            source: None,
        }
    }

    /// Point errors at the document text.
    pub fn with_source(mut self, source: &'a SourceContext) -> Self {
        self.source = Some(source);
        self
    }

    /// Run every check, stopping at the first failure.
    pub fn run(&self) -> Result<()> {
        self.check_duplicates()?;
        self.check_options()
    }

    fn check_duplicates(&self) -> Result<()> {
        let project_ids = self.project.locks().iter().map(|l| (l.id, l.name.as_str()));
        let api_ids = self.catalog.entries().iter().map(|e| (e.id, e.name.as_str()));

        if let Some(dup) = duplicate_ids(project_ids) {
            return Err(self.duplicate_id(Scope::Project, &dup));
        }
        if let Some(dup) = duplicate_ids(api_ids) {
            return Err(self.duplicate_id(Scope::Api, &dup));
        }

        let project_names = self.project.locks().iter().map(|l| l.name.as_str());
        let api_names = self.catalog.entries().iter().map(|e| e.name.as_str());

        let dup = duplicate_names(project_names);
        if !dup.is_empty() {
            return Err(self.duplicate_name(Scope::Project, &dup));
        }
        let dup = duplicate_names(api_names);
        if !dup.is_empty() {
            return Err(self.duplicate_name(Scope::Api, &dup));
        }

        Ok(())
    }

    fn check_options(&self) -> Result<()> {
        for lock in self.project.locks() {
            let span = self.span_of_name(&lock.name);
            match &lock.kind {
                LockKind::Unknown(kind) => {
                    return Err(Box::new(Error::UnknownKind {
                        src: self.named_source(),
                        span,
                        name: lock.name.clone(),
                        kind: kind.clone(),
                    }));
                }
                LockKind::Semaphore if lock.limit < 1 => {
                    return Err(Box::new(Error::SemaphoreLimit {
                        src: self.named_source(),
                        span,
                        name: lock.name.clone(),
                        limit: lock.limit,
                    }));
                }
                LockKind::Semaphore if lock.count > lock.limit => {
                    return Err(Box::new(Error::SemaphoreCount {
                        src: self.named_source(),
                        span,
                        name: lock.name.clone(),
                        count: lock.count,
                        limit: lock.limit,
                    }));
                }
                LockKind::Mutex | LockKind::Semaphore => {}
            }
        }
        Ok(())
    }

    fn duplicate_id(&self, scope: Scope, dup: &[(u32, Vec<&str>)]) -> Box<Error> {
        let duplicates = dup
            .iter()
            .map(|(id, names)| format!("{} ({})", id, names.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");
        let span = dup
            .first()
            .and_then(|(id, _)| self.source.and_then(|s| s.find_id(*id)));
        Box::new(Error::DuplicateId {
            src: self.named_source(),
            span,
            scope,
            duplicates,
        })
    }

    fn duplicate_name(&self, scope: Scope, dup: &[&str]) -> Box<Error> {
        let span = dup.first().and_then(|name| self.span_of_name(name));
        Box::new(Error::DuplicateName {
            src: self.named_source(),
            span,
            scope,
            duplicates: dup.join(", "),
        })
    }

    fn span_of_name(&self, name: &str) -> Option<SourceSpan> {
        self.source.and_then(|s| s.find_name(name))
    }

    fn named_source(&self) -> miette::NamedSource<String> {
        self.source
            .cloned()
            .unwrap_or_default()
            .named_source()
    }
}

/// Ids used more than once, with every name that uses them, in first-seen order.
fn duplicate_ids<'n>(
    pairs: impl Iterator<Item = (u32, &'n str)>,
) -> Option<Vec<(u32, Vec<&'n str>)>> {
    let mut by_id: IndexMap<u32, Vec<&str>> = IndexMap::new();
    for (id, name) in pairs {
        by_id.entry(id).or_default().push(name);
    }
    let dup: Vec<_> = by_id.into_iter().filter(|(_, names)| names.len() > 1).collect();
    (!dup.is_empty()).then_some(dup)
}

/// Names whose tally exceeds one, in first-seen order.
fn duplicate_names<'n>(names: impl Iterator<Item = &'n str>) -> Vec<&'n str> {
    let mut tally: IndexMap<&str, usize> = IndexMap::new();
    for name in names {
        *tally.entry(name).or_default() += 1;
    }
    tally
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect()
}
