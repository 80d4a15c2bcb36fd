//! Release loader: applies RF2 files to a graph store
//!
//! Each file is parsed in two phases. Every row is decoded first; if any row is
//! malformed the file is rejected before the graph is touched. Only then are
//! the rows applied, in file order.

use super::rows::{self, Record};
use super::{FileKind, ReleaseType};
use crate::error::{LoadError, ParseError, Result};
use crate::graph::{GraphStore, RowOutcome};
use crate::metrics::LoadMetrics;
use crate::rf2::conflict::Resolution;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use termgraph_domain::SctId;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Options controlling how strictly references are checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Reject a file whose rows reference components not already defined,
    /// instead of creating pending stubs for them
    pub require_existing: bool,
}

/// Applies release files to a [`GraphStore`]
///
/// Files must be applied in dependency order (see [`FileKind::LOAD_ORDER`]);
/// [`ReleaseLoader::load_directory`] does this itself.
///
/// # Examples
///
/// ```no_run
/// use termgraph_store::rf2::{ReleaseLoader, ReleaseType};
/// use termgraph_store::GraphStore;
/// use std::path::Path;
///
/// let mut graph = GraphStore::new();
/// let mut loader = ReleaseLoader::new(&mut graph);
/// loader.load_directory(Path::new("releases/INT_20240101"), ReleaseType::Snapshot).unwrap();
/// println!("{}", loader.metrics().summary());
/// ```
pub struct ReleaseLoader<'g> {
    graph: &'g mut GraphStore,
    options: LoadOptions,
    metrics: LoadMetrics,
}

impl<'g> ReleaseLoader<'g> {
    /// Create a loader that creates stubs for forward references
    pub fn new(graph: &'g mut GraphStore) -> Self {
        Self::with_options(graph, LoadOptions::default())
    }

    /// Create a loader with explicit options
    pub fn with_options(graph: &'g mut GraphStore, options: LoadOptions) -> Self {
        Self {
            graph,
            options,
            metrics: LoadMetrics::new(),
        }
    }

    /// Counters accumulated so far
    pub fn metrics(&self) -> &LoadMetrics {
        &self.metrics
    }

    /// Finish loading and keep the counters
    pub fn into_metrics(self) -> LoadMetrics {
        self.metrics
    }

    /// Load every file of one release type found under `dir`, in dependency
    /// order. Returns the number of files applied.
    ///
    /// Files of a Full release are always skipped.
    pub fn load_directory(&mut self, dir: &Path, release_type: ReleaseType) -> Result<usize> {
        let mut files: Vec<(FileKind, PathBuf)> = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                LoadError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(kind) = FileKind::detect(name) else {
                debug!(file = name, "Skipping unrecognised file");
                continue;
            };
            match ReleaseType::detect(name) {
                Some(ReleaseType::Full) => {
                    debug!(file = name, "Skipping Full release file");
                    self.metrics.files_skipped += 1;
                }
                Some(found) if found == release_type => files.push((kind, entry.into_path())),
                _ => {}
            }
        }

        if files.is_empty() {
            return Err(LoadError::NoReleaseFiles {
                path: dir.to_path_buf(),
                release_type: release_type.to_string(),
            });
        }

        files.sort();
        info!(
            dir = %dir.display(),
            release_type = %release_type,
            files = files.len(),
            "Loading release directory"
        );
        for (_, path) in &files {
            self.load_file(path)?;
        }
        Ok(files.len())
    }

    /// Load one file, recognising its kind from the name. Returns the number
    /// of rows decoded.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| LoadError::UnknownFile(path.display().to_string()))?;
        let kind = FileKind::detect(name).ok_or_else(|| LoadError::UnknownFile(name.to_string()))?;
        if ReleaseType::detect(name) == Some(ReleaseType::Full) {
            warn!(file = name, "Refusing to load a Full release file");
            self.metrics.files_skipped += 1;
            return Ok(0);
        }

        let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
        self.load_reader(BufReader::new(file), kind, name)
    }

    /// Load one file of a declared kind from any reader. `file_name` is only
    /// used in errors and logs. Returns the number of rows decoded.
    pub fn load_reader<R: BufRead>(
        &mut self,
        reader: R,
        kind: FileKind,
        file_name: &str,
    ) -> Result<usize> {
        self.graph.clear_closure_cache();

        let mut lines = reader.lines();
        let header = lines
            .next()
            .transpose()
            .map_err(|e| LoadError::io(file_name, e))?
            .ok_or_else(|| parse_error(file_name, 1, "missing header row".to_string()))?;
        let header = header.trim_start_matches('\u{feff}').trim_end_matches('\r');
        rows::check_header(kind, header).map_err(|message| parse_error(file_name, 1, message))?;

        let mut records = Vec::new();
        for (index, line) in lines.enumerate() {
            let line = line.map_err(|e| LoadError::io(file_name, e))?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            // Header is line 1
            let number = index + 2;
            let record = rows::decode(kind, line).map_err(|message| parse_error(file_name, number, message))?;
            records.push((number, record));
        }

        if self.options.require_existing {
            self.check_references(file_name, &records)?;
        }

        // A snapshot only carries an inactive row for a component that was
        // released before, even when the row itself is unpublished
        let snapshot = ReleaseType::detect(file_name) == Some(ReleaseType::Snapshot);
        let count = records.len();
        for (line, record) in records {
            if let Some((key, active, effective_time)) = record.row_state() {
                if effective_time.is_published() || (snapshot && !active) {
                    self.graph.mark_published(key);
                }
            }
            self.apply(kind, file_name, line, record);
        }
        self.metrics.record_file();
        info!(file = file_name, kind = %kind, rows = count, "Loaded release file");
        Ok(count)
    }

    fn check_references(&self, file_name: &str, records: &[(usize, Record)]) -> Result<()> {
        for (line, record) in records {
            for (kind, id) in record.references() {
                if !self.graph.is_resolved(kind, id) {
                    return Err(LoadError::MissingReference {
                        file: file_name.to_string(),
                        line: *line,
                        kind,
                        id,
                    });
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, kind: FileKind, file: &str, line: usize, record: Record) {
        match record {
            Record::Concept { id, row } => {
                let outcome = self.graph.apply_concept(id, row);
                self.record_component(kind, file, line, id, outcome);
            }
            Record::Description {
                id,
                concept_id,
                row,
            } => {
                let outcome = self.graph.apply_description(id, concept_id, row);
                self.record_component(kind, file, line, id, outcome);
            }
            Record::Relationship(relationship) => {
                let id = relationship.id.unwrap_or(relationship.source_id);
                let outcome = self.graph.apply_relationship(relationship);
                self.record_component(kind, file, line, id, outcome);
            }
            Record::Language(entry) => {
                let component = entry.header.referenced_component_id;
                let resolution = self.graph.apply_language(entry);
                self.record_resolution(kind, file, line, component, resolution);
            }
            Record::Indicator(entry) => {
                let component = entry.header.referenced_component_id;
                match self.graph.apply_indicator(entry) {
                    Some(resolution) => {
                        self.record_resolution(kind, file, line, component, resolution)
                    }
                    None => self.record_unroutable(file, line, component),
                }
            }
            Record::Association(entry) => {
                let component = entry.header.referenced_component_id;
                match self.graph.apply_association(entry) {
                    Some(duplicates) => {
                        if duplicates > 0 {
                            warn!(
                                file,
                                line,
                                component = %component,
                                duplicates,
                                "Association duplicates another member"
                            );
                            self.metrics.duplicates += 1;
                        }
                        self.metrics.record_row(kind);
                    }
                    None => self.record_unroutable(file, line, component),
                }
            }
            Record::Member(member) => {
                let component = member.header.referenced_component_id;
                if self.graph.apply_member(member) {
                    self.metrics.record_row(kind);
                } else {
                    self.record_unroutable(file, line, component);
                }
            }
        }
    }

    fn record_component(
        &mut self,
        kind: FileKind,
        file: &str,
        line: usize,
        id: SctId,
        outcome: RowOutcome,
    ) {
        match outcome {
            RowOutcome::Applied { duplicates } => {
                if duplicates > 0 {
                    warn!(
                        file,
                        line,
                        id = %id,
                        duplicates,
                        "Relationship states the same fact as another id"
                    );
                    self.metrics.duplicates += 1;
                }
                self.metrics.record_row(kind);
            }
            RowOutcome::Superseded { existing } => {
                debug!(file, line, id = %id, existing = %existing, "Row superseded by a later one");
                self.metrics.superseded += 1;
            }
        }
    }

    fn record_resolution(
        &mut self,
        kind: FileKind,
        file: &str,
        line: usize,
        component: SctId,
        resolution: Resolution,
    ) {
        match resolution {
            Resolution::Replaced => self.metrics.record_row(kind),
            Resolution::Accepted { removed, tie } => {
                if tie {
                    warn!(
                        file,
                        line,
                        component = %component,
                        "Competing members share an effective time; keeping the last one read"
                    );
                    self.metrics.ties += 1;
                }
                if removed > 0 {
                    debug!(file, line, component = %component, removed, "Removed older competing members");
                    self.metrics.conflicts_removed += removed;
                }
                self.metrics.record_row(kind);
            }
            Resolution::Discarded { later } => {
                warn!(
                    file,
                    line,
                    component = %component,
                    later = %later,
                    "Member discarded; a competing member is later"
                );
                self.metrics.conflicts_discarded += 1;
            }
        }
    }

    fn record_unroutable(&mut self, file: &str, line: usize, component: SctId) {
        debug!(file, line, component = %component, "No component of this kind can hold the member");
        self.metrics.unroutable += 1;
    }
}

fn parse_error(file: &str, line: usize, message: String) -> LoadError {
    LoadError::Parse(ParseError {
        file: file.to_string(),
        line,
        message,
    })
}
