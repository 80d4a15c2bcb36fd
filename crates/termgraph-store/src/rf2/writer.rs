//! Snapshot writer: serialises a graph back into RF2 Snapshot files
//!
//! Pending components are not written. An inactive unpublished row is dropped
//! only when its component or member was never released; otherwise it is
//! written with its empty effective time so the inactivation survives.

use super::FileKind;
use crate::graph::GraphStore;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use termgraph_domain::{
    CharacteristicType, DescriptionType, EffectiveTime, MemberHeader, Relationship,
    RelationshipTarget,
};
use tracing::info;

const LINE_END: &str = "\r\n";

/// Rows written per file kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Files created, in the order written
    pub files: Vec<PathBuf>,

    /// Rows written per file kind
    pub rows: BTreeMap<FileKind, usize>,

    /// Rows left out (pending, or inactive and never released)
    pub omitted: usize,
}

impl WriteSummary {
    /// Total rows written
    pub fn total_rows(&self) -> usize {
        self.rows.values().sum()
    }
}

/// Writes the current state of a graph as a Snapshot release
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    label: String,
}

impl SnapshotWriter {
    /// `label` becomes the suffix of every file name, e.g. `INT_20240101`
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// File name for one kind
    pub fn file_name(&self, kind: FileKind) -> String {
        let language = match kind {
            FileKind::Description | FileKind::TextDefinition | FileKind::LanguageRefset => "-en",
            _ => "",
        };
        format!("{}Snapshot{}_{}.txt", kind.name_pattern(), language, self.label)
    }

    /// Write every file kind into `dir`, creating it if needed
    pub fn write(&self, graph: &GraphStore, dir: &Path) -> io::Result<WriteSummary> {
        fs::create_dir_all(dir)?;
        let mut summary = WriteSummary::default();

        let mut concepts: Vec<_> = graph.concepts().collect();
        concepts.sort_by_key(|c| c.id);
        let mut descriptions: Vec<_> = graph.descriptions().collect();
        descriptions.sort_by_key(|d| d.id);

        let mut rows = Vec::new();
        for concept in &concepts {
            match concept.row.get() {
                Some(row)
                    if releasable(row.active, row.effective_time, graph.was_published(concept.id)) =>
                {
                    rows.push(vec![
                        concept.id.to_string(),
                        row.effective_time.to_rf2(),
                        flag(row.active),
                        row.module_id.to_string(),
                        row.definition_status.sctid().to_string(),
                    ])
                }
                _ => summary.omitted += 1,
            }
        }
        self.write_file(dir, FileKind::Concept, rows, &mut summary)?;

        let mut terms = Vec::new();
        let mut definitions = Vec::new();
        for description in &descriptions {
            let (Some(row), Some(concept_id)) = (description.row.get(), description.concept_id)
            else {
                summary.omitted += 1;
                continue;
            };
            if !releasable(row.active, row.effective_time, graph.was_published(description.id)) {
                summary.omitted += 1;
                continue;
            }
            let columns = vec![
                description.id.to_string(),
                row.effective_time.to_rf2(),
                flag(row.active),
                row.module_id.to_string(),
                concept_id.to_string(),
                row.language_code.clone(),
                row.description_type.sctid().to_string(),
                row.term.clone(),
                row.case_significance.sctid().to_string(),
            ];
            if row.description_type == DescriptionType::TextDefinition {
                definitions.push(columns);
            } else {
                terms.push(columns);
            }
        }
        self.write_file(dir, FileKind::Description, terms, &mut summary)?;
        self.write_file(dir, FileKind::TextDefinition, definitions, &mut summary)?;

        let mut stated = Vec::new();
        let mut inferred = Vec::new();
        let mut concrete = Vec::new();
        for relationship in concepts.iter().flat_map(|c| c.relationships.iter()) {
            let Some(id) = relationship.id else {
                summary.omitted += 1;
                continue;
            };
            if !releasable(
                relationship.active,
                relationship.effective_time,
                graph.was_published(id),
            ) {
                summary.omitted += 1;
                continue;
            }
            let columns = relationship_columns(id.to_string(), relationship);
            match (&relationship.target, relationship.characteristic_type) {
                (RelationshipTarget::Value(_), _) => concrete.push(columns),
                (_, CharacteristicType::Stated) => stated.push(columns),
                _ => inferred.push(columns),
            }
        }
        for (kind, mut rows) in [
            (FileKind::StatedRelationship, stated),
            (FileKind::Relationship, inferred),
            (FileKind::RelationshipConcreteValues, concrete),
        ] {
            rows.sort();
            self.write_file(dir, kind, rows, &mut summary)?;
        }

        let mut language = Vec::new();
        let mut indicators = Vec::new();
        let mut associations = Vec::new();
        let mut members = Vec::new();
        for description in &descriptions {
            for entry in &description.lang_entries {
                push_member(
                    &mut language,
                    &entry.header,
                    [entry.acceptability.sctid().to_string()],
                    graph,
                    &mut summary,
                );
            }
            for entry in &description.inactivation_indicators {
                push_member(
                    &mut indicators,
                    &entry.header,
                    [entry.reason_id.to_string()],
                    graph,
                    &mut summary,
                );
            }
            for entry in &description.associations {
                push_member(
                    &mut associations,
                    &entry.header,
                    [entry.target_id.to_string()],
                    graph,
                    &mut summary,
                );
            }
        }
        for concept in &concepts {
            for entry in &concept.inactivation_indicators {
                push_member(
                    &mut indicators,
                    &entry.header,
                    [entry.reason_id.to_string()],
                    graph,
                    &mut summary,
                );
            }
            for entry in &concept.associations {
                push_member(
                    &mut associations,
                    &entry.header,
                    [entry.target_id.to_string()],
                    graph,
                    &mut summary,
                );
            }
            for entry in &concept.refset_members {
                push_member(
                    &mut members,
                    &entry.header,
                    entry.additional_fields.clone(),
                    graph,
                    &mut summary,
                );
            }
        }
        for (kind, mut rows) in [
            (FileKind::LanguageRefset, language),
            (FileKind::AttributeValueRefset, indicators),
            (FileKind::AssociationRefset, associations),
            (FileKind::SimpleRefset, members),
        ] {
            rows.sort();
            self.write_file(dir, kind, rows, &mut summary)?;
        }

        info!(
            dir = %dir.display(),
            rows = summary.total_rows(),
            omitted = summary.omitted,
            "Wrote snapshot"
        );
        Ok(summary)
    }

    fn write_file(
        &self,
        dir: &Path,
        kind: FileKind,
        rows: Vec<Vec<String>>,
        summary: &mut WriteSummary,
    ) -> io::Result<()> {
        let path = dir.join(self.file_name(kind));
        let mut out = BufWriter::new(File::create(&path)?);
        write!(out, "{}{}", kind.header().join("\t"), LINE_END)?;
        for row in &rows {
            write!(out, "{}{}", row.join("\t"), LINE_END)?;
        }
        out.flush()?;
        summary.rows.insert(kind, rows.len());
        summary.files.push(path);
        Ok(())
    }
}

/// An inactive unpublished row may only be dropped if nothing about the
/// component was ever released
fn releasable(active: bool, effective_time: EffectiveTime, was_published: bool) -> bool {
    active || effective_time.is_published() || was_published
}

fn flag(active: bool) -> String {
    let value = if active { "1" } else { "0" };
    value.to_string()
}

fn relationship_columns(id: String, relationship: &Relationship) -> Vec<String> {
    vec![
        id,
        relationship.effective_time.to_rf2(),
        flag(relationship.active),
        relationship.module_id.to_string(),
        relationship.source_id.to_string(),
        relationship.target.to_string(),
        relationship.group.to_string(),
        relationship.type_id.to_string(),
        relationship.characteristic_type.sctid().to_string(),
        relationship.modifier.sctid().to_string(),
    ]
}

fn push_member(
    rows: &mut Vec<Vec<String>>,
    header: &MemberHeader,
    trailing: impl IntoIterator<Item = String>,
    graph: &GraphStore,
    summary: &mut WriteSummary,
) {
    if !releasable(
        header.active,
        header.effective_time,
        graph.was_member_published(header.id),
    ) {
        summary.omitted += 1;
        return;
    }
    let mut columns = vec![
        header.id.to_string(),
        header.effective_time.to_rf2(),
        flag(header.active),
        header.module_id.to_string(),
        header.refset_id.to_string(),
        header.referenced_component_id.to_string(),
    ];
    columns.extend(trailing);
    rows.push(columns);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rf2::ReleaseType;

    #[test]
    fn test_file_names_are_recognised() {
        let writer = SnapshotWriter::new("TEST_20240101");
        for kind in FileKind::LOAD_ORDER {
            let name = writer.file_name(kind);
            assert_eq!(FileKind::detect(&name), Some(kind), "{}", name);
            assert_eq!(ReleaseType::detect(&name), Some(ReleaseType::Snapshot));
        }
    }

    #[test]
    fn test_releasable() {
        assert!(releasable(true, EffectiveTime::Unpublished, false));
        assert!(releasable(false, EffectiveTime::parse("20200131").unwrap(), false));
        assert!(!releasable(false, EffectiveTime::Unpublished, false));
        // Inactivation of something already released
        assert!(releasable(false, EffectiveTime::Unpublished, true));
    }
}
