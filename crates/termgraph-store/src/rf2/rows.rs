//! Decoding of individual rows into typed records
//!
//! Decoding is pure: it validates every column and never touches the graph.

use super::FileKind;
use termgraph_domain::{
    Acceptability, AssociationEntry, CaseSignificance, CharacteristicType, ComponentKind,
    ConceptRow, ConcreteValue, DefinitionStatus, DescriptionRow, DescriptionType, EffectiveTime,
    InactivationIndicatorEntry, LangRefsetEntry, MemberHeader, MemberId, Modifier, RefsetMember,
    Relationship, RelationshipTarget, SctId,
};

/// A decoded row, ready to be applied
#[derive(Debug, Clone)]
pub(crate) enum Record {
    Concept {
        id: SctId,
        row: ConceptRow,
    },
    Description {
        id: SctId,
        concept_id: SctId,
        row: DescriptionRow,
    },
    Relationship(Relationship),
    Language(LangRefsetEntry),
    Indicator(InactivationIndicatorEntry),
    Association(AssociationEntry),
    Member(RefsetMember),
}

impl Record {
    /// Components this row points at, with the kind each must have
    pub(crate) fn references(&self) -> Vec<(ComponentKind, SctId)> {
        match self {
            Record::Concept { .. } => Vec::new(),
            Record::Description { concept_id, .. } => vec![(ComponentKind::Concept, *concept_id)],
            Record::Relationship(rel) => {
                let mut refs = vec![(ComponentKind::Concept, rel.source_id)];
                if let Some(target) = rel.target_concept() {
                    refs.push((ComponentKind::Concept, target));
                }
                refs
            }
            Record::Language(entry) => vec![(
                ComponentKind::Description,
                entry.header.referenced_component_id,
            )],
            Record::Indicator(entry) => member_reference(&entry.header),
            Record::Association(entry) => member_reference(&entry.header),
            Record::Member(entry) => member_reference(&entry.header),
        }
    }
}

/// Identity of a row's own component or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum RowKey {
    Component(SctId),
    Member(MemberId),
}

impl Record {
    /// The row's own key, active flag and effective time. `None` for a
    /// relationship without an id.
    pub(crate) fn row_state(&self) -> Option<(RowKey, bool, EffectiveTime)> {
        let member = |header: &MemberHeader| {
            (RowKey::Member(header.id), header.active, header.effective_time)
        };
        match self {
            Record::Concept { id, row } => {
                Some((RowKey::Component(*id), row.active, row.effective_time))
            }
            Record::Description { id, row, .. } => {
                Some((RowKey::Component(*id), row.active, row.effective_time))
            }
            Record::Relationship(rel) => rel
                .id
                .map(|id| (RowKey::Component(id), rel.active, rel.effective_time)),
            Record::Language(entry) => Some(member(&entry.header)),
            Record::Indicator(entry) => Some(member(&entry.header)),
            Record::Association(entry) => Some(member(&entry.header)),
            Record::Member(entry) => Some(member(&entry.header)),
        }
    }
}

fn member_reference(header: &MemberHeader) -> Vec<(ComponentKind, SctId)> {
    vec![(
        header.referenced_component_id.kind(),
        header.referenced_component_id,
    )]
}

/// Check the header row names the expected columns
pub(crate) fn check_header(kind: FileKind, line: &str) -> Result<(), String> {
    let expected = kind.header();
    let found: Vec<&str> = line.split('\t').collect();
    let matches = if kind.allows_extra_columns() {
        found.len() >= expected.len() && found[..expected.len()] == expected[..]
    } else {
        found == expected
    };
    if matches {
        Ok(())
    } else {
        Err(format!(
            "header does not match a {} file: expected '{}'",
            kind,
            expected.join("\t")
        ))
    }
}

/// Decode one data row
pub(crate) fn decode(kind: FileKind, line: &str) -> Result<Record, String> {
    let columns: Vec<&str> = line.split('\t').collect();
    let expected = kind.header().len();
    let count_ok = if kind.allows_extra_columns() {
        columns.len() >= expected
    } else {
        columns.len() == expected
    };
    if !count_ok {
        return Err(format!(
            "expected {} columns, found {}",
            expected,
            columns.len()
        ));
    }

    match kind {
        FileKind::Concept => {
            let (effective_time, active, module_id) = component_columns(&columns)?;
            Ok(Record::Concept {
                id: sctid(columns[0], "id", ComponentKind::Concept)?,
                row: ConceptRow {
                    effective_time,
                    active,
                    module_id,
                    definition_status: decode_enum(
                        columns[4],
                        "definitionStatusId",
                        DefinitionStatus::from_sctid,
                    )?,
                },
            })
        }
        FileKind::Description | FileKind::TextDefinition => {
            let (effective_time, active, module_id) = component_columns(&columns)?;
            Ok(Record::Description {
                id: sctid(columns[0], "id", ComponentKind::Description)?,
                concept_id: sctid(columns[4], "conceptId", ComponentKind::Concept)?,
                row: DescriptionRow {
                    effective_time,
                    active,
                    module_id,
                    language_code: columns[5].to_string(),
                    description_type: decode_enum(
                        columns[6],
                        "typeId",
                        DescriptionType::from_sctid,
                    )?,
                    term: columns[7].to_string(),
                    case_significance: decode_enum(
                        columns[8],
                        "caseSignificanceId",
                        CaseSignificance::from_sctid,
                    )?,
                },
            })
        }
        FileKind::StatedRelationship
        | FileKind::Relationship
        | FileKind::RelationshipConcreteValues => {
            let (effective_time, active, module_id) = component_columns(&columns)?;
            let target = if kind == FileKind::RelationshipConcreteValues {
                RelationshipTarget::Value(ConcreteValue::parse(columns[5])?)
            } else {
                RelationshipTarget::Concept(sctid(
                    columns[5],
                    "destinationId",
                    ComponentKind::Concept,
                )?)
            };
            let group = columns[6]
                .parse::<u16>()
                .map_err(|_| format!("invalid relationshipGroup '{}'", columns[6]))?;
            Ok(Record::Relationship(Relationship {
                id: Some(sctid(columns[0], "id", ComponentKind::Relationship)?),
                effective_time,
                active,
                module_id,
                source_id: sctid(columns[4], "sourceId", ComponentKind::Concept)?,
                type_id: sctid(columns[7], "typeId", ComponentKind::Concept)?,
                target,
                group,
                characteristic_type: decode_enum(
                    columns[8],
                    "characteristicTypeId",
                    CharacteristicType::from_sctid,
                )?,
                modifier: decode_enum(columns[9], "modifierId", Modifier::from_sctid)?,
            }))
        }
        FileKind::LanguageRefset => {
            let header = member_columns(&columns)?;
            header
                .referenced_component_id
                .expect_kind(ComponentKind::Description)
                .map_err(|e| format!("referencedComponentId: {}", e))?;
            Ok(Record::Language(LangRefsetEntry {
                header,
                acceptability: decode_enum(
                    columns[6],
                    "acceptabilityId",
                    Acceptability::from_sctid,
                )?,
            }))
        }
        FileKind::AttributeValueRefset => Ok(Record::Indicator(InactivationIndicatorEntry {
            header: member_columns(&columns)?,
            reason_id: sctid(columns[6], "valueId", ComponentKind::Concept)?,
        })),
        FileKind::AssociationRefset => Ok(Record::Association(AssociationEntry {
            header: member_columns(&columns)?,
            target_id: SctId::parse(columns[6])
                .map_err(|e| format!("targetComponentId: {}", e))?,
        })),
        FileKind::SimpleRefset => Ok(Record::Member(RefsetMember {
            header: member_columns(&columns)?,
            additional_fields: columns[6..].iter().map(|s| s.to_string()).collect(),
        })),
    }
}

/// effectiveTime, active and moduleId of a component row
fn component_columns(columns: &[&str]) -> Result<(EffectiveTime, bool, SctId), String> {
    Ok((
        EffectiveTime::parse(columns[1])?,
        active_flag(columns[2])?,
        sctid(columns[3], "moduleId", ComponentKind::Concept)?,
    ))
}

/// The six columns every reference set row starts with
fn member_columns(columns: &[&str]) -> Result<MemberHeader, String> {
    Ok(MemberHeader {
        id: MemberId::parse_str(columns[0])
            .map_err(|e| format!("invalid member id '{}': {}", columns[0], e))?,
        effective_time: EffectiveTime::parse(columns[1])?,
        active: active_flag(columns[2])?,
        module_id: sctid(columns[3], "moduleId", ComponentKind::Concept)?,
        refset_id: sctid(columns[4], "refsetId", ComponentKind::Concept)?,
        referenced_component_id: SctId::parse(columns[5])
            .map_err(|e| format!("referencedComponentId: {}", e))?,
    })
}

fn sctid(column: &str, name: &str, kind: ComponentKind) -> Result<SctId, String> {
    SctId::parse(column)
        .and_then(|id| id.expect_kind(kind))
        .map_err(|e| format!("{}: {}", name, e))
}

fn active_flag(column: &str) -> Result<bool, String> {
    match column {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(format!("active must be 0 or 1, found '{}'", other)),
    }
}

fn decode_enum<T>(column: &str, name: &str, decode: fn(SctId) -> Option<T>) -> Result<T, String> {
    let id = SctId::parse(column).map_err(|e| format!("{}: {}", name, e))?;
    decode(id).ok_or_else(|| format!("{}: unknown value {}", name, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgraph_domain::vocabulary::{IS_A, US_ENGLISH_LANG_REFSET};

    #[test]
    fn test_decode_concept() {
        let record = decode(
            FileKind::Concept,
            "1000004\t20200131\t1\t900000000000207008\t900000000000074008",
        )
        .unwrap();
        match record {
            Record::Concept { id, row } => {
                assert_eq!(id, SctId::parse("1000004").unwrap());
                assert!(row.active);
                assert_eq!(row.definition_status, DefinitionStatus::Primitive);
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_decode_relationship() {
        let record = decode(
            FileKind::StatedRelationship,
            "1000027\t\t1\t900000000000207008\t1000004\t2000001\t0\t116680003\t900000000000010007\t900000000000451002",
        )
        .unwrap();
        match record {
            Record::Relationship(rel) => {
                assert_eq!(rel.type_id, IS_A);
                assert_eq!(rel.effective_time, EffectiveTime::Unpublished);
                assert_eq!(rel.characteristic_type, CharacteristicType::Stated);
                assert!(rel.feeds_hierarchy());
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_decode_concrete_value() {
        let record = decode(
            FileKind::RelationshipConcreteValues,
            "1000027\t\t1\t900000000000207008\t1000004\t#250\t1\t2000001\t900000000000011006\t900000000000451002",
        )
        .unwrap();
        match record {
            Record::Relationship(rel) => {
                assert_eq!(rel.target, RelationshipTarget::Value(ConcreteValue::Integer(250)));
                assert_eq!(rel.group, 1);
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_wrong_partition_is_rejected() {
        // Description id in the concept id column
        let err = decode(
            FileKind::Concept,
            "1000015\t20200131\t1\t900000000000207008\t900000000000074008",
        )
        .unwrap_err();
        assert!(err.contains("expected a concept id"), "{}", err);
    }

    #[test]
    fn test_bad_check_digit_is_rejected() {
        let err = decode(
            FileKind::Concept,
            "1000005\t20200131\t1\t900000000000207008\t900000000000074008",
        )
        .unwrap_err();
        assert!(err.contains("check digit"), "{}", err);
    }

    #[test]
    fn test_missing_column_is_rejected() {
        let err = decode(FileKind::Concept, "1000004\t20200131\t1\t900000000000207008").unwrap_err();
        assert_eq!(err, "expected 5 columns, found 4");
    }

    #[test]
    fn test_decode_language_member() {
        let record = decode(
            FileKind::LanguageRefset,
            "6b3f1c2e-0000-4000-8000-000000000001\t20200101\t1\t900000000000207008\t900000000000509007\t1000015\t900000000000548007",
        )
        .unwrap();
        match record {
            Record::Language(entry) => {
                assert_eq!(entry.header.refset_id, US_ENGLISH_LANG_REFSET);
                assert_eq!(entry.acceptability, Acceptability::Preferred);
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_language_member_must_reference_description() {
        let err = decode(
            FileKind::LanguageRefset,
            "6b3f1c2e-0000-4000-8000-000000000001\t20200101\t1\t900000000000207008\t900000000000509007\t1000004\t900000000000548007",
        )
        .unwrap_err();
        assert!(err.starts_with("referencedComponentId"), "{}", err);
    }

    #[test]
    fn test_header_check() {
        assert!(check_header(
            FileKind::Concept,
            "id\teffectiveTime\tactive\tmoduleId\tdefinitionStatusId"
        )
        .is_ok());
        assert!(check_header(FileKind::Concept, "id\teffectiveTime\tactive").is_err());
    }
}
