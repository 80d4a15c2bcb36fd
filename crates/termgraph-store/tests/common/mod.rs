//! RF2 fixture builders shared by the integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use termgraph_domain::vocabulary::{
    CASE_INSENSITIVE, CORE_MODULE, EXISTENTIAL, IS_A, US_ENGLISH_LANG_REFSET,
};
use termgraph_domain::{CharacteristicType, ComponentKind, MemberId, SctId};
use termgraph_store::rf2::FileKind;

pub fn concept(item: u64) -> SctId {
    SctId::from_parts(item, None, ComponentKind::Concept).unwrap()
}

pub fn description(item: u64) -> SctId {
    SctId::from_parts(item, None, ComponentKind::Description).unwrap()
}

/// Offset so small item numbers still give six-digit identifiers
pub fn relationship(item: u64) -> SctId {
    SctId::from_parts(item + 1000, None, ComponentKind::Relationship).unwrap()
}

pub fn member(n: u128) -> MemberId {
    MemberId::from_u128(n)
}

fn flag(active: bool) -> &'static str {
    if active {
        "1"
    } else {
        "0"
    }
}

pub fn concept_row(id: SctId, time: &str, active: bool, status: SctId) -> String {
    format!("{}\t{}\t{}\t{}\t{}", id, time, flag(active), CORE_MODULE, status)
}

pub fn description_row(
    id: SctId,
    time: &str,
    active: bool,
    concept_id: SctId,
    type_id: SctId,
    term: &str,
) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\ten\t{}\t{}\t{}",
        id,
        time,
        flag(active),
        CORE_MODULE,
        concept_id,
        type_id,
        term,
        CASE_INSENSITIVE
    )
}

pub fn is_a_row(
    id: SctId,
    time: &str,
    active: bool,
    source: SctId,
    target: SctId,
    characteristic: CharacteristicType,
) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t0\t{}\t{}\t{}",
        id,
        time,
        flag(active),
        CORE_MODULE,
        source,
        target,
        IS_A,
        characteristic.sctid(),
        EXISTENTIAL
    )
}

pub fn member_row(
    id: MemberId,
    time: &str,
    active: bool,
    refset: SctId,
    component: SctId,
    value: impl std::fmt::Display,
) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        id,
        time,
        flag(active),
        CORE_MODULE,
        refset,
        component,
        value
    )
}

pub fn us_lang_row(id: MemberId, time: &str, active: bool, description: SctId, value: SctId) -> String {
    member_row(id, time, active, US_ENGLISH_LANG_REFSET, description, value)
}

/// Write one release file with the standard header for `kind`
pub fn write_file(dir: &Path, name: &str, kind: FileKind, rows: &[String]) {
    let mut body = kind.header().join("\t");
    body.push('\n');
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), body).unwrap();
}
