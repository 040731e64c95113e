//! Field path resolution and projection
//!
//! A field path is a dot-separated key sequence (`company.name`). Resolution
//! never fails: a missing key, or a walk through a non-record value, yields
//! `None`.

use super::value::{Record, Value};

/// Explicit rename table for flattening known multi-segment paths.
///
/// Paths not listed here keep their dotted form as the flat key.
pub const FLAT_KEYS: &[(&str, &str)] = &[
    ("address.street", "street"),
    ("address.suite", "suite"),
    ("address.city", "city"),
    ("address.zipcode", "zipcode"),
    ("address.geo.lat", "lat"),
    ("address.geo.lng", "lng"),
    ("company.name", "company_name"),
    ("company.catchPhrase", "company_catchphrase"),
    ("company.bs", "company_bs"),
];

/// Resolve a dotted path against a record
pub fn resolve<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = record.get(segments.next()?)?;
    for segment in segments {
        current = current.as_record()?.get(segment)?;
    }
    Some(current)
}

/// Single-level key for a path
pub fn flat_key(path: &str) -> &str {
    FLAT_KEYS
        .iter()
        .find(|(dotted, _)| *dotted == path)
        .map(|(_, flat)| *flat)
        .unwrap_or(path)
}

/// Map a flat key back to its dotted path.
///
/// Names that are not flat keys are returned unchanged.
pub fn canonical_path(name: &str) -> &str {
    FLAT_KEYS
        .iter()
        .find(|(_, flat)| *flat == name)
        .map(|(dotted, _)| *dotted)
        .unwrap_or(name)
}

/// Resolve a column name: the literal path first, then the dotted path its
/// flat alias stands for (`city` -> `address.city`).
pub fn resolve_field<'a>(record: &'a Record, name: &str) -> Option<&'a Value> {
    locate(record, name).map(|(_, value)| value)
}

/// Path that actually resolved, with its value
fn locate<'a, 'n>(record: &'a Record, name: &'n str) -> Option<(&'n str, &'a Value)> {
    if let Some(value) = resolve(record, name) {
        return Some((name, value));
    }
    let dotted = canonical_path(name);
    if dotted == name {
        return None;
    }
    resolve(record, dotted).map(|value| (dotted, value))
}

/// Dotted paths of every scalar leaf in a record, in key order
pub fn leaf_paths(record: &Record) -> Vec<String> {
    let mut paths = Vec::new();
    collect_leaves(record, "", &mut paths);
    paths
}

fn collect_leaves(record: &Record, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in record.iter() {
        let path = join(prefix, key);
        match value {
            Value::Record(inner) => collect_leaves(inner, &path, out),
            _ => out.push(path),
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Flatten the requested paths into a single-level record.
///
/// Absent and null values are omitted. A path that resolves to a nested
/// record contributes each of its leaves under their own flat keys.
pub fn flatten<S: AsRef<str>>(record: &Record, paths: &[S]) -> Record {
    let mut flat = Record::new();
    for path in paths {
        match locate(record, path.as_ref()) {
            None | Some((_, Value::Null)) => {}
            Some((path, Value::Record(inner))) => {
                for leaf in leaf_paths(inner) {
                    let full = join(path, &leaf);
                    if let Some(value) = resolve(inner, &leaf).filter(|v| !v.is_null()) {
                        flat.insert(flat_slot(record, &flat, &full), value.clone());
                    }
                }
            }
            Some((path, value)) => flat.insert(flat_slot(record, &flat, path), value.clone()),
        }
    }
    flat
}

/// Output key for a flattened path.
///
/// A renamed key yields to a top-level field of the same name, or to an
/// earlier path already written under it, and keeps its dotted form instead.
fn flat_slot<'p>(record: &Record, flat: &Record, path: &'p str) -> &'p str {
    let key = flat_key(path);
    if key != path && (record.get(key).is_some() || flat.get(key).is_some()) {
        path
    } else {
        key
    }
}

/// Keep only the requested paths, preserving the nested shape.
///
/// Absent and null values are omitted, so no empty intermediate record is
/// ever created.
pub fn project<S: AsRef<str>>(record: &Record, paths: &[S]) -> Record {
    let mut projected = Record::new();
    for path in paths {
        if let Some((path, value)) = locate(record, path.as_ref()).filter(|(_, v)| !v.is_null()) {
            projected.insert_path(path, value.clone());
        }
    }
    projected
}
