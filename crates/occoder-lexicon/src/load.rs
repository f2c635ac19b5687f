//! On-disk JSON formats emitted by the dictionary-building scripts.
//!
//! Per scheme directory `<lookup_dir>/<scheme>/`:
//! - `titles_<scheme>.json`     required; object: code -> list of exact titles
//! - `buckets_<scheme>.json`    required; array of records with a
//!   `<SCHEME>_code` column and a `Titles_nospace` text column
//! - `known_words_dict.json`    optional; object: lemma -> truthy marker
//! - `expand_dict.json`         optional; object: lemma -> replacement lemma
//! - `labels_<scheme>.json`     optional; object: code -> human label
//!
//! Object key order is significant for titles (exact-match ties resolve to
//! the last code in file order), hence serde_json's `preserve_order`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use occoder_core::error::{Error, Result};
use occoder_core::normalize::VocabDicts;

use crate::store::Bucket;

fn read_json(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::Operation(format!("read {}: {}", path.display(), e)))?;
    serde_json::from_str(&raw)
        .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))
}

fn require(dir: &Path, scheme: &str, name: &str) -> Result<Value> {
    let path = dir.join(name);
    if !path.is_file() {
        return Err(Error::DictionaryMissing {
            scheme: scheme.to_string(),
            name: name.to_string(),
        });
    }
    read_json(&path)
}

/// Codes may arrive as JSON numbers or strings; strings pass through
/// verbatim so leading zeros survive.
fn code_string(value: &Value, context: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::InvalidInput(format!(
            "{}: expected code string, got {}",
            context, other
        ))),
    }
}

/// Exact-title lists in file order: `[(code, titles), ...]`.
pub fn titles(dir: &Path, scheme: &str) -> Result<Vec<(String, Vec<String>)>> {
    let name = format!("titles_{}.json", scheme);
    let value = require(dir, scheme, &name)?;
    let Value::Object(map) = value else {
        return Err(Error::InvalidInput(format!("{}: expected an object", name)));
    };
    let mut out = Vec::with_capacity(map.len());
    for (code, entry) in map {
        let Value::Array(items) = entry else {
            return Err(Error::InvalidInput(format!(
                "{}: titles for '{}' must be a list",
                name, code
            )));
        };
        let mut list = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(s) => list.push(s),
                other => {
                    return Err(Error::InvalidInput(format!(
                        "{}: title for '{}' must be a string, got {}",
                        name, code, other
                    )))
                }
            }
        }
        out.push((code, list));
    }
    Ok(out)
}

/// Bucket table in file order. The code column is `<SCHEME>_code`, the text
/// column `Titles_nospace`, matching the builder scripts' output.
pub fn buckets(dir: &Path, scheme: &str) -> Result<Vec<Bucket>> {
    let name = format!("buckets_{}.json", scheme);
    let value = require(dir, scheme, &name)?;
    let Value::Array(records) = value else {
        return Err(Error::InvalidInput(format!("{}: expected an array", name)));
    };
    let code_col = format!("{}_code", scheme.to_uppercase());
    let text_col = "Titles_nospace";
    let mut out = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let code = record
            .get(&code_col)
            .ok_or_else(|| {
                Error::InvalidInput(format!("{}: record {} missing '{}'", name, i, code_col))
            })
            .and_then(|v| code_string(v, &format!("{} record {}", name, i)))?;
        let text = record
            .get(text_col)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::InvalidInput(format!("{}: record {} missing '{}'", name, i, text_col))
            })?
            .to_string();
        out.push(Bucket { code, text });
    }
    Ok(out)
}

/// Vocabulary + synonym dictionaries. Both files must be present; a missing
/// file is reported as `DictionaryMissing` so the caller can degrade the
/// scheme to basic normalization.
pub fn vocab_dicts(dir: &Path, scheme: &str) -> Result<VocabDicts> {
    let known = require(dir, scheme, "known_words_dict.json")?;
    let expand = require(dir, scheme, "expand_dict.json")?;

    let Value::Object(known) = known else {
        return Err(Error::InvalidInput(
            "known_words_dict.json: expected an object".to_string(),
        ));
    };
    let Value::Object(expand) = expand else {
        return Err(Error::InvalidInput(
            "expand_dict.json: expected an object".to_string(),
        ));
    };

    // Membership only; the marker values are ignored.
    let known_words = known.into_iter().map(|(k, _)| k).collect();
    let mut synonyms = HashMap::new();
    for (k, v) in expand {
        match v {
            Value::String(s) => {
                synonyms.insert(k, s);
            }
            other => {
                return Err(Error::InvalidInput(format!(
                    "expand_dict.json: replacement for '{}' must be a string, got {}",
                    k, other
                )))
            }
        }
    }
    Ok(VocabDicts { known_words, synonyms })
}

/// Optional code -> human label map; `None` when the file is absent.
pub fn labels(dir: &Path, scheme: &str) -> Result<Option<HashMap<String, String>>> {
    let path = dir.join(format!("labels_{}.json", scheme));
    if !path.is_file() {
        return Ok(None);
    }
    let Value::Object(map) = read_json(&path)? else {
        return Err(Error::InvalidInput(format!(
            "labels_{}.json: expected an object",
            scheme
        )));
    };
    let mut out = HashMap::with_capacity(map.len());
    for (code, label) in map {
        match label {
            Value::String(s) => {
                out.insert(code, s);
            }
            other => {
                return Err(Error::InvalidInput(format!(
                    "labels_{}.json: label for '{}' must be a string, got {}",
                    scheme, code, other
                )))
            }
        }
    }
    Ok(Some(out))
}
