//! JSON manifest parser.

use serde_json::{Map, Value};

use crate::error::{ParseError, Result};
use crate::record::LibraryRecord;

const KEY_LICENSES: &str = "licenses";
const KEY_NAME: &str = "name";
const KEY_ICON: &str = "icon";
const KEY_VERSION: &str = "version";
const KEY_DESCRIPTION: &str = "description";
const KEY_YEAR: &str = "year";
const KEY_OWNER: &str = "owner";
const KEY_OWNER_URL: &str = "ownerUrl";
const KEY_URL: &str = "url";
const KEY_LICENSE: &str = "license";

/// Parse a manifest into records, preserving array order.
///
/// Fails only when the document shape is wrong: not JSON, not an object,
/// no `licenses` array, or an element that is not an object. Fields inside
/// an element that are missing or not strings come back as `None`.
///
/// ```
/// let records = homage_manifest::parse(r#"{"licenses":[{"name":"Foo"}]}"#).unwrap();
/// assert_eq!(records[0].name.as_deref(), Some("Foo"));
/// assert_eq!(records[0].license_code, None);
/// ```
pub fn parse(text: &str) -> Result<Vec<LibraryRecord>> {
    let document: Value = serde_json::from_str(text)?;
    let object = match document {
        Value::Object(object) => object,
        other => {
            return Err(ParseError::NotAnObject {
                found: type_name(&other),
            })
        }
    };

    let entries = match object.get(KEY_LICENSES) {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(ParseError::LicensesNotArray {
                found: type_name(other),
            })
        }
        None => return Err(ParseError::MissingLicenses),
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Object(fields) => Ok(parse_record(fields)),
            other => Err(ParseError::EntryNotObject {
                index,
                found: type_name(other),
            }),
        })
        .collect()
}

/// Parse a manifest from raw bytes, which must be UTF-8.
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<LibraryRecord>> {
    parse(std::str::from_utf8(bytes)?)
}

fn parse_record(fields: &Map<String, Value>) -> LibraryRecord {
    LibraryRecord {
        name: optional_string(fields, KEY_NAME),
        icon: optional_string(fields, KEY_ICON),
        version: optional_string(fields, KEY_VERSION),
        description: optional_string(fields, KEY_DESCRIPTION),
        year: optional_string(fields, KEY_YEAR),
        owner: optional_string(fields, KEY_OWNER),
        owner_url: optional_string(fields, KEY_OWNER_URL),
        url: optional_string(fields, KEY_URL),
        license_code: optional_string(fields, KEY_LICENSE),
    }
}

fn optional_string(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key)?.as_str().map(str::to_owned)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
