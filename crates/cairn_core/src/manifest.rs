use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An entry of the asset index, pointing at the current manifest of one data asset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReference {
    /// Display name, e.g. "manifest_a.json".
    #[serde(default)]
    pub file_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Content id of the folder owning the manifest.
    #[serde(default)]
    pub folder_cid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidv1: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Integrity hash, which is also the pointer to the current manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_hash: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl AssetReference {
    /// Content id used to download the manifest: `hash`, falling back to `cidv1`.
    pub fn manifest_cid(&self) -> Option<&str> {
        non_empty(&self.hash).or_else(|| non_empty(&self.cidv1))
    }

    /// Folder content id: `folderHash`, falling back to `folderCid`.
    pub fn folder_id(&self) -> &str {
        non_empty(&self.folder_hash).unwrap_or(&self.folder_cid)
    }
}

/// Decodes `T`, falling back to its default when the value has another shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Strings pass through, `null` becomes empty, anything else its JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// JavaScript truthiness of a JSON value.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Descriptor of the stream a manifest belongs to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataStream {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub creator: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_on: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_modified_on: String,
    #[serde(rename = "marshalManifest", default, deserialize_with = "lenient")]
    pub marshal_manifest: MarshalManifest,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarshalManifest {
    #[serde(default, deserialize_with = "lenient")]
    pub total_items: u64,
    #[serde(default, deserialize_with = "lenient")]
    pub nested_stream: bool,
}

impl DataStream {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_on)
    }

    pub fn last_modified_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.last_modified_on)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// The resolved manifest of a data asset's current version.
///
/// Only `data_stream` is interpreted; every other stored field is kept as
/// received, in `data`, `version` or `extra`. `manifest_file_name`,
/// `folder_cid` and `manifest_cid` are not part of the stored document; they
/// are stamped after download from the reference that pointed at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestDocument {
    #[serde(deserialize_with = "lenient")]
    pub data_stream: DataStream,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub version: Value,

    #[serde(rename = "manifestFileName", default, deserialize_with = "lenient_string")]
    pub manifest_file_name: String,

    #[serde(rename = "folderHash", default, deserialize_with = "lenient_string")]
    pub folder_cid: String,

    #[serde(rename = "hash", default, deserialize_with = "lenient_string")]
    pub manifest_cid: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ManifestDocument {
    /// Decodes a raw gateway payload.
    ///
    /// Returns `Ok(None)` when `data_stream` is missing or falsy (empty or
    /// legacy manifests). Nothing else about the payload is checked.
    pub fn from_raw(raw: Value) -> Result<Option<Self>, serde_json::Error> {
        match raw.get("data_stream") {
            Some(data_stream) if truthy(data_stream) => serde_json::from_value(raw).map(Some),
            _ => Ok(None),
        }
    }

    pub fn stamped(mut self, reference: &AssetReference, manifest_cid: &str) -> Self {
        self.manifest_file_name = reference.file_name.clone();
        self.folder_cid = reference.folder_id().to_string();
        self.manifest_cid = manifest_cid.to_string();
        self
    }

    /// The raw data entries, empty when `data` is not a list.
    pub fn entries(&self) -> &[Value] {
        self.data.as_array().map(Vec::as_slice).unwrap_or(&[])
    }

    /// The version as a number, also when it was stored as text or a float.
    pub fn version_number(&self) -> Option<u64> {
        match &self.version {
            Value::Number(n) => n.as_u64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reference_decodes_index_entry() {
        let reference: AssetReference = serde_json::from_value(json!({
            "fileName": "a.json",
            "id": "42",
            "folderCid": "F1",
            "cidv1": "bafy-m1",
            "mimeType": "application/json",
            "hash": "M1",
            "folderHash": "FH1"
        }))
        .unwrap();

        assert_eq!(reference.file_name, "a.json");
        assert_eq!(reference.manifest_cid(), Some("M1"));
        assert_eq!(reference.folder_id(), "FH1");
    }

    #[test]
    fn reference_pointer_fallbacks() {
        let reference = AssetReference {
            folder_cid: "F1".into(),
            cidv1: Some("bafy-m1".into()),
            hash: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(reference.manifest_cid(), Some("bafy-m1"));
        assert_eq!(reference.folder_id(), "F1");

        assert_eq!(AssetReference::default().manifest_cid(), None);
    }

    #[test]
    fn raw_without_data_stream_is_skipped() {
        assert_eq!(ManifestDocument::from_raw(json!({})).unwrap(), None);
        assert_eq!(
            ManifestDocument::from_raw(json!({ "data_stream": null, "data": [] })).unwrap(),
            None
        );
    }

    #[test]
    fn falsy_data_stream_is_skipped() {
        for data_stream in [json!(""), json!(false), json!(0)] {
            let raw = json!({ "data_stream": data_stream, "version": 1 });
            assert_eq!(ManifestDocument::from_raw(raw).unwrap(), None);
        }
    }

    #[test]
    fn loosely_typed_fields_are_accepted() {
        let raws = [
            json!({ "data_stream": { "name": "a" }, "version": "2" }),
            json!({ "data_stream": { "name": "b" }, "version": 1.0 }),
            json!({ "data_stream": { "name": "c", "creator": null }, "hash": 12 }),
            json!({ "data_stream": { "name": "d", "marshalManifest": "?" }, "data": {} }),
            json!({ "data_stream": "legacy" }),
        ];

        let documents: Vec<_> = raws
            .into_iter()
            .map(|raw| ManifestDocument::from_raw(raw).unwrap().unwrap())
            .collect();

        assert_eq!(documents[0].version_number(), Some(2));
        assert_eq!(documents[1].version_number(), Some(1));
        assert_eq!(documents[2].data_stream.creator, "");
        assert_eq!(documents[2].manifest_cid, "12");
        assert_eq!(documents[3].data_stream.marshal_manifest, MarshalManifest::default());
        assert!(documents[3].entries().is_empty());
        assert_eq!(documents[4].data_stream, DataStream::default());
    }

    #[test]
    fn unknown_fields_are_kept() {
        let document = ManifestDocument::from_raw(json!({
            "data_stream": { "name": "a", "category": "weather" },
            "data": [],
            "version": 1,
            "license": "CC-BY-4.0"
        }))
        .unwrap()
        .unwrap();

        assert_eq!(document.extra["license"], "CC-BY-4.0");
        assert_eq!(document.data_stream.extra["category"], "weather");

        let wire = serde_json::to_value(&document).unwrap();
        assert_eq!(wire["license"], "CC-BY-4.0");
        assert_eq!(wire["data_stream"]["category"], "weather");
        assert_eq!(wire["version"], 1);
    }

    #[test]
    fn stamping_uses_request_context() {
        let document = ManifestDocument::from_raw(json!({
            "data_stream": {
                "name": "weather",
                "creator": "erd1",
                "created_on": "2024-03-01T10:00:00Z",
                "last_modified_on": "2024-03-02T10:00:00Z",
                "marshalManifest": { "totalItems": 3, "nestedStream": false }
            },
            "data": [{ "idx": 1 }],
            "version": 2
        }))
        .unwrap()
        .unwrap();

        let reference = AssetReference {
            file_name: "a.json".into(),
            folder_cid: "F1".into(),
            hash: Some("M1".into()),
            ..Default::default()
        };
        let document = document.stamped(&reference, "M1");

        assert_eq!(document.manifest_file_name, "a.json");
        assert_eq!(document.folder_cid, "F1");
        assert_eq!(document.manifest_cid, "M1");
        assert_eq!(document.version_number(), Some(2));
        assert_eq!(document.entries().len(), 1);
        assert_eq!(document.data_stream.marshal_manifest.total_items, 3);
        assert!(document.data_stream.created_at().is_some());
    }
}
