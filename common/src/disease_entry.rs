//! Disease / autoantibody / autoantigen records and the create/edit draft.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationErrors;

/// One row of the reference database as returned by the Query Service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub disease: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub autoantibody: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub autoantigen: String,
    #[serde(default)]
    pub epitope: Option<String>,
    #[serde(default)]
    pub uniprot_id: Option<String>,
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default, with = "additional_fields")]
    pub additional: Vec<AdditionalField>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Entry {
    pub fn uniprot_url(&self) -> Option<String> {
        self.uniprot_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://www.uniprot.org/uniprot/{id}"))
    }
}

/// Entry plus the other entries the Query Service considers related.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDetail {
    pub data: Entry,
    #[serde(default)]
    pub related_entries: Vec<Entry>,
}

/// Arbitrary metadata row attached to an entry. Kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdditionalField {
    pub key: String,
    pub value: String,
}

impl AdditionalField {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The wire form is a JSON object; the client keeps it as an ordered list of pairs.
mod additional_fields {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::AdditionalField;

    pub fn serialize<S: Serializer>(fields: &[AdditionalField], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for field in fields {
            map.serialize_entry(&field.key, &field.value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<AdditionalField>, D::Error> {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = Vec<AdditionalField>;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of string keys to values")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = Vec::new();
                while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        serde_json::Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    fields.push(AdditionalField { key, value });
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_any(PairsVisitor)
    }
}

static UNIPROT_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z0-9]{6,10}$").expect("static regex"));

/// Create/edit form state for an entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub disease: String,
    pub autoantibody: String,
    pub autoantigen: String,
    pub epitope: String,
    pub uniprot_id: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(with = "additional_fields")]
    pub additional: Vec<AdditionalField>,
}

impl EntryDraft {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            disease: entry.disease.clone(),
            autoantibody: entry.autoantibody.clone(),
            autoantigen: entry.autoantigen.clone(),
            epitope: entry.epitope.clone().unwrap_or_default(),
            uniprot_id: entry.uniprot_id.clone().unwrap_or_default(),
            entry_type: entry.entry_type.clone().unwrap_or_default(),
            additional: entry.additional.clone(),
        }
    }

    pub fn push_additional_row(&mut self) {
        self.additional.push(AdditionalField::default());
    }

    pub fn remove_additional_row(&mut self, index: usize) {
        if index < self.additional.len() {
            self.additional.remove(index);
        }
    }

    /// Checks the draft and returns the trimmed copy that is sent to the Query Service.
    ///
    /// Fully blank metadata rows are dropped; a row with a value but no key is an error.
    /// Duplicate keys are passed through untouched.
    pub fn validate(&self) -> Result<EntryDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let required = [
            ("disease", &self.disease, "Disease name is required"),
            ("autoantibody", &self.autoantibody, "Autoantibody is required"),
            ("autoantigen", &self.autoantigen, "Autoantigen is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.add(field, message);
            }
        }
        let uniprot_id = self.uniprot_id.trim();
        if !uniprot_id.is_empty() && !UNIPROT_ID.is_match(uniprot_id) {
            errors.add("uniprotId", "UniProt ID should be 6-10 alphanumeric characters");
        }

        let mut additional = Vec::with_capacity(self.additional.len());
        for (index, row) in self.additional.iter().enumerate() {
            let key = row.key.trim();
            if key.is_empty() {
                if !row.value.trim().is_empty() {
                    errors.add(format!("additional.{index}"), "Field name is required");
                }
                continue;
            }
            additional.push(AdditionalField::new(key, row.value.clone()));
        }

        errors.into_result(EntryDraft {
            disease: self.disease.trim().to_string(),
            autoantibody: self.autoantibody.trim().to_string(),
            autoantigen: self.autoantigen.trim().to_string(),
            epitope: self.epitope.trim().to_string(),
            uniprot_id: uniprot_id.to_string(),
            entry_type: self.entry_type.trim().to_string(),
            additional,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> EntryDraft {
        EntryDraft {
            disease: " Systemic lupus erythematosus ".into(),
            autoantibody: "Anti-dsDNA".into(),
            autoantigen: "dsDNA".into(),
            ..Default::default()
        }
    }

    #[test]
    fn entry_reads_wire_shape() {
        let json = r#"{
            "_id": "65f0",
            "disease": "SLE",
            "autoantibody": "Anti-Sm",
            "autoantigen": "Sm",
            "uniprotId": null,
            "type": "IgG",
            "additional": {"zeta": "1", "alpha": "2"},
            "createdAt": "2024-01-02T00:00:00Z"
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "65f0");
        assert_eq!(entry.entry_type.as_deref(), Some("IgG"));
        assert_eq!(entry.uniprot_id, None);
        assert_eq!(entry.epitope, None);
        // document order, not sorted
        assert_eq!(entry.additional, vec![AdditionalField::new("zeta", "1"), AdditionalField::new("alpha", "2")]);
    }

    #[test]
    fn entry_tolerates_null_chain_values() {
        let entry: Entry = serde_json::from_str(r#"{"_id": "1", "disease": null, "autoantibody": "a", "autoantigen": "b"}"#).unwrap();
        assert_eq!(entry.disease, "");
        assert!(entry.additional.is_empty());
    }

    #[test]
    fn uniprot_link_only_for_present_ids() {
        let mut entry: Entry = serde_json::from_str(r#"{"_id": "1", "disease": "d", "autoantibody": "a", "autoantigen": "b"}"#).unwrap();
        assert_eq!(entry.uniprot_url(), None);
        entry.uniprot_id = Some("P12345".into());
        assert_eq!(entry.uniprot_url().as_deref(), Some("https://www.uniprot.org/uniprot/P12345"));
    }

    #[test]
    fn required_fields_are_reported() {
        let errors = EntryDraft::default().validate().unwrap_err();
        assert_eq!(errors.get("disease"), Some("Disease name is required"));
        assert_eq!(errors.get("autoantibody"), Some("Autoantibody is required"));
        assert_eq!(errors.get("autoantigen"), Some("Autoantigen is required"));
    }

    #[test]
    fn uniprot_id_pattern_is_enforced() {
        let draft = EntryDraft { uniprot_id: "p1234".into(), ..valid_draft() };
        assert!(draft.validate().unwrap_err().get("uniprotId").is_some());

        let draft = EntryDraft { uniprot_id: " P01308 ".into(), ..valid_draft() };
        assert_eq!(draft.validate().unwrap().uniprot_id, "P01308");
    }

    #[test]
    fn additional_rows_need_a_key() {
        let mut draft = valid_draft();
        draft.additional = vec![
            AdditionalField::new(" source ", "PMID:1"),
            AdditionalField::new("", ""),
            AdditionalField::new("  ", "orphan value"),
        ];
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.fields.len(), 1);
        assert!(errors.get("additional.2").is_some());

        draft.remove_additional_row(2);
        let cleaned = draft.validate().unwrap();
        assert_eq!(cleaned.disease, "Systemic lupus erythematosus");
        assert_eq!(cleaned.additional, vec![AdditionalField::new("source", "PMID:1")]);
    }

    #[test]
    fn draft_serializes_additional_as_object() {
        let mut draft = valid_draft();
        draft.additional.push(AdditionalField::new("k", "v"));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["additional"]["k"], "v");
        assert_eq!(json["uniprotId"], "");
    }
}
