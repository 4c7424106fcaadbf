//! Wire types for the workspace collections listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Fork metadata attached to a collection. Absent on the root collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fork {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Uid of the collection this fork was taken from.
    #[serde(default, deserialize_with = "null_as_default")]
    pub from: String,
}

/// One entry of `GET /collections?workspace=<id>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Lineage id, shared by a collection and all of its forks.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Per-fork handle used to fetch the document. Must be present; the lister
    /// rejects empty values.
    #[serde(deserialize_with = "null_as_default")]
    pub uid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fork: Option<Fork>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_public: bool,
}

/// Explicit `null` decodes like an absent field.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

impl Collection {
    /// Fork label of this entry; empty for the root collection.
    pub fn fork_label(&self) -> &str {
        self.fork.as_ref().map(|f| f.label.as_str()).unwrap_or("")
    }
}

/// Top-level listing body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionList {
    pub collections: Vec<Collection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_listing_with_and_without_fork() {
        let body = r#"{
            "collections": [
                {
                    "id": "c1", "name": "Orders", "owner": "42",
                    "createdAt": "2023-01-05T10:00:00.000Z",
                    "updatedAt": "2023-02-01T12:30:00.000Z",
                    "uid": "42-c1", "isPublic": false
                },
                {
                    "id": "c2", "name": "Orders", "owner": "42",
                    "createdAt": "2023-01-06T10:00:00.000Z",
                    "updatedAt": "2023-02-02T12:30:00.000Z",
                    "uid": "42-c2",
                    "fork": { "label": "staging", "createdAt": "2023-01-06T10:00:00.000Z", "from": "42-c1" },
                    "isPublic": true,
                    "someNewField": 7
                }
            ]
        }"#;
        let list: CollectionList = serde_json::from_str(body).unwrap();
        assert_eq!(list.collections.len(), 2);
        assert_eq!(list.collections[0].fork_label(), "");
        assert_eq!(list.collections[1].fork_label(), "staging");
        assert_eq!(list.collections[1].fork.as_ref().unwrap().from, "42-c1");
        assert!(list.collections[1].is_public);
        assert!(list.collections[0].created_at.is_some());
    }

    #[test]
    fn null_descriptive_fields_decode_as_empty() {
        let body = r#"{"collections":[
            {"id":null,"uid":"9-a","name":null,"owner":null,"createdAt":null,"isPublic":null,
             "fork":{"label":null,"from":null,"createdAt":null}},
            {"id":"c2","uid":"9-b","fork":null}
        ]}"#;
        let list: CollectionList = serde_json::from_str(body).unwrap();
        let a = &list.collections[0];
        assert_eq!((a.id.as_str(), a.name.as_str(), a.owner.as_str()), ("", "", ""));
        assert!(!a.is_public);
        assert_eq!(a.fork_label(), "");
        assert_eq!(a.fork.as_ref().unwrap().from, "");
        assert_eq!(list.collections[1].fork_label(), "");
    }

    #[test]
    fn missing_uid_is_an_error() {
        assert!(serde_json::from_str::<Collection>(r#"{"id":"c1","name":"Orders"}"#).is_err());
    }

    #[test]
    fn missing_collections_key_is_an_error() {
        assert!(serde_json::from_str::<CollectionList>(r#"{"error":{"name":"AuthenticationError"}}"#).is_err());
    }
}
