// Wire-level records exchanged with the Phatik server.
//
// Field names are the JSON keys verbatim, except for the cursor: the server
// calls it `last_id`, the client calls it `min_id`.

use serde::{Deserialize, Deserializer, Serialize};

/// One posted message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub app: String,
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub epoch_seconds: i64,
}

impl Status {
    /// Build a status stamped with the current UTC time.
    pub fn now(app: &str, message: &str, tags: &[String]) -> Self {
        Status {
            app: app.to_string(),
            message: message.to_string(),
            tags: tags.to_vec(),
            epoch_seconds: chrono::Utc::now().timestamp(),
        }
    }
}

/// One page of statuses plus the cursor for the next incremental query.
///
/// Decoded from the server's `{"events": [...], "last_id": n}`; serialized
/// back out as `{"events": [...], "min_id": n}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatusList {
    pub events: Vec<Status>,
    #[serde(rename(deserialize = "last_id"))]
    pub min_id: i64,
}

/// Query string for `GET /api/status`. Unset fields are left out entirely
/// so the server applies its own defaults.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Status {
        Status {
            app: "a".into(),
            message: "m".into(),
            tags: vec!["deploy".into(), "prod".into()],
            epoch_seconds: 1000,
        }
    }

    #[test]
    fn status_uses_wire_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "app": "a",
                "message": "m",
                "tags": ["deploy", "prod"],
                "epoch_seconds": 1000
            })
        );
    }

    #[test]
    fn status_round_trip() {
        let text = serde_json::to_string(&sample()).unwrap();
        let back: Status = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn missing_or_null_tags_become_empty() {
        let absent: Status =
            serde_json::from_value(json!({"app": "a", "message": "m", "epoch_seconds": 1}))
                .unwrap();
        assert!(absent.tags.is_empty());

        let null: Status = serde_json::from_value(
            json!({"app": "a", "message": "m", "tags": null, "epoch_seconds": 1}),
        )
        .unwrap();
        assert!(null.tags.is_empty());
    }

    #[test]
    fn status_list_reads_last_id_and_writes_min_id() {
        let list: StatusList = serde_json::from_value(json!({
            "events": [{"app": "a", "message": "m", "tags": [], "epoch_seconds": 1000}],
            "last_id": 5
        }))
        .unwrap();
        assert_eq!(list.min_id, 5);
        assert_eq!(list.events.len(), 1);

        let out = serde_json::to_value(&list).unwrap();
        assert_eq!(out["min_id"], 5);
        assert!(out.get("last_id").is_none());
    }

    #[test]
    fn status_list_requires_cursor() {
        let err = serde_json::from_value::<StatusList>(json!({"events": []})).unwrap_err();
        assert!(err.to_string().contains("last_id"));
    }

    #[test]
    fn status_list_rejects_wrong_types() {
        let result = serde_json::from_value::<StatusList>(json!({
            "events": [{"app": "a", "message": "m", "tags": [], "epoch_seconds": "soon"}],
            "last_id": 5
        }));
        assert!(result.is_err());
    }

    #[test]
    fn now_stamps_current_time() {
        let before = chrono::Utc::now().timestamp();
        let status = Status::now("app", "hello", &[]);
        let after = chrono::Utc::now().timestamp();
        assert!(status.epoch_seconds >= before && status.epoch_seconds <= after);
        assert_eq!(status.message, "hello");
        assert!(status.tags.is_empty());
    }

    #[test]
    fn query_omits_unset_parameters() {
        let empty = ListQuery::default();
        assert_eq!(serde_json::to_value(empty).unwrap(), json!({}));

        let cursor_only = ListQuery {
            last_id: Some(7),
            limit: None,
        };
        assert_eq!(
            serde_json::to_value(cursor_only).unwrap(),
            json!({"last_id": 7})
        );
    }
}
