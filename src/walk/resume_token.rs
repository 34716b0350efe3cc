//! Serializable checkpoint for resuming a walk.

use serde::{Deserialize, Serialize};

use super::error::WalkError;
use super::state::WalkState;
use crate::interfaces::Cursor;

/// Position needed to rebuild a [`WalkState`] equivalent in traversal.
///
/// Omits the page's events (refetched from `previous_cursor`) and the last
/// error (a resumed walk starts clean). The JSON field names are part of
/// the token format; renaming them invalidates stored tokens. Tokens
/// written with the older `cursor`/`totalProcessedEvents` names still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeToken {
    #[serde(alias = "cursor")]
    pub previous_cursor: Option<Cursor>,
    pub page_event_index: usize,
    pub page_number: u64,
    #[serde(alias = "totalProcessedEvents")]
    pub total_events_processed: u64,
}

impl ResumeToken {
    pub fn from_state<E>(state: &WalkState<E>) -> Self {
        Self {
            previous_cursor: state.previous_cursor,
            page_event_index: state.page_event_index,
            page_number: state.page_number,
            total_events_processed: state.total_events_processed,
        }
    }

    pub fn encode(&self) -> Result<String, WalkError> {
        serde_json::to_string(self).map_err(WalkError::ResumeTokenEncode)
    }

    pub fn decode(token: &str) -> Result<Self, WalkError> {
        serde_json::from_str(token).map_err(WalkError::ResumeTokenDecode)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_token_wire_shape() {
        let cursor = Cursor::new(
            Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 8, 1, 0, 0, 0).unwrap(),
        );
        let token = ResumeToken {
            previous_cursor: Some(cursor),
            page_event_index: 2,
            page_number: 5,
            total_events_processed: 42,
        };

        let json: serde_json::Value = serde_json::from_str(&token.encode().unwrap()).unwrap();
        assert_eq!(json["pageEventIndex"], 2);
        assert_eq!(json["pageNumber"], 5);
        assert_eq!(json["totalEventsProcessed"], 42);
        assert!(json["previousCursor"]["startInclusive"].is_string());

        assert_eq!(ResumeToken::decode(&token.encode().unwrap()).unwrap(), token);
    }

    #[test]
    fn test_token_without_cursor() {
        let token = ResumeToken::decode(
            r#"{"previousCursor":null,"pageEventIndex":0,"pageNumber":1,"totalEventsProcessed":0}"#,
        )
        .unwrap();
        assert!(token.previous_cursor.is_none());
        assert_eq!(token.page_number, 1);
    }

    #[test]
    fn test_decodes_legacy_field_names() {
        let token = ResumeToken::decode(
            r#"{"cursor":{"startInclusive":"2021-06-01T00:00:00+00:00","endExclusive":"2021-08-01T00:00:00+00:00"},"pageEventIndex":1,"pageNumber":2,"totalProcessedEvents":3}"#,
        )
        .unwrap();

        assert_eq!(
            token.previous_cursor,
            Some(Cursor::new(
                Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2021, 8, 1, 0, 0, 0).unwrap(),
            ))
        );
        assert_eq!(token.page_event_index, 1);
        assert_eq!(token.page_number, 2);
        assert_eq!(token.total_events_processed, 3);

        // Re-encoding uses the current names.
        let json: serde_json::Value = serde_json::from_str(&token.encode().unwrap()).unwrap();
        assert!(json.get("previousCursor").is_some());
        assert!(json.get("cursor").is_none());
        assert_eq!(json["totalEventsProcessed"], 3);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = ResumeToken::decode("{not a token").unwrap_err();
        assert!(err.is_resume_token());
    }
}
