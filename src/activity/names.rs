use bytes::Bytes;
use serde::Deserialize;

use crate::error::LookupError;
use crate::tracker::Tracker;

#[derive(Debug, Deserialize)]
struct UserBody {
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
}

/// Extract `displayName` from a user lookup response. Absent or null gives
/// an empty string; anything that is not a JSON object is an error.
pub fn parse_display_name(body: &Bytes) -> Result<String, LookupError> {
    let user: UserBody = serde_json::from_slice(body).map_err(LookupError::Json)?;
    Ok(user.display_name.unwrap_or_default())
}

pub async fn resolve_display_name(tracker: &dyn Tracker, username: &str) -> Result<String, LookupError> {
    let body = tracker.lookup_user(username).await?;
    parse_display_name(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::mock::{MockTracker, Reply};
    use reqwest::StatusCode;

    #[test]
    fn reads_display_name() {
        let body = Bytes::from_static(br#"{"name":"alice","displayName":"Alice Liddell","active":true}"#);
        assert_eq!(parse_display_name(&body).unwrap(), "Alice Liddell");
    }

    #[test]
    fn missing_or_null_display_name_is_empty() {
        assert_eq!(parse_display_name(&Bytes::from_static(br#"{"name":"alice"}"#)).unwrap(), "");
        assert_eq!(parse_display_name(&Bytes::from_static(br#"{"displayName":null}"#)).unwrap(), "");
    }

    #[test]
    fn malformed_body_is_an_error() {
        let err = parse_display_name(&Bytes::from_static(b"<html>oops</html>")).unwrap_err();
        assert!(matches!(err, LookupError::Json(_)));
    }

    #[tokio::test]
    async fn resolve_surfaces_transport_errors() {
        let tracker = MockTracker::new()
            .on_lookup("alice", Reply::Body(Bytes::from_static(br#"{"displayName":"Alice"}"#)))
            .on_lookup("bob", Reply::Status(StatusCode::UNAUTHORIZED));

        assert_eq!(resolve_display_name(&tracker, "alice").await.unwrap(), "Alice");
        let err = resolve_display_name(&tracker, "bob").await.unwrap_err();
        assert!(matches!(err, LookupError::Status(StatusCode::UNAUTHORIZED)));
        assert_eq!(tracker.calls(), vec!["lookup:alice", "lookup:bob"]);
    }
}
