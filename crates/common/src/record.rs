//! The credential document mirrored between a secret and its IAM user.
//!
//! One secret holds one flat JSON document naming the user it belongs to and,
//! once a rotation pass has run, the user's current access key pair.

use serde::{Deserialize, Serialize};

use crate::identity::NewAccessKey;

/// The JSON document stored in the secret service.
///
/// On read only `UserName` must be present; any other fields are ignored.
/// The rotation job writes exactly the three-field shape below, replacing the
/// whole document, so fields the secret previously held are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRecord {
    /// IAM user this secret belongs to.
    #[serde(rename = "UserName")]
    pub user_name: String,

    /// Identifier of the current access key pair. Present once rotated.
    #[serde(rename = "AccessKeyId", default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,

    /// Secret half of the current access key pair. Present once rotated.
    #[serde(rename = "SecretAccessKey", default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
}

impl SecretRecord {
    /// Parse a secret's string value into a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not valid JSON or lacks `UserName`.
    pub fn from_json(value: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(value)
    }

    /// Build the document describing a freshly created key pair.
    pub fn for_key(key: &NewAccessKey) -> Self {
        Self {
            user_name: key.user_name.clone(),
            access_key_id: Some(key.access_key_id.clone()),
            secret_access_key: Some(key.secret_access_key.clone()),
        }
    }

    /// Render the record as the JSON document stored in the secret service.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_name_only() {
        let record = SecretRecord::from_json(r#"{"UserName": "alice"}"#).unwrap();
        assert_eq!(record.user_name, "alice");
        assert!(record.access_key_id.is_none());
        assert!(record.secret_access_key.is_none());
    }

    #[test]
    fn ignores_unknown_fields() {
        let record = SecretRecord::from_json(
            r#"{"UserName": "alice", "Note": "provisioned by hand", "Team": "infra"}"#,
        )
        .unwrap();
        assert_eq!(record.user_name, "alice");
    }

    #[test]
    fn rejects_missing_user_name() {
        assert!(SecretRecord::from_json(r#"{"AccessKeyId": "AKIA123"}"#).is_err());
    }

    #[test]
    fn rejects_non_json() {
        assert!(SecretRecord::from_json("not a document").is_err());
    }

    #[test]
    fn for_key_renders_exactly_three_fields() {
        let key = NewAccessKey {
            access_key_id: "AKIA123".into(),
            secret_access_key: "sekrit".into(),
            user_name: "alice".into(),
        };
        let json = SecretRecord::for_key(&key).to_json().unwrap();
        assert_eq!(
            json,
            r#"{"UserName":"alice","AccessKeyId":"AKIA123","SecretAccessKey":"sekrit"}"#
        );
    }

    #[test]
    fn round_trips_full_record() {
        let record = SecretRecord {
            user_name: "bob".into(),
            access_key_id: Some("AKIA456".into()),
            secret_access_key: Some("hush".into()),
        };
        let decoded = SecretRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(decoded, record);
    }
}
