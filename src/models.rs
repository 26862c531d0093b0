//! Wire-level data transfer objects.
//!
//! Field names match the backend's JSON exactly; the structs are mirrored
//! into the local cache as-is, never merged.

use serde::{Deserialize, Serialize};

use crate::mirror::Mirrored;

/// Credential payload returned by login and refresh.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRegister {
    pub email: String,
    pub password: String,
    pub avatar: String,
    pub nickname: String,
}

/// Public profile of the authenticated user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub avatar: String,
    pub nickname: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserUpdate {
    pub nickname: String,
    pub avatar: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Campaign {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub img_name: String,
    pub invite_code: String,
    pub creator_id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCampaign {
    pub title: String,
    pub description: String,
    pub img_name: String,
}

/// Body for expelling a member from a campaign.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KickRequest {
    /// Id of the user being expelled.
    pub user: i64,
    /// Id of the campaign.
    pub id: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Character {
    pub id: i64,
    pub campaign_id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub filename_backstory: String,
    pub img_name: String,
    pub visibility: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCharacter {
    pub campaign_id: i64,
    pub name: String,
    pub description: String,
    pub filename_backstory: String,
    pub img_name: String,
    pub visibility: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateCharacter {
    pub name: String,
    pub description: String,
    pub filename_backstory: String,
    pub img_name: String,
    pub visibility: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub campaign_id: i64,
    /// Absent on notes generated by the transcription pipeline.
    pub user_id: Option<i64>,
    pub title: String,
    pub creation_date: String,
    pub file_name: String,
    pub visibility: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateNote {
    pub campaign_id: i64,
    pub title: String,
    pub file_name: String,
    pub visibility: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateNote {
    pub title: String,
    pub file_name: String,
    pub visibility: bool,
}

/// Generic `{"message": ...}` acknowledgement body.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileUploadResponse {
    pub filename: String,
}

/// Stored name of an uploaded image. The images route reports it under
/// `url`, older deployments under `filename`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImgResponse {
    #[serde(alias = "url")]
    pub filename: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranscribeRequest {
    pub campaign_id: i64,
    /// Name of the uploaded audio chunk to transcribe.
    pub audio: String,
    /// Target transcript file on the server.
    pub filename: String,
    pub summary: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CleanRequest {
    pub campaign_id: i64,
    pub filename: String,
}

impl Mirrored for Campaign {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Mirrored for Character {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Mirrored for Note {
    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_round_trips_backend_field_names() {
        let json = r#"{
            "id": 3,
            "title": "Curse of Strahd",
            "description": "Weekly game",
            "img_name": "strahd.png",
            "invite_code": "XK42",
            "creator_id": 7
        }"#;

        let campaign: Campaign = serde_json::from_str(json).unwrap();
        assert_eq!(campaign.id, 3);
        assert_eq!(campaign.invite_code, "XK42");

        let value = serde_json::to_value(&campaign).unwrap();
        assert_eq!(value["img_name"], "strahd.png");
        assert_eq!(value["creator_id"], 7);
    }

    #[test]
    fn note_tolerates_null_user_id() {
        let json = r#"{
            "id": 9,
            "campaign_id": 3,
            "user_id": null,
            "title": "Session 12",
            "creation_date": "2025-04-01",
            "file_name": "session12.txt",
            "visibility": true
        }"#;

        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.user_id, None);
        assert_eq!(note.campaign_id, 3);
    }

    #[test]
    fn img_response_accepts_both_field_spellings() {
        let from_url: ImgResponse = serde_json::from_str(r#"{"url": "img_1.png"}"#).unwrap();
        assert_eq!(from_url.filename, "img_1.png");

        let from_filename: ImgResponse =
            serde_json::from_str(r#"{"filename": "img_2.png"}"#).unwrap();
        assert_eq!(from_filename.filename, "img_2.png");
    }

    #[test]
    fn token_response_deserializes_all_fields() {
        let json = r#"{
            "access_token": "A1",
            "refresh_token": "R1",
            "token_type": "bearer",
            "user_id": 7
        }"#;

        let tokens: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access_token, "A1");
        assert_eq!(tokens.user_id, 7);
    }
}
