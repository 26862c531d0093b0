//! Session-transcription endpoints.
//!
//! Only the REST surface: audio capture and chunking happen elsewhere.
//! `start` and `clean` both hand back a note the server created or rewrote,
//! which lands in the note mirror like any other note.

use std::sync::Arc;

use crate::error::ApiError;
use crate::executor::RequestExecutor;
use crate::mirror::EntityCache;
use crate::models::{ApiMessage, CleanRequest, Note, TranscribeRequest};
use crate::transport::{ApiRequest, RemoteCaller, TransportError};

pub struct TranscriptionService {
    caller: Arc<dyn RemoteCaller>,
    executor: Arc<RequestExecutor>,
    note_cache: Arc<dyn EntityCache<Note>>,
}

impl TranscriptionService {
    pub fn new(
        caller: Arc<dyn RemoteCaller>,
        executor: Arc<RequestExecutor>,
        note_cache: Arc<dyn EntityCache<Note>>,
    ) -> Self {
        Self {
            caller,
            executor,
            note_cache,
        }
    }

    /// Open a transcription session; the server allocates the transcript
    /// note up front.
    pub async fn start(&self, campaign_id: i64) -> Result<Note, ApiError> {
        let caller = self.caller.clone();
        let cache = self.note_cache.clone();

        self.executor
            .execute_with_retry(
                "transcription.start",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::post("transcription/start")
                                    .query("campaign_id", campaign_id)
                                    .bearer(token),
                            )
                            .await
                    }
                },
                move |response| async move {
                    let note: Note = response.json()?;
                    cache.upsert(note.clone()).await?;
                    Ok(note)
                },
            )
            .await
    }

    /// Transcribe one uploaded audio chunk into the transcript file.
    pub async fn transcribe(&self, request: TranscribeRequest) -> Result<ApiMessage, ApiError> {
        let body = serde_json::to_value(&request).map_err(TransportError::from)?;
        let caller = self.caller.clone();

        self.executor
            .execute_with_retry(
                "transcription.transcribe",
                move |token| {
                    let caller = caller.clone();
                    let body = body.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::put("transcription/transcribe")
                                    .bearer(token)
                                    .json(body),
                            )
                            .await
                    }
                },
                move |response| async move { Ok(response.json::<ApiMessage>()?) },
            )
            .await
    }

    /// Clean up and summarize the finished transcript.
    pub async fn clean(&self, request: CleanRequest) -> Result<Note, ApiError> {
        let body = serde_json::to_value(&request).map_err(TransportError::from)?;
        let caller = self.caller.clone();
        let cache = self.note_cache.clone();

        self.executor
            .execute_with_retry(
                "transcription.clean",
                move |token| {
                    let caller = caller.clone();
                    let body = body.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::put("transcription/clean").bearer(token).json(body),
                            )
                            .await
                    }
                },
                move |response| async move {
                    let note: Note = response.json()?;
                    cache.upsert(note.clone()).await?;
                    Ok(note)
                },
            )
            .await
    }
}
