use std::sync::Arc;

use crate::error::ApiError;
use crate::executor::RequestExecutor;
use crate::mirror::EntityCache;
use crate::models::{ApiMessage, CreateNote, Note, UpdateNote};
use crate::transport::{ApiRequest, RemoteCaller, TransportError};

pub struct NoteService {
    caller: Arc<dyn RemoteCaller>,
    executor: Arc<RequestExecutor>,
    cache: Arc<dyn EntityCache<Note>>,
}

impl NoteService {
    pub fn new(
        caller: Arc<dyn RemoteCaller>,
        executor: Arc<RequestExecutor>,
        cache: Arc<dyn EntityCache<Note>>,
    ) -> Self {
        Self {
            caller,
            executor,
            cache,
        }
    }

    pub async fn create(&self, create: CreateNote) -> Result<Note, ApiError> {
        let body = serde_json::to_value(&create).map_err(TransportError::from)?;
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "notes.create",
                move |token| {
                    let caller = caller.clone();
                    let body = body.clone();
                    async move {
                        caller
                            .execute(ApiRequest::post("notes/new").bearer(token).json(body))
                            .await
                    }
                },
                move |response| async move {
                    let note: Note = response.json()?;
                    cache.insert(note.clone()).await?;
                    Ok(note)
                },
            )
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Note, ApiError> {
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "notes.get",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(ApiRequest::get(format!("notes/{id}")).bearer(token))
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

    /// Notes of one campaign; replaces the note mirror wholesale.
    pub async fn list_for_campaign(&self, campaign_id: i64) -> Result<Vec<Note>, ApiError> {
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "notes.list",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::get("notes/")
                                    .query("campaign_id", campaign_id)
                                    .bearer(token),
                            )
                            .await
                    }
                },
                move |response| async move {
                    let notes: Vec<Note> = response.json()?;
                    cache.insert_all(notes.clone()).await?;
                    Ok(notes)
                },
            )
            .await
    }

    pub async fn update(&self, id: i64, update: UpdateNote) -> Result<Note, ApiError> {
        let body = serde_json::to_value(&update).map_err(TransportError::from)?;
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "notes.update",
                move |token| {
                    let caller = caller.clone();
                    let body = body.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::put(format!("notes/{id}/update"))
                                    .bearer(token)
                                    .json(body),
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

    pub async fn delete(&self, id: i64) -> Result<ApiMessage, ApiError> {
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "notes.delete",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(ApiRequest::delete(format!("notes/{id}/delete")).bearer(token))
                            .await
                    }
                },
                move |response| async move {
                    let message: ApiMessage = response.json()?;
                    cache.delete_by_id(id).await?;
                    Ok(message)
                },
            )
            .await
    }

    pub async fn cached(&self) -> Result<Vec<Note>, ApiError> {
        Ok(self.cache.get_all().await?)
    }
}
