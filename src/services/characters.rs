use std::sync::Arc;

use crate::error::ApiError;
use crate::executor::RequestExecutor;
use crate::mirror::EntityCache;
use crate::models::{ApiMessage, Character, CreateCharacter, UpdateCharacter};
use crate::transport::{ApiRequest, RemoteCaller, TransportError};

pub struct CharacterService {
    caller: Arc<dyn RemoteCaller>,
    executor: Arc<RequestExecutor>,
    cache: Arc<dyn EntityCache<Character>>,
}

impl CharacterService {
    pub fn new(
        caller: Arc<dyn RemoteCaller>,
        executor: Arc<RequestExecutor>,
        cache: Arc<dyn EntityCache<Character>>,
    ) -> Self {
        Self {
            caller,
            executor,
            cache,
        }
    }

    pub async fn create(&self, create: CreateCharacter) -> Result<Character, ApiError> {
        let body = serde_json::to_value(&create).map_err(TransportError::from)?;
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "characters.create",
                move |token| {
                    let caller = caller.clone();
                    let body = body.clone();
                    async move {
                        caller
                            .execute(ApiRequest::post("characters/new").bearer(token).json(body))
                            .await
                    }
                },
                move |response| async move {
                    let character: Character = response.json()?;
                    cache.insert(character.clone()).await?;
                    Ok(character)
                },
            )
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Character, ApiError> {
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "characters.get",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(ApiRequest::get(format!("characters/{id}")).bearer(token))
                            .await
                    }
                },
                move |response| async move {
                    let character: Character = response.json()?;
                    cache.upsert(character.clone()).await?;
                    Ok(character)
                },
            )
            .await
    }

    /// All characters visible to the user in one campaign; replaces the
    /// character mirror with the confirmed list.
    pub async fn list_for_campaign(&self, campaign_id: i64) -> Result<Vec<Character>, ApiError> {
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "characters.list",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::get("characters/")
                                    .query("campaign_id", campaign_id)
                                    .bearer(token),
                            )
                            .await
                    }
                },
                move |response| async move {
                    let characters: Vec<Character> = response.json()?;
                    cache.insert_all(characters.clone()).await?;
                    Ok(characters)
                },
            )
            .await
    }

    pub async fn update(&self, id: i64, update: UpdateCharacter) -> Result<Character, ApiError> {
        let body = serde_json::to_value(&update).map_err(TransportError::from)?;
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "characters.update",
                move |token| {
                    let caller = caller.clone();
                    let body = body.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::put(format!("characters/{id}/update"))
                                    .bearer(token)
                                    .json(body),
                            )
                            .await
                    }
                },
                move |response| async move {
                    let character: Character = response.json()?;
                    cache.upsert(character.clone()).await?;
                    Ok(character)
                },
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<ApiMessage, ApiError> {
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "characters.delete",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::delete(format!("characters/{id}/delete")).bearer(token),
                            )
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

    pub async fn cached(&self) -> Result<Vec<Character>, ApiError> {
        Ok(self.cache.get_all().await?)
    }
}
