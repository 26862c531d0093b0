use std::sync::Arc;

use crate::error::ApiError;
use crate::executor::RequestExecutor;
use crate::mirror::EntityCache;
use crate::models::{ApiMessage, Campaign, CreateCampaign, KickRequest, UserProfile};
use crate::transport::{ApiRequest, RemoteCaller, TransportError};

pub struct CampaignService {
    caller: Arc<dyn RemoteCaller>,
    executor: Arc<RequestExecutor>,
    cache: Arc<dyn EntityCache<Campaign>>,
}

impl CampaignService {
    pub fn new(
        caller: Arc<dyn RemoteCaller>,
        executor: Arc<RequestExecutor>,
        cache: Arc<dyn EntityCache<Campaign>>,
    ) -> Self {
        Self {
            caller,
            executor,
            cache,
        }
    }

    pub async fn create(&self, create: CreateCampaign) -> Result<Campaign, ApiError> {
        let body = serde_json::to_value(&create).map_err(TransportError::from)?;
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "campaigns.create",
                move |token| {
                    let caller = caller.clone();
                    let body = body.clone();
                    async move {
                        caller
                            .execute(ApiRequest::post("campaigns/new").bearer(token).json(body))
                            .await
                    }
                },
                move |response| async move {
                    let campaign: Campaign = response.json()?;
                    cache.insert(campaign.clone()).await?;
                    Ok(campaign)
                },
            )
            .await
    }

    pub async fn get(&self, id: i64) -> Result<Campaign, ApiError> {
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "campaigns.get",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(ApiRequest::get(format!("campaigns/{id}")).bearer(token))
                            .await
                    }
                },
                move |response| async move {
                    let campaign: Campaign = response.json()?;
                    cache.upsert(campaign.clone()).await?;
                    Ok(campaign)
                },
            )
            .await
    }

    /// Every campaign the user belongs to; the mirror is replaced wholesale
    /// with the confirmed list.
    pub async fn list(&self) -> Result<Vec<Campaign>, ApiError> {
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "campaigns.list",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(ApiRequest::get("campaigns/").bearer(token))
                            .await
                    }
                },
                move |response| async move {
                    let campaigns: Vec<Campaign> = response.json()?;
                    cache.insert_all(campaigns.clone()).await?;
                    Ok(campaigns)
                },
            )
            .await
    }

    pub async fn update(&self, id: i64, update: CreateCampaign) -> Result<Campaign, ApiError> {
        let body = serde_json::to_value(&update).map_err(TransportError::from)?;
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "campaigns.update",
                move |token| {
                    let caller = caller.clone();
                    let body = body.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::put(format!("campaigns/{id}/update"))
                                    .bearer(token)
                                    .json(body),
                            )
                            .await
                    }
                },
                move |response| async move {
                    let campaign: Campaign = response.json()?;
                    cache.upsert(campaign.clone()).await?;
                    Ok(campaign)
                },
            )
            .await
    }

    /// Join a campaign through its invite code.
    pub async fn join(&self, invite_code: &str) -> Result<Campaign, ApiError> {
        let invite_code = invite_code.to_string();
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "campaigns.join",
                move |token| {
                    let caller = caller.clone();
                    let invite_code = invite_code.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::patch("campaigns/new-user")
                                    .query("invite_code", invite_code)
                                    .bearer(token),
                            )
                            .await
                    }
                },
                move |response| async move {
                    let campaign: Campaign = response.json()?;
                    cache.upsert(campaign.clone()).await?;
                    Ok(campaign)
                },
            )
            .await
    }

    /// Remove the signed-in user from the campaign and drop the mirror row.
    pub async fn leave(&self, id: i64) -> Result<ApiMessage, ApiError> {
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "campaigns.leave",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::patch(format!("campaigns/{id}/remove-user"))
                                    .bearer(token),
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

    /// Expel another member. Creator-only on the server side.
    pub async fn kick(&self, campaign_id: i64, user_id: i64) -> Result<ApiMessage, ApiError> {
        let body = serde_json::to_value(KickRequest {
            user: user_id,
            id: campaign_id,
        })
        .map_err(TransportError::from)?;
        let caller = self.caller.clone();

        self.executor
            .execute_with_retry(
                "campaigns.kick",
                move |token| {
                    let caller = caller.clone();
                    let body = body.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::patch(format!("campaigns/{campaign_id}/kick-user"))
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

    pub async fn delete(&self, id: i64) -> Result<ApiMessage, ApiError> {
        let caller = self.caller.clone();
        let cache = self.cache.clone();

        self.executor
            .execute_with_retry(
                "campaigns.delete",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::delete(format!("campaigns/{id}/delete")).bearer(token),
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

    /// Profiles of everyone in the campaign. Not mirrored.
    pub async fn members(&self, id: i64) -> Result<Vec<UserProfile>, ApiError> {
        let caller = self.caller.clone();

        self.executor
            .execute_with_retry(
                "campaigns.members",
                move |token| {
                    let caller = caller.clone();
                    async move {
                        caller
                            .execute(
                                ApiRequest::get(format!("campaigns/{id}/members")).bearer(token),
                            )
                            .await
                    }
                },
                move |response| async move { Ok(response.json::<Vec<UserProfile>>()?) },
            )
            .await
    }

    /// Last server-confirmed campaign list, served from the mirror.
    pub async fn cached(&self) -> Result<Vec<Campaign>, ApiError> {
        Ok(self.cache.get_all().await?)
    }

    pub async fn cached_by_id(&self, id: i64) -> Result<Option<Campaign>, ApiError> {
        Ok(self.cache.get_by_id(id).await?)
    }
}
