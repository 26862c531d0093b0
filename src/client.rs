//! Top-level client: builds the transport, credential store, executor, and
//! services from a [`Config`] and hands out one service per resource.

use std::sync::Arc;

use crate::config::Config;
use crate::credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
use crate::error::ApiError;
use crate::executor::RequestExecutor;
use crate::mirror::{EntityCache, MemoryCache};
use crate::models::{Campaign, Character, Note};
use crate::services::{
    AuthService, CampaignService, CharacterService, FileService, NoteService, ProfileStore,
    RefreshCoordinator, TranscriptionService,
};
use crate::transport::{HttpCaller, RemoteCaller};

pub struct DungeonVaultClient {
    pub auth: AuthService,
    pub campaigns: CampaignService,
    pub characters: CharacterService,
    pub notes: NoteService,
    pub files: FileService,
    pub transcription: TranscriptionService,
    campaign_cache: Arc<MemoryCache<Campaign>>,
    character_cache: Arc<MemoryCache<Character>>,
    note_cache: Arc<MemoryCache<Note>>,
}

impl DungeonVaultClient {
    /// Build a client from configuration, choosing the credential backend
    /// it names.
    pub async fn new(config: &Config) -> Result<Self, ApiError> {
        let caller: Arc<dyn RemoteCaller> = Arc::new(HttpCaller::new(&config.api)?);

        let store: Arc<dyn CredentialStore> = match config.credentials.backend.as_str() {
            "memory" => Arc::new(MemoryCredentialStore::new()),
            _ => Arc::new(FileCredentialStore::open(&config.credentials.path).await?),
        };

        Ok(Self::with_components(caller, store))
    }

    /// Assemble from explicit components. Tests use this to swap in a mock
    /// transport or a pre-seeded store.
    pub fn with_components(
        caller: Arc<dyn RemoteCaller>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        let coordinator = Arc::new(RefreshCoordinator::new(caller.clone(), store.clone()));
        let executor = Arc::new(RequestExecutor::new(store.clone(), coordinator.clone()));

        let campaign_cache = Arc::new(MemoryCache::<Campaign>::new());
        let character_cache = Arc::new(MemoryCache::<Character>::new());
        let note_cache = Arc::new(MemoryCache::<Note>::new());
        let profile = ProfileStore::new();

        Self {
            auth: AuthService::new(
                caller.clone(),
                store.clone(),
                executor.clone(),
                coordinator,
                profile,
            ),
            campaigns: CampaignService::new(
                caller.clone(),
                executor.clone(),
                campaign_cache.clone(),
            ),
            characters: CharacterService::new(
                caller.clone(),
                executor.clone(),
                character_cache.clone(),
            ),
            notes: NoteService::new(caller.clone(), executor.clone(), note_cache.clone()),
            files: FileService::new(caller.clone()),
            transcription: TranscriptionService::new(caller, executor, note_cache.clone()),
            campaign_cache,
            character_cache,
            note_cache,
        }
    }

    /// Drop the session and every mirrored table.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.auth.logout().await?;
        self.campaign_cache.delete_all().await?;
        self.character_cache.delete_all().await?;
        self.note_cache.delete_all().await?;
        Ok(())
    }
}
