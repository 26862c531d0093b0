//! Thin service wrappers over the request executor, one per backend
//! resource. All authenticated calls are routed through
//! [`crate::executor::RequestExecutor`]; the services only describe the
//! endpoint and how a confirmed response lands in the local mirror.

pub mod auth;
pub mod campaigns;
pub mod characters;
pub mod files;
pub mod notes;
pub mod transcription;

pub use auth::{AuthService, ProfileStore, RefreshCoordinator};
pub use campaigns::CampaignService;
pub use characters::CharacterService;
pub use files::FileService;
pub use notes::NoteService;
pub use transcription::TranscriptionService;
