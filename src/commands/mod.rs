use clap::Subcommand;

use crate::client::DungeonVaultClient;
use crate::config::Config;
use crate::models::CreateCampaign;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session credentials
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Drop the stored session
    Logout,
    /// Show the signed-in user's profile
    Whoami,
    /// Campaign operations
    Campaigns {
        #[command(subcommand)]
        action: CampaignAction,
    },
    /// Note operations
    Notes {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Character operations
    Characters {
        #[command(subcommand)]
        action: CharacterAction,
    },
}

#[derive(Subcommand)]
pub enum CampaignAction {
    /// List the campaigns you belong to
    List,
    /// Create a campaign
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Join a campaign by invite code
    Join { invite_code: String },
}

#[derive(Subcommand)]
pub enum NoteAction {
    /// List the notes of a campaign
    List { campaign_id: i64 },
}

#[derive(Subcommand)]
pub enum CharacterAction {
    /// List the characters of a campaign
    List { campaign_id: i64 },
}

pub async fn handle_command(
    command: Commands,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = DungeonVaultClient::new(config).await?;

    match command {
        Commands::Login { email, password } => {
            let pair = client.auth.login(&email, &password).await?;
            println!("Signed in as user {}", pair.user_id);
        }
        Commands::Logout => {
            client.logout().await?;
            println!("Session cleared");
        }
        Commands::Whoami => {
            let profile = client.auth.get_user().await?;
            println!("{} <{}>", profile.nickname, profile.email);
        }
        Commands::Campaigns { action } => match action {
            CampaignAction::List => {
                for campaign in client.campaigns.list().await? {
                    println!("{:>4}  {}  [{}]", campaign.id, campaign.title, campaign.invite_code);
                }
            }
            CampaignAction::Create { title, description } => {
                let campaign = client
                    .campaigns
                    .create(CreateCampaign {
                        title,
                        description,
                        img_name: String::new(),
                    })
                    .await?;
                println!("Created campaign {} ({})", campaign.id, campaign.invite_code);
            }
            CampaignAction::Join { invite_code } => {
                let campaign = client.campaigns.join(&invite_code).await?;
                println!("Joined campaign {} ({})", campaign.id, campaign.title);
            }
        },
        Commands::Notes { action } => match action {
            NoteAction::List { campaign_id } => {
                for note in client.notes.list_for_campaign(campaign_id).await? {
                    println!("{:>4}  {}  {}", note.id, note.creation_date, note.title);
                }
            }
        },
        Commands::Characters { action } => match action {
            CharacterAction::List { campaign_id } => {
                for character in client.characters.list_for_campaign(campaign_id).await? {
                    println!("{:>4}  {}", character.id, character.name);
                }
            }
        },
    }

    Ok(())
}
