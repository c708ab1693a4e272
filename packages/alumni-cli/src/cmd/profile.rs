//! Profile commands

use alumni_client::api::profile::{self, ProfileUpdate};
use anyhow::{bail, Result};
use clap::Subcommand;

use crate::context::AppContext;

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the signed-in user's profile
    Me,

    /// Update fields of the signed-in user's profile
    Update {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(long)]
        graduation_year: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        biography: Option<String>,

        #[arg(long)]
        telegram: Option<String>,

        /// Avatar URL
        #[arg(long)]
        avatar: Option<String>,

        #[arg(long)]
        show_location: Option<bool>,
    },

    /// List every profile
    List,

    /// Show one profile
    Get { user_id: String },
}

pub async fn run(ctx: &AppContext, cmd: ProfileCommand) -> Result<bool> {
    match cmd {
        ProfileCommand::Me => ctx.execute(&profile::GET_OWN, profile::get_own()).await,
        ProfileCommand::Update {
            first_name,
            last_name,
            graduation_year,
            location,
            biography,
            telegram,
            avatar,
            show_location,
        } => {
            let update = ProfileUpdate {
                first_name,
                last_name,
                graduation_year,
                location,
                biography,
                telegram,
                avatar,
                show_location,
            };
            if update == ProfileUpdate::default() {
                bail!("nothing to update; pass at least one field");
            }
            ctx.execute(&profile::UPDATE_OWN, profile::update_own(&update))
                .await
        }
        ProfileCommand::List => ctx.execute(&profile::LIST_ALL, profile::list_all()).await,
        ProfileCommand::Get { user_id } => {
            ctx.execute(&profile::GET_BY_ID, profile::get_by_id(&user_id))
                .await
        }
    }
}
