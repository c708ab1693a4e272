//! Administrator commands
//!
//! The role check here only warns. Authorization is the service's call.

use alumni_client::api::admin;
use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

use crate::context::{read_file_part, AppContext};

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Upload the list of emails allowed to register
    UploadAllowedEmails { file: PathBuf },

    /// List every user
    Users,

    /// List banned users
    Banned,

    /// Mark a user as verified
    Verify { email: String },

    /// Remove a user's verification
    Unverify { email: String },

    /// Ban a user
    Ban { email: String },

    /// Lift a ban
    Unban { email: String },

    /// List events awaiting moderation
    Events,

    /// Approve an event
    Approve { event_id: String },

    /// Decline an event
    Decline { event_id: String },

    /// Return an approved event to pending
    Unapprove { event_id: String },

    /// Show event moderation settings
    Settings,

    /// Toggle automatic approval of new events
    ToggleAutoApprove,
}

pub async fn run(ctx: &AppContext, cmd: AdminCommand) -> Result<bool> {
    ctx.warn_if_not_admin();

    match cmd {
        AdminCommand::UploadAllowedEmails { file } => {
            let part = read_file_part(&file)?;
            ctx.execute(
                &admin::UPLOAD_ALLOWED_EMAILS,
                admin::upload_allowed_emails(part),
            )
            .await
        }
        AdminCommand::Users => ctx.execute(&admin::LIST_USERS, admin::list_users()).await,
        AdminCommand::Banned => ctx.execute(&admin::LIST_BANNED, admin::list_banned()).await,
        AdminCommand::Verify { email } => {
            ctx.execute(&admin::VERIFY_USER, admin::verify_user(email))
                .await
        }
        AdminCommand::Unverify { email } => {
            ctx.execute(&admin::UNVERIFY_USER, admin::unverify_user(email))
                .await
        }
        AdminCommand::Ban { email } => ctx.execute(&admin::BAN_USER, admin::ban_user(email)).await,
        AdminCommand::Unban { email } => {
            ctx.execute(&admin::UNBAN_USER, admin::unban_user(email))
                .await
        }
        AdminCommand::Events => ctx.execute(&admin::LIST_EVENTS, admin::list_events()).await,
        AdminCommand::Approve { event_id } => {
            ctx.execute(&admin::APPROVE_EVENT, admin::approve_event(event_id))
                .await
        }
        AdminCommand::Decline { event_id } => {
            ctx.execute(&admin::DECLINE_EVENT, admin::decline_event(event_id))
                .await
        }
        AdminCommand::Unapprove { event_id } => {
            ctx.execute(&admin::UNAPPROVE_EVENT, admin::unapprove_event(&event_id))
                .await
        }
        AdminCommand::Settings => {
            ctx.execute(&admin::EVENT_SETTINGS, admin::event_settings())
                .await
        }
        AdminCommand::ToggleAutoApprove => {
            ctx.execute(&admin::TOGGLE_AUTO_APPROVE, admin::toggle_auto_approve())
                .await
        }
    }
}
