//! Session inspection commands

use alumni_client::decode_claims;
use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use console::style;

use crate::context::AppContext;

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Show the stored credential's role and claims
    Show,

    /// Forget the stored credential
    Logout,
}

pub fn run(ctx: &AppContext, cmd: SessionCommand) -> Result<bool> {
    match cmd {
        SessionCommand::Show => {
            show(ctx);
            Ok(true)
        }
        SessionCommand::Logout => {
            logout(ctx)?;
            Ok(true)
        }
    }
}

pub fn show(ctx: &AppContext) {
    let session = ctx.session();

    ctx.print_header("Session");
    println!("  API:   {}", style(&ctx.base_url).cyan());

    let Some(token) = session.credential.as_deref() else {
        println!("  {}", style("Not signed in").dim());
        return;
    };

    print!("  ");
    ctx.print_role();

    // Expiry is informational; the service decides whether the token is still good.
    match decode_claims(token) {
        Ok(claims) => {
            if let Some(sub) = &claims.sub {
                println!("  Subject: {sub}");
            }
            if let Some(expires_at) = claims.expires_at() {
                let note = if expires_at <= Utc::now() {
                    style("expired").red().to_string()
                } else {
                    style("valid").green().to_string()
                };
                println!("  Expires: {} ({note})", expires_at.to_rfc3339());
            }
        }
        Err(e) => ctx.print_warning(&format!("  Credential claims unreadable: {e}")),
    }
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.client.logout()?;
    ctx.print_success("Logged out");
    Ok(())
}
