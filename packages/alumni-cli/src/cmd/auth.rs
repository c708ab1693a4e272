//! Authentication commands

use alumni_client::api::auth::{
    self, Credentials, RegisterRequest, VerifyEmailRequest, VerifyGraduateRequest,
};
use alumni_client::Outcome;
use anyhow::Result;
use clap::Subcommand;
use dialoguer::Password;
use serde_json::json;
use std::path::PathBuf;

use crate::context::{read_file_part, AppContext};

#[derive(Subcommand)]
pub enum AuthCommand {
    /// Sign in and store the returned credential
    Login {
        email: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        email: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        graduation_year: String,

        #[arg(long, default_value = "")]
        telegram_alias: String,

        /// Ask for manual verification instead of an emailed code
        #[arg(long)]
        manual_verification: bool,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Confirm an email address with the emailed code
    VerifyEmail { email: String, code: String },

    /// Send the verification code again
    ResendVerification { email: String },

    /// Ask an administrator to verify the account by hand
    RequestManualVerification { email: String },

    /// Verify against the graduate registry
    VerifyGraduate {
        email: String,

        #[arg(long)]
        graduation_year: i32,

        #[arg(long)]
        first_name: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Import the graduate registry from a CSV file
    ImportAlumni { file: PathBuf },

    /// Create an administrator account
    AddAdmin {
        email: String,

        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
}

pub async fn run(ctx: &AppContext, cmd: AuthCommand) -> Result<bool> {
    match cmd {
        AuthCommand::Login { email, password } => {
            let password = password_or_prompt(ctx, password)?;
            login(ctx, Credentials::new(email, password)).await
        }
        AuthCommand::Register {
            email,
            first_name,
            last_name,
            graduation_year,
            telegram_alias,
            manual_verification,
            password,
        } => {
            let request = RegisterRequest {
                email,
                password: password_or_prompt(ctx, password)?,
                first_name,
                last_name,
                graduation_year,
                telegram_alias,
                manual_verification,
            };
            ctx.execute(&auth::REGISTER, auth::register(&request)).await
        }
        AuthCommand::VerifyEmail { email, code } => {
            let request = VerifyEmailRequest {
                email,
                verification_code: code,
            };
            let ok = ctx
                .execute(&auth::VERIFY_EMAIL, auth::verify_email(&request))
                .await?;
            if ok {
                ctx.print_role();
            }
            Ok(ok)
        }
        AuthCommand::ResendVerification { email } => {
            ctx.execute(&auth::RESEND_VERIFICATION, auth::resend_verification(email))
                .await
        }
        AuthCommand::RequestManualVerification { email } => {
            ctx.execute(
                &auth::REQUEST_MANUAL_VERIFICATION,
                auth::request_manual_verification(email),
            )
            .await
        }
        AuthCommand::VerifyGraduate {
            email,
            graduation_year,
            first_name,
            password,
        } => {
            let request = VerifyGraduateRequest {
                email,
                password: password_or_prompt(ctx, password)?,
                graduation_year,
                first_name,
            };
            let ok = ctx
                .execute(&auth::VERIFY_GRADUATE, auth::verify_graduate(&request))
                .await?;
            if ok {
                ctx.print_role();
            }
            Ok(ok)
        }
        AuthCommand::ImportAlumni { file } => {
            let part = read_file_part(&file)?;
            ctx.execute(&auth::IMPORT_ALUMNI, auth::import_alumni(part))
                .await
        }
        AuthCommand::AddAdmin { email, password } => {
            let credentials = Credentials::new(email, password_or_prompt(ctx, password)?);
            ctx.execute(&auth::ADD_ADMIN, auth::add_admin(&credentials))
                .await
        }
    }
}

/// Sign in and print `{message, token, isAdmin}` on success.
pub async fn login(ctx: &AppContext, credentials: Credentials) -> Result<bool> {
    let descriptor = auth::login(&credentials)?;
    let outcome = ctx.client.execute(&descriptor).await;

    let Some(token) = outcome.access_token() else {
        return Ok(ctx.show(&outcome));
    };

    let summary = Outcome::Success {
        payload: login_summary(token, ctx.session().role.is_admin()),
    };
    Ok(ctx.show(&summary))
}

fn login_summary(token: &str, is_admin: bool) -> serde_json::Value {
    json!({
        "message": "Login successful",
        "token": token,
        "isAdmin": is_admin,
    })
}

fn password_or_prompt(ctx: &AppContext, password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Ok(Password::with_theme(&ctx.theme())
            .with_prompt("Password")
            .interact()?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_summary_shape() {
        let summary = login_summary("h.e.s", true);
        assert_eq!(summary["message"], "Login successful");
        assert_eq!(summary["token"], "h.e.s");
        assert_eq!(summary["isAdmin"], true);
    }
}
