//! Interactive menu over every operation

use alumni_client::api::{self, auth, BodyShape, Domain, Operation};
use alumni_client::Role;
use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Input, Password, Select};
use serde_json::Value;
use std::path::Path;

use crate::cmd;
use crate::context::{read_file_part, AppContext};

const EXTRA_ITEMS: &[&str] = &["Show session", "Logout", "Exit"];

pub async fn run(ctx: &AppContext) -> Result<bool> {
    ctx.print_header("Alumni network");
    ctx.print_info(&format!("API: {}", ctx.base_url));

    loop {
        println!();
        let role = ctx.session().role;
        let operations = visible_operations(role);

        let mut items: Vec<String> = operations.iter().map(|op| label(op)).collect();
        items.extend(EXTRA_ITEMS.iter().map(|item| item.to_string()));

        let selection = Select::with_theme(&ctx.theme())
            .with_prompt(format!("What would you like to do? ({role})"))
            .items(&items)
            .default(0)
            .interact()?;

        let result = match selection.checked_sub(operations.len()) {
            None => run_operation(ctx, operations[selection]).await.map(|_| ()),
            Some(0) => {
                cmd::session::show(ctx);
                Ok(())
            }
            Some(1) => cmd::session::logout(ctx),
            Some(_) => {
                println!("{}", "Goodbye!".bright_blue());
                return Ok(true);
            }
        };

        // Report and keep the menu open.
        if let Err(e) = result {
            println!("{} {:#}", "Error:".red().bold(), e);
        }
    }
}

/// Operations offered for a role. Admin operations are hidden from
/// non-administrators; the service enforces access either way.
fn visible_operations(role: Role) -> Vec<&'static Operation> {
    api::ALL
        .iter()
        .filter(|op| op.domain != Domain::Admin || role.is_admin())
        .collect()
}

fn label(op: &Operation) -> String {
    format!("{:<28} {:<6} {}", op.key(), op.method.as_str(), op.path)
}

async fn run_operation(ctx: &AppContext, op: &Operation) -> Result<bool> {
    if *op == auth::LOGIN {
        let email: String = Input::with_theme(&ctx.theme())
            .with_prompt("Email")
            .interact_text()?;
        let password = Password::with_theme(&ctx.theme())
            .with_prompt("Password")
            .interact()?;
        return cmd::auth::login(ctx, auth::Credentials::new(email, password)).await;
    }

    let mut params = Vec::new();
    for name in op.path_params() {
        let value: String = Input::with_theme(&ctx.theme())
            .with_prompt(name)
            .interact_text()?;
        params.push(value);
    }
    let params: Vec<&str> = params.iter().map(String::as_str).collect();

    let descriptor = match op.body {
        BodyShape::None => op.descriptor(&params),
        BodyShape::Json => {
            let raw: String = Input::with_theme(&ctx.theme())
                .with_prompt("JSON body")
                .default("{}".to_string())
                .interact_text()?;
            let body = parse_json_body(&raw)?;
            op.json_descriptor(&params, &body)
        }
        BodyShape::Multipart => {
            let path: String = Input::with_theme(&ctx.theme())
                .with_prompt("File to upload")
                .interact_text()?;
            op.multipart_descriptor(&params, read_file_part(Path::new(path.trim()))?)
        }
    };

    let ok = ctx.execute(op, descriptor).await?;
    if ok && op.issues_credential {
        ctx.print_role();
    }
    Ok(ok)
}

fn parse_json_body(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw.trim()).context("body is not valid JSON")?;
    anyhow::ensure!(value.is_object(), "body must be a JSON object");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumni_client::api::{admin, events};

    #[test]
    fn test_admin_operations_hidden_from_members() {
        let member = visible_operations(Role::Member);
        assert!(member.iter().all(|op| op.domain != Domain::Admin));
        assert!(member.contains(&&events::JOIN));

        let anonymous = visible_operations(Role::Anonymous);
        assert_eq!(anonymous.len(), member.len());
    }

    #[test]
    fn test_administrators_see_everything() {
        let ops = visible_operations(Role::Administrator);
        assert_eq!(ops.len(), api::ALL.len());
        assert!(ops.contains(&&admin::BAN_USER));
    }

    #[test]
    fn test_label_shows_method_and_path() {
        let text = label(&events::LEAVE);
        assert!(text.starts_with("events.leave"));
        assert!(text.contains("DELETE"));
        assert!(text.ends_with("/events/{id}/participants"));
    }

    #[test]
    fn test_parse_json_body() {
        assert_eq!(parse_json_body(" {} ").unwrap(), serde_json::json!({}));
        assert!(parse_json_body("{\"email\": ").is_err());
        assert!(parse_json_body("[1, 2]").is_err());
    }
}
