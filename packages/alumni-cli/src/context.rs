//! Application context shared by every command

use alumni_client::{
    present, AlumniClient, ClientConfig, FilePart, Operation, Outcome, ReqwestTransport, Role,
    Session,
};
use anyhow::{Context, Result};
use colored::Colorize;
use console::style;
use dialoguer::theme::ColorfulTheme;
use std::path::Path;
use tracing::debug;

pub struct AppContext {
    pub client: AlumniClient<ReqwestTransport>,
    pub base_url: String,
}

impl AppContext {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: AlumniClient::from_config(config),
            base_url: config.base_url.clone(),
        }
    }

    pub fn theme(&self) -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn session(&self) -> Session {
        self.client.session()
    }

    /// Send the request and print its outcome. Returns `false` on any error.
    pub async fn execute(
        &self,
        operation: &Operation,
        descriptor: alumni_client::Result<alumni_client::RequestDescriptor>,
    ) -> Result<bool> {
        let descriptor = descriptor.with_context(|| format!("building {}", operation.key()))?;
        debug!(operation = %operation.key(), path = %descriptor.path, "Executing");
        let outcome = self.client.execute(&descriptor).await;
        Ok(self.show(&outcome))
    }

    pub fn show(&self, outcome: &Outcome) -> bool {
        let display = present(outcome);
        if display.is_error {
            println!("{}", display.text.red());
        } else {
            println!("{}", display.text.green());
        }
        !display.is_error
    }

    /// Warn before sending an admin request from a non-admin session.
    /// The service still decides.
    pub fn warn_if_not_admin(&self) {
        let role = self.session().role;
        if !role.is_admin() {
            self.print_warning(&format!(
                "Current role is {role}; the service will likely reject this request"
            ));
        }
    }

    pub fn print_role(&self) {
        let role = self.session().role;
        let styled = match role {
            Role::Administrator => style(role.as_str()).magenta().bold(),
            Role::Member => style(role.as_str()).cyan(),
            Role::Anonymous => style(role.as_str()).dim(),
        };
        println!("Role: {styled}");
    }

    pub fn print_header(&self, msg: &str) {
        println!();
        println!("{}", style(msg).bold());
    }

    pub fn print_success(&self, msg: &str) {
        println!("{}", style(msg).green());
    }

    pub fn print_warning(&self, msg: &str) {
        eprintln!("{}", style(msg).yellow());
    }

    pub fn print_info(&self, msg: &str) {
        println!("{}", style(msg).cyan());
    }
}

/// Read a file from disk into a multipart part named after the file.
pub fn read_file_part(path: &Path) -> Result<FilePart> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading upload file {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .context("upload path has no file name")?;
    Ok(FilePart::new(file_name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_file_part_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emails.csv");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"a@b.com\n")
            .unwrap();

        let part = read_file_part(&path).unwrap();
        assert_eq!(part.file_name, "emails.csv");
        assert_eq!(part.field, "file");
        assert_eq!(part.bytes, b"a@b.com\n");
    }

    #[test]
    fn test_read_file_part_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file_part(&dir.path().join("missing.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("missing.csv"));
    }
}
