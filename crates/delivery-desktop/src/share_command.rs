//! Share-sheet adapter backed by an external handler command.
//!
//! Desktop systems have no universal share sheet, so the handoff goes
//! through a user-configured command: the general handler for plain
//! shares, or an entry from the per-target table when the request names
//! a single target. Title and message travel as `--title`/`--message`
//! arguments, followed by the staged file paths.

use std::collections::HashMap;
use std::process::Command;

use tracing::info;

use vitrina_common::{ShareDefaults, VitrinaError, VitrinaResult};
use vitrina_delivery_core::{ShareReceipt, ShareRequest, ShareSheet};

/// Hands share batches to an external command.
#[derive(Debug, Clone)]
pub struct CommandShareSheet {
    handler: Option<String>,
    targets: HashMap<String, String>,
}

impl CommandShareSheet {
    /// Build the adapter from share configuration.
    pub fn from_defaults(share: &ShareDefaults) -> Self {
        Self {
            handler: share.handler.clone(),
            targets: share.targets.clone(),
        }
    }

    fn resolve_route(&self, target: Option<&str>) -> VitrinaResult<(String, String)> {
        match target {
            Some(name) => self
                .targets
                .get(name)
                .map(|command| (name.to_string(), command.clone()))
                .ok_or_else(|| {
                    VitrinaError::delivery(format!("Unknown share target: {name}"))
                }),
            None => self
                .handler
                .clone()
                .map(|command| ("share sheet".to_string(), command))
                .ok_or_else(|| {
                    VitrinaError::unsupported(
                        "No share handler configured; set share.handler in the configuration",
                    )
                }),
        }
    }
}

impl ShareSheet for CommandShareSheet {
    fn share_files(&self, request: &ShareRequest) -> VitrinaResult<ShareReceipt> {
        if request.files.is_empty() {
            return Err(VitrinaError::delivery("Nothing to share"));
        }
        for file in &request.files {
            if !file.exists() {
                return Err(VitrinaError::FileNotFound { path: file.clone() });
            }
        }

        let (route, command) = self.resolve_route(request.target.as_deref())?;
        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| VitrinaError::delivery("Share handler command is empty"))?;

        let mut cmd = Command::new(program);
        cmd.args(parts);
        if let Some(title) = &request.title {
            cmd.arg("--title").arg(title);
        }
        if let Some(message) = &request.message {
            cmd.arg("--message").arg(message);
        }
        cmd.args(&request.files);

        info!(route = %route, files = request.files.len(), "Handing files to share handler");
        let status = cmd.status().map_err(|e| {
            VitrinaError::delivery(format!("Failed to start share handler {program}: {e}"))
        })?;
        if !status.success() {
            return Err(VitrinaError::delivery(format!(
                "Share handler {program} exited with {status}"
            )));
        }

        Ok(ShareReceipt::now(route, request.files.len()))
    }

    fn is_available(&self) -> bool {
        let handler_ok = self
            .handler
            .as_deref()
            .and_then(|c| c.split_whitespace().next())
            .map(command_exists)
            .unwrap_or(false);
        let target_ok = self
            .targets
            .values()
            .filter_map(|c| c.split_whitespace().next())
            .any(command_exists);
        handler_ok || target_ok
    }

    fn name(&self) -> &str {
        "handler-command"
    }
}

pub(crate) fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn staged_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("vitrina_test_share");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, b"jpeg bytes").unwrap();
        path
    }

    fn sheet(handler: Option<&str>) -> CommandShareSheet {
        CommandShareSheet {
            handler: handler.map(String::from),
            targets: HashMap::new(),
        }
    }

    #[test]
    fn test_share_through_general_handler() {
        let sheet = sheet(Some("true"));
        let request = ShareRequest::new(vec![staged_file("a.jpg")])
            .with_title("Catalogue")
            .with_message("Two items");

        let receipt = sheet.share_files(&request).unwrap();
        assert_eq!(receipt.target, "share sheet");
        assert_eq!(receipt.files_delivered, 1);
    }

    #[test]
    fn test_named_target_routes_through_target_table() {
        let mut sheet = sheet(None);
        sheet
            .targets
            .insert("messenger".to_string(), "true".to_string());

        let request = ShareRequest::new(vec![staged_file("b.jpg")]).with_target("messenger");
        let receipt = sheet.share_files(&request).unwrap();
        assert_eq!(receipt.target, "messenger");
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let sheet = sheet(Some("true"));
        let request = ShareRequest::new(vec![staged_file("c.jpg")]).with_target("nowhere");
        let err = sheet.share_files(&request).unwrap_err();
        assert!(err.to_string().contains("Unknown share target"));
    }

    #[test]
    fn test_failing_handler_surfaces_as_delivery_error() {
        let sheet = sheet(Some("false"));
        let request = ShareRequest::new(vec![staged_file("d.jpg")]);
        let err = sheet.share_files(&request).unwrap_err();
        assert!(err.to_string().contains("exited"));
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let sheet = sheet(Some("true"));
        let err = sheet.share_files(&ShareRequest::new(vec![])).unwrap_err();
        assert!(err.to_string().contains("Nothing to share"));
    }

    #[test]
    fn test_missing_file_is_rejected_before_spawn() {
        let sheet = sheet(Some("true"));
        let request = ShareRequest::new(vec![PathBuf::from("/nonexistent/e.jpg")]);
        let err = sheet.share_files(&request).unwrap_err();
        assert!(matches!(err, VitrinaError::FileNotFound { .. }));
    }

    #[test]
    fn test_unconfigured_sheet_is_unavailable() {
        assert!(!sheet(None).is_available());
        assert!(sheet(Some("sh")).is_available());
    }
}
