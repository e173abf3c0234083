//! `git` command-line implementation of [`VersionControl`]

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use super::{VcsError, VersionControl};
use crate::config::GitConfig;

/// Runs `git` in a repository checkout
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_dir: PathBuf,
    config: GitConfig,
}

impl GitCli {
    pub fn new<P: AsRef<Path>>(repo_dir: P, config: GitConfig) -> Self {
        Self {
            repo_dir: repo_dir.as_ref().to_path_buf(),
            config,
        }
    }

    async fn run(&self, args: Vec<OsString>) -> Result<String, VcsError> {
        let command = format!(
            "git {}",
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );
        tracing::debug!("Running {} in {:?}", command, self.repo_dir);

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.repo_dir)
            .output()
            .await
            .map_err(|source| VcsError::Spawn {
                command: command.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let mut stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.is_empty() {
                stderr = String::from_utf8_lossy(&output.stdout).trim().to_string();
            }
            Err(VcsError::Failed {
                command,
                status: output.status.to_string(),
                stderr,
            })
        }
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn stage(&self, paths: &[PathBuf]) -> Result<(), VcsError> {
        let mut args: Vec<OsString> = vec!["add".into(), "--".into()];
        args.extend(paths.iter().map(|p| p.as_os_str().to_owned()));
        self.run(args).await.map(|_| ())
    }

    async fn commit(&self, message: &str) -> Result<(), VcsError> {
        let args: Vec<OsString> = vec![
            "-c".into(),
            format!("user.name={}", self.config.author_name).into(),
            "-c".into(),
            format!("user.email={}", self.config.author_email).into(),
            "-c".into(),
            "commit.gpgsign=false".into(),
            "commit".into(),
            "-m".into(),
            message.into(),
        ];
        self.run(args).await.map(|_| ())
    }

    async fn push(&self) -> Result<(), VcsError> {
        let args: Vec<OsString> = vec![
            "push".into(),
            self.config.remote.clone().into(),
            self.config.branch.clone().into(),
        ];
        self.run(args).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_available() -> bool {
        std::process::Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    async fn init_repo() -> (TempDir, GitCli) {
        let dir = TempDir::new().unwrap();
        let git = GitCli::new(dir.path(), GitConfig::default());
        git.run(vec!["init".into(), "-q".into()]).await.unwrap();
        (dir, git)
    }

    #[tokio::test]
    async fn test_stage_and_commit() {
        if !git_available() {
            return;
        }
        let (dir, git) = init_repo().await;
        std::fs::write(dir.path().join("a.mdx"), "hi").unwrap();

        git.stage(&[PathBuf::from("a.mdx")]).await.unwrap();
        git.commit("post: a").await.unwrap();

        let log = git
            .run(vec!["log".into(), "--format=%an <%ae> %s".into()])
            .await
            .unwrap();
        assert_eq!(log.trim(), "owner <owner@example.com> post: a");

        // nothing left to commit
        assert!(matches!(
            git.commit("post: a").await,
            Err(VcsError::Failed { .. })
        ));
    }

    #[tokio::test]
    async fn test_stage_missing_path_fails() {
        if !git_available() {
            return;
        }
        let (_dir, git) = init_repo().await;
        let err = git.stage(&[PathBuf::from("nope.mdx")]).await.unwrap_err();
        assert!(err.to_string().contains("git add"));
    }

    #[tokio::test]
    async fn test_push_without_remote_fails() {
        if !git_available() {
            return;
        }
        let (_dir, git) = init_repo().await;
        assert!(matches!(git.push().await, Err(VcsError::Failed { .. })));
    }
}
