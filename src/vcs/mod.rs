//! Version control collaborator used by the publish action

mod git;

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

pub use git::GitCli;

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// The three version-control steps publishing needs
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Add `paths` (relative to the repository root) to the index
    async fn stage(&self, paths: &[PathBuf]) -> Result<(), VcsError>;

    /// Record the staged changes
    async fn commit(&self, message: &str) -> Result<(), VcsError>;

    /// Send local commits upstream
    async fn push(&self) -> Result<(), VcsError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every call and fails the steps it is told to fail
    #[derive(Default)]
    pub struct RecordingVcs {
        pub calls: Mutex<Vec<String>>,
        pub fail_commit: bool,
        pub fail_push: bool,
    }

    impl RecordingVcs {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn failure(command: &str) -> VcsError {
            VcsError::Failed {
                command: command.to_string(),
                status: "exit status: 1".to_string(),
                stderr: "simulated".to_string(),
            }
        }
    }

    #[async_trait]
    impl VersionControl for RecordingVcs {
        async fn stage(&self, paths: &[PathBuf]) -> Result<(), VcsError> {
            let paths: Vec<_> = paths.iter().map(|p| p.display().to_string()).collect();
            self.record(format!("stage {}", paths.join(" ")));
            Ok(())
        }

        async fn commit(&self, message: &str) -> Result<(), VcsError> {
            self.record(format!("commit {}", message));
            if self.fail_commit {
                return Err(Self::failure("git commit"));
            }
            Ok(())
        }

        async fn push(&self) -> Result<(), VcsError> {
            self.record("push".to_string());
            if self.fail_push {
                return Err(Self::failure("git push"));
            }
            Ok(())
        }
    }
}
