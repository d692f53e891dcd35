use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::config::ArtifactNames;
use crate::dns::discovery::DiscoveryError;
#[cfg(windows)]
use crate::dns::executor::CREATE_NO_WINDOW;
use crate::dns::executor::{self, ExecutionError, TransientArtifact};
use crate::dns::fetch::{self, FetchError};
use crate::dns::script;
use crate::dns::types::{Browser, CommandScript};

/// The OS-facing capability surface of the core.
///
/// Everything that touches the network or spawns a process goes through this
/// trait, so the sequencing, parsing and script-building logic can be
/// exercised against a substitute.
#[async_trait]
pub trait SystemOps: Send + Sync {
    /// Downloads a raw-text resource.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;

    /// Reachability probe for `address`. A probe error reads as unreachable.
    async fn probe(&self, address: &str) -> bool;

    /// Raw tabular output of the interface listing command.
    async fn list_interfaces(&self) -> Result<String, DiscoveryError>;

    /// Executes a generated script and waits for it to finish.
    async fn run_script(&self, script: &CommandScript) -> Result<(), ExecutionError>;

    /// Starts `browser` on `url` in private mode without waiting for it.
    async fn launch_browser(&self, browser: Browser, url: &str) -> Result<(), ExecutionError>;
}

#[async_trait]
impl<T: SystemOps> SystemOps for std::sync::Arc<T> {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch_text(url).await
    }

    async fn probe(&self, address: &str) -> bool {
        (**self).probe(address).await
    }

    async fn list_interfaces(&self) -> Result<String, DiscoveryError> {
        (**self).list_interfaces().await
    }

    async fn run_script(&self, script: &CommandScript) -> Result<(), ExecutionError> {
        (**self).run_script(script).await
    }

    async fn launch_browser(&self, browser: Browser, url: &str) -> Result<(), ExecutionError> {
        (**self).launch_browser(browser, url).await
    }
}

/// Concrete adapter shelling out to the host platform.
pub struct NativeSystem {
    artifacts: ArtifactNames,
}

impl NativeSystem {
    pub fn new(artifacts: ArtifactNames) -> Self {
        Self { artifacts }
    }
}

#[async_trait]
impl SystemOps for NativeSystem {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        fetch::fetch_text(url).await
    }

    async fn probe(&self, address: &str) -> bool {
        let mut command = Command::new("ping");
        #[cfg(windows)]
        command.args(["-n", "1", "-w", "4000", address]);
        #[cfg(not(windows))]
        command.args(["-c", "1", "-W", "4", address]);
        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        match command.status().await {
            Ok(status) => status.success(),
            Err(e) => {
                debug!("ping probe did not launch: {}", e);
                false
            }
        }
    }

    async fn list_interfaces(&self) -> Result<String, DiscoveryError> {
        let script =
            script::build_list_script(&self.artifacts.list_file, &self.artifacts.results_file);

        // Claim the results file up front so it is removed even when the
        // listing or the read below fails.
        let _results = TransientArtifact::claim(&self.artifacts.results_file);

        executor::run_script(&script)
            .await
            .map_err(DiscoveryError::Listing)?;

        Ok(std::fs::read_to_string(&self.artifacts.results_file)?)
    }

    async fn run_script(&self, script: &CommandScript) -> Result<(), ExecutionError> {
        executor::run_script(script).await
    }

    async fn launch_browser(&self, browser: Browser, url: &str) -> Result<(), ExecutionError> {
        let mut command = Command::new(browser.executable());
        command.args([browser.private_flag(), url]);
        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        command.spawn().map_err(ExecutionError::Launch)?;
        Ok(())
    }
}
