use thiserror::Error;

use crate::config::AppConfig;
use crate::dns::discovery::{self, DiscoveryError};
use crate::dns::executor::ExecutionError;
use crate::dns::fetch::FetchError;
use crate::dns::script;
use crate::dns::system::SystemOps;
use crate::dns::types::{Browser, DnsAddress, EventSink, StatusEvent};
use crate::dns::validation;

/// Errors that end the orchestrator for good. After one of these, the state
/// is `Failed` and no further operation is possible; the caller decides
/// whether (and how) to terminate the process.
#[derive(Error, Debug)]
pub enum StartError {
    #[error("failed retrieving DNS: {0}")]
    Fetch(#[source] FetchError),
    #[error("invalid or unreachable DNS `{0}`")]
    InvalidDns(String),
    #[error("DNS loading was already attempted")]
    AlreadyStarted,
}

/// Errors from apply/reset. These are recoverable: the orchestrator is back
/// in `Ready` and the operation may be retried.
#[derive(Error, Debug)]
pub enum OperationError {
    #[error("interface discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),
    #[error("script execution failed: {0}")]
    Execution(#[from] ExecutionError),
    #[error("no DNS loaded; the operation requires the Ready state")]
    NotReady,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum State {
    Uninitialized,
    LoadingDns,
    Ready,
    Applying,
    Resetting,
    Failed,
}

/// Sequences fetch → validate → discover → build → execute and reports
/// progress through the event sink.
///
/// One operation at a time: callers must not overlap `start`, `apply` and
/// `reset`, which holds naturally since each is awaited to completion.
pub struct DnsOrchestrator {
    config: AppConfig,
    sys: Box<dyn SystemOps>,
    sink: Box<dyn EventSink>,
    state: State,
    dns: Option<DnsAddress>,
}

impl DnsOrchestrator {
    pub fn new(config: AppConfig, sys: Box<dyn SystemOps>, sink: Box<dyn EventSink>) -> Self {
        Self {
            config,
            sys,
            sink,
            state: State::Uninitialized,
            dns: None,
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> State {
        self.state
    }

    /// The validated address, available once `start` has succeeded.
    #[allow(dead_code)]
    pub fn dns(&self) -> Option<&DnsAddress> {
        self.dns.as_ref()
    }

    fn emit(&self, event: StatusEvent) {
        self.sink.emit(event);
    }

    /// Fetches and validates the DNS address. Failure here is terminal.
    pub async fn start(&mut self) -> Result<(), StartError> {
        if self.state != State::Uninitialized {
            return Err(StartError::AlreadyStarted);
        }
        self.state = State::LoadingDns;

        self.emit(StatusEvent::info("Receiving DNS..."));
        let body = match self.sys.fetch_text(&self.config.dns_url).await {
            Ok(body) => body,
            Err(e) => {
                self.state = State::Failed;
                self.emit(StatusEvent::failure(
                    "Failed",
                    "Failed retrieving DNS, check your internet connection.",
                ));
                return Err(StartError::Fetch(e));
            }
        };

        self.emit(StatusEvent::info("Data received. Verifying DNS..."));
        let candidate = body.trim();
        match validation::validate(candidate, self.sys.as_ref()).await {
            Some(address) => {
                self.emit(StatusEvent::success("Received DNS is valid, ready to change."));
                self.dns = Some(address);
                self.state = State::Ready;
                Ok(())
            }
            None => {
                self.state = State::Failed;
                self.emit(StatusEvent::failure("Invalid DNS", "Invalid DNS."));
                Err(StartError::InvalidDns(candidate.to_string()))
            }
        }
    }

    /// Binds the loaded DNS to every discovered interface. Only valid from
    /// `Ready`; on failure the orchestrator returns to `Ready` for a retry.
    ///
    /// When `browser` is given and the apply succeeded, that browser is
    /// started in private mode; a launch failure is reported but does not
    /// change the apply outcome.
    pub async fn apply(&mut self, browser: Option<Browser>) -> Result<(), OperationError> {
        if self.state != State::Ready {
            return Err(OperationError::NotReady);
        }
        let address = self.dns.clone().expect("Ready implies a loaded DNS");
        self.state = State::Applying;

        self.emit(StatusEvent::info("Changing DNS..."));
        let result = self.apply_inner(&address).await;
        self.state = State::Ready;

        match result {
            Ok(()) => {
                self.emit(StatusEvent::success("DNS changed successfully."));
                if let Some(browser) = browser {
                    self.launch_browser(browser).await;
                }
                Ok(())
            }
            Err(e) => {
                self.emit(StatusEvent::failure("Changing DNS failed", e.to_string()));
                Err(e)
            }
        }
    }

    async fn apply_inner(&self, address: &DnsAddress) -> Result<(), OperationError> {
        let interfaces = discovery::discover(self.sys.as_ref()).await?;
        let script = script::build_apply_script(
            &self.config.artifacts.change_file,
            &interfaces,
            address,
        );
        self.sys.run_script(&script).await?;
        Ok(())
    }

    /// Reverts every discovered interface to DHCP-sourced DNS. Same state
    /// and failure semantics as [`Self::apply`].
    pub async fn reset(&mut self) -> Result<(), OperationError> {
        if self.state != State::Ready {
            return Err(OperationError::NotReady);
        }
        self.state = State::Resetting;

        self.emit(StatusEvent::info("Resetting..."));
        let result = self.reset_inner().await;
        self.state = State::Ready;

        match result {
            Ok(()) => {
                self.emit(StatusEvent::success("All DNS were set to default."));
                Ok(())
            }
            Err(e) => {
                self.emit(StatusEvent::failure("Resetting failed", e.to_string()));
                Err(e)
            }
        }
    }

    async fn reset_inner(&self) -> Result<(), OperationError> {
        let interfaces = discovery::discover(self.sys.as_ref()).await?;
        let script = script::build_reset_script(&self.config.artifacts.reset_file, &interfaces);
        self.sys.run_script(&script).await?;
        Ok(())
    }

    async fn launch_browser(&self, browser: Browser) {
        if let Err(e) = self
            .sys
            .launch_browser(browser, &self.config.landing_url)
            .await
        {
            self.emit(StatusEvent::failure(
                format!(
                    "Error: {} doesn't seem to be installed on this device.",
                    browser.label()
                ),
                format!(
                    "You can always start it manually as the DNS was changed anyway. ({})",
                    e
                ),
            ));
        }
    }
}
