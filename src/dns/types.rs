use clap::ValueEnum;

/// A validated IPv4 DNS server address.
///
/// Constructed only through [`crate::dns::validation::validate`]; once built
/// it is held unchanged for the life of the process.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DnsAddress(String);

impl DnsAddress {
    pub(crate) fn new_unchecked(address: String) -> Self {
        Self(address)
    }

    #[allow(dead_code)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DnsAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One generated command sequence, bound to the fixed artifact file it will
/// be written to. Never reused across operations.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandScript {
    pub file_name: String,
    pub lines: Vec<String>,
}

/// Status reporting from the orchestrator to whatever renders it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum StatusEvent {
    Info(String),
    Success(String),
    Failure { message: String, detail: String },
}

impl StatusEvent {
    pub fn info(text: impl Into<String>) -> Self {
        Self::Info(text.into())
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::Success(text.into())
    }

    pub fn failure(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            detail: detail.into(),
        }
    }
}

/// Receives status events as an operation progresses.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: StatusEvent);
}

impl<T: EventSink> EventSink for std::sync::Arc<T> {
    fn emit(&self, event: StatusEvent) {
        (**self).emit(event)
    }
}

/// Browsers the optional post-apply launch knows how to start in private
/// mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
pub enum Browser {
    Chrome,
    Firefox,
}

impl Browser {
    pub fn label(&self) -> &'static str {
        match self {
            Browser::Chrome => "Chrome",
            Browser::Firefox => "Firefox",
        }
    }

    #[cfg(windows)]
    pub fn executable(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome.exe",
            Browser::Firefox => "firefox.exe",
        }
    }

    #[cfg(not(windows))]
    pub fn executable(&self) -> &'static str {
        match self {
            Browser::Chrome => "google-chrome",
            Browser::Firefox => "firefox",
        }
    }

    pub fn private_flag(&self) -> &'static str {
        match self {
            Browser::Chrome => "--incognito",
            Browser::Firefox => "-private-window",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_address_display() {
        let address = DnsAddress::new_unchecked("8.8.8.8".to_string());
        assert_eq!(address.to_string(), "8.8.8.8");
        assert_eq!(address.as_str(), "8.8.8.8");
    }

    #[test]
    fn test_status_event_constructors() {
        assert_eq!(
            StatusEvent::info("loading"),
            StatusEvent::Info("loading".to_string())
        );
        assert_eq!(
            StatusEvent::failure("Failed", "no route"),
            StatusEvent::Failure {
                message: "Failed".to_string(),
                detail: "no route".to_string(),
            }
        );
    }

    #[test]
    fn test_browser_private_flags() {
        assert_eq!(Browser::Chrome.private_flag(), "--incognito");
        assert_eq!(Browser::Firefox.private_flag(), "-private-window");
    }
}
