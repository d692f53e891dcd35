use thiserror::Error;

use crate::dns::executor::ExecutionError;
use crate::dns::system::SystemOps;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("interface listing command failed: {0}")]
    Listing(#[source] ExecutionError),
    #[error("failed to read interface listing results: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;

/// Parses the tabular output of the interface listing command into interface
/// names.
///
/// The first two lines are title/header and skipped. Each remaining line is
/// split on whitespace runs; the first three tokens are fixed status columns
/// (admin state, link state, type) and the rest is the interface name, which
/// may itself contain spaces and is re-joined with single spaces. Lines with
/// no name tokens (separator rows, trailing blanks) are dropped.
///
/// The three-column prefix is assumed, matching the documented behavior of
/// the underlying command on English installs.
pub fn parse_interface_table(raw: &str) -> Vec<String> {
    let mut interfaces = Vec::new();
    for line in raw.lines().skip(2) {
        let name = line
            .split_whitespace()
            .skip(3)
            .collect::<Vec<_>>()
            .join(" ");
        let name = name.trim();
        if !name.is_empty() {
            interfaces.push(name.to_string());
        }
    }
    interfaces
}

/// Runs the interface listing through the OS command layer and parses the
/// result. Interfaces are never cached; every operation discovers afresh.
pub async fn discover(sys: &dyn SystemOps) -> Result<Vec<String>> {
    let raw = sys.list_interfaces().await?;
    Ok(parse_interface_table(&raw))
}
