pub mod discovery;
pub mod executor;
pub mod fetch;
pub mod orchestrator;
pub mod script;
pub mod system;
pub mod types;
pub mod validation;

pub use orchestrator::DnsOrchestrator;
pub use system::{NativeSystem, SystemOps};
pub use types::{Browser, CommandScript, DnsAddress, EventSink, StatusEvent};
