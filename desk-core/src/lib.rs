//! desk-core: transport-agnostic core for the help-desk admin console client.

pub mod config;
pub mod errors;
pub mod notify;
pub mod resource;
pub mod transport;

pub use config::{DeskConfig, DeskConfigSnapshot};
pub use errors::{DeskError, DeskResult, ErrorKind};
pub use notify::{MemoryNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use resource::{Resource, ResourceId};
pub use transport::{ApiTransport, Method, RequestConfig, Response};
