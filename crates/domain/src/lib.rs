//! queried domain layer
pub mod config;
pub mod errors;
pub mod network;
pub mod overrides;
pub mod server_addr;
pub mod transport;
pub mod zone;

pub use config::{CliOverrides, Config, ConfigError, ListenerFailurePolicy, ZoneConfig};
pub use errors::DomainError;
pub use network::LocalNetworkSet;
pub use overrides::OverrideTable;
pub use server_addr::ServerAddr;
pub use transport::{QueryOrigin, Transport};
pub use zone::ForwardedZone;
