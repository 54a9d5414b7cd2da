use crate::config::ZoneConfig;
use crate::{DomainError, OverrideTable, ServerAddr};
use std::net::SocketAddr;
use std::sync::Arc;

/// A forwarded zone ready for query handling: addresses parsed and
/// override tables compiled.
#[derive(Debug, Clone)]
pub struct ForwardedZone {
    name: Arc<str>,
    suffix: Arc<str>,
    pub authoritative: bool,
    pub upstream: SocketAddr,
    pub private: bool,
    pub overrides: OverrideTable,
    pub non_local_overrides: OverrideTable,
    pub override_responses: bool,
}

impl ForwardedZone {
    pub fn from_config(config: &ZoneConfig) -> Result<Self, DomainError> {
        let name = config.name.trim();
        if name.is_empty() || !name.ends_with('.') {
            return Err(DomainError::InvalidAddress(format!(
                "zone name '{}' must be fully qualified",
                config.name
            )));
        }

        let upstream = ServerAddr::parse(&config.upstream)?.socket_addr();
        let overrides = OverrideTable::from_entries(&config.overrides)?;
        let non_local_overrides = OverrideTable::from_entries(&config.non_local_override)?;

        Ok(Self {
            name: Arc::from(name),
            suffix: Arc::from(format!(".{}", name).as_str()),
            authoritative: config.authoritative,
            upstream,
            private: config.private,
            overrides,
            non_local_overrides,
            override_responses: config.override_responses,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Strips `.<zone>` from `fqdn`, returning the host label.
    ///
    /// Case-sensitive, and `None` when the name does not sit under the zone
    /// (including the zone apex itself).
    pub fn host_label<'a>(&self, fqdn: &'a str) -> Option<&'a str> {
        fqdn.strip_suffix(self.suffix.as_ref())
    }

    /// Whether `fqdn` is the zone apex or any name below it, ignoring ASCII case.
    pub fn covers(&self, fqdn: &str) -> bool {
        if fqdn.eq_ignore_ascii_case(&self.name) {
            return true;
        }
        fqdn.len() > self.suffix.len()
            && fqdn.is_char_boundary(fqdn.len() - self.suffix.len())
            && fqdn[fqdn.len() - self.suffix.len()..].eq_ignore_ascii_case(&self.suffix)
    }
}
