use crate::DomainError;
use ipnetwork::IpNetwork;
use std::net::IpAddr;

/// The CIDR ranges whose members count as local requesters.
///
/// Local origin gates both private zones and general recursive forwarding.
#[derive(Debug, Clone, Default)]
pub struct LocalNetworkSet {
    networks: Vec<IpNetwork>,
}

impl LocalNetworkSet {
    pub fn from_cidrs<S: AsRef<str>>(cidrs: &[S]) -> Result<Self, DomainError> {
        let mut networks = Vec::with_capacity(cidrs.len());

        for cidr in cidrs {
            let cidr = cidr.as_ref().trim();
            let network: IpNetwork = cidr
                .parse()
                .map_err(|e| DomainError::InvalidCidr(format!("{}: {}", cidr, e)))?;
            networks.push(network);
        }

        Ok(Self { networks })
    }

    /// True iff `ip` falls within any configured range. An absent address is never local.
    pub fn is_local(&self, ip: Option<IpAddr>) -> bool {
        let Some(ip) = ip else {
            return false;
        };
        let ip = ip.to_canonical();
        self.networks.iter().any(|network| network.contains(ip))
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}
