use crate::DomainError;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use tracing::debug;

const WILDCARD_PREFIX: &str = "*.";

/// Static label -> address answers for one zone.
///
/// Exact keys are looked up directly. Keys starting with `*.` are wildcards:
/// `*.internal` matches every label ending in `.internal`. Wildcards are kept
/// ordered longest suffix first, so the most specific wildcard wins and
/// overlapping entries always resolve the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    exact: HashMap<String, Ipv4Addr>,
    wildcards: Vec<(String, Ipv4Addr)>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::new();
        for (label, ip) in entries {
            let ip: Ipv4Addr = ip.as_ref().trim().parse().map_err(|_| {
                DomainError::InvalidAddress(format!(
                    "override {} -> {} is not an IPv4 address",
                    label.as_ref(),
                    ip.as_ref()
                ))
            })?;
            table.insert(label.as_ref(), ip);
        }
        Ok(table)
    }

    pub fn insert(&mut self, label: &str, ip: Ipv4Addr) {
        match label.strip_prefix('*') {
            Some(suffix) if label.starts_with(WILDCARD_PREFIX) => {
                self.wildcards.retain(|(existing, _)| existing != suffix);
                self.wildcards.push((suffix.to_string(), ip));
                self.wildcards
                    .sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
            }
            _ => {
                self.exact.insert(label.to_string(), ip);
            }
        }
    }

    /// Looks up `label` (the query name with the zone suffix removed).
    /// Comparison is case-sensitive.
    pub fn resolve(&self, label: &str) -> Option<Ipv4Addr> {
        if let Some(ip) = self.exact.get(label) {
            debug!(label, ip = %ip, "Override exact match");
            return Some(*ip);
        }

        self.wildcards
            .iter()
            .find(|(suffix, _)| label.ends_with(suffix.as_str()))
            .map(|(suffix, ip)| {
                debug!(label, wildcard = %suffix, ip = %ip, "Override wildcard match");
                *ip
            })
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.wildcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.wildcards.is_empty()
    }
}
