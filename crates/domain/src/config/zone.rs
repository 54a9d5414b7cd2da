use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One statically forwarded zone, as written in the configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ZoneConfig {
    #[serde(alias = "Name")]
    pub name: String,

    #[serde(default, alias = "Authoritative")]
    pub authoritative: bool,

    #[serde(alias = "Upstream")]
    pub upstream: String,

    #[serde(default, alias = "Private")]
    pub private: bool,

    #[serde(default, rename = "override", alias = "Override")]
    pub overrides: HashMap<String, String>,

    #[serde(default, alias = "NonLocalOverride")]
    pub non_local_override: HashMap<String, String>,

    #[serde(default, alias = "OverrideResponses")]
    pub override_responses: bool,
}

impl ZoneConfig {
    pub fn new(name: impl Into<String>, upstream: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            authoritative: false,
            upstream: upstream.into(),
            private: false,
            overrides: HashMap::new(),
            non_local_override: HashMap::new(),
            override_responses: false,
        }
    }
}
