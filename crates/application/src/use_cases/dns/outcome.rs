use hickory_proto::op::Message;
use std::fmt;

/// Why a query was answered with silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Non-local requester asked about a private zone.
    PrivateZone,
    /// Non-local requester asked for general recursion.
    NonLocalRecursion,
    /// The zone upstream did not produce a reply.
    UpstreamUnavailable,
    /// Every resolver in the pool failed.
    ResolversExhausted,
    /// The requester's transport could not be determined, so nothing can be forwarded.
    UnsupportedTransport,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrivateZone => "private_zone",
            Self::NonLocalRecursion => "non_local_recursion",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::ResolversExhausted => "resolvers_exhausted",
            Self::UnsupportedTransport => "unsupported_transport",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal action for one query: write a reply, or write nothing at all.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    Reply(Message),
    Drop(DropReason),
}

impl QueryOutcome {
    pub fn reply(&self) -> Option<&Message> {
        match self {
            Self::Reply(message) => Some(message),
            Self::Drop(_) => None,
        }
    }

    pub fn drop_reason(&self) -> Option<DropReason> {
        match self {
            Self::Reply(_) => None,
            Self::Drop(reason) => Some(*reason),
        }
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, Self::Drop(_))
    }
}
