mod default_forward;
mod outcome;
mod reply;
mod router;
mod zone_query;

pub use default_forward::DefaultForwarder;
pub use outcome::{DropReason, QueryOutcome};
pub use reply::{fqdn, OVERRIDE_TTL};
pub use router::QueryRouter;
pub use zone_query::ZoneQueryEngine;
