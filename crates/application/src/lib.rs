//! queried application layer: ports and the query decision engine
pub mod ports;
pub mod use_cases;
