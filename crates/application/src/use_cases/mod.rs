pub mod dns;

pub use dns::{DefaultForwarder, DropReason, QueryOutcome, QueryRouter, ZoneQueryEngine};
