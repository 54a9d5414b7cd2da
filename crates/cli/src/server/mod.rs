pub mod dns;
pub mod supervisor;

pub use dns::start_listeners;
