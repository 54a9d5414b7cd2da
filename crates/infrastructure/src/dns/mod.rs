pub mod forwarding;
pub mod load_balancer;
pub mod server;
pub mod transport;

pub use forwarding::{HickoryExchanger, MessageCodec};
pub use load_balancer::FastrandPermutation;
pub use server::{Connection, DnsRequestHandler, OriginExtractor};
