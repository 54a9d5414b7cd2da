pub mod codec;
pub mod exchanger;

pub use codec::MessageCodec;
pub use exchanger::HickoryExchanger;
