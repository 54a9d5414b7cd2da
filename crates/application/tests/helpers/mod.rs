#![allow(dead_code)]

mod builders;
mod mock_exchanger;

pub use builders::*;
pub use mock_exchanger::{ExchangeCall, FixedPermutation, MockExchanger};
