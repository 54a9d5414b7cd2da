mod exchanger;
mod permutation;

pub use exchanger::Exchanger;
pub use permutation::PermutationSource;
