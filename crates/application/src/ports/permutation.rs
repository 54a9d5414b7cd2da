/// Source of the resolver visiting order.
pub trait PermutationSource: Send + Sync {
    /// Returns every index in `0..len` exactly once, in random order.
    fn permutation(&self, len: usize) -> Vec<usize>;
}
