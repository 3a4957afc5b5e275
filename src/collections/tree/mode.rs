mod sealed {
    pub trait Sealed {}

    impl Sealed for super::RedBlack {}
    impl Sealed for super::Unbalanced {}
}

/// The balancing strategy of a tree-backed container. Implemented only by [`RedBlack`] and
/// [`Unbalanced`]; the trait is sealed because the tree internals rely on these being the only
/// two modes.
///
/// The flag is a `const` so that the compiler removes the fixup paths entirely from the
/// unbalanced variant.
pub trait Balance: sealed::Sealed {
    const BALANCED: bool;
}

/// Tag type selecting red-black balancing: height is kept at or below `2 * log2(n + 1)` with at
/// most two rotations per insertion and three per removal.
pub struct RedBlack;

impl Balance for RedBlack {
    const BALANCED: bool = true;
}

/// Tag type selecting a plain binary search tree with no rebalancing. Worst case height (and
/// therefore lookup cost) is `n`, reached by inserting keys in sorted order.
pub struct Unbalanced;

impl Balance for Unbalanced {
    const BALANCED: bool = false;
}
