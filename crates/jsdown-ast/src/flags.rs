use bitflags::bitflags;

bitflags! {
    /// Per-node boolean attributes, independent of the node's kind.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u16 {
        /// The link was written with `?.` and begins an optional-chain segment.
        const OPTIONAL_CHAIN_START = 1 << 0;
        /// Created by a transform rather than read from source.
        const SYNTHESIZED = 1 << 1;
    }
}
