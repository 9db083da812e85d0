mod arena;
mod handle;
mod node;
mod raw_rbtree;

pub use node::Color;

pub(crate) use handle::Handle;
pub(crate) use raw_rbtree::RawRbTree;
