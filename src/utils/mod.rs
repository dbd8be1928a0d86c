pub mod arena;
pub mod bitset;
