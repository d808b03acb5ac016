//! Property tests for menutree.
//!
//! Properties use randomized record lists to protect invariants like
//! "every record lands in the tree exactly once" and "filtering never
//! drops rows".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/tree_builder.rs"]
mod tree_builder;

#[path = "properties/selection.rs"]
mod selection;
