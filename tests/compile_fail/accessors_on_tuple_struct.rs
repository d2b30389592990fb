//! Accessors are named, so tuple structs have none.

use graph_mapper::Accessors;

#[derive(Accessors)]
struct Pair(u32, u32);

fn main() {}
