//! Misspelled field attribute.

use graph_mapper::Accessors;

#[derive(Accessors)]
struct ItemDto {
    #[graph_mapper(setter)]
    meal: Option<u32>,
}

fn main() {}
