//! `class` on a field that is only read.

use graph_mapper::{Accessors, Object};

#[derive(Accessors)]
struct ItemDto {
    #[graph_mapper(get, class = ItemDto)]
    meal: Option<Box<dyn Object>>,
}

fn main() {}
