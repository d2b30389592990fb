//! Misspelled type attribute.

use graph_mapper::Class;

#[derive(Class)]
#[graph_mapper(sealed)]
struct MealEntity;

fn main() {}
