//! `methods` on a class that is not an interface.

use graph_mapper::Class;

#[derive(Class)]
#[graph_mapper(abstract, methods = "price")]
enum Priced {}

fn main() {}
