//! A class extends at most one base.

use graph_mapper::Class;

#[derive(Class)]
struct Party;

#[derive(Class)]
struct Customer {
    #[graph_mapper(base)]
    party: Party,
    #[graph_mapper(base)]
    other: Party,
}

fn main() {}
