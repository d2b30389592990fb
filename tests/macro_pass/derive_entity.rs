use graph_mapper::prelude::*;

#[derive(Class, Accessors, Default)]
struct RecipeEntity {
    name: String,
}

#[derive(Class, Accessors, Default)]
#[graph_mapper(name = "LunchEntity")]
struct Lunch {
    #[graph_mapper(get)]
    recipe: Option<RecipeEntity>,
    #[graph_mapper(get)]
    variants: Vec<RecipeEntity>,
}

fn main() {
    let lunch = Lunch::default();
    assert_eq!(Lunch::type_name(), "LunchEntity");
    assert!(lunch.recipe.is_none());
    assert!(lunch.variants.is_empty());
}
