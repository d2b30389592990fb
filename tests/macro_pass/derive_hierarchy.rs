use graph_mapper::prelude::*;

#[derive(Class)]
#[graph_mapper(union)]
enum Meal {}

#[derive(Class)]
#[graph_mapper(abstract)]
struct MealEntity {
    name: String,
}

#[derive(Class, Accessors)]
struct SoupEntity {
    #[graph_mapper(base)]
    meal: MealEntity,
}

#[derive(Class, Accessors, Default)]
struct DayMenuItemDto {
    #[graph_mapper(set, class = Meal)]
    meal: Option<Box<dyn Object>>,
}

fn main() {
    let soup = SoupEntity {
        meal: MealEntity {
            name: "Tomato".to_string(),
        },
    };
    let object: &dyn Object = &soup;
    assert_eq!(object.downcast_ref::<MealEntity>().map(|m| m.name.as_str()), Some("Tomato"));
    assert!(DayMenuItemDto::default().meal.is_none());
}
