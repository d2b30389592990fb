//! Shared catering domain for the integration tests.
//!
//! Source entities describe a week menu as a caterer stores it. Target DTOs
//! are what a client receives. Meals are polymorphic: a day menu item refers
//! to a soup or a lunch through the `Meal` union.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use graph_mapper::prelude::*;
use graph_mapper::AccessorTable;

pub const DAY_MENUS: Label = Label::new("days");
pub const DAY_MENU_ITEMS: Label = Label::new("items");
pub const COURSES: Label = Label::new("courses");
pub const MEAL: Label = Label::new("meal");
pub const MEAL_TYPE: Label = Label::new("mealType");
pub const SIDE_DISHES: Label = Label::new("sideDishes");
pub const RECIPE: Label = Label::new("recipe");
pub const VARIANTS: Label = Label::new("variants");
pub const LISTED_VARIANTS: Label = Label::new("listedVariants");
pub const PROVIDER: Label = Label::new("provider");
pub const CUSTOMER: Label = Label::new("customer");

// ============================================================================
// Source entities
// ============================================================================

#[derive(Class, Accessors, Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RecipeEntity {
    pub name: String,
}

#[derive(Class, Accessors, Debug, Clone, Default)]
pub struct MealTypeEntity {
    pub code: String,
}

#[derive(Class, Accessors, Debug, Clone, Default)]
pub struct ProviderEntity {
    pub name: String,
}

#[derive(Class, Accessors, Debug, Clone, Default)]
pub struct CustomerEntity {
    pub name: String,
}

/// Common source supertype of every meal. Never instantiated.
#[derive(Class)]
#[graph_mapper(abstract)]
pub enum MealEntity {}

#[derive(Class, Accessors, Debug, Clone, Default)]
pub struct SoupEntity {
    pub name: String,
    pub vegetarian: bool,
    #[graph_mapper(get)]
    pub recipe: Option<RecipeEntity>,
    #[graph_mapper(get)]
    pub meal_type: Option<MealTypeEntity>,
}

#[derive(Class, Accessors, Debug, Clone, Default)]
pub struct LunchEntity {
    pub name: String,
    #[graph_mapper(get)]
    pub recipe: Option<RecipeEntity>,
    #[graph_mapper(get)]
    pub meal_type: Option<MealTypeEntity>,
    #[graph_mapper(get)]
    pub variants: Vec<Option<RecipeEntity>>,
    #[graph_mapper(get)]
    pub listed_variants: HashSet<RecipeEntity>,
}

/// A meal kind the mapper was never told about.
#[derive(Class, Debug, Default)]
pub struct DessertEntity {
    pub name: String,
}

/// Lazy-loading wrapper standing in for the entity it holds.
#[derive(Class)]
pub struct EntityProxy {
    pub target: Arc<dyn Object>,
}

impl EntityProxy {
    pub fn new(target: impl Class) -> Self {
        Self {
            target: Arc::new(target),
        }
    }
}

/// Unwraps [`EntityProxy`] instances.
pub fn unwrap_proxy(object: &dyn Object) -> &dyn Object {
    match object.downcast_ref::<EntityProxy>() {
        Some(proxy) => proxy.target.as_ref(),
        None => object,
    }
}

#[derive(Class, Accessors, Default)]
pub struct DayMenuItemEntity {
    #[graph_mapper(get)]
    pub meal: Option<Arc<dyn Object>>,
    #[graph_mapper(get)]
    pub meal_type: Option<MealTypeEntity>,
    #[graph_mapper(get)]
    pub side_dishes: HashSet<ObjectHandle>,
}

#[derive(Class, Accessors, Default)]
pub struct DayMenuEntity {
    pub day: u8,
    #[graph_mapper(get)]
    pub items: Vec<DayMenuItemEntity>,
    #[graph_mapper(get)]
    pub courses: Vec<Option<ObjectHandle>>,
}

/// Counts reads of its provider and customer relations.
#[derive(Class, Default)]
pub struct WeekMenuEntity {
    pub week: u32,
    pub days: Vec<DayMenuEntity>,
    pub provider: Option<ProviderEntity>,
    pub customer: Option<CustomerEntity>,
    pub provider_reads: AtomicUsize,
    pub customer_reads: AtomicUsize,
}

impl WeekMenuEntity {
    pub fn provider_reads(&self) -> usize {
        self.provider_reads.load(Ordering::SeqCst)
    }

    pub fn customer_reads(&self) -> usize {
        self.customer_reads.load(Ordering::SeqCst)
    }
}

impl Accessors for WeekMenuEntity {
    fn accessors(table: &mut AccessorTable<Self>) {
        table
            .getter("days", |week: &WeekMenuEntity| &week.days)
            .getter("provider", |week: &WeekMenuEntity| {
                week.provider_reads.fetch_add(1, Ordering::SeqCst);
                &week.provider
            })
            .getter("customer", |week: &WeekMenuEntity| {
                week.customer_reads.fetch_add(1, Ordering::SeqCst);
                &week.customer
            });
    }
}

// ============================================================================
// Target DTOs
// ============================================================================

#[derive(Class, Accessors, Debug, Default, PartialEq)]
pub struct RecipeDto {
    pub name: String,
}

#[derive(Class, Accessors, Debug, Default, PartialEq)]
pub struct MealTypeDto {
    pub code: String,
}

#[derive(Class, Accessors, Debug, Default, PartialEq)]
pub struct ProviderDto {
    pub name: String,
}

#[derive(Class, Accessors, Debug, Default, PartialEq)]
pub struct CustomerDto {
    pub name: String,
}

/// Marker union of all meal DTOs.
#[derive(Class)]
#[graph_mapper(union)]
pub enum Meal {}

#[derive(Class, Accessors, Debug, Default)]
#[graph_mapper(name = "SoupDTO")]
pub struct SoupDto {
    pub name: String,
    pub vegetarian: bool,
    #[graph_mapper(set)]
    pub recipe: Option<RecipeDto>,
    #[graph_mapper(set)]
    pub meal_type: Option<MealTypeDto>,
}

#[derive(Class, Accessors, Debug, Default)]
#[graph_mapper(name = "LunchDTO")]
pub struct LunchDto {
    pub name: String,
    #[graph_mapper(set)]
    pub recipe: Option<RecipeDto>,
    #[graph_mapper(set)]
    pub meal_type: Option<MealTypeDto>,
    #[graph_mapper(set)]
    pub variants: Option<Vec<Option<RecipeDto>>>,
    #[graph_mapper(set)]
    pub listed_variants: Vec<Option<RecipeDto>>,
}

#[derive(Class, Accessors, Debug, Default)]
pub struct DayMenuItemDto {
    #[graph_mapper(set, class = Meal)]
    pub meal: Option<Box<dyn Object>>,
    #[graph_mapper(set)]
    pub meal_type: Option<MealTypeDto>,
    #[graph_mapper(set, class = Meal)]
    pub side_dishes: Vec<Option<Box<dyn Object>>>,
}

#[derive(Class, Accessors, Debug, Default)]
pub struct DayMenuDto {
    pub day: u8,
    #[graph_mapper(set)]
    pub items: Option<Vec<Option<DayMenuItemDto>>>,
    #[graph_mapper(set, class = Meal)]
    pub courses: Vec<Option<Box<dyn Object>>>,
}

#[derive(Class, Accessors, Debug, Default)]
pub struct WeekMenuDto {
    pub week: u32,
    #[graph_mapper(set)]
    pub days: Option<Vec<Option<DayMenuDto>>>,
    #[graph_mapper(set)]
    pub provider: Option<ProviderDto>,
    #[graph_mapper(set)]
    pub customer: Option<CustomerDto>,
}

impl WeekMenuDto {
    /// The day menus, without null slots.
    pub fn day_menus(&self) -> Vec<&DayMenuDto> {
        self.days.iter().flatten().flatten().collect()
    }
}

impl DayMenuDto {
    pub fn menu_items(&self) -> Vec<&DayMenuItemDto> {
        self.items.iter().flatten().flatten().collect()
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Register the scalar mappers of the catering domain.
pub fn register_mappers(registry: &mut BindingRegistry) {
    registry
        .register_mapper(|e: &RecipeEntity| RecipeDto {
            name: e.name.clone(),
        })
        .register_mapper(|e: &MealTypeEntity| MealTypeDto {
            code: e.code.clone(),
        })
        .register_mapper(|e: &ProviderEntity| ProviderDto {
            name: e.name.clone(),
        })
        .register_mapper(|e: &CustomerEntity| CustomerDto {
            name: e.name.clone(),
        })
        .register_mapper(|e: &SoupEntity| SoupDto {
            name: e.name.clone(),
            vegetarian: e.vegetarian,
            ..Default::default()
        })
        .register_mapper(|e: &LunchEntity| LunchDto {
            name: e.name.clone(),
            ..Default::default()
        })
        .register_mapper(|_: &DayMenuItemEntity| DayMenuItemDto::default())
        .register_mapper(|e: &DayMenuEntity| DayMenuDto {
            day: e.day,
            ..Default::default()
        })
        .register_mapper(|e: &WeekMenuEntity| WeekMenuDto {
            week: e.week,
            ..Default::default()
        });
}

/// Declare the meal hierarchy and every relation binding.
pub fn register_bindings(registry: &mut BindingRegistry) -> Result<(), InitializationError> {
    registry.declare_union_hierarchy::<Meal, MealEntity>([
        ClassNode::of::<SoupDto, SoupEntity>(),
        ClassNode::of::<LunchDto, LunchEntity>(),
    ])?;

    registry
        .bind::<WeekMenuDto, WeekMenuEntity>()
        .list_field(DAY_MENUS)?
        .field(PROVIDER)?
        .field(CUSTOMER)?;
    registry
        .bind::<DayMenuDto, DayMenuEntity>()
        .list_field(DAY_MENU_ITEMS)?
        .list_field(COURSES)?;
    registry
        .bind::<DayMenuItemDto, DayMenuItemEntity>()
        .field(MEAL)?
        .field(MEAL_TYPE)?
        .set_field(SIDE_DISHES)?;
    registry
        .bind::<SoupDto, SoupEntity>()
        .field(RECIPE)?
        .field(MEAL_TYPE)?;
    registry
        .bind::<LunchDto, LunchEntity>()
        .field(RECIPE)?
        .field(MEAL_TYPE)?
        .list_field(VARIANTS)?
        .set_field(LISTED_VARIANTS)?;
    Ok(())
}

/// A fully set up catering registry that unwraps [`EntityProxy`] sources.
pub fn catering_registry() -> BindingRegistry {
    let mut registry = BindingRegistry::with_unproxy(unwrap_proxy);
    register_mappers(&mut registry);
    register_bindings(&mut registry).expect("catering bindings are valid");
    registry
}

// ============================================================================
// Selections
// ============================================================================

pub fn node(label: Label, children: impl IntoIterator<Item = SelectionNode>) -> SelectionNode {
    SelectionNode::new(label).with_children(children)
}

pub fn leaf(label: Label) -> SelectionNode {
    SelectionNode::new(label)
}

pub fn selection(children: impl IntoIterator<Item = SelectionNode>) -> SelectionGraph {
    SelectionGraph::new(children)
}

// ============================================================================
// Sample data
// ============================================================================

pub fn recipe(name: &str) -> RecipeEntity {
    RecipeEntity {
        name: name.to_string(),
    }
}

pub fn meal_type(code: &str) -> MealTypeEntity {
    MealTypeEntity {
        code: code.to_string(),
    }
}

pub fn soup(name: &str) -> SoupEntity {
    SoupEntity {
        name: name.to_string(),
        vegetarian: true,
        recipe: Some(recipe(&format!("{name} recipe"))),
        meal_type: Some(meal_type("STARTER")),
    }
}

pub fn lunch(name: &str) -> LunchEntity {
    LunchEntity {
        name: name.to_string(),
        recipe: Some(recipe(&format!("{name} recipe"))),
        meal_type: Some(meal_type("MAIN")),
        variants: vec![Some(recipe("small")), None, Some(recipe("large"))],
        listed_variants: [recipe("spicy"), recipe("mild")].into_iter().collect(),
    }
}

pub fn item(meal: impl Class) -> DayMenuItemEntity {
    let meal: Arc<dyn Object> = Arc::new(meal);
    DayMenuItemEntity {
        meal: Some(meal),
        meal_type: Some(meal_type("DAILY")),
        side_dishes: HashSet::new(),
    }
}

/// A week with two days: Monday serves a soup, Tuesday a lunch.
pub fn week_menu() -> WeekMenuEntity {
    WeekMenuEntity {
        week: 42,
        days: vec![
            DayMenuEntity {
                day: 1,
                items: vec![item(soup("Tomato"))],
                courses: Vec::new(),
            },
            DayMenuEntity {
                day: 2,
                items: vec![item(lunch("Goulash"))],
                courses: Vec::new(),
            },
        ],
        provider: Some(ProviderEntity {
            name: "Kitchen & Co".to_string(),
        }),
        customer: Some(CustomerEntity {
            name: "ACME".to_string(),
        }),
        ..Default::default()
    }
}
