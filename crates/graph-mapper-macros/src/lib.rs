//! Graph Mapper Proc Macros
//!
//! # Macros
//!
//! - `#[derive(Class)]` - Implement the `Class` trait for a type
//! - `#[derive(Accessors)]` - Expose relation fields to the binding registry
//!
//! # Example
//!
//! ```ignore
//! use graph_mapper_macros::{Accessors, Class};
//!
//! #[derive(Class, Accessors)]
//! #[graph_mapper(name = "SoupEntity")]
//! pub struct SoupEntity {
//!     #[graph_mapper(base)]
//!     pub meal: MealEntity,
//!
//!     #[graph_mapper(get)]
//!     pub recipe: Option<RecipeEntity>,
//! }
//! ```

use proc_macro::TokenStream;

mod attrs;
mod derive_accessors;
mod derive_class;

/// Derive the `Class` trait for a type.
///
/// # Attributes
///
/// - `#[graph_mapper(name = "...")]` - Override the class name
/// - `#[graph_mapper(abstract)]` - The class is never instantiated itself
/// - `#[graph_mapper(interface)]` - Marker interface
/// - `#[graph_mapper(interface, methods = "a, b")]` - Interface declaring methods
/// - `#[graph_mapper(union)]` - Marker interface declaring no methods
///
/// # Field Attributes
///
/// - `#[graph_mapper(base)]` - The field holds the superclass part
#[proc_macro_derive(Class, attributes(graph_mapper))]
pub fn derive_class(input: TokenStream) -> TokenStream {
    derive_class::derive_class_impl(input)
}

/// Derive the `Accessors` trait for a struct.
///
/// # Field Attributes
///
/// - `#[graph_mapper(get)]` - Register a getter
/// - `#[graph_mapper(set)]` - Register a setter
/// - `#[graph_mapper(get, set)]` - Register both
/// - `#[graph_mapper(name = "...")]` - Override the accessor name
/// - `#[graph_mapper(set, class = Type)]` - Element class of a `Box<dyn Object>` setter
///
/// # Example
///
/// ```ignore
/// #[derive(Class, Accessors, Default)]
/// pub struct DayMenuItemDto {
///     #[graph_mapper(set, class = SoupDto)]
///     pub side_dish: Option<Box<dyn Object>>,
///
///     #[graph_mapper(set, name = "mealType")]
///     pub kind: Option<MealTypeDto>,
/// }
/// ```
#[proc_macro_derive(Accessors, attributes(graph_mapper))]
pub fn derive_accessors(input: TokenStream) -> TokenStream {
    derive_accessors::derive_accessors_impl(input)
}
