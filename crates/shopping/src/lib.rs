pub mod aggregation;
pub mod display;
pub mod units;

// Re-export commonly used types
pub use aggregation::{can_combine, generate_grocery_list, normalize_name};
pub use display::{format_grocery_list, format_quantity, group_by_category, CategoryGroup};
pub use units::{are_compatible_units, normalize_unit};
