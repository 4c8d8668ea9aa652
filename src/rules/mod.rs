mod blanks_around_fences;
mod blanks_around_lists;
mod blanks_around_tables;

pub use blanks_around_fences::BlanksAroundFences;
pub use blanks_around_lists::BlanksAroundLists;
pub use blanks_around_tables::BlanksAroundTables;

use crate::rule::Rule;

/// All rules in detection order: fences, then lists, then tables
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(BlanksAroundFences::new()),
        Box::new(BlanksAroundLists::new()),
        Box::new(BlanksAroundTables::new()),
    ]
}
