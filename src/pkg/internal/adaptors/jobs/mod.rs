pub mod mutators;
pub mod query;
pub mod selectors;
pub mod spec;
