pub mod algorithm;
pub mod constants;
pub mod name;
pub mod spec;
pub mod template;
pub mod usage;
