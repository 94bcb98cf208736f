//! Sub-applications whose view handlers the route table references.

pub mod app_one;
pub mod app_two;
