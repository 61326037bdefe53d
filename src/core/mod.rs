pub mod audit;
pub mod auth;
pub mod churns;
pub mod dashboard;
pub mod editing;
pub mod filter;
pub mod map;
pub mod notes;
pub mod pages;
pub mod target;
pub mod upsells;
