pub mod compare;
pub mod domain;
pub mod engine;
pub mod registry;
pub mod traits;
