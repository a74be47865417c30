pub mod engine;
pub mod input;
pub mod lower;
pub mod op;
pub mod tape;
