pub mod sync;
pub mod variables;
