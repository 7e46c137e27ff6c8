mod job;
mod status;

pub use job::*;
pub use status::*;
