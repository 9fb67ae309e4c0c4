mod ids;
mod page;
mod project;
mod task;

pub use ids::*;
pub use page::*;
pub use project::*;
pub use task::*;
