//! Version resolution and planning over a repository's tag namespace

pub mod differ;
pub mod planner;
pub mod resolver;

pub use differ::ProjectDiffer;
pub use planner::VersionPlanner;
pub use resolver::{ProjectVersionResolver, INITIAL_VERSION};
