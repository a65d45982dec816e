pub mod audit;
pub mod broadcaster;
mod change_set;
pub(crate) mod reconciler;
pub mod report;
