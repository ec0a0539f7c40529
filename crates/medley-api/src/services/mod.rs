pub mod query;
pub mod reconcile;
