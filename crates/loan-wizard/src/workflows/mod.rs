pub mod catalog;
pub mod documents;
pub mod recommendation;
pub mod wizard;
