//! Storage models: the mention predicate and the bulk-import document.

mod import_bundle;
mod mention_query;

pub use import_bundle::ImportBundle;
pub use mention_query::MentionQuery;
