//! Deterministic rendering of a [`querysculptor_model::QueryState`] into
//! GraphQL document text — the inverse of nothing; there is no parser back
//! into `QueryState`, only forward into text that `querysculptor-validator`
//! and the upstream endpoint can then parse on their own terms.

mod render;

pub use render::render_query_state;
