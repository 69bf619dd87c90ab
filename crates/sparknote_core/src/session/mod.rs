//! Modal editing state.

pub mod edit_session;
