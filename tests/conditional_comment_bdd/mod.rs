//! Support modules for conditional comment BDD tests.

pub(crate) mod server;
pub(crate) mod state;

pub(crate) use server::DevOpsServer;
pub(crate) use state::CommentState;
