// Static front-end hosting
pub mod server;

pub use server::{static_router, StaticServer, StaticServerConfig};
