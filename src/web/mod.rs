mod api;
mod api_doc;
mod server;
mod state;

pub use server::run_server;
pub use state::AppState;
