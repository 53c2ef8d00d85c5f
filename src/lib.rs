pub mod config;
pub mod routes;
pub mod services;

#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
}
