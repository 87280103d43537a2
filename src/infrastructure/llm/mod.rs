mod open_router_client;

pub use open_router_client::OpenRouterClient;
