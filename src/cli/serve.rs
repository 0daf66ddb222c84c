use crate::{config::Config, error, info, server, warning};

/// Runs the HTTP service until Ctrl-C.
///
/// Configuration errors and bind failures are fatal: the service cannot do
/// anything useful without credentials or a socket.
pub async fn serve(address: Option<String>, open_browser: bool) {
    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };
    if let Some(address) = address {
        config.server_address = address;
    }

    let address = config.server_address.clone();
    let state = match server::AppState::new(config) {
        Ok(state) => state,
        Err(e) => error!("Cannot initialise HTTP client. Err: {}", e),
    };

    let listener = match server::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => error!("Cannot bind {}. Err: {}", address, e),
    };

    let login_url = match listener.local_addr() {
        Ok(addr) => format!("http://{addr}/login"),
        Err(_) => format!("http://{address}/login"),
    };
    info!("Listening on {}", address);

    if open_browser && webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    if let Err(e) = server::start_api_server(listener, state).await {
        error!("Server stopped. Err: {}", e);
    }
    info!("Shut down");
}
