use std::path::Path;

use env_logger::Env;
use graph_oxide::app::GraphApp;
use graph_oxide::config::EngineConfig;
use graph_oxide::constants::config::CONFIG_FILE;

#[cfg(feature = "profile-with-puffin")]
fn start_puffin_server() -> Option<puffin_http::Server> {
    puffin::set_scopes_on(true);
    let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
    match puffin_http::Server::new(&addr) {
        Ok(server) => {
            log::info!("puffin server listening on {}", addr);
            Some(server)
        }
        Err(e) => {
            log::error!("failed to start puffin server: {}", e);
            None
        }
    }
}

fn main() -> eframe::Result {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = start_puffin_server();

    let config = EngineConfig::load_or_default(Path::new(CONFIG_FILE)).unwrap_or_else(|e| {
        log::warn!("ignoring {}: {}", CONFIG_FILE, e);
        EngineConfig::default()
    });

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "GraphOxide - Plot Composer",
        options,
        Box::new(|_| Ok(Box::new(GraphApp::new(config)))),
    )
}
