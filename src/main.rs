use std::process;

use css_in_js_language_server::logging;
use css_in_js_language_server::lsp::server::start_language_server;
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout belongs to the LSP stream, so setup failures go to stderr
    if let Err(e) = logging::init_logger(logging::level_from_env()) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    info!(
        "{} {} starting",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    start_language_server().await;

    info!("Language server stopped");
}
