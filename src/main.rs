//! AML web backend binary.

use aml_web::server::{default_config_dir, ServerManager};

#[tokio::main]
async fn main() {
    // Configuration lives in the platform config directory
    let config_dir = default_config_dir();

    let mut manager = ServerManager::new(config_dir);

    match manager.start().await {
        Ok(port) => {
            println!("[aml-web] Listening on http://127.0.0.1:{}", port);
        }
        Err(e) => {
            eprintln!("[aml-web] Failed to start server: {}", e);
            std::process::exit(1);
        }
    }

    // Run until interrupted
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("[aml-web] Failed to listen for shutdown signal: {}", e);
    }

    println!("[aml-web] Shutting down");
    manager.stop();
}
