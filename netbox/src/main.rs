use netbox::NetBoxProvider;
use tfplug::ServerConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // stdout carries the plugin handshake, logs go to stderr
    let filter = std::env::var("TF_LOG")
        .ok()
        .and_then(|level| EnvFilter::try_new(level.to_lowercase()).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    if let Err(e) = tfplug::serve(NetBoxProvider::new(), ServerConfig::default()).await {
        eprintln!("terraform-provider-netbox: {}", e);
        std::process::exit(1);
    }
}
