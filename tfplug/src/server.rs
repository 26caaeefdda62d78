//! Server module for running Terraform providers
//!
//! Implements the go-plugin side of the handshake: Terraform starts the
//! provider binary with a magic cookie in the environment, reads a single
//! handshake line from stdout and then talks gRPC to the advertised address.
//! With AutoMTLS (PLUGIN_CLIENT_CERT set) the server generates a throwaway
//! certificate, advertises it in the handshake line and only accepts the
//! client certificate Terraform handed over.

use crate::error::{Result, TfplugError};
use crate::grpc::GrpcProviderServer;
use crate::proto::controller::grpc_controller_server::{GrpcController, GrpcControllerServer};
use crate::proto::controller::Empty;
use crate::proto::health::health_check_response::ServingStatus;
use crate::proto::health::health_server::{Health, HealthServer};
use crate::proto::health::{HealthCheckRequest, HealthCheckResponse};
use crate::provider::Provider;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::watch;
use tonic::transport::{Certificate, Identity, Server, ServerTlsConfig};
use tonic::{Request, Response, Status};
use tracing::{debug, info, warn};

pub const MAGIC_COOKIE_KEY: &str = "TF_PLUGIN_MAGIC_COOKIE";
pub const MAGIC_COOKIE_VALUE: &str =
    "d602bf8f470bc67ca7faa0386276bbdd4330efaf76d1a219cb4d6991ca9872b2";

const CORE_PROTOCOL_VERSION: u32 = 1;
const APP_PROTOCOL_VERSION: u32 = 6;

/// Server configuration for running a Terraform provider
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PEM certificate and key served when AutoMTLS is not negotiated
    pub tls: Option<(PathBuf, PathBuf)>,
    /// Maximum message size in bytes
    pub max_message_size: usize,
    /// How long in-flight RPCs may run after a shutdown request
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            tls: None,
            max_message_size: 256 << 20,
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tls(mut self, cert_path: PathBuf, key_path: PathBuf) -> Self {
        self.tls = Some((cert_path, key_path));
        self
    }

    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

/// Fails unless the process was launched by Terraform
pub fn check_magic_cookie() -> Result<()> {
    match std::env::var(MAGIC_COOKIE_KEY) {
        Ok(value) if value == MAGIC_COOKIE_VALUE => Ok(()),
        _ => Err(TfplugError::HandshakeError(
            "This binary is a plugin. These are not meant to be executed directly. \
             Please execute the program that consumes these plugins, which will \
             load any plugins automatically"
                .to_string(),
        )),
    }
}

/// Fails when Terraform offers a list of protocol versions without v6
fn check_protocol_versions() -> Result<()> {
    let Ok(offered) = std::env::var("PLUGIN_PROTOCOL_VERSIONS") else {
        return Ok(());
    };
    let supported = offered
        .split(',')
        .any(|v| v.trim() == APP_PROTOCOL_VERSION.to_string());
    if supported {
        Ok(())
    } else {
        Err(TfplugError::HandshakeError(format!(
            "Terraform offered protocol versions {}, this provider only speaks {}",
            offered, APP_PROTOCOL_VERSION
        )))
    }
}

/// Self-signed server certificate for AutoMTLS
pub struct GeneratedCertificate {
    pub cert_pem: String,
    pub key_pem: String,
    pub cert_der: Vec<u8>,
}

pub fn generate_certificate() -> Result<GeneratedCertificate> {
    use rcgen::{
        BasicConstraints, CertificateParams, DnType, ExtendedKeyUsagePurpose, IsCa, KeyPair,
        KeyUsagePurpose,
    };

    let tls_err = |e: rcgen::Error| TfplugError::TlsError(e.to_string());

    let key_pair = KeyPair::generate().map_err(tls_err)?;
    let mut params = CertificateParams::new(vec!["localhost".to_string()]).map_err(tls_err)?;
    params
        .distinguished_name
        .push(DnType::OrganizationName, "HashiCorp");
    params.distinguished_name.push(DnType::CommonName, "localhost");
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    params.key_usages = vec![
        KeyUsagePurpose::DigitalSignature,
        KeyUsagePurpose::KeyEncipherment,
        KeyUsagePurpose::KeyCertSign,
    ];
    params.extended_key_usages = vec![
        ExtendedKeyUsagePurpose::ServerAuth,
        ExtendedKeyUsagePurpose::ClientAuth,
    ];

    let cert = params.self_signed(&key_pair).map_err(tls_err)?;
    Ok(GeneratedCertificate {
        cert_pem: cert.pem(),
        key_pem: key_pair.serialize_pem(),
        cert_der: cert.der().to_vec(),
    })
}

/// The line go-plugin expects on stdout
pub fn handshake_line(addr: &std::net::SocketAddr, server_cert_der: Option<&[u8]>) -> String {
    let base = format!(
        "{}|{}|tcp|{}|grpc",
        CORE_PROTOCOL_VERSION, APP_PROTOCOL_VERSION, addr
    );
    match server_cert_der {
        Some(der) => format!("{}|{}", base, STANDARD_NO_PAD.encode(der)),
        None => base,
    }
}

struct HealthService;

#[tonic::async_trait]
impl Health for HealthService {
    async fn check(
        &self,
        request: Request<HealthCheckRequest>,
    ) -> std::result::Result<Response<HealthCheckResponse>, Status> {
        let service = request.into_inner().service;
        match service.as_str() {
            "" | "plugin" => Ok(Response::new(HealthCheckResponse {
                status: ServingStatus::Serving as i32,
            })),
            other => Err(Status::not_found(format!("unknown service {}", other))),
        }
    }
}

struct ControllerService {
    shutdown: watch::Sender<bool>,
}

#[tonic::async_trait]
impl GrpcController for ControllerService {
    async fn shutdown(
        &self,
        _request: Request<Empty>,
    ) -> std::result::Result<Response<Empty>, Status> {
        info!("shutdown requested by terraform");
        self.shutdown.send_replace(true);
        Ok(Response::new(Empty {}))
    }
}

/// Main entry point for running a provider
pub async fn serve<P: Provider + 'static>(provider: P, config: ServerConfig) -> Result<()> {
    check_magic_cookie()?;
    check_protocol_versions()?;

    // another component may already have installed a provider
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let mut builder = Server::builder();
    let handshake = match std::env::var("PLUGIN_CLIENT_CERT") {
        Ok(client_cert) if !client_cert.is_empty() => {
            debug!("negotiating AutoMTLS");
            let generated = generate_certificate()?;
            let tls = ServerTlsConfig::new()
                .identity(Identity::from_pem(&generated.cert_pem, &generated.key_pem))
                .client_ca_root(Certificate::from_pem(client_cert));
            builder = builder
                .tls_config(tls)
                .map_err(|e| TfplugError::TlsError(e.to_string()))?;
            handshake_line(&addr, Some(&generated.cert_der))
        }
        _ => {
            if let Some((cert_path, key_path)) = &config.tls {
                let cert = tokio::fs::read(cert_path).await.map_err(|e| {
                    TfplugError::TlsError(format!("Failed to read certificate: {}", e))
                })?;
                let key = tokio::fs::read(key_path)
                    .await
                    .map_err(|e| TfplugError::TlsError(format!("Failed to read key: {}", e)))?;
                builder = builder
                    .tls_config(ServerTlsConfig::new().identity(Identity::from_pem(cert, key)))
                    .map_err(|e| TfplugError::TlsError(e.to_string()))?;
            }
            handshake_line(&addr, None)
        }
    };

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut drain_rx = shutdown_tx.subscribe();

    let provider_service = GrpcProviderServer::new(provider)
        .into_service()
        .max_decoding_message_size(config.max_message_size)
        .max_encoding_message_size(config.max_message_size);

    let server = builder
        .add_service(HealthServer::new(HealthService))
        .add_service(GrpcControllerServer::new(ControllerService {
            shutdown: shutdown_tx,
        }))
        .add_service(provider_service)
        .serve_with_incoming_shutdown(
            tokio_stream::wrappers::TcpListenerStream::new(listener),
            async move {
                let _ = shutdown_rx.wait_for(|stop| *stop).await;
            },
        );

    println!("{}", handshake);
    info!(%addr, "provider server listening");

    tokio::pin!(server);
    tokio::select! {
        result = &mut server => result?,
        _ = async {
            let _ = drain_rx.wait_for(|stop| *stop).await;
            tokio::time::sleep(config.shutdown_timeout).await;
        } => {
            warn!("graceful shutdown timed out");
        }
    }

    Ok(())
}
