use kube::CustomResourceExt;
use nextcloud_operator::{NextCloud, Operator, OperatorConfig};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // `nextcloud-operator crd` prints the CustomResourceDefinition and exits.
    if std::env::args().nth(1).as_deref() == Some("crd") {
        return match serde_json::to_string_pretty(&NextCloud::crd()) {
            Ok(manifest) => {
                println!("{manifest}");
                std::process::ExitCode::SUCCESS
            }
            Err(e) => {
                error!("{e}");
                std::process::ExitCode::FAILURE
            }
        };
    }

    let result = match OperatorConfig::from_env() {
        Ok(config) => Operator::new(config).run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            std::process::ExitCode::FAILURE
        }
    }
}
