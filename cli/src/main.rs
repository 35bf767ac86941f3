use clap::Parser;
use colabnet_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Las credenciales pueden venir de un .env en el directorio actual.
  let _ = dotenvy::dotenv();
  colabnet_cli::init_logging();

  colabnet_cli::run(Cli::parse()).await
}
