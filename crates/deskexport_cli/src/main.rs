use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    deskexport_cli::app::run().await
}
