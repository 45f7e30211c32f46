#[tokio::main]
async fn main() -> anyhow::Result<()> {
    leshono_server::run().await
}
