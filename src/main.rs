#[tokio::main]
async fn main() -> anyhow::Result<()> {
    raghub::tracing::init();
    raghub::app::run().await
}
