use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    inventory_finder::run().await
}
