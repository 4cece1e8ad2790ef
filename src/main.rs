#[tokio::main]
async fn main() {
    invix_backend::run().await;
}
