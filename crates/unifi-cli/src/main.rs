//! Binary entrypoint for `unifi-cli`.

#[tokio::main(flavor = "current_thread")]
async fn main() {
    std::process::exit(unifi_cli::run().await);
}
