mod app;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Pull-to-refresh demo ===");
    println!("A scripted finger pulls a 40-row list:");
    println!("  - down past the header to refresh (finished after 2s)");
    println!("  - up from the bottom to load more rows");
    println!("  - a short pull that springs back after the cool-down");
    println!();
    println!("Set RUST_LOG=debug to watch status transitions.");
    println!();

    app::run()
}
