fn main() -> anyhow::Result<()> {
    scdtext::cli::run_cli()
}
