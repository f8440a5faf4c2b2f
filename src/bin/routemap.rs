fn main() -> anyhow::Result<()> {
    routemap::cli::run_cli()
}
