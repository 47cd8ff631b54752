fn main() -> anyhow::Result<()> {
    minibank_observability::init();

    let stdout = std::io::stdout();
    minibank_cli::scenario::run(&mut stdout.lock())
}
