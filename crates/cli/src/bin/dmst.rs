fn main() -> anyhow::Result<()> {
    dmst_cli::main_entry()
}
