use clap::Parser;

fn main() -> anyhow::Result<()> {
    itemparse::init();

    itemparse::ui::cli::Cli::parse().run()
}
