use clap::Parser;
use fancy_shell::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    fancy_shell::init_tracing()?;
    fancy_shell::run(&cli, &mut std::io::stdout().lock()).await
}
