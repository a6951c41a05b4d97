use std::net::IpAddr;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use contact_relay_testing::resend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Resend {
            host,
            port,
            api_key,
        } => resend::start_server(host, port, api_key).await?,
        Command::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                env!("CARGO_BIN_NAME"),
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the resend testing server
    Resend {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value = "8003")]
        port: u16,
        /// Bearer token clients have to present
        #[arg(long, env = "RESEND_API_KEY", default_value = "re_test_key")]
        api_key: String,
    },
    /// Generate shell completions
    Completion {
        /// The shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn resend_defaults() {
        let cli = Cli::try_parse_from(["contact_relay_testing", "resend", "--port", "9003"]).unwrap();
        let Command::Resend { host, port, .. } = cli.command else {
            panic!("expected resend command");
        };
        assert_eq!(host.to_string(), "127.0.0.1");
        assert_eq!(port, 9003);
    }
}
