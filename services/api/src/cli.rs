use crate::scoring::{run_offline_scoring, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lead_intent::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lead Intent Scorer",
    about = "Score sales leads against an offer over HTTP or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a lead CSV offline and print or save the results
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        // The classifier uses a blocking HTTP client.
        Command::Score(args) => {
            tokio::task::spawn_blocking(move || run_offline_scoring(args)).await?
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["lead-intent-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["lead-intent-api", "serve", "--port", "9001"])
            .expect("parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(9001));
                assert!(args.host.is_none());
            }
            other => panic!("expected serve command, got {other:?}"),
        }
    }

    #[test]
    fn score_collects_repeated_offer_lists() {
        let cli = Cli::try_parse_from([
            "lead-intent-api",
            "score",
            "--offer-name",
            "AI Outreach Automation",
            "--value-prop",
            "24/7 outreach",
            "--value-prop",
            "6x more meetings",
            "--use-case",
            "B2B SaaS mid-market",
            "--leads",
            "leads.csv",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Score(args)) => {
                let offer = args.offer();
                assert_eq!(offer.name, "AI Outreach Automation");
                assert_eq!(offer.value_props.len(), 2);
                assert_eq!(offer.ideal_use_cases, vec!["B2B SaaS mid-market"]);
                assert!(args.output.is_none());
            }
            other => panic!("expected score command, got {other:?}"),
        }
    }

    #[test]
    fn score_requires_a_lead_file() {
        let parsed = Cli::try_parse_from(["lead-intent-api", "score", "--offer-name", "Offer"]);
        assert!(parsed.is_err());
    }
}
