// command line interface

use crate::{Db, Gemini, Server, session};
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

#[derive(Parser)]
#[command(name = "shopchat", about = "Chat with your store in plain english")]
struct Cli {
    /// database connection url
    #[arg(long, short, env = "DATABASE_URL", global = true)]
    db: Option<String>,

    /// api key for the completion provider
    #[arg(long, short = 'k', global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// start the websocket chat server
    Serve {
        /// port number
        #[arg(long, short, default_value = "3000")]
        port: u16,

        /// host to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// run one message through the pipeline and print the reply
    Ask {
        /// the message, as a user would type it
        message: String,

        /// caller id for order-scoped questions
        #[arg(long, short)]
        user_id: Option<i64>,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let db_url = cli
        .db
        .ok_or_else(|| miette::miette!("database url required (--db or DATABASE_URL)"))?;

    match cli.command {
        Commands::Serve { port, host } => Server::run(&db_url, cli.api_key, &host, port)
            .await
            .into_diagnostic(),

        Commands::Ask { message, user_id } => {
            let db = Db::connect(&db_url).await.into_diagnostic()?;
            let gemini = Gemini::new(cli.api_key).into_diagnostic()?;

            let reply = session::handle_message(&gemini, &db, user_id, &message).await;
            println!("{reply}");

            Ok(())
        }
    }
}
