use std::net::SocketAddr;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use lfmproxy::{cli, config, config::Config, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the signing proxy server
    Serve(ServeOptions),

    /// Show the signature Last.fm expects for a set of parameters
    Sign(SignOptions),

    /// Print the Last.fm web authentication URL
    LoginUrl(LoginUrlOptions),

    /// Send a single request through the proxy pipeline
    Call(CallOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind, overrides SERVER_ADDRESS
    #[clap(long)]
    pub address: Option<SocketAddr>,
}

#[derive(Parser, Debug, Clone)]
pub struct SignOptions {
    /// Shared secret to sign with, defaults to LASTFM_API_SECRET
    #[clap(long)]
    pub secret: Option<String>,

    /// Parameters as KEY=VALUE; can be repeated
    #[clap(
        value_parser = cli::parse_param,
        action = ArgAction::Append,
        required = true
    )]
    pub params: Vec<(String, String)>,
}

#[derive(Parser, Debug, Clone)]
pub struct LoginUrlOptions {
    /// URL Last.fm redirects back to after authorization
    #[clap(long)]
    pub callback: String,

    /// Open the URL in the default browser
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CallOptions {
    /// Parameters as KEY=VALUE; must include method=...
    #[clap(
        value_parser = cli::parse_param,
        action = ArgAction::Append,
        required = true
    )]
    pub params: Vec<(String, String)>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Cannot load configuration. Err: {}", e),
    };

    match cli.command {
        Command::Serve(opt) => cli::serve(config, opt.address).await,
        Command::Sign(opt) => cli::sign(&config, opt.params, opt.secret),
        Command::LoginUrl(opt) => cli::login_url(&config, &opt.callback, opt.open),
        Command::Call(opt) => cli::call(config, opt.params).await,
        Command::Completions(_) => {}
    }
}
