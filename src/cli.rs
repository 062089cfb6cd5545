use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;
use spmeta::clients::SpotifyClient;

#[derive(Parser)]
#[command(name = "spmeta")]
#[command(version, about = "Search and look up Spotify metadata", long_about = None)]
struct Cli {
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Album,
    Artist,
    Track,
}

#[derive(Subcommand)]
enum Commands {
    /// Free text search
    Search { kind: Kind, query: String },
    /// Look up a single entity by its Spotify URI
    Lookup { kind: Kind, uri: String },
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = SpotifyClient::try_default()?;

    let output = match &cli.command {
        Commands::Search { kind, query } => {
            info!("Searching {} for {query:?} ...", kind.name());
            match kind {
                Kind::Album => render(&client.search_albums(query).await?, cli.pretty)?,
                Kind::Artist => render(&client.search_artists(query).await?, cli.pretty)?,
                Kind::Track => render(&client.search_tracks(query).await?, cli.pretty)?,
            }
        }
        Commands::Lookup { kind, uri } => {
            info!("Looking up {uri} ...");
            match kind {
                Kind::Album => render(&client.lookup_album(uri).await?, cli.pretty)?,
                Kind::Artist => render(&client.lookup_artist(uri).await?, cli.pretty)?,
                Kind::Track => render(&client.lookup_track(uri).await?, cli.pretty)?,
            }
        }
    };
    println!("{output}");
    Ok(())
}

impl Kind {
    fn name(self) -> &'static str {
        match self {
            Kind::Album => "albums",
            Kind::Artist => "artists",
            Kind::Track => "tracks",
        }
    }
}

fn render<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
