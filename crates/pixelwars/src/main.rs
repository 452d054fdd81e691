use std::time::Duration;

use clap::Parser;
use pixelwars::prelude::*;
use pixelwars::parse_canvas_arg;

/// Pixel Wars game server.
#[derive(Parser, Debug)]
#[command(name = "pixelwars-server", author, version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "PIXELWARS_BIND", default_value = "127.0.0.1:8000")]
    bind: String,

    /// Canvas instance as NAME=NXxNY[@COOLDOWN_MS]; repeatable.
    /// Defaults to a single Test=10x10 canvas.
    #[arg(long = "canvas", value_parser = parse_canvas_arg)]
    canvases: Vec<CanvasConfig>,

    /// Secret Wordle word. Picked at random from the built-in list if unset.
    #[arg(long, env = "PIXELWARS_WORD")]
    word: Option<String>,

    /// Idle lifetime of keys and user ids; 0 disables expiry
    #[arg(long, default_value_t = 3600)]
    session_ttl_secs: u64,

    /// Cookie Max-Age in seconds
    #[arg(long, default_value_t = 3600)]
    cookie_max_age: u64,

    /// Keep each user's delta baseline at what they saw on init
    #[arg(long)]
    cumulative_deltas: bool,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();

        let mut canvases = if self.canvases.is_empty() {
            defaults.canvases
        } else {
            self.canvases
        };
        if self.cumulative_deltas {
            for canvas in &mut canvases {
                canvas.delta_policy = DeltaPolicy::Cumulative;
            }
        }

        let wordle = match self.word {
            Some(word) => WordleConfig::fixed(word),
            None => defaults.wordle,
        };

        let session = match self.session_ttl_secs {
            0 => SessionConfig::without_expiry(),
            secs => SessionConfig {
                ttl: Some(Duration::from_secs(secs)),
            },
        };

        ServerConfig {
            bind_addr: self.bind,
            cookie_max_age: self.cookie_max_age,
            session,
            canvases,
            wordle,
            ..defaults
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), PixelwarsError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let config = Args::parse().into_config();
    let server = PixelwarsServer::builder().config(config).build().await?;
    tracing::info!(addr = %server.local_addr()?, "listening");
    server.run().await
}
