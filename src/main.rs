#![deny(clippy::all, nonstandard_style, rust_2018_idioms, warnings)]

#[macro_use]
extern crate eyre;

#[macro_use]
extern crate tracing;

use eyre::{Context as _, Report, Result};
use osuapi::{model::Score, HyperTransport, OsuApi};
use tokio::{runtime::Builder as RuntimeBuilder, signal};

use self::{
    args::{Args, Command},
    config::Config,
};

mod args;
mod config;
mod logging;

fn main() {
    let args = Args::parse();

    let runtime = RuntimeBuilder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    // `RUST_LOG` may come from `.env`
    let dotenv_res = dotenvy::dotenv();
    let _log_worker_guard = logging::init(args.quiet);

    if let Err(err) = dotenv_res {
        debug!("no .env file loaded: {err}");
    }

    if let Err(err) = runtime.block_on(async_main(args)) {
        error!("{:?}", err.wrap_err("Critical error in main"));
    }
}

async fn async_main(args: Args) -> Result<()> {
    config::init().context("failed to initialize config")?;
    let config = Config::get();

    let transport = HyperTransport::new().context("failed to create transport")?;
    let api = OsuApi::new(config.api_key.as_ref(), transport)
        .with_base_url(config.api_url.to_string());

    tokio::select! {
        res = run(&api, args) => res?,
        res = signal::ctrl_c() => match res {
            Ok(_) => info!("Received Ctrl+C"),
            Err(err) => error!("{:?}", Report::new(err).wrap_err("Failed to await ctrl+c")),
        }
    }

    Ok(())
}

async fn run(api: &OsuApi<HyperTransport>, args: Args) -> Result<()> {
    let mode = args.mode.unwrap_or_default();

    match args.command {
        Command::User(user) => {
            let user = user.lookup().map_err(|err| eyre!(err))?;
            let users = api
                .get_user(user, mode)
                .await
                .context("failed to request user")?;

            if users.is_empty() {
                info!("User not found");
            }

            for user in users {
                info!("{user} (id {}, {mode})", user.user_id);
                info!("  pp: {:.2} | rank: #{}", user.pp_raw, user.pp_rank);
                info!("  accuracy: {:.2}%", user.accuracy);
                info!("  playcount: {} | total hits: {}", user.playcount, user.total_hits());
            }
        }
        Command::Best { user, limit } => {
            let user = user.lookup().map_err(|err| eyre!(err))?;
            let scores = api
                .get_user_best(user, mode, limit)
                .await
                .context("failed to request top plays")?;

            log_scores(&scores, mode);
        }
        Command::Recent { user, limit } => {
            let user = user.lookup().map_err(|err| eyre!(err))?;
            let scores = api
                .get_user_recent(user, mode, limit)
                .await
                .context("failed to request recent plays")?;

            log_scores(&scores, mode);
        }
        Command::Scores(scores) => {
            let query = scores.query(mode).map_err(|err| eyre!(err))?;
            let scores = api
                .get_scores(&query)
                .await
                .context("failed to request beatmap scores")?;

            log_scores(&scores, mode);
        }
        Command::Beatmaps(beatmaps) => {
            let query = beatmaps.query(args.mode).map_err(|err| eyre!(err))?;
            let maps = api
                .get_beatmaps(&query)
                .await
                .context("failed to request beatmaps")?;

            info!("Found {} beatmap(s)", maps.len());

            for map in maps {
                info!(
                    "[{}] {} ({:.2}*, {})",
                    map.beatmap_id, map.display_name(), map.difficultyrating, map.approved
                );
            }
        }
        Command::Match { match_id } => {
            let osu_match = api
                .get_match(match_id)
                .await
                .context("failed to request match")?;

            info!("{}", osu_match.metadata);

            if !osu_match.metadata.is_finished() {
                info!("  still in progress");
            }

            for game in osu_match.games {
                info!(
                    "  game {} on map {} ({}, {} scores, {}s)",
                    game.game_id,
                    game.beatmap_id,
                    game.play_mode,
                    game.scores.len(),
                    game.duration().whole_seconds(),
                );
            }
        }
    }

    Ok(())
}

fn log_scores(scores: &[Score], mode: osuapi::model::GameMode) {
    info!("Found {} score(s)", scores.len());

    for (i, score) in scores.iter().enumerate() {
        info!(
            "{:>3}. {} | {} +{} | {:.2}% | {}x",
            i + 1,
            score.beatmap_id,
            score.score,
            score.mods(),
            score.accuracy(mode),
            score.maxcombo,
        );
    }
}
