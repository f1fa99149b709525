use clap::{Parser, Subcommand};
use osuapi::{
    convert::{parse_date, IntEnum},
    model::{GameMode, Mods},
    BeatmapsQuery, OsuApi, ScoresQuery, UserLookup,
};
use time::PrimitiveDateTime;

pub struct Args {
    pub quiet: bool,
    pub mode: Option<GameMode>,
    pub command: Command,
}

impl Args {
    pub fn parse() -> Self {
        let ArgsCli {
            quiet,
            mode,
            command,
        } = ArgsCli::parse();

        Self {
            quiet,
            mode,
            command,
        }
    }
}

#[derive(Parser)]
#[clap(author, version, about = DESCRIPTION)]
struct ArgsCli {
    #[clap(short, long, action)]
    /// Set this if no logs should be displayed
    quiet: bool,
    #[clap(short, long, value_parser = parse_mode)]
    /// Game mode: osu, taiko, catch, mania, or 0-3 [default: osu]
    mode: Option<GameMode>,
    #[clap(subcommand)]
    command: Command,
}

/// A user given on the command line.
#[derive(clap::Args)]
pub struct UserArg {
    /// Username, or user id if `--id` is set
    user: String,
    #[clap(long, action)]
    /// Look the user up by id instead of by name
    id: bool,
}

impl UserArg {
    pub fn lookup(&self) -> Result<UserLookup, String> {
        lookup(&self.user, self.id)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a user's profile
    User(UserArg),
    /// Show a user's top plays
    Best {
        #[clap(flatten)]
        user: UserArg,
        #[clap(short, long, default_value_t = OsuApi::<osuapi::HyperTransport>::DEFAULT_BEST_LIMIT)]
        limit: u32,
    },
    /// Show a user's plays of the last 24 hours
    Recent {
        #[clap(flatten)]
        user: UserArg,
        #[clap(short, long, default_value_t = OsuApi::<osuapi::HyperTransport>::DEFAULT_RECENT_LIMIT)]
        limit: u32,
    },
    /// Show the top scores of a beatmap
    Scores(ScoresArgs),
    /// Search beatmaps
    Beatmaps(BeatmapsArgs),
    /// Show a multiplayer match
    Match { match_id: u32 },
}

#[derive(clap::Args)]
pub struct ScoresArgs {
    beatmap_id: u32,
    #[clap(short, long)]
    /// Only scores of this user
    user: Option<String>,
    #[clap(long, action)]
    /// Treat `--user` as user id
    id: bool,
    #[clap(long, value_name = "BITS")]
    /// Only scores with exactly these mods
    mods: Option<u32>,
    #[clap(short, long, default_value_t = ScoresQuery::DEFAULT_LIMIT)]
    limit: u32,
}

impl ScoresArgs {
    pub fn query(&self, mode: GameMode) -> Result<ScoresQuery, String> {
        let mut query = ScoresQuery::new(self.beatmap_id)
            .mode(mode)
            .limit(self.limit);

        if let Some(mods) = self.mods {
            query = query.mods(Mods::from(mods));
        }

        if let Some(ref user) = self.user {
            query = query.user(lookup(user, self.id)?);
        }

        Ok(query)
    }
}

#[derive(clap::Args)]
pub struct BeatmapsArgs {
    #[clap(long, value_parser = parse_since, value_name = "YYYY-MM-DD HH:MM:SS")]
    /// Only maps ranked after this date
    since: Option<PrimitiveDateTime>,
    #[clap(short, long)]
    set: Option<u32>,
    #[clap(short, long)]
    beatmap: Option<u32>,
    #[clap(short, long)]
    /// Only maps of this creator
    user: Option<String>,
    #[clap(long, action)]
    /// Treat `--user` as user id
    id: bool,
    #[clap(long, action)]
    /// Include converted maps
    converted: bool,
    #[clap(long)]
    hash: Option<String>,
    #[clap(short, long, default_value_t = BeatmapsQuery::DEFAULT_LIMIT)]
    limit: u32,
}

impl BeatmapsArgs {
    /// Without a mode, maps of all modes are returned.
    pub fn query(&self, mode: Option<GameMode>) -> Result<BeatmapsQuery, String> {
        let user = self
            .user
            .as_deref()
            .map(|user| lookup(user, self.id))
            .transpose()?;

        Ok(BeatmapsQuery {
            since: self.since,
            beatmapset_id: self.set,
            beatmap_id: self.beatmap,
            user,
            mode,
            include_converted: self.converted,
            hash: self.hash.clone(),
            limit: self.limit,
        })
    }
}

fn lookup(user: &str, by_id: bool) -> Result<UserLookup, String> {
    if by_id {
        user.parse()
            .map(UserLookup::ById)
            .map_err(|_| format!("`{user}` is not a valid user id"))
    } else {
        Ok(UserLookup::ByName(user.to_owned()))
    }
}

fn parse_mode(s: &str) -> Result<GameMode, String> {
    let mode = match s.to_ascii_lowercase().as_str() {
        "osu" | "std" | "standard" => GameMode::Osu,
        "taiko" => GameMode::Taiko,
        "catch" | "ctb" | "fruits" => GameMode::Catch,
        "mania" => GameMode::Mania,
        other => other
            .parse()
            .ok()
            .and_then(GameMode::from_code)
            .ok_or_else(|| format!("unknown game mode `{s}`"))?,
    };

    Ok(mode)
}

fn parse_since(s: &str) -> Result<PrimitiveDateTime, String> {
    parse_date(s).map_err(|err| err.to_string())
}

static DESCRIPTION: &str = r#"
Query the osu! v1 API from the command line.

The API key is read from the env variable `OSU_API_KEY`,
optionally through a `.env` file. `OSU_API_URL` overrides
the API root."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names_and_codes() {
        assert_eq!(parse_mode("Taiko"), Ok(GameMode::Taiko));
        assert_eq!(parse_mode("ctb"), Ok(GameMode::Catch));
        assert_eq!(parse_mode("3"), Ok(GameMode::Mania));
        assert!(parse_mode("4").is_err());
        assert!(parse_mode("drums").is_err());
    }

    #[test]
    fn explicit_user_lookup() {
        assert_eq!(lookup("2", true), Ok(UserLookup::ById(2)));
        assert_eq!(lookup("2", false), Ok(UserLookup::ByName("2".to_owned())));
        assert!(lookup("peppy", true).is_err());
    }

    #[test]
    fn cli_parses_beatmaps_command() {
        let cli = ArgsCli::try_parse_from([
            "osuapi",
            "--mode",
            "mania",
            "beatmaps",
            "--since",
            "2016-03-07 20:01:09",
            "--user",
            "2",
            "--id",
        ])
        .unwrap();

        assert_eq!(cli.mode, Some(GameMode::Mania));

        let Command::Beatmaps(beatmaps) = cli.command else {
            panic!("expected beatmaps command");
        };

        let query = beatmaps.query(cli.mode).unwrap();
        assert_eq!(query.user, Some(UserLookup::ById(2)));
        assert_eq!(query.limit, BeatmapsQuery::DEFAULT_LIMIT);
        assert!(query.since.is_some());
    }
}
