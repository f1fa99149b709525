use std::fmt::{Display, Formatter, Result as FmtResult};

use time::PrimitiveDateTime;

use crate::{
    attribute_model,
    convert::{Date, Float, Int, Nullable, PreProcessInt, Str},
};

use super::{BeatmapGenre, BeatmapLanguage, BeatmapStatus, GameMode};

attribute_model! {
    #[derive(Clone, Debug, PartialEq)]
    pub struct Beatmap {
        approved: BeatmapStatus = PreProcessInt::new(),
        approved_date: Option<PrimitiveDateTime> = Nullable(Date),
        last_update: PrimitiveDateTime = Date,
        artist: String = Str,
        beatmap_id: u32 = Int::new(),
        beatmapset_id: u32 = Int::new(),
        bpm: f64 = Float,
        creator: String = Str,
        difficultyrating: f64 = Float,
        diff_size: f64 = Float,
        diff_overall: f64 = Float,
        diff_approach: f64 = Float,
        diff_drain: f64 = Float,
        hit_length: u32 = Int::new(),
        source: String = Str,
        genre_id: BeatmapGenre = PreProcessInt::new(),
        language_id: BeatmapLanguage = PreProcessInt::new(),
        title: String = Str,
        total_length: u32 = Int::new(),
        version: String = Str,
        file_md5: String = Str,
        mode: GameMode = PreProcessInt::new(),
        tags: String = Str,
        favourite_count: u32 = Int::new(),
        playcount: u32 = Int::new(),
        passcount: u32 = Int::new(),
        max_combo: Option<u32> = Nullable(Int::new()),
    }
}

impl Beatmap {
    /// `Artist - Title [Version]`
    pub fn display_name(&self) -> String {
        format!("{} - {} [{}]", self.artist, self.title, self.version)
    }

    /// Whether the map awards pp.
    pub fn is_ranked(&self) -> bool {
        matches!(self.approved, BeatmapStatus::Ranked | BeatmapStatus::Approved)
    }
}

impl Display for Beatmap {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} by {} (id={})",
            self.display_name(),
            self.creator,
            self.beatmap_id
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};
    use time::macros::datetime;

    use crate::{attribute::AttributeModel, error::ConvertError};

    use super::*;

    fn raw_beatmap() -> Value {
        json!({
            "approved": "1",
            "approved_date": "2013-07-02 01:01:12",
            "last_update": "2013-07-06 16:51:22",
            "artist": "Luxion",
            "beatmap_id": "252002",
            "beatmapset_id": "93398",
            "bpm": "196",
            "creator": "RikiH_",
            "difficultyrating": "5.744717597961426",
            "diff_size": "4",
            "diff_overall": "8",
            "diff_approach": "9",
            "diff_drain": "7",
            "hit_length": "113",
            "source": "BMS",
            "genre_id": "2",
            "language_id": "5",
            "title": "High-Priestess",
            "total_length": "145",
            "version": "Overkill",
            "file_md5": "c8f08438204abfcdd1a748ebfae67421",
            "mode": "0",
            "tags": "kloyd flower roxas",
            "favourite_count": "140",
            "playcount": "94637",
            "passcount": "10599",
            "max_combo": "899"
        })
    }

    #[test]
    fn beatmap_from_api_payload() {
        let map = Beatmap::from_value(&raw_beatmap()).unwrap();

        assert_eq!(map.approved, BeatmapStatus::Ranked);
        assert_eq!(map.approved_date, Some(datetime!(2013-07-02 01:01:12)));
        assert_eq!(map.last_update, datetime!(2013-07-06 16:51:22));
        assert_eq!(map.beatmap_id, 252002);
        assert_eq!(map.bpm, 196.0);
        assert_eq!(map.genre_id, BeatmapGenre::VideoGame);
        assert_eq!(map.language_id, BeatmapLanguage::Instrumental);
        assert_eq!(map.mode, GameMode::Osu);
        assert_eq!(map.max_combo, Some(899));
        assert_eq!(map.display_name(), "Luxion - High-Priestess [Overkill]");
        assert!(map.is_ranked());
    }

    #[test]
    fn unranked_map_has_null_fields() {
        let mut raw = raw_beatmap();
        raw["approved"] = json!("-2");
        raw["approved_date"] = Value::Null;
        raw["max_combo"] = Value::Null;

        let map = Beatmap::from_value(&raw).unwrap();

        assert_eq!(map.approved, BeatmapStatus::Graveyard);
        assert_eq!(map.approved_date, None);
        assert_eq!(map.max_combo, None);
        assert!(!map.is_ranked());
    }

    #[test]
    fn unknown_status_fails_with_enum_error() {
        let mut raw = raw_beatmap();
        raw["approved"] = json!("99");

        let err = Beatmap::from_value(&raw).unwrap_err();

        assert_eq!(err.field(), Some("approved"));
        assert!(matches!(
            err.conversion(),
            Some(ConvertError::UnknownEnum {
                kind: "beatmap status",
                value: 99
            })
        ));
    }

    #[test]
    fn unassigned_genre_is_rejected() {
        let mut raw = raw_beatmap();
        raw["genre_id"] = json!("8");

        let err = Beatmap::from_value(&raw).unwrap_err();

        assert_eq!(err.field(), Some("genre_id"));
        assert!(err.conversion().is_some_and(ConvertError::is_unknown_enum));
    }

    #[test]
    fn malformed_mode_is_not_an_enum_error() {
        let mut raw = raw_beatmap();
        raw["mode"] = json!("osu");

        let err = Beatmap::from_value(&raw).unwrap_err();

        assert_eq!(err.field(), Some("mode"));
        assert!(matches!(
            err.conversion(),
            Some(ConvertError::Malformed { .. })
        ));
    }
}
