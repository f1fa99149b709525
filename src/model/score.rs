use std::fmt::{Display, Formatter, Result as FmtResult};

use time::PrimitiveDateTime;

use crate::{
    attribute_model,
    convert::{Bool, Date, Float, Int, Str},
};

use super::{GameMode, Mods};

attribute_model! {
    #[derive(Clone, Debug, PartialEq)]
    pub struct Score {
        beatmap_id: String = Str,
        score: u64 = Int::new(),
        maxcombo: u32 = Int::new(),
        count50: u32 = Int::new(),
        count100: u32 = Int::new(),
        count300: u32 = Int::new(),
        countmiss: u32 = Int::new(),
        countkatu: u32 = Int::new(),
        countgeki: u32 = Int::new(),
        perfect: bool = Bool,
        enabled_mods: u32 = Int::new(),
        user_id: u32 = Int::new(),
        date: PrimitiveDateTime = Date,
        rank: String = Str,
        pp: f64 = Float,
    }
}

attribute_model! {
    /// A score set inside a multiplayer game.
    #[derive(Clone, Debug, PartialEq)]
    pub struct TeamScore extends Score {
        slot: u32 = Int::new(),
        team: u32 = Int::new(),
        passed: bool = Bool => "pass",
    }
}

impl Score {
    /// Sum of 300s, 100s, and 50s.
    pub fn total_hits(&self) -> u64 {
        u64::from(self.count300) + u64::from(self.count100) + u64::from(self.count50)
    }

    pub fn mods(&self) -> Mods {
        Mods::from(self.enabled_mods)
    }

    /// Hit accuracy in percent, judged by the rules of `mode`.
    pub fn accuracy(&self, mode: GameMode) -> f64 {
        let n300 = self.count300 as f64;
        let n100 = self.count100 as f64;
        let n50 = self.count50 as f64;
        let nmiss = self.countmiss as f64;
        let nkatu = self.countkatu as f64;
        let ngeki = self.countgeki as f64;

        let (numerator, denominator) = match mode {
            GameMode::Osu => (
                50.0 * n50 + 100.0 * n100 + 300.0 * n300,
                300.0 * (n50 + n100 + n300 + nmiss),
            ),
            GameMode::Taiko => (
                150.0 * n100 + 300.0 * n300,
                300.0 * (n100 + n300 + nmiss),
            ),
            GameMode::Catch => (n50 + n100 + n300, n50 + n100 + n300 + nkatu + nmiss),
            GameMode::Mania => (
                50.0 * n50 + 100.0 * n100 + 200.0 * nkatu + 300.0 * (n300 + ngeki),
                300.0 * (n50 + n100 + n300 + nmiss + ngeki + nkatu),
            ),
        };

        if denominator <= 0.0 {
            0.0
        } else {
            100.0 * numerator / denominator
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "Score user_id={} beatmap_id={} date={}",
            self.user_id, self.beatmap_id, self.date
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::{json, Value};
    use time::macros::datetime;

    use crate::{attribute::AttributeModel, error::ModelError};

    use super::*;

    pub(crate) fn raw_score() -> Value {
        json!({
            "beatmap_id": "129891",
            "score_id": "2177560145",
            "score": "132408001",
            "maxcombo": "2385",
            "count50": "0",
            "count100": "5",
            "count300": "1978",
            "countmiss": "0",
            "countkatu": "5",
            "countgeki": "247",
            "perfect": "1",
            "enabled_mods": "24",
            "user_id": "124493",
            "date": "2016-08-14 10:53:38",
            "rank": "XH",
            "pp": "726.236"
        })
    }

    pub(crate) fn raw_team_score(slot: u32, team: u32, passed: bool) -> Value {
        let mut raw = raw_score();
        let object = raw.as_object_mut().unwrap();
        object.insert("slot".to_owned(), json!(slot.to_string()));
        object.insert("team".to_owned(), json!(team.to_string()));
        object.insert("pass".to_owned(), json!(if passed { "1" } else { "0" }));

        raw
    }

    #[test]
    fn score_from_api_payload() {
        let score = Score::from_value(&raw_score()).unwrap();

        assert_eq!(score.beatmap_id, "129891");
        assert_eq!(score.score, 132_408_001);
        assert_eq!(score.maxcombo, 2385);
        assert_eq!(score.count300, 1978);
        assert!(score.perfect);
        assert_eq!(score.date, datetime!(2016-08-14 10:53:38));
        assert_eq!(score.rank, "XH");
        assert_eq!(score.pp, 726.236);
        assert_eq!(score.mods(), Mods::HIDDEN | Mods::HARD_ROCK);
        assert_eq!(score.total_hits(), 1983);
    }

    #[test]
    fn total_hits_does_not_overflow() {
        let mut raw = raw_score();
        raw["count300"] = json!("4294967295");
        raw["count100"] = json!("4294967295");

        let score = Score::from_value(&raw).unwrap();

        assert_eq!(score.total_hits(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn accuracy_per_mode() {
        let score = Score::from_value(&raw_score()).unwrap();

        let osu = score.accuracy(GameMode::Osu);
        assert!((osu - 99.8319).abs() < 1e-3, "{osu}");
        assert!((score.accuracy(GameMode::Taiko) - 99.8739).abs() < 1e-3);
    }

    #[test]
    fn team_score_exposes_parent_and_child() {
        let score = TeamScore::from_value(&raw_team_score(3, 2, true)).unwrap();

        assert_eq!(score.slot, 3);
        assert_eq!(score.team, 2);
        assert!(score.passed);
        assert_eq!(score.user_id, 124493);
        assert_eq!(score.base.rank, "XH");
    }

    #[test]
    fn team_score_reads_pass_key() {
        let schema = TeamScore::schema();
        let passed = schema.get("passed").unwrap();

        assert_eq!(passed.key(), "pass");
        assert!(schema.get("pass").is_none());
        assert_eq!(schema.len(), Score::schema().len() + 3);

        let mut raw = raw_team_score(0, 1, false);
        raw.as_object_mut().unwrap().remove("pass");

        assert!(matches!(
            TeamScore::from_value(&raw),
            Err(ModelError::MissingField {
                model: "TeamScore",
                field: "passed",
                key: "pass"
            })
        ));
    }

    #[test]
    fn missing_parent_field_fails_child() {
        let mut raw = raw_team_score(0, 1, true);
        raw.as_object_mut().unwrap().remove("rank");

        let err = TeamScore::from_value(&raw).unwrap_err();

        assert_eq!(err.field(), Some("rank"));
    }
}
