use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    attribute_model,
    convert::{Float, Int, JsonList, Str},
};

attribute_model! {
    #[derive(Clone, Debug, PartialEq)]
    pub struct User {
        user_id: u32 = Int::new(),
        username: String = Str,
        count300: u32 = Int::new(),
        count100: u32 = Int::new(),
        count50: u32 = Int::new(),
        playcount: u32 = Int::new(),
        ranked_score: u64 = Int::new(),
        total_score: u64 = Int::new(),
        pp_rank: u32 = Int::new(),
        level: f64 = Float,
        pp_raw: f64 = Float,
        accuracy: f64 = Float,
        count_rank_ss: u32 = Int::new(),
        count_rank_s: u32 = Int::new(),
        count_rank_a: u32 = Int::new(),
        country: String = Str,
        pp_country_rank: u32 = Int::new(),
        /// Recent events, each as the JSON text the API sent.
        events: Vec<String> = JsonList(Str),
    }
}

impl User {
    /// Sum of 300s, 100s, and 50s over all ranked plays.
    pub fn total_hits(&self) -> u64 {
        self.count300 as u64 + self.count100 as u64 + self.count50 as u64
    }
}

impl Display for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::{
        attribute::AttributeModel,
        error::{ConvertError, ModelError},
    };

    use super::*;

    fn raw_user() -> Value {
        json!({
            "user_id": "124493",
            "username": "Cookiezi",
            "count300": "4294967295",
            "count100": "1530219",
            "count50": "175419",
            "playcount": "42513",
            "ranked_score": "37284819520",
            "total_score": "208829211468",
            "pp_rank": "1",
            "level": "103.172",
            "pp_raw": "13948.4",
            "accuracy": "98.92063903808594",
            "count_rank_ss": "118",
            "count_rank_s": "1063",
            "count_rank_a": "1182",
            "country": "KR",
            "pp_country_rank": "1",
            "events": [
                {
                    "display_html": "<b>Cookiezi</b> achieved rank #1",
                    "beatmap_id": "129891",
                    "beatmapset_id": "39804",
                    "date": "2016-08-14 10:53:38",
                    "epicfactor": "1"
                }
            ]
        })
    }

    #[test]
    fn user_from_api_payload() {
        let user = User::from_value(&raw_user()).unwrap();

        assert_eq!(user.user_id, 124493);
        assert_eq!(user.username, "Cookiezi");
        assert_eq!(user.ranked_score, 37_284_819_520);
        assert_eq!(user.level, 103.172);
        assert_eq!(user.country, "KR");
        assert_eq!(user.events.len(), 1);
        assert!(user.events[0].contains("\"epicfactor\":\"1\""));
        assert_eq!(user.to_string(), "Cookiezi");
    }

    #[test]
    fn total_hits_is_derived() {
        let user = User::from_value(&raw_user()).unwrap();

        assert_eq!(
            user.total_hits(),
            4_294_967_295 + 1_530_219 + 175_419
        );
    }

    #[test]
    fn null_rank_is_a_field_error() {
        let mut raw = raw_user();
        raw["pp_rank"] = Value::Null;

        let err = User::from_value(&raw).unwrap_err();

        assert!(matches!(
            err,
            ModelError::Field {
                field: "pp_rank",
                source: ConvertError::InvalidType { found: "null", .. },
                ..
            }
        ));
    }
}
