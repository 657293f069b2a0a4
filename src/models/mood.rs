use serde::{Deserialize, Serialize};

/// The five-point mood scale shared by check-ins and journal entries.
///
/// Rows store the display label (`"Very Happy"`, ...) as text; use
/// [`Mood::from_label`] when reading them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[serde(rename = "Very Happy")]
    VeryHappy,
    Happy,
    Neutral,
    Sad,
    Depressed,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::VeryHappy,
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::Depressed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::VeryHappy => "Very Happy",
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Depressed => "Depressed",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }

    /// 1-10 value used by the progress charts. Unknown labels chart as 5.
    pub fn chart_value(label: &str) -> i32 {
        match Self::from_label(label) {
            Some(Mood::VeryHappy) => 10,
            Some(Mood::Happy) => 8,
            Some(Mood::Neutral) | None => 5,
            Some(Mood::Sad) => 3,
            Some(Mood::Depressed) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_serde() {
        let json = serde_json::to_string(&Mood::VeryHappy).unwrap();
        assert_eq!(json, "\"Very Happy\"");
        let back: Mood = serde_json::from_str("\"Depressed\"").unwrap();
        assert_eq!(back, Mood::Depressed);
    }

    #[test]
    fn chart_value_defaults_unknown_to_five() {
        assert_eq!(Mood::chart_value("Very Happy"), 10);
        assert_eq!(Mood::chart_value("Sad"), 3);
        assert_eq!(Mood::chart_value("Ecstatic"), 5);
    }
}
