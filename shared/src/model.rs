use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Declares a closed option set serialized by its display label.
macro_rules! option_set {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|option| option.label() == label)
            }
        }
    };
}

option_set!(PriceTier {
    Mid => "중간라인",
    High => "고급라인",
    Premium => "최고급라인",
});

option_set!(SkirtStyle {
    ALine => "A라인",
    BellLine => "벨라인",
    Mermaid => "머메이드",
});

option_set!(NecklineStyle {
    Round => "라운드",
    Square => "스퀘어",
    VNeck => "브이넥",
    OpenShoulder => "오픈숄더",
    Straight => "일자넥",
    Heart => "하트넥",
    Halter => "홀터넥",
});

option_set!(Sleeve {
    Sleeveless => "민소매",
    Tube => "탑",
    Short => "반팔",
    Long => "긴팔",
});

option_set!(Material {
    Beads => "비즈",
    Lace => "레이스",
    Silk => "실크",
    Chiffon => "쉬폰",
});

option_set!(Mood {
    Innocent => "청순",
    Chic => "세련",
    Luxurious => "고급",
    Glamorous => "화려",
    Lovely => "러블리",
});

option_set!(DressColor {
    White => "화이트",
    Ivory => "아이보리",
});

option_set!(ExtraCost {
    Absent => "없음",
    Present => "있음",
});

pub const SHOP_COLORS: [(&str, &str); 6] = [
    ("#3b82f6", "파랑"),
    ("#ef4444", "빨강"),
    ("#10b981", "초록"),
    ("#8b5cf6", "보라"),
    ("#f97316", "주황"),
    ("#ec4899", "분홍"),
];

pub const SHOP_EMOJIS: [&str; 10] = ["🏢", "💍", "👗", "✨", "🎨", "💎", "🌟", "🏪", "🛍️", "💐"];

pub const BLANK_DRESSES_PER_SHOP: usize = 4;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DressDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skirt: Option<SkirtStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neckline: Option<NecklineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeve: Option<Sleeve>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<Material>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<DressColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_cost: Option<ExtraCost>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_cost_amount: Option<String>,
}

/// The detail fields offered as option chips in the dress form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailField {
    Skirt,
    Neckline,
    Sleeve,
    Material,
    Mood,
    Color,
    ExtraCost,
}

/// One detail assignment. `None` clears the field.
#[derive(Clone, Debug, PartialEq)]
pub enum Detail {
    Skirt(Option<SkirtStyle>),
    Neckline(Option<NecklineStyle>),
    Sleeve(Option<Sleeve>),
    Material(Option<Material>),
    Mood(Option<Mood>),
    Color(Option<DressColor>),
    ExtraCost(Option<ExtraCost>),
    ExtraCostAmount(String),
}

impl DetailField {
    pub const ALL: [DetailField; 7] = [
        DetailField::Skirt,
        DetailField::Neckline,
        DetailField::Sleeve,
        DetailField::Material,
        DetailField::Mood,
        DetailField::Color,
        DetailField::ExtraCost,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DetailField::Skirt => "skirt",
            DetailField::Neckline => "neckline",
            DetailField::Sleeve => "sleeve",
            DetailField::Material => "material",
            DetailField::Mood => "mood",
            DetailField::Color => "color",
            DetailField::ExtraCost => "extraCost",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            DetailField::Skirt => "치마 형태",
            DetailField::Neckline => "넥라인",
            DetailField::Sleeve => "팔",
            DetailField::Material => "소재",
            DetailField::Mood => "분위기",
            DetailField::Color => "컬러",
            DetailField::ExtraCost => "추가금 여부",
        }
    }

    pub fn from_key(key: &str) -> Result<Self, ModelError> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.key() == key)
            .ok_or_else(|| ModelError::UnknownField(key.to_string()))
    }

    pub fn options(self) -> Vec<&'static str> {
        fn labels<T: Copy>(all: &[T], label: fn(T) -> &'static str) -> Vec<&'static str> {
            all.iter().map(|option| label(*option)).collect()
        }
        match self {
            DetailField::Skirt => labels(SkirtStyle::ALL, SkirtStyle::label),
            DetailField::Neckline => labels(NecklineStyle::ALL, NecklineStyle::label),
            DetailField::Sleeve => labels(Sleeve::ALL, Sleeve::label),
            DetailField::Material => labels(Material::ALL, Material::label),
            DetailField::Mood => labels(Mood::ALL, Mood::label),
            DetailField::Color => labels(DressColor::ALL, DressColor::label),
            DetailField::ExtraCost => labels(ExtraCost::ALL, ExtraCost::label),
        }
    }

    /// Parses an option label coming from the form into a detail assignment.
    pub fn choose(self, label: &str) -> Result<Detail, ModelError> {
        let unknown = || ModelError::UnknownOption {
            field: self.key(),
            value: label.to_string(),
        };
        Ok(match self {
            DetailField::Skirt => Detail::Skirt(Some(SkirtStyle::from_label(label).ok_or_else(unknown)?)),
            DetailField::Neckline => {
                Detail::Neckline(Some(NecklineStyle::from_label(label).ok_or_else(unknown)?))
            }
            DetailField::Sleeve => Detail::Sleeve(Some(Sleeve::from_label(label).ok_or_else(unknown)?)),
            DetailField::Material => {
                Detail::Material(Some(Material::from_label(label).ok_or_else(unknown)?))
            }
            DetailField::Mood => Detail::Mood(Some(Mood::from_label(label).ok_or_else(unknown)?)),
            DetailField::Color => Detail::Color(Some(DressColor::from_label(label).ok_or_else(unknown)?)),
            DetailField::ExtraCost => {
                Detail::ExtraCost(Some(ExtraCost::from_label(label).ok_or_else(unknown)?))
            }
        })
    }
}

impl DressDetails {
    pub fn is_empty(&self) -> bool {
        *self == DressDetails::default()
    }

    pub fn with(&self, detail: Detail) -> Self {
        let mut next = self.clone();
        match detail {
            Detail::Skirt(value) => next.skirt = value,
            Detail::Neckline(value) => next.neckline = value,
            Detail::Sleeve(value) => next.sleeve = value,
            Detail::Material(value) => next.material = value,
            Detail::Mood(value) => next.mood = value,
            Detail::Color(value) => next.color = value,
            Detail::ExtraCost(value) => next.extra_cost = value,
            Detail::ExtraCostAmount(value) => next.extra_cost_amount = Some(value),
        }
        next
    }

    pub fn selected_label(&self, field: DetailField) -> Option<&'static str> {
        match field {
            DetailField::Skirt => self.skirt.map(SkirtStyle::label),
            DetailField::Neckline => self.neckline.map(NecklineStyle::label),
            DetailField::Sleeve => self.sleeve.map(Sleeve::label),
            DetailField::Material => self.material.map(Material::label),
            DetailField::Mood => self.mood.map(Mood::label),
            DetailField::Color => self.color.map(DressColor::label),
            DetailField::ExtraCost => self.extra_cost.map(ExtraCost::label),
        }
    }

    /// The extra-cost amount, only when extra cost is marked present and filled in.
    pub fn charged_amount(&self) -> Option<&str> {
        match (self.extra_cost, self.extra_cost_amount.as_deref()) {
            (Some(ExtraCost::Present), Some(amount)) if !amount.is_empty() => Some(amount),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ModelError> {
        Self::try_from(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Score {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Score(value))
        } else {
            Err(ModelError::ScoreOutOfRange(value))
        }
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScoreCategory {
    Overall,
    BodyFit,
    Comfort,
    BrideSatisfaction,
    GroomSatisfaction,
    VenueHarmony,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 6] = [
        ScoreCategory::Overall,
        ScoreCategory::BodyFit,
        ScoreCategory::Comfort,
        ScoreCategory::BrideSatisfaction,
        ScoreCategory::GroomSatisfaction,
        ScoreCategory::VenueHarmony,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ScoreCategory::Overall => "overall",
            ScoreCategory::BodyFit => "bodyfit",
            ScoreCategory::Comfort => "comfort",
            ScoreCategory::BrideSatisfaction => "bride_satisfaction",
            ScoreCategory::GroomSatisfaction => "groom_satisfaction",
            ScoreCategory::VenueHarmony => "venue_harmony",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::Overall => "신부와의 조화",
            ScoreCategory::BodyFit => "체형 어울림",
            ScoreCategory::Comfort => "편안함",
            ScoreCategory::BrideSatisfaction => "신부 만족도",
            ScoreCategory::GroomSatisfaction => "신랑 만족도",
            ScoreCategory::VenueHarmony => "예식홀과 어울림",
        }
    }

    /// Compact label used on report pages.
    pub fn short_label(self) -> &'static str {
        match self {
            ScoreCategory::Overall => "신부조화",
            ScoreCategory::BodyFit => "체형어울림",
            ScoreCategory::Comfort => "편안함",
            ScoreCategory::BrideSatisfaction => "신부만족",
            ScoreCategory::GroomSatisfaction => "신랑만족",
            ScoreCategory::VenueHarmony => "예식홀조화",
        }
    }

    pub fn from_key(key: &str) -> Result<Self, ModelError> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.key() == key)
            .ok_or_else(|| ModelError::UnknownCategory(key.to_string()))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Scores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bodyfit: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comfort: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bride_satisfaction: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groom_satisfaction: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_harmony: Option<Score>,
}

impl Scores {
    pub fn get(&self, category: ScoreCategory) -> Option<Score> {
        match category {
            ScoreCategory::Overall => self.overall,
            ScoreCategory::BodyFit => self.bodyfit,
            ScoreCategory::Comfort => self.comfort,
            ScoreCategory::BrideSatisfaction => self.bride_satisfaction,
            ScoreCategory::GroomSatisfaction => self.groom_satisfaction,
            ScoreCategory::VenueHarmony => self.venue_harmony,
        }
    }

    pub fn with(&self, category: ScoreCategory, score: Score) -> Self {
        let mut next = *self;
        let slot = match category {
            ScoreCategory::Overall => &mut next.overall,
            ScoreCategory::BodyFit => &mut next.bodyfit,
            ScoreCategory::Comfort => &mut next.comfort,
            ScoreCategory::BrideSatisfaction => &mut next.bride_satisfaction,
            ScoreCategory::GroomSatisfaction => &mut next.groom_satisfaction,
            ScoreCategory::VenueHarmony => &mut next.venue_harmony,
        };
        *slot = Some(score);
        next
    }

    pub fn is_scored(&self) -> bool {
        ScoreCategory::ALL
            .iter()
            .any(|category| self.get(*category).is_some())
    }

    pub fn total(&self) -> u32 {
        ScoreCategory::ALL
            .iter()
            .filter_map(|category| self.get(*category))
            .map(|score| u32::from(score.value()))
            .sum()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dress {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceTier>,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub details: DressDetails,
    #[serde(default)]
    pub scores: Scores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sketch_data: Option<String>,
}

impl Dress {
    pub fn blank(id: String, number: usize) -> Self {
        Self {
            id,
            name: format!("드레스 {number}"),
            price_range: None,
            memo: String::new(),
            details: DressDetails::default(),
            scores: Scores::default(),
            sketch_data: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Shop {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color: String,
    pub emoji: String,
    #[serde(default)]
    pub dresses: Vec<Dress>,
}

/// The user-entered part of a new shop.
#[derive(Clone, Debug, PartialEq)]
pub struct ShopDraft {
    pub name: String,
    pub description: String,
    pub color: String,
    pub emoji: String,
}

impl Default for ShopDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            color: SHOP_COLORS[0].0.to_string(),
            emoji: SHOP_EMOJIS[0].to_string(),
        }
    }
}

pub fn dress_id(shop_id: &str, number: usize) -> String {
    format!("{shop_id}_dress{number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_rejects_out_of_range_values() {
        assert_eq!(Score::new(0), Err(ModelError::ScoreOutOfRange(0)));
        assert_eq!(Score::new(6), Err(ModelError::ScoreOutOfRange(6)));
        assert_eq!(Score::new(5).map(Score::value), Ok(5));
    }

    #[test]
    fn scores_parse_from_stored_keys() {
        let scores: Scores =
            serde_json::from_str(r#"{"overall":5,"bodyfit":4,"venue_harmony":3}"#).unwrap();
        assert_eq!(scores.total(), 12);
        assert!(scores.is_scored());
        assert_eq!(scores.get(ScoreCategory::Comfort), None);
    }

    #[test]
    fn scores_reject_unknown_category_and_bad_value() {
        assert!(serde_json::from_str::<Scores>(r#"{"sparkle":3}"#).is_err());
        assert!(serde_json::from_str::<Scores>(r#"{"overall":9}"#).is_err());
    }

    #[test]
    fn details_round_trip_by_label() {
        let details = DressDetails::default()
            .with(Detail::Skirt(Some(SkirtStyle::Mermaid)))
            .with(Detail::ExtraCost(Some(ExtraCost::Present)))
            .with(Detail::ExtraCostAmount("50만원".into()));
        let json = serde_json::to_string(&details).unwrap();
        assert_eq!(
            json,
            r#"{"skirt":"머메이드","extraCost":"있음","extraCostAmount":"50만원"}"#
        );
        assert_eq!(details.charged_amount(), Some("50만원"));
    }

    #[test]
    fn details_reject_unknown_key_and_option() {
        assert!(serde_json::from_str::<DressDetails>(r#"{"train":"long"}"#).is_err());
        assert!(serde_json::from_str::<DressDetails>(r#"{"skirt":"미니"}"#).is_err());
    }

    #[test]
    fn detail_field_choose_validates_labels() {
        let field = DetailField::from_key("sleeve").unwrap();
        assert_eq!(field.choose("반팔"), Ok(Detail::Sleeve(Some(Sleeve::Short))));
        assert_eq!(
            field.choose("망토"),
            Err(ModelError::UnknownOption {
                field: "sleeve",
                value: "망토".into()
            })
        );
        assert!(DetailField::from_key("train").is_err());
    }

    #[test]
    fn clearing_neckline_empties_details() {
        let details = DressDetails::default().with(Detail::Neckline(Some(NecklineStyle::Heart)));
        assert!(!details.is_empty());
        assert!(details.with(Detail::Neckline(None)).is_empty());
    }

    #[test]
    fn charged_amount_requires_present_flag() {
        let details = DressDetails::default()
            .with(Detail::ExtraCost(Some(ExtraCost::Absent)))
            .with(Detail::ExtraCostAmount("30만원".into()));
        assert_eq!(details.charged_amount(), None);
    }
}
