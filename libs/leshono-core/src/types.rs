//! Core types for the course runner.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Course section, in unlock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TierKey {
    BeginnerA,
    BeginnerB,
    IntermediateA,
    IntermediateB,
    Advanced,
}

impl TierKey {
    /// All tiers in course order.
    pub const ALL: [TierKey; 5] = [
        Self::BeginnerA,
        Self::BeginnerB,
        Self::IntermediateA,
        Self::IntermediateB,
        Self::Advanced,
    ];

    /// Get the tier key as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeginnerA => "beginnerA",
            Self::BeginnerB => "beginnerB",
            Self::IntermediateA => "intermediateA",
            Self::IntermediateB => "intermediateB",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from the wire form.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == s)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::BeginnerA => "Beginner A",
            Self::BeginnerB => "Beginner B",
            Self::IntermediateA => "Intermediate A",
            Self::IntermediateB => "Intermediate B",
            Self::Advanced => "Advanced",
        }
    }

    /// Section name in Syriac script.
    pub fn localized_label(&self) -> &'static str {
        match self {
            Self::BeginnerA | Self::BeginnerB => "ܡܫܪܝܐ",
            Self::IntermediateA | Self::IntermediateB => "ܡܶܨܥܳܝܐ",
            Self::Advanced => "ܥܰܡܝܩܳܐ",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::BeginnerA | Self::BeginnerB => "#58cc02",
            Self::IntermediateA | Self::IntermediateB => "#ce82ff",
            Self::Advanced => "#f19e38",
        }
    }
}

/// One course section with its units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub title: String,
    pub localized_label: String,
    pub color: String,
    pub units: Vec<Unit>,
}

impl Tier {
    /// Empty tier with the fixed presentation for `key`.
    pub fn empty(key: TierKey) -> Self {
        Self {
            title: key.title().to_string(),
            localized_label: key.localized_label().to_string(),
            color: key.color().to_string(),
            units: Vec::new(),
        }
    }
}

/// The tiered course structure.
///
/// Always holds every [`TierKey`]; tiers without content have no units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Course {
    tiers: BTreeMap<TierKey, Tier>,
}

impl Default for Course {
    fn default() -> Self {
        Self {
            tiers: TierKey::ALL
                .into_iter()
                .map(|key| (key, Tier::empty(key)))
                .collect(),
        }
    }
}

impl Course {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier(&self, key: TierKey) -> Option<&Tier> {
        self.tiers.get(&key)
    }

    /// Mutable tier access, creating the tier if a deserialized course lacks it.
    pub fn tier_mut(&mut self, key: TierKey) -> &mut Tier {
        self.tiers.entry(key).or_insert_with(|| Tier::empty(key))
    }

    /// Tiers in course order.
    pub fn tiers(&self) -> impl Iterator<Item = (TierKey, &Tier)> {
        self.tiers.iter().map(|(key, tier)| (*key, tier))
    }

    /// All units in course order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.tiers.values().flat_map(|tier| tier.units.iter())
    }

    pub fn unit_count(&self) -> usize {
        self.units().count()
    }
}

/// A unit: a checkpoint, its sub-stage lessons and a review checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub id: String,
    pub title: String,
    pub localized_label: String,
    pub color: String,
    pub description: String,
    pub lessons: Vec<String>,
}

/// Vocabulary entry: Latin transliteration, meaning, optional Syriac form.
///
/// Serialized as a two- or three-element array like the source tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "VocabTuple", into = "VocabTuple")]
pub struct VocabRow {
    pub latin: String,
    pub meaning: String,
    pub syriac: Option<String>,
}

type VocabTuple = (String, String, Option<String>);

impl From<VocabTuple> for VocabRow {
    fn from((latin, meaning, syriac): VocabTuple) -> Self {
        Self {
            latin,
            meaning,
            syriac,
        }
    }
}

impl From<VocabRow> for VocabTuple {
    fn from(row: VocabRow) -> Self {
        (row.latin, row.meaning, row.syriac)
    }
}

impl VocabRow {
    pub fn new(latin: impl Into<String>, meaning: impl Into<String>, syriac: Option<&str>) -> Self {
        Self {
            latin: latin.into(),
            meaning: meaning.into(),
            syriac: syriac.map(str::to_string),
        }
    }
}

/// Row of an alphabet table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphabetRow {
    pub name: String,
    pub sound: String,
    pub letter: String,
}

impl AlphabetRow {
    pub fn new(
        name: impl Into<String>,
        sound: impl Into<String>,
        letter: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sound: sound.into(),
            letter: letter.into(),
        }
    }

    /// The sound value if the table gives one (`-` means none).
    pub fn sound_value(&self) -> Option<&str> {
        let sound = self.sound.trim();
        if sound.is_empty() || sound == "-" {
            None
        } else {
            Some(sound)
        }
    }

    /// Display form used in lesson intros: (name, sound or "letter", letter).
    pub fn to_vocab(&self) -> VocabRow {
        VocabRow {
            latin: self.name.clone(),
            meaning: self.sound_value().unwrap_or("letter").to_string(),
            syriac: Some(self.letter.clone()),
        }
    }
}

/// One line of an intro dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: String,
    pub latin: String,
    pub syriac: String,
}

/// Material shown before a lesson's exercises.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonIntro {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vocab: Vec<VocabRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dialogue: Vec<DialogueLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culture_note: Option<String>,
}

/// A playable lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub xp_value: u32,
    pub intro: LessonIntro,
    pub exercises: Vec<Exercise>,
}

impl Lesson {
    /// Stand-in for a lesson id a unit declares but nothing built.
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: "Coming soon".to_string(),
            xp_value: 10,
            intro: LessonIntro {
                title: "Coming soon".to_string(),
                ..Default::default()
            },
            exercises: Vec::new(),
        }
    }
}

/// Lessons keyed by lesson id.
pub type LessonMap = HashMap<String, Lesson>;

/// Exercise kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Match,
    Select,
    TrueFalse,
    Type,
    Fill,
    Arrange,
}

/// A single exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Exercise {
    /// Join every left item to its right item.
    Match { pairs: Vec<(String, String)> },
    /// Pick one option.
    Select {
        prompt: String,
        options: Vec<String>,
        answer: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        alternates: Vec<String>,
    },
    /// Judge a statement.
    TrueFalse { prompt: String, answer: bool },
    /// Free text answer.
    Type {
        prompt: String,
        answer: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        alternates: Vec<String>,
    },
    /// Fill the blank; graded like `Type`.
    Fill {
        prompt: String,
        answer: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        alternates: Vec<String>,
    },
    /// Rebuild the answer from a shuffled word bank.
    Arrange {
        prompt: String,
        #[serde(rename = "wordBank")]
        word_bank: Vec<String>,
        answer: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        alternates: Vec<String>,
    },
}

impl Exercise {
    pub fn kind(&self) -> ExerciseKind {
        match self {
            Self::Match { .. } => ExerciseKind::Match,
            Self::Select { .. } => ExerciseKind::Select,
            Self::TrueFalse { .. } => ExerciseKind::TrueFalse,
            Self::Type { .. } => ExerciseKind::Type,
            Self::Fill { .. } => ExerciseKind::Fill,
            Self::Arrange { .. } => ExerciseKind::Arrange,
        }
    }

    /// Prompt text, if the kind has one.
    pub fn prompt(&self) -> Option<&str> {
        match self {
            Self::Match { .. } => None,
            Self::Select { prompt, .. }
            | Self::TrueFalse { prompt, .. }
            | Self::Type { prompt, .. }
            | Self::Fill { prompt, .. }
            | Self::Arrange { prompt, .. } => Some(prompt),
        }
    }
}
