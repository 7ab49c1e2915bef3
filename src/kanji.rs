/*!
 * Kanji readings and random target selection.
 *
 * A kanji table lists each kanji with its on (音) and kun (訓) readings. Every
 * reading of every kanji is a separate candidate, and a generation cycle
 * targets one candidate picked uniformly at random.
 */

use anyhow::{Context, Result};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::GenerationError;

/// Kind of reading a candidate exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingType {
    On,
    Kun,
}

impl ReadingType {
    /// Korean label used in the generation prompt (음독 / 훈독)
    pub fn korean_label(&self) -> &'static str {
        match self {
            Self::On => "음",
            Self::Kun => "훈",
        }
    }
}

impl std::fmt::Display for ReadingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Kun => write!(f, "kun"),
        }
    }
}

/// One kanji with its readings.
///
/// Serialized as a `[kanji, [on...], [kun...]]` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, Vec<String>, Vec<String>)", into = "(String, Vec<String>, Vec<String>)")]
pub struct KanjiEntry {
    pub kanji: String,
    pub on_readings: Vec<String>,
    pub kun_readings: Vec<String>,
}

impl From<(String, Vec<String>, Vec<String>)> for KanjiEntry {
    fn from((kanji, on_readings, kun_readings): (String, Vec<String>, Vec<String>)) -> Self {
        Self { kanji, on_readings, kun_readings }
    }
}

impl From<KanjiEntry> for (String, Vec<String>, Vec<String>) {
    fn from(entry: KanjiEntry) -> Self {
        (entry.kanji, entry.on_readings, entry.kun_readings)
    }
}

/// A single kanji reading targeted by a generation cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiCandidate {
    pub kanji: String,
    pub reading_type: ReadingType,
    pub pronounce: String,
}

/// Table of kanji readings
#[derive(Debug, Clone)]
pub struct KanjiTable {
    entries: Vec<KanjiEntry>,
}

impl KanjiTable {
    pub fn new(entries: Vec<KanjiEntry>) -> Self {
        Self { entries }
    }

    /// The table shipped with the crate
    pub fn builtin() -> Self {
        let entries = BUILTIN_KANJI
            .iter()
            .map(|(kanji, on, kun)| KanjiEntry {
                kanji: kanji.to_string(),
                on_readings: on.iter().map(|r| r.to_string()).collect(),
                kun_readings: kun.iter().map(|r| r.to_string()).collect(),
            })
            .collect();
        Self { entries }
    }

    /// Parse a JSON array of `[kanji, [on...], [kun...]]` triples
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<KanjiEntry> = serde_json::from_str(json)
            .context("Failed to parse kanji table")?;
        Ok(Self { entries })
    }

    /// Load a kanji table from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read kanji table: {:?}", path))?;
        let table = Self::from_json_str(&json)?;
        debug!("Loaded {} kanji from {:?}", table.entries.len(), path);
        Ok(table)
    }

    pub fn entries(&self) -> &[KanjiEntry] {
        &self.entries
    }

    /// Flatten the table: for each kanji, its on readings then its kun readings
    pub fn candidates(&self) -> Vec<KanjiCandidate> {
        let mut candidates = Vec::new();
        for entry in &self.entries {
            for on in &entry.on_readings {
                candidates.push(KanjiCandidate {
                    kanji: entry.kanji.clone(),
                    reading_type: ReadingType::On,
                    pronounce: on.clone(),
                });
            }
            for kun in &entry.kun_readings {
                candidates.push(KanjiCandidate {
                    kanji: entry.kanji.clone(),
                    reading_type: ReadingType::Kun,
                    pronounce: kun.clone(),
                });
            }
        }
        candidates
    }

    /// Pick a candidate uniformly at random
    pub fn select_random<R: Rng>(&self, rng: &mut R) -> Result<KanjiCandidate, GenerationError> {
        pick(self.candidates(), rng)
    }

    /// Pick among the candidates for one kanji, optionally pinned to a reading
    pub fn select_for<R: Rng>(
        &self,
        kanji: &str,
        reading: Option<&str>,
        rng: &mut R,
    ) -> Result<KanjiCandidate, GenerationError> {
        let matching = self
            .candidates()
            .into_iter()
            .filter(|c| c.kanji == kanji)
            .filter(|c| reading.is_none_or(|r| c.pronounce == r))
            .collect();
        pick(matching, rng)
    }
}

fn pick<R: Rng>(mut candidates: Vec<KanjiCandidate>, rng: &mut R) -> Result<KanjiCandidate, GenerationError> {
    if candidates.is_empty() {
        return Err(GenerationError::NoCandidates);
    }
    let index = rng.random_range(0..candidates.len());
    Ok(candidates.swap_remove(index))
}

type BuiltinEntry = (&'static str, &'static [&'static str], &'static [&'static str]);

static BUILTIN_KANJI: &[BuiltinEntry] = &[
    ("一", &["イチ", "イツ"], &["ひと"]),
    ("二", &["ニ"], &["ふた"]),
    ("三", &["サン"], &["み"]),
    ("六", &["ロク"], &["む", "むっ"]),
    ("人", &["ジン", "ニン"], &["ひと"]),
    ("入", &["ニュウ"], &["い", "はい"]),
    ("分", &["ブン", "フン", "ブ"], &["わ"]),
    ("数", &["スウ"], &["かず", "かぞ"]),
    ("中", &["チュウ"], &["なか"]),
    ("箱", &[], &["はこ"]),
    ("上", &["ジョウ"], &["うえ", "あ", "のぼ"]),
    ("下", &["カ", "ゲ"], &["した", "さ", "くだ", "お"]),
    ("生", &["セイ", "ショウ"], &["い", "う", "は", "なま"]),
    ("行", &["コウ", "ギョウ"], &["い", "ゆ", "おこな"]),
    ("見", &["ケン"], &["み"]),
    ("読", &["ドク", "トク"], &["よ"]),
    ("書", &["ショ"], &["か"]),
    ("話", &["ワ"], &["はな", "はなし"]),
    ("食", &["ショク"], &["た", "く"]),
    ("水", &["スイ"], &["みず"]),
    ("火", &["カ"], &["ひ"]),
    ("木", &["ボク", "モク"], &["き"]),
    ("山", &["サン"], &["やま"]),
    ("川", &["セン"], &["かわ"]),
    ("雨", &["ウ"], &["あめ"]),
    ("空", &["クウ"], &["そら", "あ", "から"]),
    ("花", &["カ"], &["はな"]),
    ("時", &["ジ"], &["とき"]),
    ("間", &["カン", "ケン"], &["あいだ", "ま"]),
    ("長", &["チョウ"], &["なが"]),
    ("明", &["メイ", "ミョウ"], &["あか", "あ"]),
    ("強", &["キョウ", "ゴウ"], &["つよ"]),
];
