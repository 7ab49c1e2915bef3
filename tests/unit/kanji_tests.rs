/*!
 * Tests for the kanji table and target selection
 */

use std::collections::HashSet;
use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use reibun::errors::GenerationError;
use reibun::kanji::{KanjiEntry, KanjiTable, ReadingType};

use crate::common;

#[test]
fn test_load_withJsonFile_shouldReadTriples() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("kanji.json");
    std::fs::write(&path, r#"[["箱", [], ["はこ"]], ["雨", ["ウ"], ["あめ", "あま"]]]"#)?;

    let table = KanjiTable::load(&path)?;
    assert_eq!(table.entries().len(), 2);
    assert_eq!(table.entries()[1].kun_readings, vec!["あめ", "あま"]);
    assert_eq!(table.candidates().len(), 4);
    Ok(())
}

#[test]
fn test_load_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(KanjiTable::load(temp_dir.path().join("missing.json")).is_err());
    Ok(())
}

#[test]
fn test_fromJson_withObjectEntries_shouldFail() {
    assert!(KanjiTable::from_json_str(r#"[{"kanji": "箱"}]"#).is_err());
}

#[test]
fn test_entry_serialization_shouldUseTripleFormat() {
    let entry = KanjiEntry {
        kanji: "中".to_string(),
        on_readings: vec!["チュウ".to_string()],
        kun_readings: vec!["なか".to_string()],
    };
    assert_eq!(serde_json::to_string(&entry).unwrap(), r#"["中",["チュウ"],["なか"]]"#);
}

#[test]
fn test_selectRandom_withManyDraws_shouldReachEveryCandidate() {
    let table = KanjiTable::from_json_str(r#"[["中", ["チュウ"], ["なか", "うち"]]]"#).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    let seen: HashSet<String> = (0..200)
        .map(|_| table.select_random(&mut rng).unwrap().pronounce)
        .collect();
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_selectFor_withUnknownKanji_shouldReportNoCandidates() {
    let mut rng = StdRng::seed_from_u64(1);
    let result = KanjiTable::builtin().select_for("鬱", None, &mut rng);
    assert!(matches!(result, Err(GenerationError::NoCandidates)));
}

#[test]
fn test_selectFor_withKanjiOnly_shouldStayOnThatKanji() {
    let mut rng = StdRng::seed_from_u64(7);
    let table = KanjiTable::builtin();
    for _ in 0..20 {
        let candidate = table.select_for("下", None, &mut rng).unwrap();
        assert_eq!(candidate.kanji, "下");
    }
}

#[test]
fn test_builtinTable_shouldHaveBothReadingTypes() {
    let candidates = KanjiTable::builtin().candidates();
    assert!(candidates.iter().any(|c| c.reading_type == ReadingType::On));
    assert!(candidates.iter().any(|c| c.reading_type == ReadingType::Kun));
    assert!(candidates.iter().all(|c| !c.pronounce.is_empty()));
}
