/*!
 * Tests for writing generated dialogues to disk
 */

use anyhow::Result;
use reibun::annotation::parse_annotated;
use reibun::audio::{AudioClip, OutputFormat};
use reibun::file_utils::{FileManager, MANIFEST_FILE, PLAYLIST_FILE};
use reibun::generation::{GenerationOutput, SentenceRecord};

use crate::common;

fn sample_output(format: OutputFormat) -> GenerationOutput {
    let sentences = common::DIALOGUE
        .iter()
        .zip(common::TRANSLATIONS)
        .enumerate()
        .map(|(index, (line, translation))| SentenceRecord {
            index,
            translation: translation.to_string(),
            chunks: parse_annotated(line),
            audio: AudioClip::new(format!("clip-{}", index).into_bytes(), format),
            voice_id: if index % 2 == 0 { "Takumi" } else { "Tomoko" }.to_string(),
        })
        .collect();
    GenerationOutput::new(common::sample_target(), sentences)
}

#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a").join("b").join("clip.ogg");

    FileManager::write_to_file(&path, b"data")?;
    assert_eq!(std::fs::read(&path)?, b"data");
    Ok(())
}

#[test]
fn test_sentence_file_name_shouldBeOneBased() {
    assert_eq!(FileManager::sentence_file_name(0, "ogg"), "sentence_1.ogg");
    assert_eq!(FileManager::sentence_file_name(3, "mp3"), "sentence_4.mp3");
}

#[test]
fn test_save_dialogue_shouldWriteClipsInOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = sample_output(OutputFormat::OggOpus);

    let saved = FileManager::save_dialogue(&output, temp_dir.path())?;
    assert!(saved.dir.starts_with(temp_dir.path()));
    assert_eq!(saved.audio_files.len(), 4);
    for (index, path) in saved.audio_files.iter().enumerate() {
        assert_eq!(path.file_name().unwrap().to_string_lossy(), format!("sentence_{}.ogg", index + 1));
        assert_eq!(std::fs::read(path)?, format!("clip-{}", index).into_bytes());
    }
    Ok(())
}

#[test]
fn test_save_dialogue_shouldWritePlaylistInDialogueOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let saved = FileManager::save_dialogue(&sample_output(OutputFormat::Mp3), temp_dir.path())?;

    assert_eq!(saved.playlist.file_name().unwrap(), PLAYLIST_FILE);
    let playlist = std::fs::read_to_string(&saved.playlist)?;
    let entries: Vec<&str> = playlist
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect();
    assert!(playlist.starts_with("#EXTM3U\n"));
    assert_eq!(entries, vec!["sentence_1.mp3", "sentence_2.mp3", "sentence_3.mp3", "sentence_4.mp3"]);
    Ok(())
}

#[test]
fn test_save_dialogue_shouldWriteManifest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let output = sample_output(OutputFormat::OggVorbis);
    let saved = FileManager::save_dialogue(&output, temp_dir.path())?;

    assert_eq!(saved.manifest.file_name().unwrap(), MANIFEST_FILE);
    let manifest: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&saved.manifest)?)?;
    assert_eq!(manifest["id"], output.id.to_string());
    assert_eq!(manifest["kanji"], "箱");
    assert_eq!(manifest["reading_type"], "kun");
    assert_eq!(manifest["pronounce"], "はこ");

    let sentences = manifest["sentences"].as_array().unwrap();
    assert_eq!(sentences.len(), 4);
    assert_eq!(sentences[1]["voice_id"], "Tomoko");
    assert_eq!(sentences[1]["translation"], common::TRANSLATIONS[1]);
    assert_eq!(sentences[1]["audio_file"], "sentence_2.ogg");
    assert_eq!(sentences[1]["mime_type"], "audio/ogg");
    assert_eq!(sentences[0]["chunks"][1]["text"], "箱");
    assert_eq!(sentences[0]["chunks"][1]["pronunciation"], "はこ");
    Ok(())
}

#[test]
fn test_save_dialogue_twice_shouldUseSeparateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let first = FileManager::save_dialogue(&sample_output(OutputFormat::Pcm), temp_dir.path())?;
    let second = FileManager::save_dialogue(&sample_output(OutputFormat::Pcm), temp_dir.path())?;
    assert_ne!(first.dir, second.dir);
    Ok(())
}
