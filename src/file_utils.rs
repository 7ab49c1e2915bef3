use anyhow::{Result, Context};
use chrono::Local;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::annotation::TextChunk;
use crate::generation::GenerationOutput;
use crate::kanji::ReadingType;

// @module: Writing generated dialogues to disk

/// Playlist chaining the sentence clips in dialogue order
pub const PLAYLIST_FILE: &str = "dialogue.m3u";

/// JSON description of the dialogue
pub const MANIFEST_FILE: &str = "dialogue.json";

/// Paths written for one dialogue
#[derive(Debug, Clone)]
pub struct SavedDialogue {
    pub dir: PathBuf,
    /// One clip per sentence, in dialogue order
    pub audio_files: Vec<PathBuf>,
    pub playlist: PathBuf,
    pub manifest: PathBuf,
}

#[derive(Debug, Serialize)]
struct DialogueManifest<'a> {
    id: Uuid,
    kanji: &'a str,
    reading_type: ReadingType,
    pronounce: &'a str,
    sentences: Vec<ManifestSentence<'a>>,
}

#[derive(Debug, Serialize)]
struct ManifestSentence<'a> {
    index: usize,
    voice_id: &'a str,
    chunks: &'a [TextChunk],
    translation: &'a str,
    audio_file: String,
    mime_type: &'a str,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Write bytes to a file, creating the parent directory
    pub fn write_to_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, content: C) -> Result<()> {
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Directory name for a dialogue: local timestamp plus the short cycle id
    pub fn dialogue_dir_name(output: &GenerationOutput) -> String {
        let id = output.id.simple().to_string();
        format!("{}-{}", Local::now().format("%Y%m%d-%H%M%S"), &id[..8])
    }

    /// File name of one sentence clip
    pub fn sentence_file_name(index: usize, extension: &str) -> String {
        format!("sentence_{}.{}", index + 1, extension)
    }

    /// Write the clips, playlist and manifest of a dialogue into its own directory
    pub fn save_dialogue<P: AsRef<Path>>(output: &GenerationOutput, output_root: P) -> Result<SavedDialogue> {
        let dir = output_root.as_ref().join(Self::dialogue_dir_name(output));
        Self::ensure_dir(&dir)?;

        let mut audio_files = Vec::with_capacity(output.sentences.len());
        let mut manifest_sentences = Vec::with_capacity(output.sentences.len());

        for sentence in &output.sentences {
            let file_name = Self::sentence_file_name(sentence.index, sentence.audio.format.extension());
            let path = dir.join(&file_name);
            Self::write_to_file(&path, &sentence.audio.data)?;
            audio_files.push(path);

            manifest_sentences.push(ManifestSentence {
                index: sentence.index,
                voice_id: &sentence.voice_id,
                chunks: &sentence.chunks,
                translation: &sentence.translation,
                audio_file: file_name,
                mime_type: sentence.audio.mime_type(),
            });
        }

        let playlist = dir.join(PLAYLIST_FILE);
        Self::write_to_file(&playlist, Self::playlist_contents(&manifest_sentences))?;

        let manifest = dir.join(MANIFEST_FILE);
        let manifest_json = serde_json::to_string_pretty(&DialogueManifest {
            id: output.id,
            kanji: &output.target.kanji,
            reading_type: output.target.reading_type,
            pronounce: &output.target.pronounce,
            sentences: manifest_sentences,
        })
        .context("Failed to serialize dialogue manifest")?;
        Self::write_to_file(&manifest, manifest_json)?;

        Ok(SavedDialogue { dir, audio_files, playlist, manifest })
    }

    fn playlist_contents(sentences: &[ManifestSentence<'_>]) -> String {
        let mut playlist = String::from("#EXTM3U\n");
        for sentence in sentences {
            playlist.push_str(&format!(
                "#EXTINF:-1,{} - line {}\n{}\n",
                sentence.voice_id,
                sentence.index + 1,
                sentence.audio_file
            ));
        }
        playlist
    }
}
