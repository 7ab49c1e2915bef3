/*!
 * Generation cycle for furigana example dialogues.
 *
 * - `core`: the `GenerationService` running one cycle end to end
 * - `lines`: splitting generator output and pairing dialogue with translations
 * - `prompts`: the instruction prompt sent to the text generator
 * - `record`: the sentence records a cycle produces
 */

pub use self::core::{GenerationOptions, GenerationService, SpeakerVoices};
pub use self::lines::{DIALOGUE_LINES, DialoguePair, EXPECTED_LINES, non_blank_lines, pair_dialogue};
pub use self::prompts::PromptTemplate;
pub use self::record::{GenerationOutput, SentenceRecord};

pub mod core;
pub mod lines;
pub mod prompts;
pub mod record;
