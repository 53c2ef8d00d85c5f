//! Prompt construction for the script generation call.

/// Base prompt used when the request carries no custom prompt.
const BASE_PROMPT: &str = r#"
Generate a short, creative, and funny 30-second reel script in a curious tone for speech generation for a fast-paced Instagram reel.
add "Speech speed should be 5x" in every output.
The script must ONLY be about ONE of the following topics:
1. A list of random, surprising, or weird facts (could be historical, science-based, or internet trends).
2. A short, humorous and quirky fictional mini-story.
3. A light, curious, and slightly funny take on a recent geopolitical event or news trend (must be non-offensive and friendly).

The script should be formatted for a VOICEOVER with stage directions in parentheses (e.g., (soft laugh), (pause), (playful chuckle)) to indicate emotions, pauses, and tone shifts.
Include SOUND EFFECT suggestions in ALL CAPS inside square brackets [e.g., [BEEP], [WAVES], [DRUM ROLL]] wherever relevant for comedic or dramatic effect.

Style rules:
- Humor should be light, friendly, and relatable—similar to casual Instagram reel background audio.
- Can reference recent internet memes, viral trends, or pop culture moments if relevant to the topic.
- Maintain natural pauses, laughter cues, and changes in tone.
- Keep it around 80–120 words so it fits in ~30 seconds.
- Always open with a hook that makes people curious.

Example:
(Playful chuckle)
Voiceover: You know octopuses have three hearts… (pause) and two of them stop beating when they swim?
[LITTLE SPLASH SOUND]
Voiceover: Yeah… so basically, cardio day is a literal heartbreaker for them. (laugh)

Now, generate the script.
"#;

/// Build the generation prompt. A non-empty custom prompt replaces the base
/// prompt wholesale.
pub fn build_prompt(custom_prompt: Option<&str>) -> String {
    match custom_prompt {
        Some(p) if !p.trim().is_empty() => p.to_string(),
        _ => BASE_PROMPT.to_string(),
    }
}
