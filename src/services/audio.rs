//! WAV container packaging and the fallback tone synthesizer.
//!
//! The writer emits the canonical 44-byte RIFF/WAVE header followed by the
//! raw PCM payload, with all declared sizes computed from the buffer itself.
//! The fallback synthesizer renders a deterministic sine tone standing in for
//! real speech when the TTS API is unreachable — it is a placeholder, not a
//! speech substitute.

use crate::services::keywords::clean_script;

/// Sample rate of PCM returned by the remote TTS API.
pub const REMOTE_SAMPLE_RATE: u32 = 24000;
/// Sample rate used by the locally synthesized fallback tone.
pub const FALLBACK_SAMPLE_RATE: u32 = 44100;

const SECONDS_PER_WORD: f32 = 0.5;
const MAX_CLIP_SECONDS: f32 = 30.0;
const TONE_AMPLITUDE: f32 = 0.3;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WavError {
    #[error("{0} must be non-zero")]
    ZeroField(&'static str),
    #[error("pcm length {pcm_len} is not a multiple of block align {block_align}")]
    LengthMismatch { pcm_len: usize, block_align: u16 },
    #[error("pcm payload too large for a wav container")]
    PayloadTooLarge,
}

/// Package raw PCM into a complete WAV file.
///
/// Header sizes are derived from `pcm.len()`, so the declared and actual
/// payload lengths can never disagree. A buffer that doesn't divide evenly
/// into frames is a caller bug and is rejected rather than truncated or
/// padded.
pub fn write_wav(
    pcm: &[u8],
    channels: u16,
    sample_rate: u32,
    sample_width: u16,
) -> Result<Vec<u8>, WavError> {
    if channels == 0 {
        return Err(WavError::ZeroField("channels"));
    }
    if sample_rate == 0 {
        return Err(WavError::ZeroField("sample_rate"));
    }
    if sample_width == 0 {
        return Err(WavError::ZeroField("sample_width"));
    }

    let block_align = channels * sample_width;
    if pcm.len() % block_align as usize != 0 {
        return Err(WavError::LengthMismatch {
            pcm_len: pcm.len(),
            block_align,
        });
    }
    if pcm.len() > (u32::MAX - 36) as usize {
        return Err(WavError::PayloadTooLarge);
    }

    let data_len = pcm.len() as u32;
    let byte_rate = sample_rate * channels as u32 * sample_width as u32;
    let bits_per_sample = sample_width * 8;

    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(data_len + 36).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);

    Ok(wav)
}

/// Synthesize a placeholder tone clip for a script when TTS is unavailable.
///
/// Duration is 0.5 s per word of the cleaned script, capped at 30 s. The tone
/// frequency is derived from an FNV-1a hash of the cleaned text so identical
/// input always produces byte-identical output. Empty text yields a valid
/// WAV with an empty payload.
pub fn synthesize_fallback_tone(text: &str) -> Result<Vec<u8>, WavError> {
    let cleaned = clean_script(text);
    let word_count = cleaned.split_whitespace().count();

    let duration = (word_count as f32 * SECONDS_PER_WORD).min(MAX_CLIP_SECONDS);
    let frequency = 440.0 + (fnv1a64(cleaned.as_bytes()) % 200) as f32;

    let sample_count = (duration * FALLBACK_SAMPLE_RATE as f32) as usize;
    let mut pcm = Vec::with_capacity(sample_count * 2);
    for i in 0..sample_count {
        let t = i as f32 / FALLBACK_SAMPLE_RATE as f32;
        let value = TONE_AMPLITUDE * (2.0 * std::f32::consts::PI * frequency * t).sin();
        let sample = (value * i16::MAX as f32) as i16;
        pcm.extend_from_slice(&sample.to_le_bytes());
    }

    write_wav(&pcm, 1, FALLBACK_SAMPLE_RATE, 2)
}

/// FNV-1a over UTF-8 bytes. Fixed hash so tone frequency selection is stable
/// across runs and processes.
fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET_BASIS, |hash, b| (hash ^ *b as u64).wrapping_mul(PRIME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn u16_at(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn test_wav_header_round_trip() {
        // 1000 zero samples, mono 16-bit at 24000 Hz.
        let pcm = vec![0u8; 2000];
        let wav = write_wav(&pcm, 1, 24000, 2).unwrap();

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 2000 + 36); // ChunkSize
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1); // PCM
        assert_eq!(u16_at(&wav, 22), 1); // channels
        assert_eq!(u32_at(&wav, 24), 24000);
        assert_eq!(u32_at(&wav, 28), 48000); // byte rate
        assert_eq!(u16_at(&wav, 32), 2); // block align
        assert_eq!(u16_at(&wav, 34), 16); // bits per sample
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 2000); // Subchunk2Size
        assert_eq!(&wav[44..], &pcm[..]);
        assert_eq!(wav.len(), 44 + 2000);
    }

    #[test]
    fn test_wav_rejects_misaligned_payload() {
        // 3 bytes cannot hold whole 16-bit mono frames.
        let err = write_wav(&[0, 0, 0], 1, 44100, 2).unwrap_err();
        assert_eq!(
            err,
            WavError::LengthMismatch {
                pcm_len: 3,
                block_align: 2
            }
        );
    }

    #[test]
    fn test_wav_rejects_zero_fields() {
        assert_eq!(write_wav(&[], 0, 44100, 2).unwrap_err(), WavError::ZeroField("channels"));
        assert_eq!(write_wav(&[], 1, 0, 2).unwrap_err(), WavError::ZeroField("sample_rate"));
        assert_eq!(write_wav(&[], 1, 44100, 0).unwrap_err(), WavError::ZeroField("sample_width"));
    }

    #[test]
    fn test_empty_payload_is_valid_wav() {
        let wav = write_wav(&[], 1, 44100, 2).unwrap();
        assert_eq!(wav.len(), 44);
        assert_eq!(u32_at(&wav, 40), 0);
    }

    #[test]
    fn test_fallback_tone_deterministic() {
        let a = synthesize_fallback_tone("Sharks swim fast").unwrap();
        let b = synthesize_fallback_tone("Sharks swim fast").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_tone_duration() {
        // 4 words -> 2 seconds of 16-bit mono at 44100 Hz.
        let wav = synthesize_fallback_tone("one moment please thanks").unwrap();
        assert_eq!(wav.len(), 44 + 2 * 44100 * 2);
    }

    #[test]
    fn test_fallback_tone_duration_capped() {
        // 100 words would be 50 seconds uncapped; the clip stops at 30.
        let text = (0..100).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ");
        let wav = synthesize_fallback_tone(&text).unwrap();
        assert_eq!(wav.len(), 44 + 30 * 44100 * 2);
    }

    #[test]
    fn test_fallback_tone_empty_text() {
        let wav = synthesize_fallback_tone("").unwrap();
        assert_eq!(wav.len(), 44);
    }

    #[test]
    fn test_fallback_tone_markup_does_not_add_duration() {
        // Stage directions and cues are stripped before the word count.
        let with_markup = synthesize_fallback_tone("(laugh) hello [BEEP] world").unwrap();
        let without = synthesize_fallback_tone("hello  world").unwrap();
        assert_eq!(with_markup.len(), without.len());
    }

    #[test]
    fn test_fnv1a_known_vectors() {
        // Published FNV-1a 64-bit test vectors.
        assert_eq!(fnv1a64(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a64(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1a64(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn test_tone_frequency_in_range() {
        for text in ["alpha", "bravo charlie", "delta echo foxtrot"] {
            let cleaned = clean_script(text);
            let freq = 440 + (fnv1a64(cleaned.as_bytes()) % 200);
            assert!((440..640).contains(&freq));
        }
    }
}
