pub mod audio;
pub mod gemini;
pub mod keywords;
pub mod prompt;
