use tracing::debug;

/// Language code used when detection yields nothing.
pub const DEFAULT_LANGUAGE: &str = "hi";

/// Guesses the language a message is written in.
pub trait LanguageDetector: Send + Sync {
    /// Returns a language code, or `None` when the text is not recognizable.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Detector backed by the `whatlang` trigram model.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let info = whatlang::detect(text)?;
        Some(to_iso639_1(info.lang().code()).to_string())
    }
}

/// Detect the language of `text`, substituting `default` on failure.
pub fn detect_or_default(detector: &dyn LanguageDetector, text: &str, default: &str) -> String {
    match detector.detect(text) {
        Some(code) if !code.trim().is_empty() => code,
        _ => {
            debug!(default, "language detection failed, using default");
            default.to_string()
        }
    }
}

/// Two-letter code for the three-letter codes whatlang reports; unknown codes pass through.
pub fn to_iso639_1(code: &str) -> &str {
    match code {
        "ara" => "ar",
        "ben" => "bn",
        "cmn" => "zh",
        "deu" => "de",
        "eng" => "en",
        "fra" => "fr",
        "guj" => "gu",
        "hin" => "hi",
        "ita" => "it",
        "jpn" => "ja",
        "kan" => "kn",
        "kor" => "ko",
        "mal" => "ml",
        "mar" => "mr",
        "nep" => "ne",
        "ori" => "or",
        "pan" => "pa",
        "por" => "pt",
        "rus" => "ru",
        "spa" => "es",
        "tam" => "ta",
        "tel" => "te",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "vie" => "vi",
        other => other,
    }
}
