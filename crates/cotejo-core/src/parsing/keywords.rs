use std::sync::LazyLock;

use regex::Regex;

use crate::profile::MatchProfile;

static REPLY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(re|fwd|rv|fw)\s*:\s*").unwrap());

// Runs of three or more letters. The class only matches lowercase, so
// callers lowercase their text first.
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-záéíóúñü]{3,}").unwrap());

/// Tokenize lowercased text into words of three or more letters.
pub fn word_tokens(text: &str) -> Vec<String> {
    WORD.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Derive the discriminating keywords of a mail subject.
///
/// Strips stacked reply prefixes ("Re: Fwd: ..."), tokenizes, and drops
/// the profile's stop words and project codes. What remains is what
/// distinguishes this comparison from its siblings in a project folder.
pub fn subject_keywords(subject: &str, profile: &MatchProfile) -> Vec<String> {
    if subject.trim().is_empty() {
        return Vec::new();
    }

    let mut text = subject.to_lowercase();
    loop {
        let stripped = REPLY_PREFIX.replace(&text, "").trim().to_string();
        if stripped == text {
            break;
        }
        text = stripped;
    }

    word_tokens(&text)
        .into_iter()
        .filter(|w| !profile.is_stopped(w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_stacked_reply_prefixes() {
        let profile = MatchProfile::default();
        let kws = subject_keywords("Re: Fwd: CC. BEETHOVEN Transformador TR-4", &profile);
        assert_eq!(kws, vec!["transformador"]);
    }

    #[test]
    fn test_scenario_keywords_reduce_to_discriminator() {
        let profile = MatchProfile::default();
        // "cc" is stopped, "beethoven" is a project code, "tr" is under
        // three letters; only the equipment word survives.
        let kws = subject_keywords("Fwd: CC. BEETHOVEN Transformador TR-4", &profile);
        assert_eq!(kws, vec!["transformador"]);
    }

    #[test]
    fn test_accented_words_kept() {
        let profile = MatchProfile::default();
        let kws = subject_keywords("Señalización de túnel", &profile);
        assert_eq!(kws, vec!["señalización", "túnel"]);
    }

    #[test]
    fn test_stop_words_removed() {
        let profile = MatchProfile::default();
        let kws = subject_keywords("Cuadro comparativo para aprobacion de bombas", &profile);
        assert_eq!(kws, vec!["bombas"]);
    }

    #[test]
    fn test_empty_subject() {
        let profile = MatchProfile::default();
        assert!(subject_keywords("", &profile).is_empty());
        assert!(subject_keywords("   ", &profile).is_empty());
    }

    #[test]
    fn test_word_tokens_minimum_length() {
        assert_eq!(word_tokens("ups tr-4 de red"), vec!["ups", "red"]);
    }
}
