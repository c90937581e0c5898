use std::collections::HashMap;

use crate::model::{CandidateFile, ScoredCandidate};
use crate::parsing::keywords::{subject_keywords, word_tokens};
use crate::profile::MatchProfile;

/// How many ranked candidates of one folder get opened and scanned.
pub const MAX_FOLDER_CANDIDATES: usize = 3;

/// Rank folder candidates by how well their names match the subject.
///
/// Scores are recomputed per call; ties keep the listing order.
pub fn rank_candidates(
    subject: &str,
    files: &[CandidateFile],
    profile: &MatchProfile,
) -> Vec<ScoredCandidate> {
    let keywords = subject_keywords(subject, profile);
    rank_with_keywords(&keywords, files, profile)
}

pub fn rank_with_keywords(
    keywords: &[String],
    files: &[CandidateFile],
    profile: &MatchProfile,
) -> Vec<ScoredCandidate> {
    let lowered: Vec<String> = files.iter().map(|f| f.name.to_lowercase()).collect();

    // Rare keywords discriminate; weight each by how many candidates share it.
    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for kw in keywords {
        let count = lowered.iter().filter(|n| n.contains(kw.as_str())).count();
        frequency.insert(kw.as_str(), count.max(1));
    }

    let bigrams = keyword_bigrams(keywords);

    let mut scored: Vec<ScoredCandidate> = files
        .iter()
        .zip(&lowered)
        .map(|(file, name_lower)| ScoredCandidate {
            file: file.clone(),
            score: score_name(name_lower, keywords, &bigrams, &frequency, profile),
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

fn score_name(
    name_lower: &str,
    keywords: &[String],
    bigrams: &[String],
    frequency: &HashMap<&str, usize>,
    profile: &MatchProfile,
) -> f64 {
    let mut score = 0.0;

    for kw in keywords {
        if name_lower.contains(kw.as_str()) {
            let freq = frequency.get(kw.as_str()).copied().unwrap_or(1) as f64;
            score += 3.0 / freq;
            if kw.chars().count() >= 6 {
                score += 1.0 / freq;
            }
        }
    }

    // Two consecutive subject words appearing together in the name is a
    // much stronger signal than the words separately.
    for bigram in bigrams {
        if name_lower.contains(bigram.as_str()) {
            score += 5.0;
        }
    }

    if name_lower.contains("comparativo") || name_lower.contains("cuadro") {
        score += 0.5;
    }

    // Shorter, more specific names win near-ties: reward the share of
    // name tokens covered by the subject keywords.
    let name_tokens = word_tokens(name_lower);
    let significant = name_tokens
        .iter()
        .filter(|w| !profile.is_name_noise(w))
        .count();
    let matched = keywords
        .iter()
        .filter(|kw| name_lower.contains(kw.as_str()))
        .count();
    if significant > 0 && matched > 0 {
        score += matched as f64 / significant as f64 * 2.0;
    }

    score
}

/// Consecutive keyword pairs joined with a space, a hyphen, and nothing,
/// to match file names like "UPS TRANSFORMADOR", "UPS-TRANSFORMADOR" and
/// "UPSTRANSFORMADOR".
fn keyword_bigrams(keywords: &[String]) -> Vec<String> {
    let mut bigrams = Vec::new();
    for pair in keywords.windows(2) {
        bigrams.push(format!("{} {}", pair[0], pair[1]));
        bigrams.push(format!("{}-{}", pair[0], pair[1]));
        bigrams.push(format!("{}{}", pair[0], pair[1]));
    }
    bigrams
}
