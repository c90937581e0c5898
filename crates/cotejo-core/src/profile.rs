use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CotejoError;

/// One known project: display name plus the lowercase keywords that
/// identify it in a subject line or sender address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDef {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Word lists and the project table driving subject matching.
///
/// The defaults cover the vocabulary the comparison mails actually use;
/// a JSON file can override any subset of the fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchProfile {
    /// Subject words too generic to discriminate between files.
    pub stop_words: Vec<String>,
    /// Project code words. Also stopped: every file in a project folder
    /// tends to carry them.
    pub project_codes: Vec<String>,
    /// Filename tokens excluded from the match-ratio denominator.
    pub name_noise_words: Vec<String>,
    /// Ordered project table; the first keyword hit wins.
    pub projects: Vec<ProjectDef>,
}

impl Default for MatchProfile {
    fn default() -> Self {
        Self {
            stop_words: strings(&[
                "requerimiento",
                "cc",
                "envio",
                "adjunto",
                "solicitud",
                "cotizacion",
                "cotización",
                "propuesta",
                "para",
                "aprobacion",
                "aprobación",
                "de",
                "del",
                "por",
                "con",
                "los",
                "las",
                "una",
                "uno",
                "que",
                "se",
                "en",
                "la",
                "el",
                "al",
                "y",
                "o",
                "a",
                "no",
                "si",
                "su",
                "re",
                "fwd",
                "comparativo",
                "comparativos",
                "cuadro",
                "evaluacion",
                "evaluación",
            ]),
            project_codes: strings(&["beethoven", "btv", "mater", "mara", "roosevelt", "alma"]),
            name_noise_words: strings(&["rcos", "cuadro", "comparativo"]),
            projects: vec![
                project("BEETHOVEN", &["beethoven", "btv"]),
                project("BIOMEDICAS", &["biomédica", "biomedica", "biomed"]),
                project(
                    "ROOSEVELT",
                    &["roosevelt", "frankling", "franklin", "rooselvet", "roosevel"],
                ),
                project("ALMA MATER", &["alma mater", "alma.mater", "mater"]),
                project("MARA", &["mara"]),
                project("CENEPA", &["cenepa"]),
            ],
        }
    }
}

impl MatchProfile {
    /// True for words that never help match a subject against a filename.
    pub fn is_stopped(&self, word: &str) -> bool {
        self.stop_words.iter().any(|w| w == word)
            || self.project_codes.iter().any(|w| w == word)
    }

    pub fn is_name_noise(&self, word: &str) -> bool {
        self.name_noise_words.iter().any(|w| w == word)
    }
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn project(name: &str, keywords: &[&str]) -> ProjectDef {
    ProjectDef {
        name: name.to_string(),
        keywords: strings(keywords),
    }
}

/// Load a match profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<MatchProfile, CotejoError> {
    let content = std::fs::read_to_string(path).map_err(|e| CotejoError::ProfileLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_profile(&content, path)
}

/// Parse a match profile from a JSON string.
pub fn parse_profile(json: &str, source: &Path) -> Result<MatchProfile, CotejoError> {
    let profile: MatchProfile = serde_json::from_str(json).map_err(|e| CotejoError::ProfileLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Validate that a profile is well-formed. All matching happens against
/// lowercased text, so every configured word must already be lowercase.
pub fn validate_profile(profile: &MatchProfile) -> Result<(), CotejoError> {
    for list in [
        &profile.stop_words,
        &profile.project_codes,
        &profile.name_noise_words,
    ] {
        for word in list {
            if word.trim().is_empty() {
                return Err(CotejoError::ProfileInvalid(
                    "word lists must not contain empty entries".into(),
                ));
            }
            if *word != word.to_lowercase() {
                return Err(CotejoError::ProfileInvalid(format!(
                    "word '{word}' must be lowercase"
                )));
            }
        }
    }

    for proj in &profile.projects {
        if proj.name.trim().is_empty() {
            return Err(CotejoError::ProfileInvalid(
                "project name must not be empty".into(),
            ));
        }
        if proj.keywords.is_empty() {
            return Err(CotejoError::ProfileInvalid(format!(
                "project '{}' has no keywords",
                proj.name
            )));
        }
        for kw in &proj.keywords {
            if kw.trim().is_empty() {
                return Err(CotejoError::ProfileInvalid(format!(
                    "project '{}' has an empty keyword",
                    proj.name
                )));
            }
            if *kw != kw.to_lowercase() {
                return Err(CotejoError::ProfileInvalid(format!(
                    "project '{}' keyword '{kw}' must be lowercase",
                    proj.name
                )));
            }
        }
    }

    Ok(())
}

/// Pick the project a mail belongs to from its subject and sender address.
/// Projects are tried in table order; the first keyword hit wins.
pub fn detect_project<'a>(
    subject: &str,
    sender: &str,
    profile: &'a MatchProfile,
) -> Option<&'a str> {
    let haystack = format!("{subject} {sender}").to_lowercase();
    for proj in &profile.projects {
        if proj.keywords.iter().any(|kw| haystack.contains(kw.as_str())) {
            return Some(&proj.name);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        let profile = MatchProfile::default();
        validate_profile(&profile).unwrap();
        assert!(profile.is_stopped("comparativo"));
        assert!(profile.is_stopped("btv"));
        assert!(!profile.is_stopped("transformador"));
        assert!(profile.is_name_noise("rcos"));
    }

    #[test]
    fn test_detect_project_from_subject() {
        let profile = MatchProfile::default();
        let detected = detect_project("Fwd: CC. BEETHOVEN Transformador TR-4", "", &profile);
        assert_eq!(detected, Some("BEETHOVEN"));
    }

    #[test]
    fn test_detect_project_from_sender() {
        let profile = MatchProfile::default();
        let detected = detect_project("Comparativo bombas", "obra.mara@example.pe", &profile);
        assert_eq!(detected, Some("MARA"));
    }

    #[test]
    fn test_detect_project_first_match_wins() {
        let profile = MatchProfile::default();
        // "mater" also matches ALMA MATER, but BEETHOVEN sits earlier.
        let detected = detect_project("btv alma mater", "", &profile);
        assert_eq!(detected, Some("BEETHOVEN"));
    }

    #[test]
    fn test_detect_project_none() {
        let profile = MatchProfile::default();
        assert_eq!(detect_project("Cotizacion luminarias", "", &profile), None);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "project_codes": ["norte"] }"#;
        let profile = parse_profile(json, Path::new("test.json")).unwrap();
        assert!(profile.is_stopped("norte"));
        assert!(!profile.is_stopped("btv"));
        // Builtin stop words survive the override.
        assert!(profile.is_stopped("comparativo"));
    }

    #[test]
    fn test_uppercase_keyword_rejected() {
        let json = r#"{ "projects": [ { "name": "NORTE", "keywords": ["Norte"] } ] }"#;
        assert!(parse_profile(json, Path::new("test.json")).is_err());
    }

    #[test]
    fn test_empty_project_keywords_rejected() {
        let json = r#"{ "projects": [ { "name": "NORTE", "keywords": [] } ] }"#;
        assert!(parse_profile(json, Path::new("test.json")).is_err());
    }
}
