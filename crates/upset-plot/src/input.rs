use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use upset_scales::{DataError, Pattern};

use crate::color::{Color, ColorParseError};
use crate::options::Options;

/// Everything the host hands over on a render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartInput {
    pub data: Vec<Pattern>,
    #[serde(default)]
    pub options: Options,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid data: {0}")]
    Data(#[from] DataError),
    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),
}

/// Codes used by some pattern but missing from the marginal list, sorted.
pub fn missing_codes(input: &ChartInput) -> Vec<String> {
    let known: BTreeSet<&str> = input
        .options
        .marginal_data
        .iter()
        .map(|m| m.code.as_str())
        .collect();
    input
        .data
        .iter()
        .flat_map(Pattern::codes)
        .filter(|code| !known.contains(code))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn validate(input: &ChartInput) -> Result<(), LoadError> {
    for pattern in &input.data {
        pattern.validate()?;
    }
    input.options.colors.validate()?;
    for color in input.options.code_to_color.values() {
        Color::parse(color)?;
    }
    Ok(())
}

pub fn parse_input(json: &str) -> Result<ChartInput, LoadError> {
    let input: ChartInput = serde_json::from_str(json)?;
    validate(&input)?;

    let missing = missing_codes(&input);
    if !missing.is_empty() {
        log::warn!(
            "codes without a marginal count will not get a column: {}",
            missing.join(", ")
        );
    }
    Ok(input)
}

pub fn load_input(path: &Path) -> Result<ChartInput, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let input = parse_input(&json)?;
    log::debug!(
        "loaded {} patterns and {} codes from {}",
        input.data.len(),
        input.options.marginal_data.len(),
        path.display()
    );
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const INPUT: &str = r##"{
        "data": [
            {"pattern": "250.2-401.1", "size": 2, "count": 120, "pointEst": 1.4,
             "lower": 1.1, "upper": 1.9, "num_snp": 3},
            {"pattern": "278.1", "size": 1, "count": 80, "pointEst": 0.9,
             "lower": null, "upper": null, "num_snp": 80}
        ],
        "options": {
            "code_to_color": {"250.2": "#ff7f0e"},
            "min_set_size": 50,
            "marginalData": [
                {"code": "250.2", "count": 300},
                {"code": "401.1", "count": 250}
            ],
            "msg_loc": "upset_selection"
        }
    }"##;

    #[test]
    fn parses_host_document() {
        let input = parse_input(INPUT).unwrap();
        assert_eq!(input.data.len(), 2);
        assert_eq!(input.options.min_set_size, 50.0);
        assert_eq!(input.options.channel(), "upset_selection");
        assert_eq!(input.options.colors.light_blue, "#4292c6");
        assert_eq!(missing_codes(&input), vec!["278.1".to_string()]);
    }

    #[test]
    fn options_are_optional() {
        let input = parse_input(r#"{"data": []}"#).unwrap();
        assert_eq!(input.options, Options::default());
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let json = r#"{"data": [{"pattern": "A-B", "size": 3, "count": 1, "pointEst": 1.0}]}"#;
        assert!(matches!(
            parse_input(json),
            Err(LoadError::Data(DataError::SizeMismatch { .. }))
        ));
    }

    #[test]
    fn bad_color_is_rejected() {
        let json = r#"{"data": [], "options": {"code_to_color": {"A": "not-a-color"}}}"#;
        assert!(matches!(parse_input(json), Err(LoadError::Color(_))));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("input.json");
        std::fs::write(&path, INPUT).unwrap();
        assert_eq!(load_input(&path).unwrap().data[0].count, 120);

        let missing = dir.path().join("nope.json");
        let err = load_input(&missing).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("nope.json"));
    }
}
