use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use upset_scales::MarginalCode;

use crate::color::{Color, ColorParseError, category10};

/// Channel used for host messages when the options do not name one.
pub const FALLBACK_CHANNEL: &str = "no_host_channel";

pub const DEFAULT_MIN_SET_SIZE: f64 = 100.0;

fn default_min_set_size() -> f64 {
    DEFAULT_MIN_SET_SIZE
}

fn default_light_blue() -> String {
    "#4292c6".to_string()
}

fn default_dark_red() -> String {
    "#a50f15".to_string()
}

fn default_dark_grey() -> String {
    "#525252".to_string()
}

fn default_med_grey() -> String {
    "#969696".to_string()
}

fn default_green() -> String {
    "#41ab5d".to_string()
}

/// Named color roles supplied by the host theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRoles {
    #[serde(default = "default_light_blue")]
    pub light_blue: String,
    #[serde(default = "default_dark_red")]
    pub dark_red: String,
    #[serde(default = "default_dark_grey")]
    pub dark_grey: String,
    #[serde(default = "default_med_grey")]
    pub med_grey: String,
    #[serde(default = "default_green")]
    pub green: String,
}

impl Default for ColorRoles {
    fn default() -> Self {
        Self {
            light_blue: default_light_blue(),
            dark_red: default_dark_red(),
            dark_grey: default_dark_grey(),
            med_grey: default_med_grey(),
            green: default_green(),
        }
    }
}

impl ColorRoles {
    pub fn validate(&self) -> Result<(), ColorParseError> {
        for value in [
            &self.light_blue,
            &self.dark_red,
            &self.dark_grey,
            &self.med_grey,
            &self.green,
        ] {
            Color::parse(value)?;
        }
        Ok(())
    }
}

/// Host options record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub colors: ColorRoles,
    #[serde(default)]
    pub code_to_color: BTreeMap<String, String>,
    #[serde(default = "default_min_set_size")]
    pub min_set_size: f64,
    #[serde(rename = "marginalData", default)]
    pub marginal_data: Vec<MarginalCode>,
    #[serde(default)]
    pub msg_loc: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            colors: ColorRoles::default(),
            code_to_color: BTreeMap::new(),
            min_set_size: DEFAULT_MIN_SET_SIZE,
            marginal_data: Vec::new(),
            msg_loc: None,
        }
    }
}

impl Options {
    /// Host channel for notifications.
    pub fn channel(&self) -> &str {
        match self.msg_loc.as_deref() {
            Some(loc) if !loc.is_empty() => loc,
            _ => FALLBACK_CHANNEL,
        }
    }
}

/// Colors of the chart elements, resolved from the theme roles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub pattern_count_bars: Color,
    pub rr_interval: Color,
    pub null_rr_interval: Color,
    pub code_missing: Color,
    pub pattern_bar: Color,
    pub interaction_box_border: Color,
    pub slider_handle: Color,
}

impl Palette {
    /// Unparseable roles fall back to their default value.
    pub fn resolve(roles: &ColorRoles) -> Self {
        let defaults = ColorRoles::default();
        let pick = |value: &str, fallback: &str| {
            Color::parse(value).unwrap_or_else(|err| {
                log::warn!("{err}, using {fallback}");
                Color::parse(fallback).unwrap_or(Color::BLACK)
            })
        };
        Self {
            pattern_count_bars: pick(&roles.light_blue, &defaults.light_blue),
            rr_interval: pick(&roles.dark_red, &defaults.dark_red),
            null_rr_interval: Color::BLACK,
            code_missing: pick(&roles.dark_grey, &defaults.dark_grey),
            pattern_bar: Color::rgb(0x25, 0x25, 0x25),
            interaction_box_border: pick(&roles.med_grey, &defaults.med_grey),
            slider_handle: pick(&roles.green, &defaults.green),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::resolve(&ColorRoles::default())
    }
}

/// Color for every marginal code: the host assignment when it parses,
/// otherwise a palette color picked by the code's rank among the sorted
/// codes, so the marginal order never changes a color.
pub fn code_colors(
    marginals: &[MarginalCode],
    code_to_color: &BTreeMap<String, String>,
) -> HashMap<String, Color> {
    let ranked: Vec<&str> = marginals
        .iter()
        .map(|m| m.code.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    ranked
        .iter()
        .enumerate()
        .map(|(rank, &code)| {
            let color = code_to_color
                .get(code)
                .and_then(|c| Color::parse(c).ok())
                .unwrap_or_else(|| category10(rank));
            (code.to_string(), color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let options: Options = serde_json::from_str(
            r#"{"marginalData":[{"code":"A","count":3}]}"#,
        )
        .unwrap();
        assert_eq!(options.min_set_size, 100.0);
        assert_eq!(options.colors, ColorRoles::default());
        assert_eq!(options.marginal_data.len(), 1);
        assert_eq!(options.channel(), FALLBACK_CHANNEL);
    }

    #[test]
    fn channel_uses_msg_loc() {
        let options = Options {
            msg_loc: Some("upset_selection".into()),
            ..Options::default()
        };
        assert_eq!(options.channel(), "upset_selection");
    }

    #[test]
    fn palette_falls_back_on_bad_role() {
        let roles = ColorRoles {
            green: "not a color".into(),
            ..ColorRoles::default()
        };
        assert!(roles.validate().is_err());
        let palette = Palette::resolve(&roles);
        assert_eq!(palette.slider_handle, Palette::default().slider_handle);
    }

    #[test]
    fn code_colors_prefer_host_assignment() {
        let marginals = vec![
            MarginalCode {
                code: "A".into(),
                count: 1,
            },
            MarginalCode {
                code: "B".into(),
                count: 1,
            },
        ];
        let mut assigned = BTreeMap::new();
        assigned.insert("B".to_string(), "#ff0000".to_string());
        let colors = code_colors(&marginals, &assigned);
        assert_eq!(colors["A"], category10(0));
        assert_eq!(colors["B"], Color::rgb(255, 0, 0));
    }

    #[test]
    fn fallback_colors_ignore_marginal_order() {
        let marginal = |code: &str| MarginalCode {
            code: code.into(),
            count: 1,
        };
        let none = BTreeMap::new();
        let forward = code_colors(&[marginal("A"), marginal("B")], &none);
        let reversed = code_colors(&[marginal("B"), marginal("A")], &none);
        assert_eq!(forward, reversed);
        assert_eq!(reversed["A"], category10(0));
        assert_eq!(reversed["B"], category10(1));
    }
}
