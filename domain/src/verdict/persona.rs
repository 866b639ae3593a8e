//! Persona value object: the sovereign's strategic lens
//!
//! A persona is supplied per verdict, never bound to a sovereign, so one
//! debate can be re-judged under several lenses.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Built-in strategic lenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaPreset {
    /// Balance stability, budget and growth
    Balanced,
    /// Preserve cash above all
    Wartime,
    /// Growth and speed first
    Visionary,
}

impl PersonaPreset {
    pub fn all() -> [PersonaPreset; 3] {
        [
            PersonaPreset::Balanced,
            PersonaPreset::Wartime,
            PersonaPreset::Visionary,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaPreset::Balanced => "balanced",
            PersonaPreset::Wartime => "wartime",
            PersonaPreset::Visionary => "visionary",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PersonaPreset::Balanced => "The Balanced Architect",
            PersonaPreset::Wartime => "The Wartime General",
            PersonaPreset::Visionary => "The Silicon Visionary",
        }
    }

    pub fn directive(&self) -> &'static str {
        match self {
            PersonaPreset::Balanced => {
                "Balance Stability, Budget, and Growth equally. Seek sustainable compromises."
            }
            PersonaPreset::Wartime => {
                "PRIORITIZE CASH PRESERVATION ABOVE ALL. Be extremely risk-averse. Cut costs."
            }
            PersonaPreset::Visionary => {
                "PRIORITIZE GROWTH AND SPEED. Ignore budget constraints if they slow us down. Burn cash to win."
            }
        }
    }
}

impl FromStr for PersonaPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balanced" | "architect" => Ok(PersonaPreset::Balanced),
            "wartime" | "general" => Ok(PersonaPreset::Wartime),
            "visionary" | "growth" => Ok(PersonaPreset::Visionary),
            other => Err(format!(
                "unknown persona '{}', expected one of: balanced, wartime, visionary",
                other
            )),
        }
    }
}

/// The directive text handed to the sovereign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    name: String,
    directive: String,
}

impl Persona {
    pub fn custom(directive: impl Into<String>) -> Self {
        Self {
            name: "Custom".to_string(),
            directive: directive.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directive(&self) -> &str {
        &self.directive
    }
}

impl From<PersonaPreset> for Persona {
    fn from(preset: PersonaPreset) -> Self {
        Self {
            name: preset.display_name().to_string(),
            directive: preset.directive().to_string(),
        }
    }
}

impl Default for Persona {
    fn default() -> Self {
        PersonaPreset::Balanced.into()
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_roundtrip() {
        for preset in PersonaPreset::all() {
            assert_eq!(preset.as_str().parse::<PersonaPreset>(), Ok(preset));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("General".parse::<PersonaPreset>(), Ok(PersonaPreset::Wartime));
        assert!("pacifist".parse::<PersonaPreset>().is_err());
    }

    #[test]
    fn test_default_is_balanced() {
        let persona = Persona::default();
        assert_eq!(persona.name(), "The Balanced Architect");
        assert!(persona.directive().contains("sustainable compromises"));
    }

    #[test]
    fn test_custom() {
        let persona = Persona::custom("Only ship what customers pay for.");
        assert_eq!(persona.name(), "Custom");
        assert_eq!(persona.directive(), "Only ship what customers pay for.");
    }
}
