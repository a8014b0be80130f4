use serde::{ Deserialize, Serialize };
use std::fmt;
use std::str::FromStr;

/// Gemini model variants the analysis can be routed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModelVariant {
    /// Fast, cheap variant
    Flash25,
    /// Standard variant
    Flash20,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 2] = [ModelVariant::Flash25, ModelVariant::Flash20];

    /// Identifier sent to the Gemini API
    pub fn api_name(&self) -> &'static str {
        match self {
            ModelVariant::Flash25 => "gemini-2.5-flash",
            ModelVariant::Flash20 => "gemini-2.0-flash",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ModelVariant::Flash25 => "Gemini 2.5 Flash",
            ModelVariant::Flash20 => "Gemini 2.0 Flash",
        }
    }
}

impl Default for ModelVariant {
    fn default() -> Self {
        ModelVariant::Flash25
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

impl FromStr for ModelVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini-2.5-flash" | "2.5" | "flash-2.5" | "fast" => Ok(ModelVariant::Flash25),
            "gemini-2.0-flash" | "2.0" | "flash-2.0" | "standard" => Ok(ModelVariant::Flash20),
            other => Err(format!("Unsupported model: {}", other)),
        }
    }
}

impl TryFrom<String> for ModelVariant {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModelVariant> for String {
    fn from(model: ModelVariant) -> Self {
        model.api_name().to_string()
    }
}

/// Which text generator backs the analysis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Live,
    Mock,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "live" | "gemini" => Ok(Backend::Live),
            "mock" | "offline" => Ok(Backend::Mock),
            other => Err(format!("Unsupported backend: {}", other)),
        }
    }
}
