// Configuration module: gathers every environment-derived setting into one
// explicit struct built at startup, so nothing else in the crate reads the
// process environment.

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Model used for every generation call unless `ANTHROPIC_MODEL` overrides it.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Default API endpoint; `ANTHROPIC_BASE_URL` overrides it (also the hook the
/// generator tests use to point at a local stub server).
pub const DEFAULT_API_BASE_URL: &str = "https://api.anthropic.com";

/// Default directory for saved artifacts, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "content_output";

/// Topic suggestions surfaced by the "content ideas" menu option.
pub const TOPIC_IDEAS: &[&str] = &[
    "AI model drift detection and prevention",
    "Real-time ML pipeline monitoring",
    "Model performance optimization strategies",
    "AI governance frameworks for enterprise",
    "ML observability best practices",
    "Production AI debugging techniques",
    "Automated model retraining workflows",
    "AI system reliability engineering",
];

/// Fixed brand identity interpolated into every prompt. Loaded once, never
/// mutated.
#[derive(Debug, Clone)]
pub struct CompanyProfile {
    pub name: String,
    pub industry: String,
    pub audience: String,
}

impl CompanyProfile {
    /// Read the profile from `COMPANY_NAME`, `COMPANY_INDUSTRY` and
    /// `TARGET_AUDIENCE`, falling back to defaults for any that are unset.
    pub fn from_env() -> Self {
        CompanyProfile {
            name: std::env::var("COMPANY_NAME")
                .unwrap_or_else(|_| "Your AI Monitoring Company".into()),
            industry: std::env::var("COMPANY_INDUSTRY")
                .unwrap_or_else(|_| "AI SaaS Monitoring".into()),
            audience: std::env::var("TARGET_AUDIENCE")
                .unwrap_or_else(|_| "AI engineers, ML teams, CTOs".into()),
        }
    }

    /// Render the brand-voice block that conditions tone and audience in
    /// every prompt.
    pub fn brand_voice(&self) -> String {
        format!(
            "Brand Voice for {}:\n\
             POSITIONING: Leading authority in {}\n\
             TONE: Authoritative yet approachable, technical but accessible\n\
             TARGET AUDIENCE: {}\n\
             FOCUS: Practical solutions and actionable insights",
            self.name, self.industry, self.audience
        )
    }
}

/// All settings the application needs, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,
    pub company: CompanyProfile,
    pub output_dir: PathBuf,
}

impl Config {
    /// Build a validated `Config` from the environment. The API key is the
    /// only required variable; everything else has a default.
    pub fn from_env() -> Result<Self> {
        let config = Config {
            api_key: std::env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            api_base_url: std::env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
            model: std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            company: CompanyProfile::from_env(),
            output_dir: std::env::var("CONTENT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check required settings, reporting every missing one by variable name.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.api_key.trim().is_empty() {
            errors.push("ANTHROPIC_API_KEY is required");
        }
        if !errors.is_empty() {
            bail!("Configuration errors: {}", errors.join(", "));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(api_key: &str) -> Config {
        Config {
            api_key: api_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            company: CompanyProfile {
                name: "Acme Observability".into(),
                industry: "AI SaaS Monitoring".into(),
                audience: "AI engineers, ML teams, CTOs".into(),
            },
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    #[test]
    fn missing_api_key_is_one_error_naming_the_variable() {
        let err = test_config("").validate().unwrap_err();
        let msg = err.to_string();
        assert_eq!(msg.matches("ANTHROPIC_API_KEY").count(), 1);
        assert!(msg.contains("required"));
    }

    #[test]
    fn whitespace_api_key_is_rejected() {
        assert!(test_config("   ").validate().is_err());
    }

    #[test]
    fn present_api_key_validates() {
        assert!(test_config("sk-test").validate().is_ok());
    }

    #[test]
    fn brand_voice_mentions_name_and_audience() {
        let voice = test_config("sk-test").company.brand_voice();
        assert!(voice.contains("Acme Observability"));
        assert!(voice.contains("AI engineers, ML teams, CTOs"));
        assert!(voice.contains("TONE:"));
    }

    #[test]
    fn topic_ideas_are_nonempty() {
        assert_eq!(TOPIC_IDEAS.len(), 8);
        assert!(TOPIC_IDEAS.iter().all(|t| !t.is_empty()));
    }
}
