use std::sync::Arc;

use rag_core::Config;
use rag_llm::{permissive_safety_settings, GenerationConfig, SafetySetting};

pub const COURSE_SYSTEM_PROMPT: &str = r#"You are an AI assistant for a course materials system. You have access to a search tool for course content.

CRITICAL: You MUST use the search_course_content function for ANY question that could be about course materials, including:
- Questions about courses, lessons, or educational content
- Questions mentioning "MCP", "Anthropic", "Computer Use", "Retrieval", "Prompt", "Chroma", or similar terms
- Any question that might have an answer in the course database

ALWAYS search first, then provide your answer based on the search results.

Example questions that require search:
- "What is MCP?"
- "Tell me about Anthropic"
- "How does retrieval work?"
- "What are the course topics?"

When you search and find results, provide a comprehensive answer based on the found information.
If no results are found, then use your general knowledge.

Be direct and helpful in your responses."#;

/// Read-only parameters shared by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub system_prompt: Arc<str>,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            system_prompt: Arc::from(COURSE_SYSTEM_PROMPT),
            generation_config: GenerationConfig::default(),
            safety_settings: permissive_safety_settings(),
        }
    }
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            generation_config: GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            },
            ..Self::default()
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<Arc<str>>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_deterministic_and_permissive() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.generation_config.temperature, 0.0);
        assert_eq!(settings.generation_config.max_output_tokens, 800);
        assert_eq!(settings.safety_settings.len(), 4);
        assert!(settings.system_prompt.contains("search_course_content"));
    }

    #[test]
    fn config_overrides_sampling_only() {
        let config = Config {
            max_output_tokens: 2048,
            temperature: 0.2,
            ..Config::default()
        };
        let settings = GenerationSettings::from_config(&config);
        assert_eq!(settings.generation_config.max_output_tokens, 2048);
        assert_eq!(settings.generation_config.temperature, 0.2);
        assert_eq!(&*settings.system_prompt, COURSE_SYSTEM_PROMPT);
    }
}
