use anyhow::{Context, Result};
use rewrite::{OpenAiClient, PromptConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Names a JSON file whose contents replace the built-in defaults
pub const CONFIG_ENV: &str = "REWRITER_CONFIG";
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
pub const MODEL_ENV: &str = "OPENAI_MODEL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub llm: LlmConfig,
    pub prompt: PromptConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub benchmark_file: PathBuf,
    pub transcript_file: PathBuf,
    pub heading: String,
    /// Questions are rewritten only when they contain this, ignoring case
    pub question_filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file: PathBuf,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API credential
    pub api_key_env: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            benchmark_file: PathBuf::from("Sample file to Paraphrase.docx"),
            transcript_file: PathBuf::from("Sample call record transcript.docx"),
            heading: "CHCECE042 Foster holistic early childhood learning, development and wellbeing"
                .to_string(),
            question_filter: "question".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("Rewritten_Benchmark_Answers.docx"),
            title: "Rewritten Competency Q&A - CHCECE042".to_string(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: OpenAiClient::DEFAULT_BASE_URL.to_string(),
            model: OpenAiClient::DEFAULT_MODEL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, replaced by the `REWRITER_CONFIG` file when set, then the
    /// base URL and model overrides.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match non_empty(lookup(CONFIG_ENV)) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(base_url) = non_empty(lookup(BASE_URL_ENV)) {
            config.llm.base_url = base_url;
        }
        if let Some(model) = non_empty(lookup(MODEL_ENV)) {
            config.llm.model = model;
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&content).context(format!("Failed to parse config file: {:?}", path))
    }

    /// Prompt settings with the transcript's file name filled in
    pub fn prompt_config(&self) -> PromptConfig {
        let transcript_name = self
            .input
            .transcript_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.transcript_file.to_string_lossy().into_owned());

        PromptConfig {
            transcript_name,
            ..self.prompt.clone()
        }
    }
}

impl LlmConfig {
    pub fn api_key(&self) -> Result<String> {
        self.api_key_from(|key| std::env::var(key).ok())
    }

    pub fn api_key_from<F>(&self, lookup: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        non_empty(lookup(&self.api_key_env))
            .with_context(|| format!("{} is not set", self.api_key_env))
    }

    pub fn client(&self, api_key: String) -> OpenAiClient {
        OpenAiClient::new(self.base_url.clone(), self.model.clone(), api_key)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Parse a dotenv file the way `main` does, but into a map.
    fn load_env_file(path: &Path) -> HashMap<String, String> {
        dotenvy::from_path_iter(path)
            .unwrap()
            .map(|item| item.unwrap())
            .collect()
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_fixed_run() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.input.benchmark_file, PathBuf::from("Sample file to Paraphrase.docx"));
        assert_eq!(config.input.transcript_file, PathBuf::from("Sample call record transcript.docx"));
        assert_eq!(
            config.input.heading,
            "CHCECE042 Foster holistic early childhood learning, development and wellbeing"
        );
        assert_eq!(config.input.question_filter, "question");
        assert_eq!(config.output.file, PathBuf::from("Rewritten_Benchmark_Answers.docx"));
        assert_eq!(config.output.title, "Rewritten Competency Q&A - CHCECE042");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.prompt_config().transcript_name, "Sample call record transcript.docx");
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (BASE_URL_ENV, "http://localhost:8080/v1"),
            (MODEL_ENV, "gpt-4o-mini"),
            (CONFIG_ENV, "  "),
        ]))
        .unwrap();

        assert_eq!(config.llm.base_url, "http://localhost:8080/v1");
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn test_config_file_replaces_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rewriter.json");
        std::fs::write(
            &path,
            r#"{"input": {"transcript_file": "transcripts/Alex Chen call.docx"}, "prompt": {"unit": "BSBLDR523"}}"#,
        )
        .unwrap();

        let config =
            AppConfig::from_lookup(lookup_from(&[(CONFIG_ENV, path.to_str().unwrap())])).unwrap();

        assert_eq!(config.input.question_filter, "question");
        assert_eq!(config.output.file, PathBuf::from("Rewritten_Benchmark_Answers.docx"));

        let prompt = config.prompt_config();
        assert_eq!(prompt.unit, "BSBLDR523");
        assert_eq!(prompt.course, "CHC52021");
        assert_eq!(prompt.transcript_name, "Alex Chen call.docx");
    }

    #[test]
    fn test_bad_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppConfig::from_lookup(lookup_from(&[(CONFIG_ENV, path.to_str().unwrap())]))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_api_key_required() {
        let llm = LlmConfig::default();

        let err = llm.api_key_from(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY is not set"));
        assert!(llm.api_key_from(lookup_from(&[("OPENAI_API_KEY", "")])).is_err());
        assert_eq!(
            llm.api_key_from(lookup_from(&[("OPENAI_API_KEY", "sk-123")])).unwrap(),
            "sk-123"
        );
    }

    #[test]
    fn test_env_file_supplies_key_and_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "# local settings\nOPENAI_API_KEY=sk-from-file\nOPENAI_MODEL=\"gpt-4o-mini\"\n",
        )
        .unwrap();

        let vars = load_env_file(&path);
        let lookup = |key: &str| vars.get(key).cloned();

        let config = AppConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.api_key_from(lookup).unwrap(), "sk-from-file");
    }
}
