// Generator module: builds a brand-voice-conditioned prompt for a topic and
// content type, sends it to the Anthropic Messages API with a blocking HTTP
// client, and folds the response (or any failure) into an immutable
// `GenerationResult` record.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Output-token budget sent with every request.
const MAX_TOKENS: u32 = 4000;

/// Messages API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The closed set of output formats. Each variant carries a fixed prompt
/// template with its own length limits, structure and closing call-to-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    TwitterThread,
    LinkedinPost,
    BlogPost,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [
        ContentType::TwitterThread,
        ContentType::LinkedinPost,
        ContentType::BlogPost,
    ];

    /// Stable identifier used in artifact filenames and headers.
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::TwitterThread => "twitter_thread",
            ContentType::LinkedinPost => "linkedin_post",
            ContentType::BlogPost => "blog_post",
        }
    }

    /// Human wording for menus and status lines.
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentType::TwitterThread => "Twitter thread",
            ContentType::LinkedinPost => "LinkedIn post",
            ContentType::BlogPost => "blog post",
        }
    }

    /// The per-format template, with the topic and target audience
    /// substituted in.
    fn template(&self, topic: &str, audience: &str) -> String {
        match self {
            ContentType::TwitterThread => format!(
                "Create a Twitter thread about: {topic}\n\n\
                 Requirements:\n\
                 - 5-6 tweets maximum\n\
                 - First tweet must be a compelling hook\n\
                 - Each tweet under 280 characters\n\
                 - Include relevant AI/ML hashtags\n\
                 - End with an engagement question\n\
                 - Focus on practical value for {audience}\n\n\
                 Format as: 1/🧵, 2/🧵, etc."
            ),
            ContentType::LinkedinPost => format!(
                "Create a LinkedIn post about: {topic}\n\n\
                 Requirements:\n\
                 - Professional and engaging tone\n\
                 - Under 1300 characters\n\
                 - Strong opening line\n\
                 - Include practical insights\n\
                 - End with a thought-provoking question\n\
                 - Use relevant hashtags\n\
                 - Target {audience}"
            ),
            ContentType::BlogPost => format!(
                "Write a comprehensive blog post about: {topic}\n\n\
                 Structure:\n\
                 1. Compelling headline\n\
                 2. Executive summary\n\
                 3. Problem statement and context\n\
                 4. Detailed explanation with examples\n\
                 5. Best practices and solutions\n\
                 6. Key takeaways\n\
                 7. Call-to-action\n\n\
                 Requirements:\n\
                 - 1200-1800 words\n\
                 - Technical but accessible\n\
                 - Include practical examples\n\
                 - Provide actionable insights"
            ),
        }
    }
}

/// What came out of one generation attempt. The enum guarantees a result
/// carries either content or an error message, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Generated(String),
    Failed(String),
}

/// Record of one user-initiated generation. Immutable once produced; written
/// verbatim to storage.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub topic: String,
    pub content_type: ContentType,
    pub created_at: DateTime<Local>,
    pub outcome: Outcome,
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Generated(_))
    }

    pub fn content(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Generated(text) => Some(text),
            Outcome::Failed(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Generated(_) => None,
            Outcome::Failed(msg) => Some(msg),
        }
    }
}

/// Request payload for POST /v1/messages.
#[derive(Serialize, Debug)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize, Debug)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

/// The slice of the Messages API response we read: the first text block.
#[derive(Deserialize, Debug)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize, Debug)]
struct ContentBlock {
    text: String,
}

/// Error body shape returned by the API on non-2xx statuses.
#[derive(Deserialize, Debug)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetail {
    message: String,
}

/// Stateless generator: an HTTP client plus configuration fixed at
/// construction. One remote call per `generate`, no retry, no streaming.
pub struct ContentGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    brand_voice: String,
    audience: String,
}

impl ContentGenerator {
    /// Build a generator from a validated `Config`.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ContentGenerator {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            brand_voice: config.company.brand_voice(),
            audience: config.company.audience.clone(),
        })
    }

    /// Generate content for a topic. All failures — blank topic, transport
    /// errors, API errors, malformed responses — come back as a `Failed`
    /// outcome; this never returns an error to the caller.
    pub fn generate(&self, topic: &str, content_type: ContentType) -> GenerationResult {
        let topic = topic.trim();
        let outcome = if topic.is_empty() {
            Outcome::Failed("topic must not be empty".into())
        } else {
            let prompt = self.build_prompt(topic, content_type);
            match self.call_messages(&prompt) {
                Ok(text) => Outcome::Generated(text),
                Err(e) => Outcome::Failed(format!("{:#}", e)),
            }
        };
        GenerationResult {
            topic: topic.to_string(),
            content_type,
            created_at: Local::now(),
            outcome,
        }
    }

    /// Assemble the full prompt: brand voice first, then the per-type
    /// template.
    fn build_prompt(&self, topic: &str, content_type: ContentType) -> String {
        format!(
            "{}\n\n{}",
            self.brand_voice,
            content_type.template(topic, &self.audience)
        )
    }

    /// Send one prompt to POST /v1/messages and return the first text block.
    fn call_messages(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1/messages", &self.base_url);
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };
        let res = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .context("Failed to send generation request")?;

        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            // Prefer the API's own message when the error body parses.
            let detail = serde_json::from_str::<ApiError>(&txt)
                .map(|e| e.error.message)
                .unwrap_or(txt);
            bail!("API error: {} - {}", status, detail);
        }

        let resp: MessagesResponse = res.json().context("Parsing generation response json")?;
        match resp.content.into_iter().next() {
            Some(block) => Ok(block.text),
            None => bail!("Response contained no content blocks"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompanyProfile, DEFAULT_MODEL};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::path::PathBuf;
    use std::sync::mpsc;

    fn test_config(base_url: &str) -> Config {
        Config {
            api_key: "sk-test".into(),
            api_base_url: base_url.into(),
            model: DEFAULT_MODEL.into(),
            company: CompanyProfile {
                name: "Acme Observability".into(),
                industry: "AI SaaS Monitoring".into(),
                audience: "AI engineers, ML teams, CTOs".into(),
            },
            output_dir: PathBuf::from("content_output"),
        }
    }

    /// Serve exactly one canned HTTP response on a local port, handing the
    /// raw request bytes back through a channel.
    fn serve_once(status: &'static str, body: String) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&request[..pos]).to_ascii_lowercase();
                    let content_length = headers
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= pos + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
        });
        (format!("http://{}", addr), rx)
    }

    #[test]
    fn successful_response_text_is_returned_verbatim() {
        let text = "1/🧵 Drift creeps in quietly.\n2/🧵 Watch your inputs.";
        let body = serde_json::json!({
            "content": [{"type": "text", "text": text}]
        })
        .to_string();
        let (base, _rx) = serve_once("200 OK", body);
        let gen = ContentGenerator::new(&test_config(&base)).unwrap();

        let result = gen.generate("AI Model Drift Detection", ContentType::TwitterThread);
        assert!(result.is_success());
        assert_eq!(result.content(), Some(text));
        assert_eq!(result.error_message(), None);
        assert_eq!(result.topic, "AI Model Drift Detection");
        assert_eq!(result.content_type, ContentType::TwitterThread);
    }

    #[test]
    fn request_carries_model_key_and_prompt() {
        let body = serde_json::json!({"content": [{"type": "text", "text": "ok"}]}).to_string();
        let (base, rx) = serve_once("200 OK", body);
        let gen = ContentGenerator::new(&test_config(&base)).unwrap();

        gen.generate("ML observability", ContentType::LinkedinPost);
        let request = rx.recv().unwrap();
        assert!(request.starts_with("POST /v1/messages"));
        assert!(request.contains("x-api-key: sk-test"));
        assert!(request.contains("anthropic-version: 2023-06-01"));
        assert!(request.contains(DEFAULT_MODEL));
        assert!(request.contains("ML observability"));
    }

    #[test]
    fn api_error_status_surfaces_the_api_message() {
        let body = serde_json::json!({
            "error": {"type": "invalid_request_error", "message": "max_tokens too large"}
        })
        .to_string();
        let (base, _rx) = serve_once("400 Bad Request", body);
        let gen = ContentGenerator::new(&test_config(&base)).unwrap();

        let result = gen.generate("AI governance", ContentType::BlogPost);
        assert!(!result.is_success());
        let msg = result.error_message().unwrap();
        assert!(msg.contains("400"));
        assert!(msg.contains("max_tokens too large"));
    }

    #[test]
    fn malformed_response_body_becomes_a_failure() {
        let (base, _rx) = serve_once("200 OK", "not json at all".into());
        let gen = ContentGenerator::new(&test_config(&base)).unwrap();

        let result = gen.generate("AI governance", ContentType::BlogPost);
        assert!(!result.is_success());
        assert!(!result.error_message().unwrap().is_empty());
    }

    #[test]
    fn empty_content_list_becomes_a_failure() {
        let (base, _rx) = serve_once("200 OK", r#"{"content": []}"#.into());
        let gen = ContentGenerator::new(&test_config(&base)).unwrap();

        let result = gen.generate("AI governance", ContentType::BlogPost);
        assert_eq!(
            result.error_message(),
            Some("Response contained no content blocks")
        );
    }

    #[test]
    fn unreachable_endpoint_fails_for_every_content_type() {
        // Nothing listens on this port; each call fails fast with a
        // connection error instead of propagating a panic or Err.
        let gen = ContentGenerator::new(&test_config("http://127.0.0.1:9")).unwrap();
        for content_type in ContentType::ALL {
            let result = gen.generate("Real-time ML pipeline monitoring", content_type);
            assert!(!result.is_success());
            assert!(!result.error_message().unwrap().is_empty());
            assert_eq!(result.content(), None);
        }
    }

    #[test]
    fn blank_topic_is_rejected_without_a_network_call() {
        let gen = ContentGenerator::new(&test_config("http://127.0.0.1:9")).unwrap();
        let result = gen.generate("   ", ContentType::TwitterThread);
        assert_eq!(result.error_message(), Some("topic must not be empty"));
        assert_eq!(result.topic, "");
    }

    #[test]
    fn prompt_contains_voice_topic_and_audience() {
        let gen = ContentGenerator::new(&test_config("http://127.0.0.1:9")).unwrap();
        let prompt = gen.build_prompt("Model drift", ContentType::TwitterThread);
        assert!(prompt.starts_with("Brand Voice for Acme Observability:"));
        assert!(prompt.contains("Model drift"));
        assert!(prompt.contains("AI engineers, ML teams, CTOs"));
    }

    #[test]
    fn each_content_type_has_its_structural_template() {
        let audience = "AI engineers";
        let thread = ContentType::TwitterThread.template("t", audience);
        assert!(thread.contains("280 characters"));
        assert!(thread.contains("engagement question"));

        let post = ContentType::LinkedinPost.template("t", audience);
        assert!(post.contains("1300 characters"));
        assert!(post.contains("thought-provoking question"));

        let article = ContentType::BlogPost.template("t", audience);
        assert!(article.contains("1200-1800 words"));
        assert!(article.contains("Call-to-action"));
    }

    #[test]
    fn labels_are_stable() {
        assert_eq!(ContentType::TwitterThread.label(), "twitter_thread");
        assert_eq!(ContentType::LinkedinPost.label(), "linkedin_post");
        assert_eq!(ContentType::BlogPost.label(), "blog_post");
    }
}
