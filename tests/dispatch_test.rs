// Dispatcher normalization tests
//
// Drives the dispatch seam with a scripted provider to verify that every
// outcome collapses into the single result shape the caller branches on.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicU32, Ordering};

use manna::providers::{ProviderError, WisdomProvider};
use manna::wisdom::dispatch;
use manna::wisdom::types::{Version, Wisdom, WisdomFields};

enum Script {
    Succeed,
    FailCapacity,
    FailConfig,
}

struct ScriptedProvider {
    script: Script,
    calls: AtomicU32,
}

impl ScriptedProvider {
    fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl WisdomProvider for ScriptedProvider {
    async fn ask(&self, _question: &str, _version: Version) -> Result<Wisdom, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Succeed => Ok(Wisdom::from_fields(WisdomFields {
                answer: Some("Seek first the kingdom.".to_string()),
                reference: Some("Matthew 6:33".to_string()),
                topic: Some("Priorities".to_string()),
                explanation: Some("All these things will be added.".to_string()),
            })),
            Script::FailCapacity => Err(ProviderError::Api {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "overloaded".to_string(),
            }),
            Script::FailConfig => Err(ProviderError::Config(
                "No Gemini API key is configured.".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }
}

#[tokio::test]
async fn test_success_passes_through_unchanged() {
    let provider = ScriptedProvider::new(Script::Succeed);
    let wisdom = dispatch(&provider, "How should I order my life?", Version::Esv).await;

    assert!(!wisdom.is_error());
    assert_eq!(wisdom.answer, "Seek first the kingdom.");
    assert_eq!(wisdom.reference, "Matthew 6:33");
    assert_eq!(wisdom.topic, "Priorities");
    assert!(!wisdom.explanation.is_empty());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_success_for_every_translation() {
    for version in Version::all() {
        let provider = ScriptedProvider::new(Script::Succeed);
        let wisdom = dispatch(&provider, "What is wisdom?", version).await;
        assert!(!wisdom.is_error(), "failed for {}", version);
        assert!(!wisdom.answer.is_empty());
        assert!(!wisdom.reference.is_empty());
        assert!(!wisdom.topic.is_empty());
    }
}

#[tokio::test]
async fn test_capacity_failure_becomes_error_result() {
    let provider = ScriptedProvider::new(Script::FailCapacity);
    let wisdom = dispatch(&provider, "What is wisdom?", Version::Niv).await;

    assert!(wisdom.is_error());
    let message = wisdom.error.as_deref().unwrap();
    assert!(message.contains("over capacity"));
    assert!(wisdom.answer.is_empty());
    assert!(wisdom.reference.is_empty());
    assert!(wisdom.topic.is_empty());
    assert!(wisdom.explanation.is_empty());
}

#[tokio::test]
async fn test_config_failure_surfaces_its_own_message() {
    let provider = ScriptedProvider::new(Script::FailConfig);
    let wisdom = dispatch(&provider, "What is wisdom?", Version::Kjv).await;

    assert!(wisdom.is_error());
    assert_eq!(
        wisdom.error.as_deref(),
        Some("No Gemini API key is configured.")
    );
}
