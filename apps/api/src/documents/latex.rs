use tracing::info;

use crate::documents::prompts::{LATEX_PROMPT_TEMPLATE, LATEX_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::CompletionService;

/// Converts free text to LaTeX with a single completion. The answer is
/// returned as-is apart from trimming.
pub async fn generate_latex(
    completion: &dyn CompletionService,
    content: &str,
) -> Result<String, AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let prompt = fill_template(LATEX_PROMPT_TEMPLATE, &[("content", content)]);
    let latex = completion.complete(LATEX_SYSTEM, &prompt).await?;

    info!("Converted {} chars of text to LaTeX", content.chars().count());
    Ok(latex.trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    struct Echo {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl CompletionService for Echo {
        async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((system.to_string(), prompt.to_string()));
            Ok("  \\section{Intro}\n".to_string())
        }
    }

    #[tokio::test]
    async fn test_generate_latex_sends_prompt_and_trims() {
        let echo = Echo {
            calls: Mutex::new(vec![]),
        };
        let latex = generate_latex(&echo, "Intro").await.unwrap();

        assert_eq!(latex, "\\section{Intro}");
        let calls = echo.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "You are an AI that converts text to LaTeX.");
        assert_eq!(calls[0].1, "Convert this text to LaTeX: Intro");
    }

    #[tokio::test]
    async fn test_blank_content_skips_completion() {
        let echo = Echo {
            calls: Mutex::new(vec![]),
        };
        let result = generate_latex(&echo, "   ").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(echo.calls.lock().unwrap().is_empty());
    }
}
