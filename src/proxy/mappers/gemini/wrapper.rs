use super::models::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};
use crate::error::{ChatError, ChatResult};
use crate::proxy::mappers::history::NormalizedTurn;

pub fn build_generate_request(
    turns: &[NormalizedTurn],
    persona: &str,
    generation_config: GenerationConfig,
) -> GenerateContentRequest {
    let contents = turns
        .iter()
        .map(|turn| Content {
            role: Some(turn.role.clone()),
            parts: turn.parts.iter().map(Part::text).collect(),
        })
        .collect();

    let system_instruction = if persona.trim().is_empty() {
        None
    } else {
        Some(Content {
            role: None,
            parts: vec![Part::text(persona)],
        })
    };

    GenerateContentRequest {
        contents,
        system_instruction,
        generation_config,
    }
}

/// Joins the visible text parts of the first candidate.
pub fn extract_text(response: &GenerateContentResponse) -> ChatResult<String> {
    let Some(candidate) = response.candidates.first() else {
        let reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
            .map(|r| format!("prompt blocked ({})", r))
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(ChatError::EmptyCompletion(reason));
    };

    let texts: Vec<&str> = candidate
        .content
        .as_ref()
        .map(|c| {
            c.parts
                .iter()
                .filter(|p| !p.thought.unwrap_or(false))
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if texts.is_empty() {
        let reason = candidate
            .finish_reason
            .clone()
            .unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(ChatError::EmptyCompletion(format!(
            "candidate has no text (finishReason: {})",
            reason
        )));
    }

    Ok(texts.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_turns() -> Vec<NormalizedTurn> {
        vec![
            NormalizedTurn {
                role: "model".to_string(),
                parts: vec!["Bienvenido".to_string()],
            },
            NormalizedTurn {
                role: "user".to_string(),
                parts: vec!["¿Cómo se aplica?".to_string(), "Gracias".to_string()],
            },
        ]
    }

    #[test]
    fn test_request_body_wire_shape() {
        let request =
            build_generate_request(&sample_turns(), "Eres Patchy", GenerationConfig::default());
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body["contents"],
            json!([
                {"role": "model", "parts": [{"text": "Bienvenido"}]},
                {"role": "user", "parts": [{"text": "¿Cómo se aplica?"}, {"text": "Gracias"}]}
            ])
        );
        assert_eq!(
            body["systemInstruction"],
            json!({"parts": [{"text": "Eres Patchy"}]})
        );
        let generation = &body["generationConfig"];
        assert_eq!(generation["topK"], json!(64));
        assert_eq!(generation["maxOutputTokens"], json!(8192));
        assert!((generation["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((generation["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_blank_persona_is_omitted() {
        let request = build_generate_request(&[], "   ", GenerationConfig::default());
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("systemInstruction").is_none());
        assert_eq!(body["contents"], json!([]));
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hola "}, {"text": "👋"}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(&response).unwrap(), "Hola 👋");
    }

    #[test]
    fn test_extract_text_skips_thought_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "pensando", "thought": true}, {"text": "Respuesta"}]}
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(&response).unwrap(), "Respuesta");
    }

    #[test]
    fn test_extract_text_without_candidates_reports_block_reason() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        let err = extract_text(&response).unwrap_err();
        assert!(matches!(err, ChatError::EmptyCompletion(ref r) if r.contains("SAFETY")));
    }

    #[test]
    fn test_extract_text_without_parts_reports_finish_reason() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "MAX_TOKENS"}]
        }))
        .unwrap();
        let err = extract_text(&response).unwrap_err();
        assert!(matches!(err, ChatError::EmptyCompletion(ref r) if r.contains("MAX_TOKENS")));
    }
}
