#[cfg(test)]
mod request_tests {
    use crate::requests::ChatRequest;
    use crate::responses::StreamChunk;
    use pollichat_types::ConversationHistory;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_streaming_request_shape() {
        let mut history = ConversationHistory::new();
        history.push_exchange("Hello", "Hi there");

        let request = ChatRequest::streaming("openai", &history, "How are you?");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "model": "openai",
                "messages": [
                    {"role": "system", "content": "You are openai model. Always be truthful about your identity."},
                    {"role": "user", "content": "Hello"},
                    {"role": "assistant", "content": "Hi there"},
                    {"role": "user", "content": "How are you?"}
                ],
                "stream": true
            })
        );
    }

    #[test]
    fn test_stream_chunk_accessors() {
        let chunk: StreamChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":"Hi"}, "text":"t"}],"content":"c"}"#).unwrap();
        assert_eq!(chunk.delta_content(), Some("Hi"));
        assert_eq!(chunk.choice_text(), Some("t"));
        assert_eq!(chunk.top_level_content(), Some("c"));
    }

    #[test]
    fn test_stream_chunk_without_choices() {
        let chunk: StreamChunk = serde_json::from_str(r#"{"content":null}"#).unwrap();
        assert_eq!(chunk.delta_content(), None);
        assert_eq!(chunk.choice_text(), None);
        assert_eq!(chunk.top_level_content(), None);
    }

    #[test]
    fn test_stream_chunk_ignores_unexpected_sibling_types() {
        let chunk: StreamChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":"Hi"},"finish_reason":0}],"model":{"id":"m"}}"#).unwrap();
        assert_eq!(chunk.delta_content(), Some("Hi"));
        assert_eq!(chunk.model(), None);

        let chunk: StreamChunk = serde_json::from_str(r#"{"choices":null,"content":"Hi"}"#).unwrap();
        assert_eq!(chunk.delta_content(), None);
        assert_eq!(chunk.top_level_content(), Some("Hi"));
    }

    #[test]
    fn test_stream_chunk_non_string_text_is_none() {
        let chunk: StreamChunk = serde_json::from_str(r#"{"choices":[{"delta":{"content":7},"text":["x"]}],"content":{}}"#).unwrap();
        assert_eq!(chunk.delta_content(), None);
        assert_eq!(chunk.choice_text(), None);
        assert_eq!(chunk.top_level_content(), None);
    }
}
