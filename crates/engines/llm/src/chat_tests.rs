use super::*;
use serde_json::json;

#[test]
fn request_body_matches_the_api() {
    let config = ChatConfig {
        max_tokens: 10,
        ..Default::default()
    };
    let body = serde_json::to_value(build_request(&config, "your move")).unwrap();

    assert_eq!(
        body,
        json!({
            "model": "gpt-4o",
            "messages": [{ "role": "user", "content": "your move" }],
            "temperature": 0.0,
            "max_tokens": 10
        })
    );
}

#[test]
fn first_choice_is_returned_untouched() {
    let response: ChatResponse = serde_json::from_value(json!({
        "id": "chatcmpl-1",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": " e7e5\n" } },
            { "index": 1, "message": { "role": "assistant", "content": "d7d5" } }
        ]
    }))
    .unwrap();

    assert_eq!(extract_completion(response).unwrap(), " e7e5\n");
}

#[test]
fn missing_content_is_an_empty_response() {
    let no_choices: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
    assert!(matches!(
        extract_completion(no_choices),
        Err(ModelError::EmptyResponse)
    ));

    let null_content: ChatResponse = serde_json::from_value(json!({
        "choices": [{ "message": { "role": "assistant", "content": null } }]
    }))
    .unwrap();
    assert!(matches!(
        extract_completion(null_content),
        Err(ModelError::EmptyResponse)
    ));
}

#[test]
fn model_without_key_is_rejected() {
    assert!(matches!(
        ChatModel::new(ChatConfig::default()),
        Err(ModelError::MissingApiKey(_))
    ));
}

#[test]
fn key_from_missing_env_var() {
    let err = ChatConfig::default()
        .with_key_from_env("LLM_ARENA_TEST_KEY_THAT_IS_NEVER_SET")
        .unwrap_err();
    assert!(matches!(err, ModelError::MissingApiKey(var) if var == "LLM_ARENA_TEST_KEY_THAT_IS_NEVER_SET"));
}
