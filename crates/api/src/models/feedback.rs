//! Feedback survey domain type.

use serde::Deserialize;

/// A chatbot feedback survey submission.
///
/// Every field is optional; the survey form submits whatever the user
/// filled in. Rating fields are 1-5 scores.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSurvey {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub occupation: Option<String>,
    pub chatbot_version: Option<String>,
    pub chat_message: Option<i32>,
    pub quick_reply: Option<i32>,
    pub typing_indicator: Option<i32>,
    pub persistent_menu: Option<i32>,
    pub information_stamp: Option<i32>,
    pub session_minimization: Option<i32>,
    pub conversation_closure: Option<i32>,
    pub comments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_survey() {
        let survey: FeedbackSurvey = serde_json::from_str(
            r#"{
                "name": "Priya",
                "age": 25,
                "chatbotVersion": "chatbot1",
                "quickReply": 5,
                "comments": "Quick replies fit the layout well."
            }"#,
        )
        .expect("valid survey");

        assert_eq!(survey.name.as_deref(), Some("Priya"));
        assert_eq!(survey.chatbot_version.as_deref(), Some("chatbot1"));
        assert_eq!(survey.quick_reply, Some(5));
        assert_eq!(survey.typing_indicator, None);
    }

    #[test]
    fn empty_object_is_a_valid_survey() {
        let survey: FeedbackSurvey = serde_json::from_str("{}").expect("valid");
        assert!(survey.name.is_none());
    }
}
