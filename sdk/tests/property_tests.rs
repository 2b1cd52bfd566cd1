use organizer_sdk::errors::{EngineError, OrganizerErrorExt};
use organizer_sdk::types::{BusinessContext, Category, Classification, Confidence};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn test_error_user_hint_completeness(error_str in "\\PC*") {
        let errs = vec![
            EngineError::Config(error_str.clone()),
            EngineError::MissingApiKey(error_str.clone()),
            EngineError::ProjectsFileMissing(std::path::PathBuf::from(&error_str)),
            EngineError::ProjectsFileInvalid(std::path::PathBuf::from(&error_str), error_str.clone()),
            EngineError::Classifier(error_str.clone()),
            EngineError::Report(error_str.clone()),
        ];

        for err in errs {
            let hint = err.user_hint();
            prop_assert!(!hint.is_empty());
        }
    }
}

proptest! {
    // Any category string the classifier invents decodes instead of failing
    // the whole batch.
    #[test]
    fn test_unknown_labels_never_fail_decode(
        category in "[a-z-]{1,20}",
        context in "[a-z-]{1,20}",
        confidence in "[a-z]{1,10}",
    ) {
        let value = json!({
            "suggested_name": "p",
            "category": category,
            "business_context": context,
            "confidence": confidence,
        });

        let decoded: Classification = serde_json::from_value(value)
            .expect("label strings should always decode");

        let known = [
            "web-apps", "scripts", "infrastructure", "libraries", "documentation", "research",
        ];
        if known.contains(&category.as_str()) {
            prop_assert_eq!(decoded.category.as_str(), category.as_str());
        } else {
            prop_assert_eq!(decoded.category, Category::Uncategorized);
        }
        if decoded.business_context == BusinessContext::Unknown {
            prop_assert!(
                !["client-facing", "internal-tool", "automation", "research"].contains(&context.as_str())
            );
        }
        if decoded.confidence == Confidence::Low {
            prop_assert!(confidence != "high" && confidence != "medium");
        }
    }
}
