use crate::error::ValidationError;
use serde::Deserialize;

/// A contact form submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct SubmissionPayload {
    name: String,
    email: String,
    message: String,
}

impl Submission {
    /// Parses a raw request body into a submission.
    ///
    /// The body must be a UTF-8 JSON object carrying string `name`, `email` and `message`
    /// fields, each non-empty once surrounding whitespace is ignored. Field values are
    /// kept exactly as submitted. No format checks are applied to the email address.
    ///
    /// # Errors
    /// Returns `ValidationError::Malformed` if the body is not such an object.
    /// Returns `ValidationError::EmptyField` naming the first blank field.
    pub fn parse(raw: &[u8]) -> Result<Self, ValidationError> {
        let text = std::str::from_utf8(raw).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        // Derived struct deserializers also accept sequences; only objects are submissions.
        if !value.is_object() {
            return Err(ValidationError::Malformed("body is not a JSON object".to_string()));
        }
        let payload: SubmissionPayload =
            serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))?;

        for (field, value) in [("name", &payload.name), ("email", &payload.email), ("message", &payload.message)] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field));
            }
        }

        Ok(Self { name: payload.name, email: payload.email, message: payload.message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_submission() {
        let submission = Submission::parse(br#"{"name":"Ana","email":"ana@x.com","message":"Hi"}"#).unwrap();
        assert_eq!(submission.name, "Ana");
        assert_eq!(submission.email, "ana@x.com");
        assert_eq!(submission.message, "Hi");
    }

    #[test]
    fn test_parse_keeps_values_verbatim() {
        let submission =
            Submission::parse(br#"{"name":" Ana ","email":"ana@x.com","message":"line one\nline two"}"#).unwrap();
        assert_eq!(submission.name, " Ana ");
        assert_eq!(submission.message, "line one\nline two");
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let submission =
            Submission::parse(br#"{"name":"Ana","email":"ana@x.com","message":"Hi","phone":"123"}"#).unwrap();
        assert_eq!(submission.name, "Ana");
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let res = Submission::parse(b"not json");
        assert!(matches!(res, Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_json_string() {
        let res = Submission::parse(br#""not json""#);
        assert!(matches!(res, Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_non_object_json() {
        let bodies: [&[u8]; 5] = [br#"["Ana","ana@x.com","Hi"]"#, b"null", b"42", b"true", b"[]"];
        for raw in bodies {
            let res = Submission::parse(raw);
            assert!(
                matches!(res, Err(ValidationError::Malformed(_))),
                "{:?} should be malformed",
                String::from_utf8_lossy(raw)
            );
        }
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let res = Submission::parse(br#"{"name":"Ana","email":"ana@x.com"}"#);
        assert!(matches!(res, Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_non_string_field() {
        let res = Submission::parse(br#"{"name":"Ana","email":"ana@x.com","message":42}"#);
        assert!(matches!(res, Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        let res = Submission::parse(&[0xff, 0xfe, 0xfd]);
        assert!(matches!(res, Err(ValidationError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_blank_fields() {
        let res = Submission::parse(br#"{"name":"   ","email":"ana@x.com","message":"Hi"}"#);
        assert!(matches!(res, Err(ValidationError::EmptyField("name"))));

        let res = Submission::parse(br#"{"name":"Ana","email":"","message":"Hi"}"#);
        assert!(matches!(res, Err(ValidationError::EmptyField("email"))));

        let res = Submission::parse(br#"{"name":"Ana","email":"ana@x.com","message":"\n\t"}"#);
        assert!(matches!(res, Err(ValidationError::EmptyField("message"))));
    }
}
