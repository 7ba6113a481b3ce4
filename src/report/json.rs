use crate::scorer::FootprintResult;

/// JSON formatter for footprint results
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format result as pretty-printed JSON
    pub fn format(result: &FootprintResult) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(result)
    }

    /// Format result as compact JSON (no whitespace)
    pub fn format_compact(result: &FootprintResult) -> Result<String, serde_json::Error> {
        serde_json::to_string(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::QuizSession;
    use crate::scorer::FootprintScorer;
    use crate::tables::GradeTier;

    fn empty_result() -> FootprintResult {
        FootprintScorer::builtin().score(&QuizSession::new(GradeTier::HighSchool, "DE"))
    }

    #[test]
    fn test_format_json() {
        let json = JsonFormatter::format(&empty_result()).unwrap();

        assert!(json.contains("\"tier\": \"high_school\""));
        assert!(json.contains("\"code\": \"DE\""));
        assert!(json.contains("\"standing\": \"within_target\""));
        assert!(json.contains("\"misc\": 0.0"));
    }

    #[test]
    fn test_format_compact() {
        let json = JsonFormatter::format_compact(&empty_result()).unwrap();

        assert!(!json.contains('\n'));
        let parsed: FootprintResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, empty_result());
    }
}
