//! Review prompts and the text sent to the model on stdin.

use std::fmt;

use clap::ValueEnum;

/// Verbose rule list for the Linux kernel commit message style.
pub const RULES_PROMPT: &str = r#"
Revise the patch message following the Linux kernel conventions:

- title following the format "<file>: <short, imperative summary of the change>"
- title shouldn't be capitalized
- explain the purpose of the change
- explain the technical details
- line wrap up to 75 characters
- changes are describe in present tense and imperative mood
- don't touch signed-off-by lines
- don't be overly formal

Return only the message. Don't return anything before or after the revised
message.
"#;

/// Terse reference to the kernel patch submission guideline.
pub const GUIDELINE_PROMPT: &str = r#"
Revise the patch message so it follows the Linux kernel guideline for
describing changes (Documentation/process/submitting-patches.rst). Keep
signed-off-by lines untouched.

Return only the message. Don't return anything before or after the revised
message.
"#;

/// Built-in prompt variants. Exactly one is used per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PromptVariant {
    /// Explicit rule list.
    #[default]
    Rules,
    /// Short pointer to the kernel submission guideline.
    Guideline,
}

impl PromptVariant {
    pub fn text(&self) -> &'static str {
        match self {
            PromptVariant::Rules => RULES_PROMPT,
            PromptVariant::Guideline => GUIDELINE_PROMPT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptVariant::Rules => "rules",
            PromptVariant::Guideline => "guideline",
        }
    }
}

impl fmt::Display for PromptVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the stdin payload that carries the original message.
pub fn build_review_input(message: &str) -> String {
    format!("This is the message:\n{}\n", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_are_distinct() {
        assert_ne!(PromptVariant::Rules.text(), PromptVariant::Guideline.text());
    }

    #[test]
    fn test_default_variant_is_rules() {
        assert_eq!(PromptVariant::default(), PromptVariant::Rules);
        assert!(PromptVariant::default().text().contains("signed-off-by"));
    }

    #[test]
    fn test_variant_parses_from_cli_value() {
        let parsed = PromptVariant::from_str("guideline", true).unwrap();
        assert_eq!(parsed, PromptVariant::Guideline);
        assert_eq!(parsed.to_string(), "guideline");
    }

    #[test]
    fn test_build_review_input() {
        assert_eq!(
            build_review_input("fix: thing\n\nbody"),
            "This is the message:\nfix: thing\n\nbody\n"
        );
    }
}
