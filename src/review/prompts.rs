//! Prompt templates for the review and rewrite calls.

pub const REVIEW_SYSTEM_PROMPT: &str = "You are an expert code reviewer. Provide detailed, \
     constructive feedback on code quality, best practices, and potential improvements.";

pub const REWRITE_SYSTEM_PROMPT: &str =
    "Fix code errors. Return only the corrected code. No other text.";

/// Sentinel the rewrite prompt asks the model to emit before the corrected
/// code. Chosen to be a full line that plain source code will not contain.
pub const REWRITE_MARKER: &str = "---CORRECTED---";

/// Language-specific review instruction, keyed by lowercased language name.
pub fn language_instruction(language: &str) -> &'static str {
    match language.to_lowercase().as_str() {
        "python" => {
            "Analyze this Python code for syntax, style (PEP 8), best practices, and potential issues."
        }
        "javascript" => {
            "Analyze this JavaScript code for syntax, ES6+ features, best practices, and potential issues."
        }
        "java" => {
            "Analyze this Java code for syntax, conventions, best practices, and potential issues."
        }
        "cpp" => {
            "Analyze this C++ code for syntax, modern C++ practices, memory management, and potential issues."
        }
        "c" => "Analyze this C code for syntax, memory management, best practices, and potential issues.",
        "html" => {
            "Analyze this HTML code for structure, accessibility, best practices, and potential issues."
        }
        "css" => {
            "Analyze this CSS code for syntax, layout, responsiveness, best practices, and potential issues."
        }
        _ => "Analyze this code for syntax, best practices, and potential issues.",
    }
}

pub fn review_prompt(code: &str, language: &str) -> String {
    format!(
        "{}\n\n\
         Code:\n\
         ```{}\n\
         {}\n\
         ```\n\n\
         Provide a concise review in this format:\n\
         REVIEW: [Your review text here]\n\n\
         SUGGESTIONS:\n\
         - [Suggestion 1]\n\
         - [Suggestion 2]\n\
         - [Suggestion 3]\n\n\
         Keep it brief and focused on the most important points.",
        language_instruction(language),
        language,
        code
    )
}

pub fn rewrite_prompt(code: &str) -> String {
    format!(
        "Fix errors in this code.\n\n\
         Input:\n\
         {}\n\n\
         Reply with the line {} followed only by the fixed code.",
        code, REWRITE_MARKER
    )
}
