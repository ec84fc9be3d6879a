//! JavaScript harness generation
//!
//! Runs via `node -e`. Argument parsing is JSON.parse with a quoted-string
//! fallback; the problem catalog keeps JavaScript submissions to primitive,
//! array and string shapes, so no structural adapters are emitted here.

use anyhow::Result;

use super::{json_line_list, HarnessGenerator};
use crate::detect;
use crate::languages::Language;

pub struct JavaScriptGenerator;

impl HarnessGenerator for JavaScriptGenerator {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn synthesize(&self, user_source: &str, input_lines: &[&str]) -> Result<String> {
        let entry = detect::detect(Language::JavaScript, user_source);

        Ok(format!(
            r#"{source}

// Parse inputs
const inputs = {inputs};
const args = inputs.map(inp => {{
  inp = inp.trim();
  try {{
    // JSON covers arrays, numbers and booleans
    return JSON.parse(inp);
  }} catch {{
    // Quoted strings lose their quotes; anything else passes through
    if ((inp.startsWith('"') && inp.endsWith('"')) || (inp.startsWith("'") && inp.endsWith("'"))) {{
      return inp.slice(1, -1);
    }}
    return inp;
  }}
}});

// Call the function
const result = {func}(...args);

// Print result
if (typeof result === 'boolean') {{
  console.log(result.toString().toLowerCase());
}} else if (Array.isArray(result)) {{
  console.log(JSON.stringify(result).replace(/ /g, ''));
}} else {{
  console.log(result);
}}
"#,
            source = user_source,
            inputs = json_line_list(input_lines),
            func = entry.name,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_to_detected_function() {
        let source = "function twoSum(nums, target) {\n  return [0, 1];\n}";
        let harness = JavaScriptGenerator
            .synthesize(source, &["[2,7,11,15]", "9"])
            .unwrap();
        assert!(harness.contains("const result = twoSum(...args);"));
        assert!(harness.contains(r#"const inputs = ["[2,7,11,15]","9"];"#));
    }

    #[test]
    fn inlines_user_source_verbatim() {
        let source = "function isValid(s) { return s.length % 2 === 0; }";
        let harness = JavaScriptGenerator.synthesize(source, &["\"()\""]).unwrap();
        assert!(harness.starts_with(source));
    }

    #[test]
    fn falls_back_to_solution() {
        let harness = JavaScriptGenerator
            .synthesize("const x = 1;", &["1"])
            .unwrap();
        assert!(harness.contains("const result = solution(...args);"));
    }
}
