//! Language catalog and toolchain configuration
//!
//! The five supported languages are a closed set (the harness synthesizer is
//! per-language code generation), but the toolchain invocations live in an
//! embedded TOML file so per-environment builds can swap compiler flags
//! without touching the generators.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use anyhow::Context;
use serde::Deserialize;

/// A language supported by the local runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Java,
        Language::Cpp,
    ];

    /// Wire name used by the submission API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Cpp => "cpp",
        }
    }

    /// Comma-joined list of supported wire names, for error messages.
    pub fn supported_list() -> String {
        Language::ALL
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Languages with a separate compile step before the run phase.
    pub fn is_compiled(&self) -> bool {
        matches!(self, Language::TypeScript | Language::Java | Language::Cpp)
    }

    pub fn toolchain(&self) -> &'static ToolchainConfig {
        &toolchains()[self]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ();

    // Wire names are matched exactly; "Python" is as unsupported as "ruby".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Language::Python),
            "javascript" => Ok(Language::JavaScript),
            "typescript" => Ok(Language::TypeScript),
            "java" => Ok(Language::Java),
            "cpp" => Ok(Language::Cpp),
            _ => Err(()),
        }
    }
}

/// Placeholder values substituted into a command template.
#[derive(Debug, Default)]
pub struct CommandContext<'a> {
    /// Temp working directory (compiled languages)
    pub dir: Option<&'a Path>,
    /// Harness source file inside the temp dir
    pub source: Option<&'a Path>,
    /// Compiled artifact inside the temp dir
    pub artifact: Option<&'a Path>,
    /// Whole harness text, for interpreters invoked with `-c`/`-e`
    pub program: Option<&'a str>,
}

/// Toolchain invocation for one language.
///
/// Command templates are whitespace-split token lists; tokens may carry the
/// path placeholders `{dir}`, `{source}`, `{artifact}`, or be exactly
/// `{program}`.
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    /// Harness file name inside the temp dir (compiled languages only)
    pub source_file: Option<String>,
    /// Artifact produced by the compile step, relative to the temp dir
    pub artifact: Option<String>,
    pub compile_command: Option<Vec<String>>,
    pub run_command: Vec<String>,
}

impl ToolchainConfig {
    /// Substitute placeholders into a command template.
    pub fn render(template: &[String], ctx: &CommandContext<'_>) -> Vec<String> {
        template
            .iter()
            .map(|token| {
                if token == "{program}" {
                    return ctx.program.unwrap_or_default().to_string();
                }
                let mut token = token.clone();
                if let Some(dir) = ctx.dir {
                    token = token.replace("{dir}", &dir.to_string_lossy());
                }
                if let Some(source) = ctx.source {
                    token = token.replace("{source}", &source.to_string_lossy());
                }
                if let Some(artifact) = ctx.artifact {
                    token = token.replace("{artifact}", &artifact.to_string_lossy());
                }
                token
            })
            .collect()
    }
}

/// Raw TOML shape of one toolchain entry.
#[derive(Debug, Deserialize)]
struct RawToolchain {
    source_file: Option<String>,
    artifact: Option<String>,
    compile_command: Option<String>,
    run_command: String,
}

static TOOLCHAINS: OnceLock<HashMap<Language, ToolchainConfig>> = OnceLock::new();

fn toolchains() -> &'static HashMap<Language, ToolchainConfig> {
    TOOLCHAINS.get_or_init(|| {
        load_toolchains(include_str!("../files/toolchains.toml"))
            .expect("embedded toolchains.toml is well-formed")
    })
}

fn load_toolchains(content: &str) -> anyhow::Result<HashMap<Language, ToolchainConfig>> {
    let raw: HashMap<String, RawToolchain> = toml::from_str(content)?;

    let mut configs = HashMap::new();
    for (name, raw) in raw {
        let language = Language::from_str(&name)
            .ok()
            .with_context(|| format!("Unknown language in toolchains.toml: {}", name))?;
        configs.insert(
            language,
            ToolchainConfig {
                source_file: raw.source_file,
                artifact: raw.artifact,
                compile_command: raw.compile_command.as_deref().map(into_command),
                run_command: into_command(&raw.run_command),
            },
        );
    }

    for language in Language::ALL {
        anyhow::ensure!(
            configs.contains_key(&language),
            "toolchains.toml missing entry for {}",
            language
        );
    }

    Ok(configs)
}

fn into_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_exact_wire_names_only() {
        assert_eq!("python".parse::<Language>(), Ok(Language::Python));
        assert_eq!("cpp".parse::<Language>(), Ok(Language::Cpp));
        assert!("Python".parse::<Language>().is_err());
        assert!("CPP".parse::<Language>().is_err());
        assert!("ruby".parse::<Language>().is_err());
    }

    #[test]
    fn compiled_languages_have_compile_commands() {
        for language in Language::ALL {
            let toolchain = language.toolchain();
            assert_eq!(
                toolchain.compile_command.is_some(),
                language.is_compiled(),
                "{}",
                language
            );
            if language.is_compiled() {
                assert!(toolchain.source_file.is_some(), "{}", language);
            }
        }
    }

    #[test]
    fn interpreted_run_commands_take_inline_programs() {
        for language in [Language::Python, Language::JavaScript] {
            let toolchain = language.toolchain();
            assert!(toolchain.run_command.contains(&"{program}".to_string()));
        }
    }

    #[test]
    fn render_substitutes_path_placeholders() {
        let template = vec![
            "java".to_string(),
            "-cp".to_string(),
            "{dir}".to_string(),
            "Main".to_string(),
        ];
        let dir = PathBuf::from("/tmp/flowcode-java-x");
        let ctx = CommandContext {
            dir: Some(&dir),
            ..Default::default()
        };
        assert_eq!(
            ToolchainConfig::render(&template, &ctx)[2],
            "/tmp/flowcode-java-x"
        );
    }

    #[test]
    fn render_replaces_program_token_wholesale() {
        let template = vec![
            "python3".to_string(),
            "-c".to_string(),
            "{program}".to_string(),
        ];
        let ctx = CommandContext {
            program: Some("print('a b c')"),
            ..Default::default()
        };
        assert_eq!(
            ToolchainConfig::render(&template, &ctx)[2],
            "print('a b c')"
        );
    }

    #[test]
    fn supported_list_matches_wire_names() {
        assert_eq!(
            Language::supported_list(),
            "python, javascript, typescript, java, cpp"
        );
    }
}
