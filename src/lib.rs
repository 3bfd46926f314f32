//! ironwind: a utility-class CSS compiler.
//!
//! The pipeline per class is parse -> utility dispatch -> post-processing
//! (negatives, opacity modifiers) -> variant application -> AST assembly.
//! Candidates that fail any stage are skipped silently; scanned source text
//! is full of tokens that merely look like utility classes.

pub mod ast;
pub mod candidate;
pub mod config;
pub mod escape;
pub mod postprocess;
pub mod scanner;
pub mod theme;
pub mod utilities;
pub mod variants;

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use ast::{mark_important, style_rule, wrap_in_at_rules, AstNode};
use escape::EscapeCache;
use theme::Theme;
use utilities::{Utility, UtilityRegistry, UtilityTier};
use variants::VariantRegistry;

/// Registration-time errors. Registration happens once at startup, so these
/// are surfaced to the caller instead of being silently ignored.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("utility '{name}' is already registered")]
    DuplicateUtility { name: String },
    #[error("variant '{name}' is already registered")]
    DuplicateVariant { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    pub css: String,
    /// Candidates that produced a rule.
    pub class_count: usize,
    /// Theme custom properties referenced by the generated rules.
    pub theme_variables: Vec<String>,
}

pub struct Compiler {
    theme: Theme,
    utilities: UtilityRegistry,
    variants: VariantRegistry,
    escape_cache: EscapeCache,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            theme: Theme::with_defaults(),
            utilities: UtilityRegistry::with_defaults(),
            variants: VariantRegistry::with_defaults(),
            escape_cache: EscapeCache::new(),
        }
    }

    pub fn from_config(config: &config::Config) -> Self {
        let mut compiler = Self::new();
        compiler.theme = config::apply_theme(config, compiler.theme);
        for (name, width) in &config.theme.breakpoints {
            compiler.variants.set_breakpoint(name, width);
        }
        compiler
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn register_utility(
        &mut self,
        name: &str,
        tier: UtilityTier,
        utility: Box<dyn Utility>,
        overwrite: bool,
    ) -> Result<(), RegistryError> {
        self.utilities.register(name, tier, utility, overwrite)
    }

    pub fn register_variant(
        &mut self,
        name: &str,
        template: &str,
        overwrite: bool,
    ) -> Result<(), RegistryError> {
        self.variants.register(name, template, overwrite)
    }

    pub fn set_dark_selector(&mut self, template: &str) {
        self.variants.set_dark_selector(template);
    }

    /// Compiles one candidate into a wrapped rule plus its ordering weight,
    /// or `None` when any stage rejects it.
    fn compile_class(&self, raw: &str) -> Option<(u16, AstNode)> {
        let candidate = candidate::parse(raw)?;
        let compiled = self.utilities.compile(&candidate, &self.theme)?;

        let mut nodes = compiled.nodes;
        if candidate.negative {
            nodes = postprocess::apply_negative(nodes);
        }
        if let Some(modifier) = candidate.modifier.as_deref() {
            if !compiled.modifier_consumed {
                nodes = postprocess::apply_color_modifier(nodes, modifier)?;
            }
        }
        if candidate.important {
            nodes = nodes.into_iter().map(mark_important).collect();
        }

        let selector = format!(".{}", self.escape_cache.escape(raw));
        let applied = self.variants.apply(&selector, &candidate.variants);
        let rule = style_rule(applied.selector, nodes);
        let wrapped = wrap_in_at_rules(rule, &applied.wrappers);
        Some((applied.weight, wrapped))
    }

    /// Compiles a batch of scanned class tokens into a stylesheet. Rules
    /// are ordered by variant weight first, then by input order; the theme
    /// layer carries only the custom properties the rules reference.
    pub fn compile_classes(&self, classes: &[String]) -> CompileResult {
        let mut rules: Vec<(u16, AstNode)> = Vec::new();
        for class in classes {
            match self.compile_class(class) {
                Some(rule) => rules.push(rule),
                None => log::debug!("skipping candidate '{}'", class),
            }
        }
        rules.sort_by_key(|(weight, _)| *weight);
        let utility_nodes: Vec<AstNode> = rules.into_iter().map(|(_, node)| node).collect();

        let mut used = BTreeSet::new();
        ast::collect_variable_references(&utility_nodes, &mut used);

        let theme_declarations: Vec<AstNode> = self
            .theme
            .iter()
            .filter(|(key, _)| used.contains(*key))
            .map(|(key, value)| ast::decl(key, value))
            .collect();
        let theme_nodes = if theme_declarations.is_empty() {
            Vec::new()
        } else {
            vec![style_rule(":root, :host", theme_declarations)]
        };

        let class_count = utility_nodes.len();
        let css = ast::print_stylesheet(&theme_nodes, &[], &[], &utility_nodes);
        CompileResult {
            css,
            class_count,
            theme_variables: used.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Command-line interface.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan {
        inputs: Vec<String>,
        ignore: Vec<String>,
    },
    Build {
        inputs: Vec<String>,
        out: Option<String>,
        config: Option<String>,
        ignore: Vec<String>,
    },
    Help,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Scan(#[from] scanner::ScanError),
    #[error("failed to write output {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub fn run_from_env() -> Result<(), CliError> {
    let command = parse_args(env::args().skip(1))?;
    run(command)
}

pub fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Scan { inputs, ignore } => run_scan(inputs, ignore),
        Command::Build {
            inputs,
            out,
            config,
            ignore,
        } => run_build(inputs, out, config, ignore),
        Command::Help => {
            print_help();
            Ok(())
        }
    }
}

pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut iter = args.into_iter();
    let Some(cmd) = iter.next() else {
        return Ok(Command::Help);
    };

    match cmd.as_str() {
        "scan" => parse_scan_args(iter.collect()),
        "build" => parse_build_args(iter.collect()),
        "-h" | "--help" | "help" => Ok(Command::Help),
        _ => Err(CliError::Usage(format!("unknown command: {}", cmd))),
    }
}

fn parse_scan_args(args: Vec<String>) -> Result<Command, CliError> {
    let mut inputs = Vec::new();
    let mut ignore = Vec::new();
    let mut idx = 0;

    while idx < args.len() {
        match args[idx].as_str() {
            "--ignore" | "-I" => {
                idx += 1;
                if idx >= args.len() {
                    return Err(CliError::Usage(
                        "scan requires a value for --ignore".to_string(),
                    ));
                }
                ignore.push(args[idx].clone());
            }
            value => {
                inputs.push(value.to_string());
            }
        }
        idx += 1;
    }

    if inputs.is_empty() {
        return Err(CliError::Usage(
            "scan requires at least one glob pattern".to_string(),
        ));
    }
    Ok(Command::Scan { inputs, ignore })
}

fn parse_build_args(args: Vec<String>) -> Result<Command, CliError> {
    let mut inputs = Vec::new();
    let mut out = None;
    let mut config = None;
    let mut ignore = Vec::new();
    let mut idx = 0;

    while idx < args.len() {
        match args[idx].as_str() {
            "--out" | "--output" | "-o" => {
                idx += 1;
                if idx >= args.len() {
                    return Err(CliError::Usage(
                        "build requires a value for --output".to_string(),
                    ));
                }
                out = Some(args[idx].clone());
            }
            "--config" | "-c" => {
                idx += 1;
                if idx >= args.len() {
                    return Err(CliError::Usage(
                        "build requires a value for --config".to_string(),
                    ));
                }
                config = Some(args[idx].clone());
            }
            "--ignore" | "-I" => {
                idx += 1;
                if idx >= args.len() {
                    return Err(CliError::Usage(
                        "build requires a value for --ignore".to_string(),
                    ));
                }
                ignore.push(args[idx].clone());
            }
            value => {
                inputs.push(value.to_string());
            }
        }
        idx += 1;
    }

    Ok(Command::Build {
        inputs,
        out,
        config,
        ignore,
    })
}

fn run_scan(inputs: Vec<String>, ignore: Vec<String>) -> Result<(), CliError> {
    let mut result = scanner::scan(Path::new("."), &inputs, &ignore)?;
    result.classes.sort();

    for class in &result.classes {
        println!("{}", class);
    }
    eprintln!(
        "scanned {} files, found {} classes",
        result.files_scanned,
        result.classes.len()
    );
    Ok(())
}

fn run_build(
    inputs: Vec<String>,
    out: Option<String>,
    config_path: Option<String>,
    ignore: Vec<String>,
) -> Result<(), CliError> {
    let config = match config_path {
        Some(path) => config::load(&PathBuf::from(path))?,
        None => config::Config::default(),
    };

    let mut patterns = inputs;
    if patterns.is_empty() {
        patterns = config.content.clone();
    }
    if patterns.is_empty() {
        return Err(CliError::Usage(
            "build requires glob patterns on the command line or in [content]".to_string(),
        ));
    }

    let mut ignore = ignore;
    if let Some(out_path) = out.as_deref() {
        // Never rescan our own output.
        ignore.push(out_path.to_string());
    }
    let scan_result = scanner::scan(Path::new("."), &patterns, &ignore)?;
    let compiler = Compiler::from_config(&config);
    let result = compiler.compile_classes(&scan_result.classes);

    if let Some(out_path) = out {
        fs::write(&out_path, &result.css).map_err(|err| CliError::Write {
            path: out_path.clone(),
            source: err,
        })?;
    } else {
        print!("{}", result.css);
    }

    eprintln!(
        "scanned {} files, compiled {} of {} candidates",
        scan_result.files_scanned,
        result.class_count,
        scan_result.classes.len()
    );
    Ok(())
}

fn print_help() {
    println!("ironwind");
    println!();
    println!("USAGE:");
    println!("  ironwind scan [--ignore <glob>] <glob...>");
    println!("  ironwind build [--output <path>] [--config <path>] [--ignore <glob>] [<glob...>]");
    println!();
    println!("EXAMPLES:");
    println!("  ironwind scan \"src/**/*.{{html,tsx}}\"");
    println!("  ironwind build --output dist/app.css \"src/**/*.{{html,tsx}}\"");
    println!("  ironwind build -I \"**/generated/**\" \"src/**/*.{{html,tsx}}\"");
    println!("  ironwind build -c ironwind.toml");
}

#[cfg(test)]
mod tests {
    use super::{parse_args, Command, Compiler};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_build_command() {
        let command = parse_args(args(&["build", "-o", "out.css", "src/**/*.html"]))
            .expect("parses");
        assert_eq!(
            command,
            Command::Build {
                inputs: vec!["src/**/*.html".to_string()],
                out: Some("out.css".to_string()),
                config: None,
                ignore: Vec::new(),
            }
        );
    }

    #[test]
    fn missing_flag_value_is_a_usage_error() {
        assert!(parse_args(args(&["build", "--output"])).is_err());
        assert!(parse_args(args(&["scan"])).is_err());
    }

    #[test]
    fn no_args_prints_help() {
        assert_eq!(parse_args(Vec::new()).expect("parses"), Command::Help);
    }

    #[test]
    fn compiles_a_simple_batch() {
        let compiler = Compiler::new();
        let result = compiler.compile_classes(&[
            "p-4".to_string(),
            "not-a-real-utility-xyz".to_string(),
        ]);
        assert_eq!(result.class_count, 1);
        assert!(result.css.contains(".p-4 {"));
        assert!(result.css.contains("padding: calc(var(--spacing) * 4);"));
        assert!(result
            .theme_variables
            .contains(&"--spacing".to_string()));
    }

    #[test]
    fn theme_layer_contains_only_used_variables() {
        let compiler = Compiler::new();
        let result = compiler.compile_classes(&["bg-red-500".to_string()]);
        assert!(result.css.contains("--color-red-500: #ef4444;"));
        assert!(!result.css.contains("--color-blue-500"));
    }
}
