//! The `tags` subcommand: walks input paths and extracts tags from each
//! recognised Verilog/SystemVerilog file.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::debug;

use aion_config::load_config;
use aion_source::{FileId, SourceDb};
use aion_tags::kind::{kind_table, KindDescriptor, SYSTEMVERILOG_KINDS, VERILOG_KINDS};
use aion_tags::{extract_tags, ExtractOptions, Kind, Language, TagEntry};

use crate::{config_dir, GlobalArgs};

/// Arguments for the `aion tags` subcommand.
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Files or directories to scan. Directories are walked recursively.
    #[arg(required_unless_present = "list_kinds")]
    pub paths: Vec<PathBuf>,

    /// Force a language instead of inferring it per file from its extension.
    #[arg(long, value_enum, default_value_t = LanguageArg::Auto)]
    pub language: LanguageArg,

    /// Emit a second, fully dot-qualified tag for every tag found inside a
    /// scope, in addition to the unqualified one.
    #[arg(long)]
    pub qualified: bool,

    /// Enable or disable one tag kind by its letter, e.g. `+Q` or `-m`.
    /// May be given more than once; overrides the config file.
    #[arg(long = "kind", value_name = "[+-]LETTER")]
    pub kind: Vec<String>,

    /// Print the kind descriptor table for both languages and exit.
    #[arg(long)]
    pub list_kinds: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Ctags)]
    pub format: FormatArg,
}

/// Selects which language's keyword and kind tables to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    /// Infer per file from its extension.
    Auto,
    /// IEEE 1364 Verilog.
    Verilog,
    /// IEEE 1800 SystemVerilog.
    Systemverilog,
}

/// Output format for extracted tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Tab-separated, Universal-Ctags-inspired text.
    Ctags,
    /// One JSON object per tag, newline-delimited.
    Json,
}

/// Errors raised by the `tags` subcommand itself. The core extractor never
/// raises errors: malformed input just yields whatever tags it can find.
#[derive(Debug, thiserror::Error)]
pub enum TagsError {
    /// An I/O error occurred while reading a file or walking a directory.
    #[error("failed to read input: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration file failed to load.
    #[error(transparent)]
    Config(#[from] aion_config::ConfigError),

    /// An explicit file argument's extension maps to no known language.
    #[error("{0}: not a recognized Verilog/SystemVerilog file extension")]
    UnknownLanguage(PathBuf),
}

/// Runs the `tags` subcommand, returning the process exit code.
pub fn run(args: &TagsArgs, global: &GlobalArgs) -> Result<i32, TagsError> {
    if args.list_kinds {
        print_kind_tables();
        return Ok(0);
    }

    let config = load_config(&config_dir(&global.config))?;
    let options = build_options(args, &config);

    let mut db = SourceDb::new();
    let mut files: Vec<(FileId, Language)> = Vec::new();
    for path in &args.paths {
        collect_files(path, args.language, true, &mut db, &mut files)?;
    }
    debug!("collected {} source file(s)", files.len());

    let mut sink: Vec<TagEntry> = Vec::new();
    for (file_id, language) in &files {
        let content = &db.get_file(*file_id).content;
        extract_tags(content, *file_id, *language, &options, &mut sink);
    }
    debug!("extracted {} tag(s)", sink.len());

    for tag in &sink {
        print_tag(tag, &db, args.format);
    }

    Ok(0)
}

/// Builds the effective [`ExtractOptions`] from the config file and the
/// CLI's overrides, with the CLI taking priority over the config file.
fn build_options(args: &TagsArgs, config: &aion_config::TagsConfig) -> ExtractOptions {
    let mut options = ExtractOptions::new();
    options.qualified_tags = config.tags.qualified || args.qualified;

    for (name, enabled) in &config.tags.kinds {
        if let Some(kind) = kind_by_name(name) {
            options.kind_overrides.insert(kind, *enabled);
        }
    }
    for spec in &args.kind {
        if let Some((kind, enabled)) = parse_kind_flag(spec) {
            options.kind_overrides.insert(kind, enabled);
        }
    }
    options
}

/// Parses one `--kind` argument, e.g. `+Q`, `-m`, or a bare `m` (meaning
/// enable).
fn parse_kind_flag(spec: &str) -> Option<(Kind, bool)> {
    let mut chars = spec.chars();
    let first = chars.next()?;
    let (enabled, letter) = match first {
        '+' => (true, chars.next()?),
        '-' => (false, chars.next()?),
        other => (true, other),
    };
    kind_by_letter(letter).map(|kind| (kind, enabled))
}

fn kind_by_name(name: &str) -> Option<Kind> {
    SYSTEMVERILOG_KINDS
        .iter()
        .chain(VERILOG_KINDS.iter())
        .find(|d| d.name == name)
        .map(|d| d.kind)
}

fn kind_by_letter(letter: char) -> Option<Kind> {
    SYSTEMVERILOG_KINDS
        .iter()
        .chain(VERILOG_KINDS.iter())
        .find(|d| d.letter == letter)
        .map(|d| d.kind)
}

fn kind_letter(kind: Kind) -> char {
    kind_by_letter_reverse(kind).unwrap_or('?')
}

fn kind_by_letter_reverse(kind: Kind) -> Option<char> {
    SYSTEMVERILOG_KINDS
        .iter()
        .chain(VERILOG_KINDS.iter())
        .find(|d| d.kind == kind)
        .map(|d| d.letter)
}

/// Walks `path`, pushing every file it recognises (or, for an explicit file
/// argument under `explicit`, erroring on one it doesn't) onto `out`.
fn collect_files(
    path: &Path,
    forced: LanguageArg,
    explicit: bool,
    db: &mut SourceDb,
    out: &mut Vec<(FileId, Language)>,
) -> Result<(), TagsError> {
    if path.is_dir() {
        let mut entries: Vec<_> = std::fs::read_dir(path)?.collect::<Result<_, _>>()?;
        entries.sort_by_key(|e| e.file_name());
        for entry in entries {
            collect_files(&entry.path(), forced, false, db, out)?;
        }
        return Ok(());
    }

    let language = match forced {
        LanguageArg::Verilog => Some(Language::Verilog),
        LanguageArg::Systemverilog => Some(Language::SystemVerilog),
        LanguageArg::Auto => path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Language::from_extension),
    };

    match language {
        Some(language) => {
            let file_id = db.load_file(path)?;
            out.push((file_id, language));
        }
        None if explicit => return Err(TagsError::UnknownLanguage(path.to_path_buf())),
        None => {}
    }
    Ok(())
}

fn print_kind_tables() {
    for (name, table) in [
        ("verilog", VERILOG_KINDS),
        ("systemverilog", SYSTEMVERILOG_KINDS),
    ] {
        println!("{name}:");
        for d in table {
            print_kind_descriptor(d);
        }
    }
}

fn print_kind_descriptor(d: &KindDescriptor) {
    let flag = if d.enabled_by_default { "on " } else { "off" };
    println!("  {}  {flag}  {:<10} {}", d.letter, d.name, d.description);
}

fn print_tag(tag: &TagEntry, db: &SourceDb, format: FormatArg) {
    match format {
        FormatArg::Ctags => print_ctags_line(tag, db),
        FormatArg::Json => print_json_line(tag, db),
    }
}

fn print_ctags_line(tag: &TagEntry, db: &SourceDb) {
    let resolved = db.resolve_span(tag.span);
    print!(
        "{}\t{}\t{}:{}",
        tag.name,
        kind_letter(tag.kind),
        resolved.file_path.display(),
        resolved.start_line,
    );
    if !tag.scope.is_empty() {
        print!("\tscope:{}", tag.scope);
    }
    if tag.is_prototype {
        print!("\tprototype:true");
    }
    if let Some(base) = &tag.inheritance {
        print!("\tinherits:{base}");
    }
    if let Some(overridable) = tag.parameter {
        print!("\tparameter:{overridable}");
    }
    println!();
}

fn print_json_line(tag: &TagEntry, db: &SourceDb) {
    let resolved = db.resolve_span(tag.span);
    let value = serde_json::json!({
        "name": tag.name,
        "kind": kind_table(Language::SystemVerilog)
            .iter()
            .chain(kind_table(Language::Verilog).iter())
            .find(|d| d.kind == tag.kind)
            .map(|d| d.name)
            .unwrap_or("unknown"),
        "file": resolved.file_path.display().to_string(),
        "line": resolved.start_line,
        "scope": tag.scope,
        "qualifiedName": tag.qualified_name(),
        "isPrototype": tag.is_prototype,
        "inherits": tag.inheritance,
        "parameter": tag.parameter,
    });
    println!("{value}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kind_flag_plus() {
        assert_eq!(parse_kind_flag("+Q"), Some((Kind::Prototype, true)));
    }

    #[test]
    fn parse_kind_flag_minus() {
        assert_eq!(parse_kind_flag("-m"), Some((Kind::Module, false)));
    }

    #[test]
    fn parse_kind_flag_bare_letter_enables() {
        assert_eq!(parse_kind_flag("m"), Some((Kind::Module, true)));
    }

    #[test]
    fn parse_kind_flag_unknown_letter() {
        assert_eq!(parse_kind_flag("+z"), None);
    }

    #[test]
    fn kind_by_name_resolves_shared_and_sv_only() {
        assert_eq!(kind_by_name("module"), Some(Kind::Module));
        assert_eq!(kind_by_name("prototype"), Some(Kind::Prototype));
        assert_eq!(kind_by_name("bogus"), None);
    }

    #[test]
    fn kind_letter_round_trips_through_table() {
        assert_eq!(kind_letter(Kind::Module), 'm');
        assert_eq!(kind_letter(Kind::Prototype), 'Q');
    }

    #[test]
    fn collect_files_directory_skips_unrecognized_extensions() {
        let dir = std::env::temp_dir().join("aion_cli_collect_test_dir");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.sv"), "module a; endmodule").unwrap();
        std::fs::write(dir.join("b.txt"), "not hdl").unwrap();

        let mut db = SourceDb::new();
        let mut out = Vec::new();
        collect_files(&dir, LanguageArg::Auto, true, &mut db, &mut out).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].1, Language::SystemVerilog);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn collect_files_explicit_unknown_extension_errors() {
        let dir = std::env::temp_dir().join("aion_cli_collect_test_explicit");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("notes.txt");
        std::fs::write(&file, "not hdl").unwrap();

        let mut db = SourceDb::new();
        let mut out = Vec::new();
        let result = collect_files(&file, LanguageArg::Auto, true, &mut db, &mut out);
        assert!(matches!(result, Err(TagsError::UnknownLanguage(_))));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn collect_files_forced_language_overrides_extension() {
        let dir = std::env::temp_dir().join("aion_cli_collect_test_forced");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("top.v");
        std::fs::write(&file, "module top; endmodule").unwrap();

        let mut db = SourceDb::new();
        let mut out = Vec::new();
        collect_files(&file, LanguageArg::Systemverilog, true, &mut db, &mut out).unwrap();
        assert_eq!(out[0].1, Language::SystemVerilog);

        std::fs::remove_dir_all(&dir).ok();
    }
}
