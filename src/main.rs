//! codelight - highlight files on the terminal

mod terminal;

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use codelight::{Config, Error, HighlightCache, LanguageId, Registry, Result};
use terminal::Terminal;

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct Options {
    /// Language name overriding extension detection
    lang: Option<String>,
    /// Print spans instead of colors
    spans: bool,
    /// Maximum display columns per line
    width: Option<usize>,
    /// Files to highlight (`-` is stdin)
    files: Vec<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args)? else {
        return Ok(());
    };

    let mut registry = Registry::new();
    Config::load().apply_lenient(&mut registry);

    let forced = match &options.lang {
        Some(name) => Some(
            registry
                .language_by_name(name)
                .ok_or_else(|| Error::Message(format!("unknown language `{}`", name)))?,
        ),
        None => None,
    };

    let mut terminal = Terminal::new(options.width)?;
    let many = options.files.len() > 1;
    for (i, path) in options.files.iter().enumerate() {
        let (text, lang) = if path.as_os_str() == "-" {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            (text, forced.unwrap_or(registry.default_language()))
        } else {
            let text = fs::read_to_string(path)?;
            (text, forced.unwrap_or_else(|| registry.resolve_path(path)))
        };

        if many {
            if i > 0 {
                terminal.write_line("")?;
            }
            terminal.write_line(&format!("==> {} <==", path.display()))?;
        }
        highlight(&mut terminal, &registry, lang, &text, options.spans)?;
    }
    terminal.flush()
}

/// Highlight one document
fn highlight(
    terminal: &mut Terminal,
    registry: &Registry,
    lang: LanguageId,
    text: &str,
    dump: bool,
) -> Result<()> {
    let lines: Vec<&str> = text.lines().collect();
    let mut cache = HighlightCache::new(lang);
    cache.highlight_all(registry, &lines);

    for (idx, line) in lines.iter().enumerate() {
        let spans = cache.line_spans(idx).unwrap_or(&[]);
        if dump {
            let state = cache.end_state(idx).unwrap_or_default();
            terminal.dump_line(idx + 1, line, spans, state)?;
        } else {
            terminal.paint_line(line, spans)?;
        }
    }
    Ok(())
}

/// Parse command line arguments; `None` means nothing left to do
fn parse_args(args: &[String]) -> Result<Option<Options>> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--lang" | "-l" => {
                let name = iter
                    .next()
                    .ok_or_else(|| Error::Message(format!("{} needs a language name", arg)))?;
                options.lang = Some(name.clone());
            }
            "--width" | "-w" => {
                let width = iter
                    .next()
                    .and_then(|w| w.parse::<usize>().ok())
                    .filter(|w| *w > 0)
                    .ok_or_else(|| Error::Message(format!("{} needs a positive number", arg)))?;
                options.width = Some(width);
            }
            "--spans" => options.spans = true,
            "-" => options.files.push(PathBuf::from(arg)),
            flag if flag.starts_with('-') => {
                return Err(Error::Message(format!("unknown option `{}`", flag)));
            }
            file => options.files.push(PathBuf::from(file)),
        }
    }

    if options.files.is_empty() {
        return Err(Error::Message("no input files (try --help)".into()));
    }
    Ok(Some(options))
}

fn print_usage() {
    println!("codelight {} - syntax highlighting on the terminal", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: codelight [OPTIONS] FILE...");
    println!();
    println!("Options:");
    println!("  -l, --lang NAME   Use language NAME (markup, config, script, plain, ...)");
    println!("  -w, --width N     Cut lines at N display columns");
    println!("      --spans       Print spans and line states instead of colors");
    println!("  -h, --help        Show this help message");
    println!("  -V, --version     Show version information");
    println!();
    println!("A FILE of `-` reads standard input.");
    println!("Extensions and custom grammars are read from ~/.codelight.toml.");
}

fn print_version() {
    println!("codelight {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["-l", "lua", "--spans", "-w", "40", "a.txt", "-"]))
            .unwrap()
            .unwrap();
        assert_eq!(
            options,
            Options {
                lang: Some("lua".into()),
                spans: true,
                width: Some(40),
                files: vec![PathBuf::from("a.txt"), PathBuf::from("-")],
            }
        );
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(parse_args(&args(&[])), Err(Error::Message(_))));
        assert!(matches!(parse_args(&args(&["--lang"])), Err(Error::Message(_))));
        assert!(matches!(parse_args(&args(&["-w", "0", "x"])), Err(Error::Message(_))));
        assert!(matches!(parse_args(&args(&["--bogus", "x"])), Err(Error::Message(_))));
    }
}
