use chrono::NaiveDateTime;
use mnemon::{Context, Lang, Options, parse_with};
use std::io::{self, Read};

const DEFAULT_REFERENCE: &str = "2013-02-12T04:30:00";

fn main() {
    env_logger::init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let ctx = Context { reference_time: config.reference_time };
    let opts = Options { language_hint: config.language };
    let parsed = parse_with(&config.input, &ctx, &opts);

    if config.json {
        match serde_json::to_string_pretty(&parsed) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to serialize result: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("input:      {}", parsed.raw_text);
    println!("language:   {}", parsed.language);
    println!("action:     {}", parsed.action);
    println!("intent:     {}", parsed.intent);
    println!("time:       {:?} ({})", parsed.time_expression.kind, parsed.time_expression.natural_language);
    if let Some(dt) = parsed.time_expression.datetime {
        println!("datetime:   {dt}");
    }
    if let Some(seconds) = parsed.time_expression.relative_seconds {
        println!("in:         {seconds}s");
    }
    println!("confidence: {:.2}", parsed.confidence);
    for entity in &parsed.entities {
        println!("entity:     {} [{}] @{}..{}", entity.text, entity.label, entity.start, entity.end);
    }
}

struct CliConfig {
    input: String,
    reference_time: NaiveDateTime,
    language: Option<Lang>,
    json: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut reference_time = parse_reference(DEFAULT_REFERENCE)?;
    let mut language = None;
    let mut json = false;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("mnemon {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--json" => json = true,
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                reference_time = parse_reference(&value)?;
            }
            "--lang" => {
                let value = args.next().ok_or_else(|| "error: --lang expects a value".to_string())?;
                language = Some(parse_lang(&value)?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--reference=") => {
                let value = arg.trim_start_matches("--reference=");
                reference_time = parse_reference(value)?;
            }
            _ if arg.starts_with("--lang=") => {
                language = Some(parse_lang(arg.trim_start_matches("--lang="))?);
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, reference_time, language, json })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_reference(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| format!("error: invalid --reference '{value}' (expected YYYY-MM-DDTHH:MM:SS)"))
}

fn parse_lang(value: &str) -> Result<Lang, String> {
    Lang::from_code(value).ok_or_else(|| format!("error: invalid --lang '{value}' (expected ru or en)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "mnemon {version}

Reminder parsing engine CLI.

Usage:
  mnemon [OPTIONS] [--] <input...>
  mnemon [OPTIONS] --input <text>

Options:
  -i, --input <text>         Input text to parse. If omitted, reads remaining args
                             or stdin when no args are provided.
  --reference <timestamp>    Reference time in YYYY-MM-DDTHH:MM:SS.
                             Default: {default_reference}
  --lang <code>              Force the language (ru or en) instead of detecting it.
  --json                     Print the parse result as JSON.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_reference = DEFAULT_REFERENCE
    )
}
