use crate::{Options, complete_to_string, complete_to_string_with_log};
use std::env;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} [OPTIONS] [INPUT]\n\
         \n\
         INPUT: optional input file. When omitted, reads from stdin.\n\
         \n\
         Options:\n\
           -o, --output FILE  Write output to FILE (default stdout)\n\
               --in-place     Overwrite INPUT file\n\
               --marker STR   Placeholder for cut-off values (default ~~)\n\
               --log          Print the completion log to stderr\n\
               --pretty       Pretty-print output (requires parseable result)\n\
               --check        Exit non-zero if the result still fails to parse\n\
           -h, --help         Show this help\n",
        prog = program
    );
}

struct CliMode {
    input: Option<String>,
    output: Option<String>,
    in_place: bool,
    show_log: bool,
    pretty: bool,
    check: bool,
}

fn parse_args() -> (Options, CliMode) {
    let mut args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .cloned()
        .unwrap_or_else(|| "jsoncomplete".to_string());
    args.remove(0);

    let mut opts = Options::default();
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut in_place = false;
    let mut show_log = false;
    let mut pretty = false;
    let mut check = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help(&program);
                std::process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing FILE for --output");
                    std::process::exit(2);
                }
                output = Some(args[i].clone());
            }
            "--in-place" => {
                in_place = true;
            }
            "--marker" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing STR for --marker");
                    std::process::exit(2);
                }
                if args[i].contains('"') || args[i].contains('\\') {
                    eprintln!("Marker must not contain '\"' or '\\'");
                    std::process::exit(2);
                }
                opts.marker = args[i].clone();
            }
            "--log" => {
                opts.logging = true;
                show_log = true;
            }
            "--pretty" => {
                pretty = true;
            }
            "--check" => {
                check = true;
            }
            s if s.starts_with('-') => {
                eprintln!("Unknown option: {}", s);
                std::process::exit(2);
            }
            path => {
                input = Some(path.to_string());
            }
        }
        i += 1;
    }

    let mode = CliMode {
        input,
        output,
        in_place,
        show_log,
        pretty,
        check,
    };
    (opts, mode)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (opts, mode) = parse_args();

    let content = if let Some(ref path) = mode.input {
        fs::read_to_string(path)?
    } else {
        let mut s = String::new();
        io::stdin().read_to_string(&mut s)?;
        s
    };

    let completed = if mode.show_log {
        let (s, log) = complete_to_string_with_log(&content, &opts);
        for entry in &log {
            eprintln!(
                "at {}: {} (near {:?})",
                entry.position, entry.message, entry.context
            );
        }
        s
    } else {
        complete_to_string(&content, &opts)
    };

    let rendered = render(&completed, mode.pretty, mode.check)?;

    if mode.in_place {
        let inp = mode
            .input
            .as_ref()
            .ok_or("--in-place requires INPUT file")?;
        fs::write(inp, rendered)?;
        return Ok(());
    }

    let mut out_writer: Box<dyn Write> = if let Some(ref o) = mode.output {
        Box::new(BufWriter::new(File::create(o)?))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };
    out_writer.write_all(rendered.as_bytes())?;
    out_writer.flush()?;
    Ok(())
}

#[cfg(feature = "serde")]
fn render(completed: &str, pretty: bool, check: bool) -> Result<String, Box<dyn std::error::Error>> {
    if pretty || check {
        let v: serde_json::Value = serde_json::from_str(completed)
            .map_err(|e| format!("output is still not valid JSON: {}", e))?;
        if pretty {
            return Ok(serde_json::to_string_pretty(&v)?);
        }
    }
    Ok(completed.to_string())
}

#[cfg(not(feature = "serde"))]
fn render(completed: &str, pretty: bool, check: bool) -> Result<String, Box<dyn std::error::Error>> {
    if pretty || check {
        return Err("--pretty/--check require the serde feature".into());
    }
    Ok(completed.to_string())
}
