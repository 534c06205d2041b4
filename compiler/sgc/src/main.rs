//! sgc: derived-method source generator.

use sgc::commands::{dialect_support, explain, generate, parse_generate_args};

fn main() {
    sgc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "generate" => {
            if args.len() < 3 {
                eprintln!("Usage: sgc generate <manifest.json> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --dialect=<name>    Target dialect: java, kotlin, groovy (default: java)");
                eprintln!("  --suffix=<text>     Generated class name suffix (default: Object)");
                eprintln!("  -o <dir>            Output directory (default: generated)");
                eprintln!("  --color=<when>      Diagnostics color: always, never");
                std::process::exit(1);
            }
            let options = match parse_generate_args(&args[2..]) {
                Ok(options) => options,
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            };
            match generate(&options) {
                Ok(summary) => {
                    println!(
                        "generated {} file(s), skipped {} type(s)",
                        summary.generated, summary.skipped
                    );
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        "dialects" => {
            for (dialect, supported) in dialect_support() {
                let status = if supported { "" } else { " (no generator)" };
                println!("{dialect}{status}");
            }
        }
        "explain" => {
            let Some(code) = args.get(2) else {
                eprintln!("Usage: sgc explain <code>");
                std::process::exit(1);
            };
            if let Some(description) = explain(code) {
                println!("{}: {description}", code.to_ascii_uppercase());
            } else {
                eprintln!("Unknown diagnostic code: {code}");
                eprintln!();
                eprintln!("Codes have the format EXXXX (errors) or WXXXX (warnings).");
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("sgc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("sgc: generate toString, equals and hashCode companions");
    println!();
    println!("Usage: sgc <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate <manifest.json>  Generate sources for the types in a manifest");
    println!("  dialects                  List target dialects");
    println!("  explain <code>            Describe a diagnostic code");
    println!("  help                      Show this message");
    println!("  version                   Show the version");
    println!();
    println!("Set RUST_LOG=sgc=debug for tracing output.");
}
