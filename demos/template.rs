//! An example to expand a URI template with variables from the CLI arguments.

use urikit::template::{Context, UriTemplate, Value};

const USAGE: &str = "\
USAGE:
    template [FLAGS] [--] TEMPLATE [NAME=VALUE]...

FLAGS:
    -h, --help      Prints this help
    -s, --strict    Fails on undefined variables

ARGS:
    <TEMPLATE>      URI template (RFC 6570)
    <NAME=VALUE>    Variable. Values with `,` become lists, and a list of
                    `key:value` items becomes an associative array
";

fn print_help() {
    eprintln!("{}", USAGE);
}

fn die(msg: impl std::fmt::Display) -> ! {
    eprintln!("ERROR: {}", msg);
    eprintln!();
    print_help();
    std::process::exit(1);
}

/// Parses a variable value from the command line.
fn parse_value(raw: &str) -> Value {
    if !raw.contains(',') {
        return Value::from(raw);
    }
    let items: Vec<&str> = raw.split(',').collect();
    let pairs: Option<Vec<(&str, &str)>> = items.iter().map(|item| item.split_once(':')).collect();
    match pairs {
        Some(pairs) => Value::from(pairs),
        None => Value::from(items),
    }
}

fn main() {
    let mut args = std::env::args().skip(1).peekable();
    let mut strict = false;
    while let Some(arg) = args.peek() {
        match arg.as_str() {
            "--strict" | "-s" => strict = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(1);
            }
            "--" => {
                args.next();
                break;
            }
            opt if opt.starts_with('-') => die(format_args!("Unknown option: {}", opt)),
            _ => break,
        }
        args.next();
    }

    let source = args.next().unwrap_or_else(|| die("TEMPLATE should be specified"));
    let template = match UriTemplate::new(&source) {
        Ok(v) => v,
        Err(e) => die(format_args!("Failed to parse {:?}: {}", source, e)),
    };

    let mut context = Context::new();
    for arg in args {
        let (name, value) = arg
            .split_once('=')
            .unwrap_or_else(|| die(format_args!("Variable should be NAME=VALUE: {:?}", arg)));
        context.insert(name, parse_value(value));
    }

    let expanded = if strict {
        template.expand_strict(&context)
    } else {
        template.expand(&context)
    };
    match expanded {
        Ok(v) => println!("{}", v),
        Err(e) => die(format_args!("Failed to expand {:?}: {}", source, e)),
    }
}
