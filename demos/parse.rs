//! An example to parse a URI from the CLI argument.

use urikit::{Config, Uri};

const USAGE: &str = "\
USAGE:
    parse [FLAGS] [--] URI

FLAGS:
    -h, --help          Prints this help
    -n, --normalize     Prints the normalized form too
    -b, --base <BASE>   Resolves the input against the base

ARGS:
    <URI>               URI or URN
";

fn print_help() {
    eprintln!("{}", USAGE);
}

fn help_and_exit() -> ! {
    print_help();
    std::process::exit(1);
}

fn die(msg: impl std::fmt::Display) -> ! {
    eprintln!("ERROR: {}", msg);
    eprintln!();
    print_help();
    std::process::exit(1);
}

/// CLI options.
#[derive(Default, Debug, Clone)]
struct CliOpt {
    /// Input.
    uri: String,
    /// Base to resolve against.
    base: Option<String>,
    /// Whether to print the normalized form.
    normalize: bool,
}

impl CliOpt {
    fn parse() -> Self {
        let mut args = std::env::args();
        // Skip `argv[0]`.
        args.next();

        let mut uri = None;
        let mut base = None;
        let mut normalize = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--normalize" | "-n" => normalize = true,
                "--base" | "-b" => {
                    base = Some(args.next().unwrap_or_else(|| die("BASE should be specified")))
                }
                "--help" | "-h" => help_and_exit(),
                "--" => break,
                opt if opt.starts_with('-') => die(format_args!("Unknown option: {}", opt)),
                _ => {
                    if uri.replace(arg).is_some() {
                        die("URI can be specified at most once");
                    }
                }
            }
        }

        for arg in args {
            if uri.replace(arg).is_some() {
                die("URI can be specified at most once");
            }
        }

        let uri = uri.unwrap_or_else(|| die("URI should be specified"));
        Self {
            uri,
            base,
            normalize,
        }
    }
}

fn main() {
    let opt = CliOpt::parse();
    let uri = Uri::parse_with(&opt.uri, Config::default());
    let parts = uri.parts();

    println!("serialized: {}", uri);
    println!("urn:        {}", uri.is_urn());
    println!("scheme:     {:?}", parts.scheme);
    println!("username:   {:?}", parts.username);
    println!("password:   {:?}", parts.password);
    println!("hostname:   {:?}", parts.hostname);
    println!("port:       {:?}", parts.port);
    println!("path:       {:?}", parts.path);
    println!("segments:   {:?}", uri.segments());
    println!("query:      {:?}", parts.query);
    for (name, value) in &uri.query_map() {
        println!("    {name:?} = {value:?}");
    }
    println!("fragment:   {:?}", parts.fragment);
    println!("readable:   {}", uri.readable());

    if opt.normalize {
        println!("normalized: {}", uri.normalized());
    }
    if let Some(base) = &opt.base {
        match uri.absolute_to(&Uri::parse(base)) {
            Ok(resolved) => println!("resolved:   {}", resolved),
            Err(e) => die(format_args!("Failed to resolve against {:?}: {}", base, e)),
        }
    }
}
