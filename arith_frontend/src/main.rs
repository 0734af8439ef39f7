use arith_frontend::config::runtime::RuntimeConfig;
use arith_frontend::logging;
use arith_frontend::pipeline::{self, Pipeline, PipelineError, PipelineOutput, PipelineResult};
use arith_frontend::utils::SourceMap;
use std::env;
use std::path::PathBuf;

#[derive(Debug)]
enum Input {
    File(PathBuf),
    Expression(String),
}

#[derive(Debug)]
struct CliOptions {
    input: Input,
    json: bool,
    tokens: bool,
    debug: bool,
    config_path: Option<PathBuf>,
}

#[derive(Debug)]
enum Command {
    Run(CliOptions),
    Help,
    Version,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program_name = args
        .first()
        .map(String::as_str)
        .unwrap_or("arith_frontend");

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_help(program_name);
            return;
        }
        Ok(Command::Version) => {
            println!("arith_frontend {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Usage: {} [OPTIONS] <FILE>", program_name);
            eprintln!("       {} [OPTIONS] --expr <EXPRESSION>", program_name);
            eprintln!("       {} --help", program_name);
            std::process::exit(1);
        }
    };

    if let Err(error) = run(&options) {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut input = None;
    let mut json = false;
    let mut tokens = false;
    let mut debug = false;
    let mut config_path = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--json" => json = true,
            "--tokens" => tokens = true,
            "--debug" => debug = true,
            "--config" => {
                i += 1;
                let path = args.get(i).ok_or("--config requires a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--expr" | "-e" => {
                i += 1;
                let text = args.get(i).ok_or("--expr requires an expression")?;
                if input.is_some() {
                    return Err("only one input may be given".to_string());
                }
                input = Some(Input::Expression(text.clone()));
            }
            option if option.starts_with('-') && option.len() > 1 => {
                return Err(format!("unknown option '{}'", option));
            }
            path => {
                if input.is_some() {
                    return Err("only one input may be given".to_string());
                }
                input = Some(Input::File(PathBuf::from(path)));
            }
        }
        i += 1;
    }

    let input = input.ok_or("no input file or --expr given")?;
    Ok(Command::Run(CliOptions {
        input,
        json,
        tokens,
        debug,
        config_path,
    }))
}

fn run(options: &CliOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &options.config_path {
        Some(path) => RuntimeConfig::from_toml_file(path)?,
        None => RuntimeConfig::default(),
    };

    let logging_preferences = if options.debug {
        logging::config::get_development_preferences()
    } else {
        config.logging.clone()
    };
    logging::init_global_logging_with_preferences(logging_preferences)?;
    pipeline::validate_pipeline()?;

    let expression_pipeline = Pipeline::from_config(&config)?.with_debug(options.debug);

    let (source, outcome) = match &options.input {
        Input::Expression(text) => (
            text.clone(),
            expression_pipeline.process_source(text, pipeline::INLINE_SOURCE_LABEL),
        ),
        Input::File(path) => {
            let file_result = expression_pipeline.read_file(path)?;
            let source = file_result.source.clone();
            let outcome = logging::with_file_context(path.clone(), 0, || {
                expression_pipeline.process_file_result(file_result)
            });
            (source, outcome)
        }
    };

    match outcome {
        Ok(result) => print_result(&result, options),
        Err(error) => {
            eprint!("{}", render_error(&error, &source));
            std::process::exit(1);
        }
    }
}

fn print_result(
    result: &PipelineResult,
    options: &CliOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if options.tokens {
        for token in result.tokens.iter_significant() {
            println!(
                "{:<12} {:<10} {}",
                token.value.kind.as_str(),
                format!("{:?}", token.value.lexeme),
                token.span
            );
        }
    }

    if options.json {
        println!("{}", PipelineOutput::from_result(result).to_json_pretty()?);
    } else {
        println!("{}", result.expression);
        println!("= {}", result.value);
    }

    Ok(())
}

fn render_error(error: &PipelineError, source: &str) -> String {
    match error.span() {
        Some(span) => SourceMap::new(source.to_string()).format_error(&span, &error.to_string()),
        None => format!("error: {}\n", error),
    }
}

fn print_help(program_name: &str) {
    println!("arith_frontend v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenize, parse and evaluate arithmetic expressions");
    println!();
    println!("USAGE:");
    println!("    {} [OPTIONS] <FILE>", program_name);
    println!("    {} [OPTIONS] --expr <EXPRESSION>", program_name);
    println!();
    println!("OPTIONS:");
    println!("    -e, --expr <TEXT>    Process TEXT instead of a file");
    println!("        --json           Print the result as a JSON report");
    println!("        --tokens         Print significant tokens with their spans");
    println!("        --debug          Trace tokens and grammar productions");
    println!("        --config <FILE>  Load runtime preferences from a TOML file");
    println!("    -h, --help           Show this help message");
    println!("    -V, --version        Show version");
    println!();
    println!("GRAMMAR:");
    println!("    T   -> F ('+' | '-') T | F");
    println!("    F   -> Lit ('*' | '/') F | Lit");
    println!("    Lit -> NUMBER | '(' T ')'");
    println!("    Operators group to the right: 1-2-3 is 1-(2-3).");
    println!();
    println!("EXAMPLES:");
    println!("    {} --expr \"(1 + 2) * 3\"", program_name);
    println!("    {} --json input.arith", program_name);
    println!();
    println!("BUILD CONFIGURATION:");
    println!("    {}", arith_frontend::config::build_info::source_info());
}
