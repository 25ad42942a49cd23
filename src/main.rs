use clap::Parser;
use jsse_core::{Completion, Config, Interpreter, JsError, JsValue};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsse-core",
    version,
    about = "Convert numbers the way ECMAScript's Number builtins do"
)]
struct Cli {
    /// Value passed through Number(VALUE); starts a REPL when omitted
    #[arg(allow_hyphen_values = true)]
    value: Option<String>,

    /// Same as VALUE
    #[arg(short = 'e', long = "eval", allow_hyphen_values = true)]
    eval: Option<String>,

    /// Number.prototype.toString(R)
    #[arg(long, allow_hyphen_values = true)]
    radix: Option<f64>,

    /// Number.prototype.toFixed(D)
    #[arg(long, allow_hyphen_values = true)]
    fixed: Option<f64>,

    /// Number.prototype.toExponential(D)
    #[arg(long, allow_hyphen_values = true)]
    exponential: Option<f64>,

    /// Number.prototype.toPrecision(P)
    #[arg(long, allow_hyphen_values = true)]
    precision: Option<f64>,

    /// Number.prototype.toLocaleString()
    #[arg(long)]
    locale: bool,

    /// Resolve references in strict mode
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn conversion(&self) -> (&'static str, Vec<JsValue>) {
        if let Some(d) = self.fixed {
            ("toFixed", vec![JsValue::Number(d)])
        } else if let Some(d) = self.exponential {
            ("toExponential", vec![JsValue::Number(d)])
        } else if let Some(p) = self.precision {
            ("toPrecision", vec![JsValue::Number(p)])
        } else if let Some(r) = self.radix {
            ("toString", vec![JsValue::Number(r)])
        } else if self.locale {
            ("toLocaleString", vec![])
        } else {
            ("toString", vec![])
        }
    }
}

/// `Number(text)[method](...args)`, rendered for the console.
fn convert(
    interp: &mut Interpreter,
    text: &str,
    method: &str,
    args: &[JsValue],
) -> Result<String, JsError> {
    let result = interp.run(|interp| {
        let number_ref = interp.resolve_global("Number");
        let ctor = match interp.get_value(&number_ref) {
            Ok(v) => v,
            Err(e) => return Completion::Throw(e),
        };
        let n = match interp
            .call_function(&ctor, &JsValue::Undefined, &[JsValue::string(text)])
            .into_result()
        {
            Ok(v) => v,
            Err(e) => return Completion::Throw(e),
        };
        interp.call_method(&n, method, args)
    })?;
    Ok(interp.format_value(&result))
}

fn report(outcome: Result<String, JsError>) -> ExitCode {
    match outcome {
        Ok(s) => {
            println!("{s}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
    }
}

/// Parses `VALUE [method [arg]]`.
fn parse_line(line: &str) -> (&str, &str, Vec<JsValue>) {
    let mut parts = line.split_whitespace();
    let value = parts.next().unwrap_or_default();
    let method = parts.next().unwrap_or("toString");
    let args = parts
        .next()
        .map(|a| match a.parse::<f64>() {
            Ok(n) => JsValue::Number(n),
            Err(_) => JsValue::string(a),
        })
        .into_iter()
        .collect();
    (value, method, args)
}

fn run_repl(interp: &mut Interpreter) -> ExitCode {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("jsse-core v{}", env!("CARGO_PKG_VERSION"));
    println!("Enter VALUE [method [arg]], e.g. `12.5 toFixed 1`. Press Ctrl-D to exit.");

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let (value, method, args) = parse_line(trimmed);
                match convert(interp, value, method, &args) {
                    Ok(s) => println!("{s}"),
                    Err(e) => eprintln!("{e}"),
                }
            }
            Err(e) => {
                eprintln!("Read error: {e}");
                return ExitCode::from(1);
            }
        }
    }

    println!();
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut interp = Interpreter::with_config(Config { strict: cli.strict });

    if let Some(text) = cli.eval.as_deref().or(cli.value.as_deref()) {
        let (method, args) = cli.conversion();
        return report(convert(&mut interp, text, method, &args));
    }

    run_repl(&mut interp)
}
