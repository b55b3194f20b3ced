use clap::{Parser, Subcommand};
use cpp2java::{CompileError, CompileResult, GenerateOptions, MemberOrder, Pipeline, Rules, RulesConfig, write_unit};
use std::collections::HashMap;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "cpp2java")]
#[command(about = "cpp2java - Java skeletons from Doxygen XML")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Java sources from Doxygen XML files
    Generate {
        /// XML files or directories containing them
        #[arg(required_unless_present = "stdin")]
        inputs: Vec<PathBuf>,

        /// Namespace prefix stripped from class names (e.g. QuantLib)
        #[arg(short, long)]
        namespace: String,

        /// Output directory
        #[arg(short = 'O', long, default_value = ".")]
        output: PathBuf,

        /// List each input file as it is processed
        #[arg(short, long)]
        verbose: bool,

        /// JSON file overriding rule tables
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Emit method groups before field groups
        #[arg(long)]
        methods_first: bool,

        /// Extension of generated files
        #[arg(long, default_value = "java")]
        extension: String,

        /// Read one document from stdin and print the result
        #[arg(long)]
        stdin: bool,

        /// With --stdin, print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective rule tables as JSON
    Rules {
        /// JSON file overriding rule tables
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            inputs,
            namespace,
            output,
            verbose,
            rules,
            methods_first,
            extension,
            stdin,
            json,
        } => {
            init_logging(verbose);
            let pipeline = Pipeline::with_rules(load_rules(rules.as_deref()));
            let options = GenerateOptions {
                namespace,
                member_order: if methods_first {
                    MemberOrder::MethodsFirst
                } else {
                    MemberOrder::FieldsFirst
                },
                extension,
            };

            let ok = if stdin {
                generate_stdin(&pipeline, &options, json)
            } else {
                generate_paths(&pipeline, &options, &inputs, &output)
            };
            if !ok {
                process::exit(1);
            }
        }
        Commands::Rules { rules } => {
            init_logging(false);
            let rules = load_rules(rules.as_deref());
            match serde_json::to_string_pretty(&RulesConfig::from_rules(&rules)) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn load_rules(path: Option<&Path>) -> Arc<Rules> {
    let Some(path) = path else {
        return Rules::standard();
    };
    match RulesConfig::load(path).and_then(|config| config.into_rules(&Rules::standard())) {
        Ok(rules) => Arc::new(rules),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn generate_stdin(pipeline: &Pipeline, options: &GenerateOptions, json_output: bool) -> bool {
    let mut source = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut source) {
        eprintln!("Error: failed to read stdin: {}", e);
        return false;
    }

    let result = match pipeline.compile(&source, options) {
        Ok(result) => result,
        Err(e) => {
            eprint!("{}", e.render(&source, "<stdin>"));
            return false;
        }
    };

    if json_output {
        let errors: Vec<String> = result.errors.iter().map(ToString::to_string).collect();
        let json = serde_json::json!({
            "classes": result.classes,
            "errors": errors,
        });
        match serde_json::to_string(&json) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return false;
            }
        }
    } else {
        print!("{}", result.listing());
        report_errors(&result, &source, "<stdin>");
    }

    result.errors.is_empty()
}

fn generate_paths(pipeline: &Pipeline, options: &GenerateOptions, inputs: &[PathBuf], output: &Path) -> bool {
    let start = Instant::now();

    let files = match collect_inputs(inputs) {
        Ok(files) => files,
        Err(message) => {
            eprintln!("Error: {}", message);
            return false;
        }
    };
    if files.is_empty() {
        eprintln!("No .xml files found");
        return false;
    }

    if let Err(e) = fs::create_dir_all(output) {
        eprintln!("Error: cannot create {}: {}", output.display(), e);
        return false;
    }

    let mut generated = 0;
    let mut ok = true;
    let mut written: HashMap<PathBuf, String> = HashMap::new();
    for path in &files {
        log::info!("{}", path.display());
        let (count, file_ok) = generate_file(pipeline, options, path, output, &mut written);
        generated += count;
        ok &= file_ok;
    }

    print_summary(generated, start.elapsed());
    ok
}

/// Files given directly, plus `.xml` files found under directories, sorted
/// by name within each directory
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
        } else if input.is_dir() {
            files.extend(
                WalkDir::new(input)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .filter(|e| e.path().extension().is_some_and(|ext| ext == "xml"))
                    .map(|e| e.into_path()),
            );
        } else {
            return Err(format!("{} does not exist", input.display()));
        }
    }
    Ok(files)
}

/// Returns the number of written classes and whether the file had no errors.
/// `written` maps every output file of this run to the input it came from.
fn generate_file(
    pipeline: &Pipeline,
    options: &GenerateOptions,
    path: &Path,
    output: &Path,
    written: &mut HashMap<PathBuf, String>,
) -> (usize, bool) {
    let filename = path.display().to_string();
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", filename, e);
            return (0, false);
        }
    };

    let result = match pipeline.compile(&source, options) {
        Ok(result) => result,
        Err(e) => {
            eprint!("{}", e.render(&source, &filename));
            return (0, false);
        }
    };

    let mut count = 0;
    let mut ok = true;
    for class in &result.classes {
        if let Some(first) = written.get(&output.join(&class.file_name)) {
            let err = CompileError::Duplicate {
                class: class.name.clone(),
                file_name: class.file_name.clone(),
                first: first.clone(),
            };
            eprint!("{}", err.render(&source, &filename));
            ok = false;
            continue;
        }
        match write_unit(output, class) {
            Ok(written_path) => {
                print_generated(&written_path.display().to_string());
                written.insert(written_path, filename.clone());
                count += 1;
            }
            Err(e) => {
                eprint!("{}", e.render(&source, &filename));
                ok = false;
            }
        }
    }

    report_errors(&result, &source, &filename);
    (count, ok && result.errors.is_empty())
}

fn report_errors(result: &CompileResult, source: &str, filename: &str) {
    for error in &result.errors {
        eprint!("{}", error.render(source, filename));
    }
}

fn print_generated(path: &str) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("  \x1b[32m✓\x1b[0m {}", path);
    } else {
        eprintln!("  ✓ {}", path);
    }
}

fn print_summary(count: usize, elapsed: std::time::Duration) {
    let is_tty = io::stderr().is_terminal();
    let time_str = format_duration(elapsed);
    let files_word = if count == 1 { "file" } else { "files" };

    if is_tty {
        eprintln!("\n\x1b[1m✨ Generated {} {} in {}\x1b[0m", count, files_word, time_str);
    } else {
        eprintln!("\n✨ Generated {} {} in {}", count, files_word, time_str);
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}μs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
