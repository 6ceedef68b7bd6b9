use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use phylo_matrix::config::MatrixConfig;
use phylo_matrix_cli::commands::{run_invert, run_multiply, run_print, run_transpose};
use phylo_matrix_cli::config::{apply_overrides, load_matrix_config};

fn shape_arg(name: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(long)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(usize))
}

fn input_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("PHYLOMAT_LOG", "error,phylomat=info,phylo_matrix_cli=info"))
        .init();

    let matches = Command::new("phylomat")
        .version(clap::crate_version!())
        .about("Dense matrix tools for phylogenetic rate matrices")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a JSON configuration file (print format, read policy, backend)")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .global(true)
                .help("Factorization backend used for inversion. Overrides the configuration file.")
                .value_parser(["native", "lapack"]),
        )
        .arg(
            Arg::new("lenient")
                .long("lenient")
                .global(true)
                .help("Accept short or malformed input, leaving unread cells at zero.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output_file")
                .short('o')
                .long("output")
                .global(true)
                .help("Path to write the resulting matrix. Defaults to stdout.")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("invert")
                .about("Invert a square matrix via LU factorization")
                .arg(input_arg("input", "Matrix text file"))
                .arg(shape_arg("rows", "rows", "Order of the square matrix")),
        )
        .subcommand(
            Command::new("multiply")
                .about("Multiply two matrices")
                .arg(input_arg("a", "Left matrix text file"))
                .arg(input_arg("b", "Right matrix text file"))
                .arg(shape_arg("rows", "rows", "Rows of the left matrix"))
                .arg(shape_arg("cols", "cols", "Columns of the left matrix (rows of the right matrix)"))
                .arg(shape_arg("b_cols", "b-cols", "Columns of the right matrix")),
        )
        .subcommand(
            Command::new("transpose")
                .about("Transpose a matrix")
                .arg(input_arg("input", "Matrix text file"))
                .arg(shape_arg("rows", "rows", "Number of rows"))
                .arg(shape_arg("cols", "cols", "Number of columns")),
        )
        .subcommand(
            Command::new("print")
                .about("Re-print a matrix in the canonical text layout")
                .arg(input_arg("input", "Matrix text file"))
                .arg(shape_arg("rows", "rows", "Number of rows"))
                .arg(shape_arg("cols", "cols", "Number of columns")),
        )
        .get_matches();

    let Some((name, sub_m)) = matches.subcommand() else {
        unreachable!("Subcommand is required by CLI configuration")
    };

    let config = resolve_config(sub_m)?;
    let output = sub_m.get_one::<PathBuf>("output_file").map(PathBuf::as_path);

    let result = match name {
        "invert" => run_invert(input(sub_m, "input"), count(sub_m, "rows"), output, &config),
        "multiply" => run_multiply(
            input(sub_m, "a"),
            input(sub_m, "b"),
            count(sub_m, "rows"),
            count(sub_m, "cols"),
            count(sub_m, "b_cols"),
            output,
            &config,
        ),
        "transpose" => run_transpose(
            input(sub_m, "input"),
            count(sub_m, "rows"),
            count(sub_m, "cols"),
            output,
            &config,
        ),
        "print" => run_print(
            input(sub_m, "input"),
            count(sub_m, "rows"),
            count(sub_m, "cols"),
            output,
            &config,
        ),
        _ => unreachable!(),
    };

    if let Err(e) = result {
        log::error!("{} failed: {:#}", name, e);
        std::process::exit(1);
    }
    Ok(())
}

fn resolve_config(matches: &ArgMatches) -> Result<MatrixConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => {
            log::info!("[phylomat] Using config: {:?}", path);
            load_matrix_config(path)?
        }
        None => {
            let config = MatrixConfig::default();
            log::debug!(
                "[phylomat] No config provided; using defaults:\n{}",
                serde_json::to_string_pretty(&config).unwrap_or_default()
            );
            config
        }
    };
    apply_overrides(
        &mut config,
        matches.get_one::<String>("backend").map(String::as_str),
        matches.get_flag("lenient"),
    )?;
    Ok(config)
}

fn input<'a>(matches: &'a ArgMatches, name: &str) -> &'a std::path::Path {
    matches
        .get_one::<PathBuf>(name)
        .map(PathBuf::as_path)
        .expect("required by CLI configuration")
}

fn count(matches: &ArgMatches, name: &str) -> usize {
    *matches
        .get_one::<usize>(name)
        .expect("required by CLI configuration")
}
