use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use dice_formula::{Evaluation, Formula};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const QUIT: &str = "q";
const HELP: &str = "h";
const PROMPT: &str = "enter your dice string. q to quit, h for help";

const HELP_TEXT: &str = "\
Usage: NdS [>|< N...] [+|- V...]
NdS         At minimum, a roll must be formatted like 'NdS', where N is the number of dice to roll
            and S is the number of sides on each. EX: 3d6 will roll 3 six-sided dice.

[>|< N...]  Any number of sorted dice rolls may be kept. EX: >3 will keep the highest 3 dice
            and <2 will keep the lowest 2 dice. These may be chained, e.g. 5d6>4<3 will keep the
            highest 4 rolls, and of those rolls, the lowest 3. A selection may not keep more dice
            than the one before it.

[+|- V...]  Adds or subtracts a value V to the final roll. EX: 3d6+2. These can be chained.

The formula MUST start with NdS, followed by selection mods, with scalar mods at the end.
For example: 5d6<4>3+2-1+6 is valid. 5d6<4>3+2-1>6 is not.
";

#[derive(Parser)]
#[command(name = "dice-formula", version)]
#[command(about = "Roll dice formulas like 5d6>4<3+2-1")]
struct Cli {
    /// Formulas to roll once each instead of starting the prompt
    formulas: Vec<String>,

    /// Seed the rng to get the same rolls every run
    #[arg(long)]
    seed: Option<u64>,

    /// Stop the prompt at the first invalid formula
    #[arg(long)]
    exit_on_error: bool,
}

enum Line {
    Quit,
    Help,
    Formula(String),
}

impl Line {
    fn read(line: &str) -> Self {
        let formula: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        match formula.as_str() {
            QUIT => Line::Quit,
            HELP => Line::Help,
            _ => Line::Formula(formula),
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).compact())
        .init();

    let cli = Cli::parse();
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    if !cli.formulas.is_empty() {
        info!(count = cli.formulas.len(), "rolling formulas from arguments");
        let failures = roll_all(&cli.formulas, &mut rng, &mut stdout, &mut stderr)?;
        if failures > 0 {
            stdout.flush()?;
            std::process::exit(1);
        }
        return Ok(());
    }

    prompt(
        io::stdin().lock(),
        &mut stdout,
        &mut stderr,
        &mut rng,
        cli.exit_on_error,
    )
}

/// Rolls every formula, returning how many of them were invalid.
fn roll_all(
    formulas: &[String],
    rng: &mut impl Rng,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<usize> {
    let mut failures = 0;
    for formula in formulas {
        match handle_line(formula, rng, out, err)? {
            Handled::Quit => break,
            Handled::Done => {}
            Handled::Invalid => failures += 1,
        }
    }
    Ok(failures)
}

/// Reads formulas line by line until `q`, the end of the input or, with
/// `exit_on_error`, the first invalid formula.
fn prompt(
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
    rng: &mut impl Rng,
    exit_on_error: bool,
) -> Result<()> {
    writeln!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        match handle_line(&line?, rng, out, err)? {
            Handled::Quit => break,
            Handled::Done => {}
            Handled::Invalid if exit_on_error => {
                debug!("stopping at the first invalid formula");
                break;
            }
            Handled::Invalid => {}
        }

        writeln!(out, "{PROMPT}")?;
        out.flush()?;
    }
    Ok(())
}

/// What happened to a single line of input.
#[derive(Debug, PartialEq, Eq)]
enum Handled {
    Quit,
    /// Help was shown or the formula was rolled.
    Done,
    Invalid,
}

/// Rolls the formula on the line and reports it, or shows help.
fn handle_line(
    line: &str,
    rng: &mut impl Rng,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<Handled> {
    match Line::read(line) {
        Line::Quit => Ok(Handled::Quit),
        Line::Help => {
            write!(out, "{HELP_TEXT}")?;
            Ok(Handled::Done)
        }
        Line::Formula(formula) => match Formula::parse(&formula) {
            Ok(formula) => {
                report(out, &formula.evaluate_with(rng))?;
                Ok(Handled::Done)
            }
            Err(e) => {
                writeln!(err, "Error: {e}")?;
                Ok(Handled::Invalid)
            }
        },
    }
}

fn report(out: &mut impl Write, evaluation: &Evaluation) -> io::Result<()> {
    writeln!(out, "You rolled: {}", evaluation.rolled())?;
    writeln!(out, "After selections: {}", evaluation.selected())?;
    writeln!(out, "Your final roll: {}", evaluation.total())
}
