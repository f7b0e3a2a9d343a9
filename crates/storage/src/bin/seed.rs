use std::fmt;
use std::path::PathBuf;

use storage::repository::{Storage, StudentRepository as _};
use toybox_core::model::StudentRecord;

const SAMPLE_STUDENTS: &[(&str, &str, [u32; 4])] = &[
    ("1345", "John Curry", [8, 15, 7, 45]),
    ("2345", "Sam Sturtivant", [14, 15, 14, 77]),
    ("9876", "Lee Scott", [17, 11, 16, 99]),
    ("3724", "Matt Thompson", [19, 11, 15, 81]),
    ("1212", "Ron Herrema", [14, 17, 18, 66]),
    ("8439", "Jake Hobbs", [10, 11, 10, 43]),
    ("2344", "Jo Hyde", [6, 15, 10, 55]),
    ("9384", "Gareth Southgate", [5, 6, 8, 33]),
    ("8327", "Alan Shearer", [20, 20, 20, 100]),
    ("2983", "Les Ferdinand", [15, 17, 18, 92]),
];

const SAMPLE_JOKES: &[&str] = &[
    "Why did the chicken cross the road?To get to the other side.",
    "What happens if you boil a clown?You get a laughing stock.",
    "Why did the car get a flat tire?Because there was a fork in the road!",
    "How did the hipster burn his mouth?He ate his pizza before it was cool.",
    "What did the janitor say when he jumped out of the closet?SUPPLIES!!!!",
    "Have you heard about the band 1023MB?It's probably because they haven't got a gig yet…",
    "Why does the golfer wear two pants?Because he's afraid he might get a \"Hole-in-one.\"",
    "Why should you wear glasses to maths class?Because it helps with division.",
    "Why does it take pirates so long to learn the alphabet?Because they could spend years at C.",
    "Why did the woman go on the date with the mushroom?Because he was a fun-ghi.",
];

#[derive(Debug, Clone)]
struct Args {
    students_file: PathBuf,
    jokes_file: PathBuf,
    force: bool,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyPath { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyPath { flag } => write!(f, "{flag} must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_path(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<PathBuf, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyPath { flag });
    }
    Ok(PathBuf::from(value))
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut students_file = std::env::var("TOYBOX_STUDENTS_FILE")
            .map_or_else(|_| PathBuf::from("studentMarks.txt"), PathBuf::from);
        let mut jokes_file = std::env::var("TOYBOX_JOKES_FILE")
            .map_or_else(|_| PathBuf::from("randomJokes.txt"), PathBuf::from);
        let mut force = false;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--students" => students_file = require_path(&mut args, "--students")?,
                "--jokes" => jokes_file = require_path(&mut args, "--jokes")?,
                "--force" => force = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            students_file,
            jokes_file,
            force,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --students <path>   Student marks file (default: studentMarks.txt)");
    eprintln!("  --jokes <path>      Jokes file (default: randomJokes.txt)");
    eprintln!("  --force             Overwrite files that already exist");
    eprintln!("  -h, --help          Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  TOYBOX_STUDENTS_FILE, TOYBOX_JOKES_FILE");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::flat_file(&args.students_file, &args.jokes_file);

    if args.force || !tokio::fs::try_exists(&args.students_file).await? {
        let students = SAMPLE_STUDENTS
            .iter()
            .map(|(code, name, marks)| StudentRecord::new(*code, *name, marks.to_vec()))
            .collect::<Result<Vec<_>, _>>()?;
        storage.students.save_students(&students).await?;
        println!(
            "Wrote {} students to {}",
            students.len(),
            args.students_file.display()
        );
    } else {
        println!("Kept existing {}", args.students_file.display());
    }

    if args.force || !tokio::fs::try_exists(&args.jokes_file).await? {
        let mut text = SAMPLE_JOKES.join("\n");
        text.push('\n');
        tokio::fs::write(&args.jokes_file, text).await?;
        println!(
            "Wrote {} jokes to {}",
            SAMPLE_JOKES.len(),
            args.jokes_file.display()
        );
    } else {
        println!("Kept existing {}", args.jokes_file.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
