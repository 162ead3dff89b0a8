//! `queue init|tidy|rebase` -- maintain a patch stack's `.git-queue` file
//! and replay its patches on top of freshly refreshed baselines.

use clap::{Parser, Subcommand};

use gitq::engine::{Driver, EXIT_OK, EXIT_USER_ERROR};
use gitq::queue::{Queue, QueueFile};
use gitq::queue::rebase::parse_baseline;
use gitq::term;
use gitq::vcs::Repo;

const TOOL: &str = "queue";

#[derive(Parser)]
#[command(name = "queue", about = "maintain a queue of patches against moving baselines")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Turn the current branch into a queue against one or more baselines
    Init {
        baselines: Vec<String>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Rewrite the queuefile in canonical form
    Tidy,
    /// Refresh baselines and replay the queue's patches on top
    Rebase,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let repo = match Repo::discover() {
        Ok(repo) => repo,
        Err(e) => term::die(&e.to_string(), EXIT_USER_ERROR),
    };

    let code = match args.command {
        None => {
            eprintln!("usage: queue <init|tidy|rebase>");
            EXIT_USER_ERROR
        }
        Some(Command::Init { baselines, title }) => run_init(&repo, baselines, title),
        Some(Command::Tidy) => run_tidy(&repo),
        Some(Command::Rebase) => {
            let driver = Driver::new(&repo, TOOL);
            driver.run_main(|repo| Queue::open(repo)?.rebase())
        }
    };

    std::process::exit(code);
}

fn run_init(repo: &Repo, baselines: Vec<String>, title: Option<String>) -> i32 {
    if baselines.is_empty() {
        eprintln!("usage: queue init <baseline>...");
        return EXIT_USER_ERROR;
    }
    match is_clean_or_die(repo) {
        Some(code) => return code,
        None => {}
    }

    let parsed: Result<Vec<_>, _> = baselines.iter().map(|b| parse_baseline(repo, b)).collect();
    let baselines = match parsed {
        Ok(b) => b,
        Err(e) => {
            eprintln!("{e}");
            return EXIT_USER_ERROR;
        }
    };

    let file = QueueFile { title, description: None, baselines };
    if let Err(e) = write_queuefile(repo, &file) {
        eprintln!("{e}");
        return EXIT_USER_ERROR;
    }

    match Queue::open(repo).and_then(|q| q.init()) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("{e}");
            EXIT_USER_ERROR
        }
    }
}

fn run_tidy(repo: &Repo) -> i32 {
    match Queue::open(repo) {
        Ok(q) => match write_queuefile(repo, &q.file) {
            Ok(()) => EXIT_OK,
            Err(e) => {
                eprintln!("{e}");
                EXIT_USER_ERROR
            }
        },
        Err(e) => {
            eprintln!("{e}");
            EXIT_USER_ERROR
        }
    }
}

fn is_clean_or_die(repo: &Repo) -> Option<i32> {
    match repo.is_clean() {
        Ok(true) => None,
        Ok(false) => {
            eprintln!("Error: repo not clean");
            Some(EXIT_USER_ERROR)
        }
        Err(e) => {
            eprintln!("{e}");
            Some(EXIT_USER_ERROR)
        }
    }
}

fn write_queuefile(repo: &Repo, file: &QueueFile) -> anyhow::Result<()> {
    std::fs::write(repo.queuefile_path(), file.dumps()?)?;
    Ok(())
}
