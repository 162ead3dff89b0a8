//! `swap [COMMIT]` -- swap HEAD with its parent, or push it down/up the
//! stack with `--keep-going`/`--up`.

use clap::Parser;

use gitq::engine::{Driver, EXIT_USER_ERROR, ResumeKind};
use gitq::ops::edit_branch;
use gitq::swap::{run_swap, run_swap_up};
use gitq::term;
use gitq::vcs::Repo;

const TOOL: &str = "swap";

#[derive(Parser)]
#[command(name = "swap", about = "swap the order of commits")]
struct Args {
    /// Commit to swap with its parent (defaults to HEAD)
    commit: Option<String>,

    /// If conflicts arise, suspend so the user can resolve them
    #[arg(short, long)]
    edit: bool,

    /// Push COMMIT as far down the stack as it will go
    #[arg(short = 'k', long = "keep-going")]
    keep_going: bool,

    /// Push COMMIT as far up the stack as it will go
    #[arg(long)]
    up: bool,

    /// Resume after conflicts have been resolved
    #[arg(short = 'c', long = "continue")]
    resume: bool,

    /// Give up and restore git to the original state
    #[arg(long)]
    abort: bool,

    /// Abandon the latest swap operation, and continue
    #[arg(long)]
    stop: bool,

    /// Squash instead of completing this swap
    #[arg(long)]
    squash: bool,

    /// Fixup instead of completing this swap
    #[arg(long)]
    fixup: bool,

    /// Print status
    #[arg(long)]
    status: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let modes = [args.resume, args.abort, args.stop, args.squash, args.fixup];
    if modes.iter().filter(|m| **m).count() > 1 {
        term::die("use only one of --continue, --abort, --stop, --squash, or --fixup", EXIT_USER_ERROR);
    }

    let repo = match Repo::discover() {
        Ok(repo) => repo,
        Err(e) => term::die(&e.to_string(), EXIT_USER_ERROR),
    };

    let driver = Driver::new(&repo, TOOL).with_suspend_message(
        "Suspended! resolve the conflict, then resume with `swap --continue`",
    );

    let code = if args.status {
        driver.status()
    } else if args.resume || args.abort || args.stop || args.squash || args.fixup {
        let injected = if args.abort {
            Some(ResumeKind::Abort)
        } else if args.stop {
            Some(ResumeKind::Stop)
        } else if args.squash {
            Some(ResumeKind::Squash)
        } else if args.fixup {
            Some(ResumeKind::Fixup)
        } else {
            None
        };
        driver.run_resume(injected)
    } else {
        driver.run_main(|repo| {
            edit_branch::enter(repo, TOOL, |repo, _head| {
                let baselines = repo.baselines(current_branch(repo).as_deref())?;
                if args.up {
                    let target = args.commit.as_deref().unwrap_or("HEAD");
                    run_swap_up(repo, args.edit, target)
                } else {
                    gitq::swap::collect_cherries(repo, args.commit.as_deref(), args.edit, move |repo| {
                        run_swap(repo, args.edit, args.keep_going, baselines)
                    })
                }
            })
        })
    };

    std::process::exit(code);
}

fn current_branch(repo: &Repo) -> Option<String> {
    repo.head()
        .ok()
        .and_then(|h| h.strip_prefix("refs/heads/").map(str::to_string))
}
