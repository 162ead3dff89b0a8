//! `edit [COMMIT] [--continue]` -- check out a commit for amending, then
//! restore everything that was above it once the user finishes.

use clap::Parser;

use gitq::engine::{Driver, EXIT_USER_ERROR, Flow, Suspend};
use gitq::ops::edit_branch;
use gitq::swap::edit_commit;
use gitq::term;
use gitq::vcs::Repo;

const TOOL: &str = "edit";

#[derive(Parser)]
#[command(name = "edit", about = "edit a commit")]
struct Args {
    commit: Option<String>,

    /// Resume after edits have been made
    #[arg(short = 'c', long = "continue")]
    resume: bool,

    /// Print status
    #[arg(long)]
    status: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let repo = match Repo::discover() {
        Ok(repo) => repo,
        Err(e) => term::die(&e.to_string(), EXIT_USER_ERROR),
    };

    let driver = Driver::new(&repo, TOOL)
        .with_suspend_message("Suspended! edit HEAD, then resume with `edit --continue`");

    let code = if args.status {
        driver.status()
    } else if args.resume {
        driver.run_resume(None)
    } else {
        let Some(commit_ref) = args.commit else {
            term::die("usage: edit COMMIT", EXIT_USER_ERROR);
        };
        driver.run_main(|repo| {
            let commit = repo.commit(&commit_ref)?;
            edit_branch::enter(repo, TOOL, |repo, _head| {
                edit_commit(repo, Some(&commit.sha), true, |_repo| {
                    Err(Flow::Suspend(Suspend::new(None)))
                })
            })
        })
    };

    std::process::exit(code);
}
