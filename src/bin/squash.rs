//! `squash <COMMIT> [--fixup]` -- squash (or fixup) a commit into its
//! parent, reusing the swap engine's `OrSquash` completion directly.

use clap::Parser;

use gitq::engine::{Driver, EXIT_USER_ERROR, Flow, ResumeKind};
use gitq::ops::edit_branch;
use gitq::swap::{edit_commit, single_swap};
use gitq::swap::or_squash;
use gitq::term;
use gitq::vcs::Repo;

const TOOL: &str = "squash";

#[derive(Parser)]
#[command(name = "squash", about = "squash a commit into its parent")]
struct Args {
    commit: String,

    #[arg(short, long)]
    fixup: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let repo = match Repo::discover() {
        Ok(repo) => repo,
        Err(e) => term::die(&e.to_string(), EXIT_USER_ERROR),
    };

    let driver = Driver::new(&repo, TOOL);

    let code = driver.run_main(|repo| {
        let commit = repo.commit(&args.commit)?;
        edit_branch::enter(repo, TOOL, |repo, _head| {
            edit_commit(repo, Some(&commit.sha), false, |repo| {
                single_swap(or_squash::enter(repo, commit.sha.clone(), |_repo| {
                    if args.fixup {
                        Err(Flow::Resume(ResumeKind::Fixup))
                    } else {
                        Err(Flow::Resume(ResumeKind::Squash))
                    }
                }))
            })
        })
    });

    std::process::exit(code);
}
