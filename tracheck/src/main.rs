//! Translate natural-language proofs to Lean and check proof trees.

mod error;
mod opt;
mod process;
mod session;
mod tree;

use clap::Parser;
use error::Error;
use opt::{Command, Opt};
use process::Process;
use rayon::prelude::*;
use session::{State, Theorem};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use traduko::grammar::Sentence;
use traduko::xml;

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn read(path: &Path) -> Result<String, Error> {
    if path == Path::new("-") {
        let mut s = String::new();
        std::io::stdin().read_to_string(&mut s)?;
        Ok(s)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn state(file: &Path, render_only: bool, lean: Option<&str>, timeout: u64) -> Result<(), Error> {
    let theorem: Theorem = serde_json::from_str(&read(file)?)?;
    let manager = theorem.manager()?;
    if render_only {
        print!("{}", manager.render()?.text);
        return Ok(());
    }

    let timeout = Duration::from_secs(timeout);
    let mut lean = lean.and_then(|cmd| Process::new(cmd, timeout)).ok_or(Error::NoLean)?;
    let feedback = manager.ask(&mut lean)?;
    println!("{}", serde_json::to_string_pretty(&State::from(&feedback))?);
    Ok(())
}

/// Return whether the proof in the given file is valid.
fn check(path: &Path) -> Result<bool, Error> {
    let node: tree::Node = serde_json::from_str(&read(path)?)?;
    let proof = node.proof()?;
    let errors = tree::errors(&proof);
    for e in &errors {
        log::warn!("{}: {}", path.display(), e);
    }
    if errors.is_empty() {
        log::info!("{}: valid", path.display());
    }
    Ok(errors.is_empty())
}

fn check_all(files: &[PathBuf], jobs: Option<Option<usize>>) -> Result<(), Error> {
    // if a precise number of parallel jobs has been given
    if let Some(Some(jobs)) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    }

    let valid = |path: &PathBuf| check(path).map(|ok| (!ok).then(|| path.clone()));
    let invalid: Vec<Option<PathBuf>> = if jobs.is_some() {
        files.par_iter().map(valid).collect::<Result<_, _>>()?
    } else {
        files.iter().map(valid).collect::<Result<_, _>>()?
    };
    let invalid: Vec<_> = invalid.into_iter().flatten().collect();
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(Error::Invalid(invalid))
    }
}

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = Opt::parse();
    match opt.command {
        Command::State {
            file,
            render_only,
            lean,
            timeout,
        } => state(&file, render_only, lean.as_deref(), timeout),
        Command::Check { jobs, files } => check_all(&files, jobs),
        Command::Xml { sentence, from_xml } => {
            if from_xml {
                println!("{}", xml::from_xml(&sentence)?);
            } else {
                println!("{}", xml::to_xml(&Sentence::parse(&sentence)?));
            }
            Ok(())
        }
    }
}
