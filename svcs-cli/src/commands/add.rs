use anyhow::Result;
use colored::Colorize;
use svcs_core::Repository;

pub fn run(repo: &Repository, path: Option<String>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => {
            if let Some(paths) = super::report(repo.staged())? {
                println!("{}", "Tracked files:".bold());
                for path in paths {
                    println!("{}", path);
                }
            }
            return Ok(());
        }
    };

    if super::report(repo.stage(&path))?.is_some() {
        println!("{}", format!("The file '{}' is tracked.", path).green());
    }

    Ok(())
}
