use anyhow::Result;
use colored::Colorize;
use svcs_core::Repository;

pub fn run(repo: &Repository, commit_id: Option<String>) -> Result<()> {
    let commit_id = match commit_id {
        Some(id) => id,
        None => {
            println!("{}", "Commit id was not passed.".yellow());
            return Ok(());
        }
    };

    if let Some(restored) = super::report(repo.checkout(&commit_id))? {
        for path in &restored {
            println!("  {} {}", "✓".green(), path.display());
        }
        println!("Switched to commit {}.", commit_id.trim());
    }

    Ok(())
}
