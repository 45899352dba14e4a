use anyhow::Result;
use colored::Colorize;
use svcs_core::Repository;

pub fn run(repo: &Repository, words: Vec<String>) -> Result<()> {
    let message = words.join(" ");

    if let Some(commit) = super::report(repo.commit(&message))? {
        println!("{}", "Changes are committed.".green().bold());
        println!("  {}: {}", "Commit ID".bold(), commit.id);
        println!("  {}: {}", "Author".bold(), commit.author);
    }

    Ok(())
}
