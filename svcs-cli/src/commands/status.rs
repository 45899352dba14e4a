use anyhow::Result;
use colored::Colorize;
use svcs_core::{FileStatus, Repository};

pub fn run(repo: &Repository) -> Result<()> {
    let statuses = repo.status()?;

    if statuses.is_empty() {
        println!("{}", "Add a file to the index.".yellow());
        return Ok(());
    }

    match repo.last_commit()? {
        Some(id) => println!("{}: {}", "Last commit".bold(), id),
        None => println!("{}", "No commits yet".yellow()),
    }
    println!();

    let mut changed = 0;
    for (path, status) in &statuses {
        let label = match status {
            FileStatus::New => "new".green(),
            FileStatus::Modified => "modified".yellow(),
            FileStatus::Unchanged => "unchanged".normal(),
            FileStatus::Missing => "missing".red(),
        };
        if status.is_changed() {
            changed += 1;
        }
        println!("  {:<10} {}", label, path);
    }

    println!();
    if changed == 0 {
        println!("{}", "Nothing to commit.".green());
    } else {
        println!(
            "Run {} to commit {} changed file(s)",
            "svcs commit \"message\"".cyan(),
            changed
        );
    }

    Ok(())
}
