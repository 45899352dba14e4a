use anyhow::Result;
use colored::Colorize;
use svcs_core::Repository;

pub fn run(repo: &Repository, limit: Option<usize>, json: bool) -> Result<()> {
    if !json {
        print!("{}", repo.render_log(limit)?);
        return Ok(());
    }

    if !repo.has_commits()? {
        println!("{}", "No commits yet.".yellow());
        return Ok(());
    }

    let history = repo.history()?;
    let to_show = limit.unwrap_or(history.len()).min(history.len());
    println!("{}", serde_json::to_string_pretty(&history[..to_show])?);

    Ok(())
}
