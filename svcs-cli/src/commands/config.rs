use anyhow::Result;
use colored::Colorize;
use svcs_core::Repository;

pub fn run(repo: &Repository, name: Option<String>) -> Result<()> {
    let username = match name {
        Some(name) => match super::report(repo.set_username(&name))? {
            Some(stored) => Some(stored),
            None => return Ok(()),
        },
        None => repo.username()?,
    };

    match username {
        Some(username) => println!("The username is {}.", username.bold()),
        None => println!("{}", "Please, tell me who you are.".yellow()),
    }

    Ok(())
}
