use anyhow::Result;
use clap::Args;
use dreamdiary_core::model::Role;

use crate::output::format::format_roles;
use crate::output::OutputFormat;

#[derive(Args)]
pub struct RolesArgs {
    /// Only show this role
    #[arg(long)]
    pub role: Option<Role>,
}

pub fn run(args: &RolesArgs, format: OutputFormat) -> Result<()> {
    let roles: Vec<Role> = match args.role {
        Some(role) => vec![role],
        None => Role::ALL.to_vec(),
    };
    print!("{}", format_roles(&roles, format));
    Ok(())
}
