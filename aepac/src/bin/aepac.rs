use aepac::{
    error::AuthenticationError,
    policy::{
        Builder as PolicyBuilder,
        DEFAULT_RESET_URL,
    },
    Policy,
};
use aepcore::{
    ac::{
        account::Account,
        traits::AccountBackend,
        Principal,
    },
    platform::ConnectorOption,
};
use aepdb_sqlite::SqliteBackend;
use clap::{
    Parser,
    Subcommand,
};

#[derive(Debug, Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(long, value_name = "AEPAC_DB_URL", env = "AEPAC_DB_URL")]
    aepac_db_url: String,
    #[clap(long, value_name = "AEPAC_RESET_URL", env = "AEPAC_RESET_URL", default_value = DEFAULT_RESET_URL)]
    aepac_reset_url: String,
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(arg_required_else_help = true)]
    Account {
        #[command(subcommand)]
        cmd: AccountCmd,
    },
    #[command(arg_required_else_help = true)]
    Role {
        #[command(subcommand)]
        cmd: RoleCmd,
    },
    #[command(arg_required_else_help = true)]
    SuperAdmin {
        #[command(subcommand)]
        cmd: SuperAdminCmd,
    },
    #[command(arg_required_else_help = true)]
    Password {
        #[command(subcommand)]
        cmd: PasswordCmd,
    },
    /// Evaluate a login for an account whose credentials were verified
    #[command(arg_required_else_help = true)]
    Login {
        name: String,
    },
}

#[derive(Debug, Subcommand)]
enum AccountCmd {
    #[command(arg_required_else_help = true)]
    Create {
        name: String,
    },
    #[command(arg_required_else_help = true)]
    Status {
        name: String,
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
enum RoleCmd {
    #[command(arg_required_else_help = true)]
    Grant {
        name: String,
        role: String,
    },
    #[command(arg_required_else_help = true)]
    Revoke {
        name: String,
        role: String,
    },
}

#[derive(Debug, Subcommand)]
enum SuperAdminCmd {
    #[command(arg_required_else_help = true)]
    Grant {
        name: String,
    },
    #[command(arg_required_else_help = true)]
    Revoke {
        name: String,
    },
}

#[derive(Debug, Subcommand)]
enum PasswordCmd {
    /// Record that the account's password was changed
    #[command(arg_required_else_help = true)]
    Changed {
        name: String,
        /// Timestamp of the change in seconds since the epoch; defaults to now
        #[arg(long)]
        at: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    stderrlog::new()
        .module(module_path!())
        .module("aepac")
        .module("aepdb_sqlite")
        .verbosity((args.verbose as usize) + 1)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;

    let backend = SqliteBackend::fp(
        ConnectorOption::from(args.aepac_db_url)
            .auto_create_db(true)
    ).await?;
    let policy = PolicyBuilder::new()
        .platform(backend.clone())
        .reset_url(args.aepac_reset_url)
        .build()?;

    match args.command {
        Commands::Account { cmd } => {
            parse_account(&backend, &policy, cmd).await?;
        },
        Commands::Role { cmd } => {
            parse_role(&backend, cmd).await?;
        },
        Commands::SuperAdmin { cmd } => {
            parse_super_admin(&backend, cmd).await?;
        },
        Commands::Password { cmd } => {
            parse_password(&backend, &policy, cmd).await?;
        },
        Commands::Login { name } => {
            let account = get_account(&backend, &name).await?;
            match policy.evaluate_login(Ok(Principal::Account(account))).await? {
                Ok(_) => println!("login permitted for {name}"),
                Err(AuthenticationError::PasswordExpired(expired)) => {
                    println!("login rejected for {name}: {expired}");
                }
                Err(e) => println!("login rejected for {name}: {e}"),
            }
        },
    }

    Ok(())
}

async fn get_account(
    backend: &SqliteBackend,
    name: &str,
) -> anyhow::Result<Account> {
    backend.get_account_by_name(name).await?
        .ok_or_else(|| anyhow::anyhow!("no such account: {name:?}"))
}

async fn parse_account(
    backend: &SqliteBackend,
    policy: &Policy,
    arg: AccountCmd,
) -> anyhow::Result<()> {
    match arg {
        AccountCmd::Create { name } => {
            let id = backend.add_account(&name).await?;
            println!("account {name:?} created with id {id}");
        }
        AccountCmd::Status { name, json } => {
            let account = get_account(backend, &name).await?;
            let privileged = policy.is_privileged(&account).await?;
            let status = policy.freshness_status(account.id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                    "account": account,
                    "privileged": privileged,
                    "freshness": status,
                }))?);
            } else {
                let roles = account.roles.iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("id: {}", account.id);
                println!("name: {}", account.name);
                println!("roles: [{roles}]");
                println!("privileged: {privileged}");
                println!("password: {status}");
            }
        }
    }
    Ok(())
}

async fn parse_role(
    backend: &SqliteBackend,
    arg: RoleCmd,
) -> anyhow::Result<()> {
    match arg {
        RoleCmd::Grant { name, role } => {
            let account = get_account(backend, &name).await?;
            if backend.grant_role_to_account(account.id, &role).await? {
                println!("role {role} granted to {name}");
            } else {
                println!("role {role} was already granted to {name}");
            }
        }
        RoleCmd::Revoke { name, role } => {
            let account = get_account(backend, &name).await?;
            if backend.revoke_role_from_account(account.id, &role).await? {
                println!("role {role} revoked from {name}");
            } else {
                println!("{name} has no role {role} to be revoked");
            }
        }
    }
    Ok(())
}

async fn parse_super_admin(
    backend: &SqliteBackend,
    arg: SuperAdminCmd,
) -> anyhow::Result<()> {
    match arg {
        SuperAdminCmd::Grant { name } => {
            let account = get_account(backend, &name).await?;
            if backend.set_super_admin(account.id, true).await? {
                println!("{name} is now a super-admin");
            } else {
                println!("{name} was already a super-admin");
            }
        }
        SuperAdminCmd::Revoke { name } => {
            let account = get_account(backend, &name).await?;
            if backend.set_super_admin(account.id, false).await? {
                println!("{name} is no longer a super-admin");
            } else {
                println!("{name} was not a super-admin");
            }
        }
    }
    Ok(())
}

async fn parse_password(
    backend: &SqliteBackend,
    policy: &Policy,
    arg: PasswordCmd,
) -> anyhow::Result<()> {
    match arg {
        PasswordCmd::Changed { name, at } => {
            let account = get_account(backend, &name).await?;
            let ts = policy.record_password_changed(account.id, at).await?;
            println!("recorded password change for {name} at {ts}");
        }
    }
    Ok(())
}
