use std::path::PathBuf;

use clap::{Parser, Subcommand};

use amber_genesis::{GenesisBuilder, GenesisConfig};
use amber_ledger::{Address, Amount};
use amber_rewards::{accrued_reward, MAX_REWARD_RATE_BPS};

/// Amber Ledger CLI
#[derive(Parser)]
#[command(name = "amber", version, about = "Amber staking ledger command-line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Genesis configuration commands
    Genesis {
        #[command(subcommand)]
        command: GenesisCommands,
    },

    /// Preview reward accrual for a stake
    Reward {
        /// Staked amount in whole tokens
        #[arg(long)]
        amount: u64,

        /// Annual reward rate in basis points (default: 500 = 5%)
        #[arg(long, default_value = "500")]
        rate_bps: u64,

        /// Accrual period in days
        #[arg(long)]
        days: u64,
    },

    /// Show ledger statistics for an initialized genesis
    Stats {
        /// Path to the genesis file
        #[arg(long, default_value = "genesis.json")]
        genesis: PathBuf,
    },

    /// Print version information
    Version,
}

#[derive(Subcommand)]
enum GenesisCommands {
    /// Generate a default genesis file
    Init {
        /// Ledger ID for the genesis
        #[arg(long)]
        ledger_id: String,

        /// Output path for the genesis JSON file
        #[arg(long, default_value = "genesis.json")]
        output: PathBuf,
    },

    /// Validate an existing genesis file
    Validate {
        /// Path to the genesis file
        #[arg(long)]
        path: PathBuf,
    },

    /// Add a funded account to an existing genesis file
    AddAccount {
        /// Path to the existing genesis file
        #[arg(long)]
        genesis: PathBuf,

        /// Account address (hex-encoded, 64 characters)
        #[arg(long)]
        address: String,

        /// Initial balance in whole tokens
        #[arg(long)]
        balance: u64,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Genesis { command } => match command {
            GenesisCommands::Init { ledger_id, output } => cmd_genesis_init(&ledger_id, output),
            GenesisCommands::Validate { path } => cmd_genesis_validate(path),
            GenesisCommands::AddAccount {
                genesis,
                address,
                balance,
            } => cmd_genesis_add_account(genesis, &address, balance),
        },
        Commands::Reward {
            amount,
            rate_bps,
            days,
        } => cmd_reward(amount, rate_bps, days),
        Commands::Stats { genesis } => cmd_stats(genesis),
        Commands::Version => cmd_version(),
    }
}

fn cmd_genesis_init(ledger_id: &str, output: PathBuf) {
    let devnet = GenesisConfig::default_devnet();
    let mut builder = GenesisBuilder::new(ledger_id)
        .with_genesis_time(devnet.genesis_time)
        .with_owner(devnet.owner)
        .with_params(devnet.params.clone())
        .with_vault_balance(devnet.vault_balance);
    for account in &devnet.accounts {
        builder = builder.with_account(account.address, account.balance);
    }

    let config = builder.build().unwrap_or_else(|e| {
        eprintln!("Error building genesis: {e}");
        std::process::exit(1);
    });

    config.to_file(&output).unwrap_or_else(|e| {
        eprintln!("Error writing genesis file: {e}");
        std::process::exit(1);
    });

    println!("Genesis file created: {}", output.display());
    println!("  Ledger ID: {}", config.ledger_id);
    println!("  Owner: {}", hex::encode(config.owner));
    println!("  Accounts: {}", config.accounts.len());
    println!("  Vault balance: {}", config.vault_balance);
    println!("  Genesis hash: {}", hex::encode(config.genesis_hash));
}

fn cmd_genesis_validate(path: PathBuf) {
    let config = GenesisConfig::from_file(&path).unwrap_or_else(|e| {
        eprintln!("Error reading genesis file: {e}");
        std::process::exit(1);
    });

    config.validate().unwrap_or_else(|e| {
        eprintln!("Genesis validation failed: {e}");
        std::process::exit(1);
    });

    println!("Genesis file is valid: {}", path.display());
    println!("  Ledger ID: {}", config.ledger_id);
    println!("  Genesis hash: {}", hex::encode(config.genesis_hash));
}

fn cmd_genesis_add_account(genesis_path: PathBuf, address_hex: &str, balance: u64) {
    let mut config = GenesisConfig::from_file(&genesis_path).unwrap_or_else(|e| {
        eprintln!("Error reading genesis file: {e}");
        std::process::exit(1);
    });

    let address = parse_address(address_hex);
    config.accounts.push(amber_genesis::GenesisAccount {
        address,
        balance: Amount::from_tokens(balance),
    });
    config.genesis_hash = config.compute_genesis_hash();

    config.validate().unwrap_or_else(|e| {
        eprintln!("Genesis validation failed: {e}");
        std::process::exit(1);
    });

    config.to_file(&genesis_path).unwrap_or_else(|e| {
        eprintln!("Error writing genesis file: {e}");
        std::process::exit(1);
    });

    println!("Added account {address_hex} with balance {balance}");
    println!("  Accounts: {}", config.accounts.len());
    println!("  New genesis hash: {}", hex::encode(config.genesis_hash));
}

fn cmd_reward(amount: u64, rate_bps: u64, days: u64) {
    if rate_bps > MAX_REWARD_RATE_BPS {
        eprintln!("Rate {rate_bps} bps exceeds the {MAX_REWARD_RATE_BPS} bps cap");
        std::process::exit(1);
    }

    let staked = Amount::from_tokens(amount);
    let elapsed = days * 24 * 3600;
    let reward = accrued_reward(staked, 1, 1 + elapsed, rate_bps).unwrap_or_else(|e| {
        eprintln!("Error computing reward: {e}");
        std::process::exit(1);
    });

    println!("Staking {staked} tokens at {rate_bps} bps for {days} days");
    println!("  Accrued reward: {reward} tokens");
}

fn cmd_stats(genesis_path: PathBuf) {
    let config = GenesisConfig::from_file(&genesis_path).unwrap_or_else(|e| {
        eprintln!("Error reading genesis file: {e}");
        std::process::exit(1);
    });

    let engine = config.initialize().unwrap_or_else(|e| {
        eprintln!("Error initializing ledger: {e}");
        std::process::exit(1);
    });

    let stats = engine.stats();
    println!("Ledger: {}", config.ledger_id);
    println!("  Total supply: {}", stats.total_supply);
    println!("  Total staked: {}", stats.total_staked);
    println!("  Reward rate: {} bps", stats.reward_rate_bps);
    println!("  Minimum stake: {}", stats.minimum_stake);
    println!("  Vault balance: {}", engine.ledger().vault_balance());
    println!("  Accounts: {}", engine.ledger().account_count());
}

fn cmd_version() {
    println!("amber {}", env!("CARGO_PKG_VERSION"));
}

fn parse_address(hex_str: &str) -> Address {
    let bytes = hex::decode(hex_str).unwrap_or_else(|e| {
        eprintln!("Invalid address hex: {e}");
        std::process::exit(1);
    });

    if bytes.len() != 32 {
        eprintln!(
            "Address must be 32 bytes (64 hex characters), got {}",
            bytes.len()
        );
        std::process::exit(1);
    }

    let mut address = [0u8; 32];
    address.copy_from_slice(&bytes);
    address
}
