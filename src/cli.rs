use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fsweep",
    about = "Retention sweeper — archive or delete aged files from shared storage",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate every rule and report what a sweep would do (no deletion)
    Scan {
        /// Path to the rule-set document
        #[arg(long, default_value = "rules.json")]
        config: String,

        /// Root directory archive containers are written under
        #[arg(long, default_value = "/mnt/data/archive")]
        archive_root: String,

        /// Only evaluate rules in a specific group
        #[arg(long)]
        group: Option<String>,
    },

    /// Run the sweep (requires --confirm to actually modify the filesystem)
    Sweep {
        /// Actually archive and delete. Without this flag, behaves like scan.
        #[arg(long)]
        confirm: bool,

        /// Path to the rule-set document
        #[arg(long, default_value = "rules.json")]
        config: String,

        /// Root directory archive containers are written under
        #[arg(long, default_value = "/mnt/data/archive")]
        archive_root: String,

        /// Only evaluate rules in a specific group
        #[arg(long)]
        group: Option<String>,
    },
}
