use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum Neighbor {
    /// Print the neighbor table
    Table,
}
