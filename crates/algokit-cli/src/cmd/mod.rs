/// Command module for the `algokit` CLI.
///
/// Each submodule implements one subcommand. The `run` function in each
/// module takes the input text and parsed arguments and returns `Ok(())` on
/// success or a [`crate::error::CliError`] on failure.
pub mod symbol_table;
pub mod union_find;
