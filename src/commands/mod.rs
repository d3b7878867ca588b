//! Per-subcommand handlers.
//!
//! Printing happens here; the core modules return warnings and results
//! instead of writing to the terminal themselves.

mod add;
mod checkout;
mod init;
mod rm;
mod run;

pub use add::handle_add_command;
pub use checkout::handle_checkout_command;
pub use init::handle_init_command;
pub use rm::handle_rm_command;
pub use run::handle_do_command;
