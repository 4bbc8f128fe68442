mod args;
mod fetch;
mod params;
mod resolve;
mod resolved_command;
mod verify;

pub use args::{Args, Command, parse_args};
pub use fetch::run_fetch;
pub use params::{FetchParams, ResolveParams, VerifyParams};
pub use resolve::run_resolve;
pub use resolved_command::{ResolvedCommand, resolve_command};
pub use verify::run_verify;
