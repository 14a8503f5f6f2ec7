//! Service binary: loads configuration, then serves the selected relay profile.

// crates.io
use clap::Parser;
// self
use oauth2_relay::{
	error::Result,
	service::{self, ServeArgs},
};

#[tokio::main]
async fn main() -> Result<()> {
	service::run(ServeArgs::parse()).await
}
