//! SIRECOVIP API Server
//!
//! Municipal street-vendor registration and monitoring backend.
//! Identity, relational storage and object storage are delegated to a
//! hosted provider; this server is the validated HTTP surface in front
//! of it.
//!
//! # Module structure
//!
//! ```text
//! sirecovip-server/src/
//! ├── core/          # config, state, server
//! ├── provider/      # hosted-provider client (auth, tables, storage)
//! ├── auth/          # bearer-token middleware (verification delegated)
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod provider;
pub mod utils;

// Re-export public types
pub use auth::CurrentUser;
pub use core::{Config, Server, ServerState, build_router};
pub use provider::{ProviderClient, ProviderError};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   _____ _____ _____  ______ _____ ______      _______ _____
  / ____|_   _|  __ \|  ____/ ____/ __ \ \    / /_   _|  __ \
 | (___   | | | |__) | |__ | |   | |  | \ \  / /  | | | |__) |
  \___ \  | | |  _  /|  __|| |   | |  | |\ \/ /   | | |  ___/
  ____) |_| |_| | \ \| |___| |___| |__| | \  /   _| |_| |
 |_____/|_____|_|  \_\______\_____\____/   \/   |_____|_|
    "#
    );
}
