//! Local static file server for a generated app
//!
//! Design: blocking HTTP microserver (no async runtime), one thread per
//! connection, GET/HEAD only. Runs until the process is terminated.

mod internal;
mod microserver;

use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::sync::Arc;

use crate::config::DEFAULT_PORT;
use crate::error::{Result, ScaffoldError};

/// Options for the static server
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Host to bind to
    pub host: String,
    /// Port to bind to (default: 8000)
    pub port: u16,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Bind the listener described by `options`
pub fn bind(options: &ServeOptions) -> Result<TcpListener> {
    let addr = format!("{}:{}", options.host, options.port);
    TcpListener::bind(&addr).map_err(|e| ScaffoldError::Server { addr, source: e })
}

/// Serve `root` on an already bound listener. Blocks forever.
pub fn serve(listener: TcpListener, root: &Path) -> Result<()> {
    let addr = listener.local_addr().map_err(|e| ScaffoldError::Server {
        addr: "unbound listener".to_string(),
        source: e,
    })?;
    tracing::info!(root = %root.display(), %addr, "serving");

    internal::accept_loop(listener, Arc::new(root.to_path_buf()));
    Ok(())
}

/// Bind and serve `root`, printing where to find it
pub fn execute(root: &Path, options: &ServeOptions) -> Result<()> {
    let listener = bind(options)?;
    if let Ok(addr) = listener.local_addr() {
        print_banner(root, addr);
    }
    serve(listener, root)
}

fn print_banner(root: &Path, addr: SocketAddr) {
    println!("\n🚀 Serving {}", root.display());
    println!("   Open http://{}/", addr);
    println!("   Press Ctrl+C to stop\n");
}
